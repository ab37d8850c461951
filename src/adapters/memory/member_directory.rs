use crate::ports::member_directory::{Member, MemberDirectory, Result};
use async_trait::async_trait;

/// Fixed in-memory implementation of MemberDirectory
///
/// The member context lives outside this system; until a real directory
/// is wired in, the borrow form is populated from this fixed roster.
pub struct FixedMemberDirectory {
    members: Vec<Member>,
}

impl FixedMemberDirectory {
    pub fn new() -> Self {
        let members = [
            ("M001", "Alice Johnson"),
            ("M002", "Bob Smith"),
            ("M003", "Carol Williams"),
            ("M004", "David Brown"),
            ("M005", "Emma Davis"),
        ]
        .into_iter()
        .map(|(id, name)| Member {
            member_id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

        Self { members }
    }

    /// Build a directory with a caller-supplied roster (used in tests)
    pub fn with_members(members: Vec<Member>) -> Self {
        Self { members }
    }
}

impl Default for FixedMemberDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberDirectory for FixedMemberDirectory {
    async fn list_members(&self) -> Result<Vec<Member>> {
        Ok(self.members.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_roster_is_not_empty() {
        let directory = FixedMemberDirectory::new();
        let members = directory.list_members().await.unwrap();
        assert!(!members.is_empty());
        assert_eq!(members[0].member_id, "M001");
    }

    #[tokio::test]
    async fn test_with_members_overrides_roster() {
        let directory = FixedMemberDirectory::with_members(vec![Member {
            member_id: "M9".to_string(),
            name: "Test".to_string(),
        }]);
        let members = directory.list_members().await.unwrap();
        assert_eq!(members.len(), 1);
    }
}
