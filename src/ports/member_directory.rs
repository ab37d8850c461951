use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 会員名簿のエントリ
///
/// 貸出フォームの選択リスト表示にのみ使われる読み取り専用データ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: String,
    pub name: String,
}

/// 会員名簿ポート
///
/// 会員管理は外部コンテキストの責務。貸出コーディネーターは
/// 名簿を参照しない（会員資格の検証は空でないことの確認まで）。
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// 選択リスト用の会員一覧を返す
    async fn list_members(&self) -> Result<Vec<Member>>;
}
