pub mod member_directory;

pub use member_directory::FixedMemberDirectory;
