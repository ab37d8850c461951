pub mod book_source;
pub mod member_directory;

pub use book_source::*;
pub use member_directory::*;
