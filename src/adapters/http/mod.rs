pub mod book_source;

pub use book_source::RemoteBookSource;
