//! Data models for the bookstore catalog

pub mod author;
pub mod book;
pub mod section;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDraft, Wrote};
pub use section::Section;
pub use user::{Role, UserClaims};
