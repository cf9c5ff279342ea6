//! Data models for Lectern entities

pub mod book;
pub mod borrow;
pub mod user;

pub use book::{Book, BookQuery, CreateBook, UpdateBook};
pub use borrow::{BorrowRecord, BorrowRecordDetails, BorrowStatus};
pub use user::{CreateUser, Role, User, UserClaims};
