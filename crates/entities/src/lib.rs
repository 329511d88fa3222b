//! Core entity definitions for Bookshelf.
//!
//! This crate defines the documents persisted by the book store: users and
//! the books they own, together with the field rules every write must obey.

mod book;
mod error;
mod user;

pub use book::*;
pub use error::*;
pub use user::*;

/// Re-exported so downstream crates name the same identifier type.
pub use bson::oid::ObjectId;
