//! Authentication primitives for Bookshelf.
//!
//! This crate provides:
//! - JWT access token generation and validation
//! - bcrypt password hashing and verification

mod error;
mod jwt;
mod password;

pub use error::*;
pub use jwt::*;
pub use password::*;

/// Default JWT expiration time in hours.
pub const DEFAULT_JWT_EXPIRATION_HOURS: u64 = 72;

/// Default JWT issuer.
pub const DEFAULT_JWT_ISSUER: &str = "bookshelf";

/// bcrypt cost factor used for stored passwords.
pub const PASSWORD_HASH_COST: u32 = 10;
