//! HTTP protocol definitions for Bookshelf
//!
//! This crate defines the JSON bodies exchanged between the Bookshelf server
//! and its clients, the validation rules applied to incoming requests, and
//! the error envelope returned on failure.

mod error;
mod validation;

pub mod requests;
pub mod responses;

pub use error::*;
pub use validation::*;
