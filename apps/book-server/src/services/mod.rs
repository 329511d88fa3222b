//! Business logic behind the HTTP handlers.

mod auth_service;
mod book_service;

pub use auth_service::AuthService;
pub use book_service::BookService;
