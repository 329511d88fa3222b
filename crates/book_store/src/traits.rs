//! Book store trait definitions.

use async_trait::async_trait;
use entities::{Book, BookUpdate, ObjectId, User};

use crate::{StoreResult, BOOKS_PER_PAGE};

/// Filter options for listing books.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Case-insensitive substring matched against the title, taken literally.
    pub keyword: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u64>,
    /// Number of matching books to skip.
    pub skip: Option<u64>,
}

impl BookFilter {
    /// Builds the filter for a 1-based page of [`BOOKS_PER_PAGE`] books.
    ///
    /// Page 0 is treated as page 1. A blank keyword means no filter. Pages
    /// past the addressable range skip everything and come back empty.
    pub fn page(page: u64, keyword: Option<String>) -> Self {
        Self {
            keyword: keyword.filter(|k| !k.trim().is_empty()),
            limit: Some(BOOKS_PER_PAGE),
            skip: Some(page.saturating_sub(1).saturating_mul(BOOKS_PER_PAGE)),
        }
    }
}

/// Trait for user and book storage operations.
#[async_trait]
pub trait BookStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user. Fails with `AlreadyExists` if the email is taken.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: ObjectId) -> StoreResult<Option<User>>;

    /// Gets a user by email.
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // =========================================================================
    // Book operations
    // =========================================================================

    /// Creates a new book.
    async fn create_book(&self, book: Book) -> StoreResult<Book>;

    /// Gets a book by ID.
    async fn get_book(&self, id: ObjectId) -> StoreResult<Option<Book>>;

    /// Lists books matching the filter, in ID order.
    async fn list_books(&self, filter: BookFilter) -> StoreResult<Vec<Book>>;

    /// Applies a partial update and returns the book as stored afterwards.
    async fn update_book(&self, id: ObjectId, update: BookUpdate) -> StoreResult<Option<Book>>;

    /// Deletes a book and returns it.
    async fn delete_book(&self, id: ObjectId) -> StoreResult<Option<Book>>;
}
