//! HTTP response types.

use chrono::{DateTime, Utc};
use entities::Category;
use serde::{Deserialize, Serialize};

// ============================================================================
// Auth Responses
// ============================================================================

/// Returned by sign-up and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Book Responses
// ============================================================================

/// A book as exposed over HTTP. Identifiers are hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub user: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub price: f64,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&entities::Book> for Book {
    fn from(book: &entities::Book) -> Self {
        Self {
            id: book.id.to_hex(),
            user: book.user.to_hex(),
            title: book.title.clone(),
            description: book.description.clone(),
            author: book.author.clone(),
            price: book.price,
            category: book.category,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

impl From<entities::Book> for Book {
    fn from(book: entities::Book) -> Self {
        Self::from(&book)
    }
}

/// Acknowledgment of a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteBookResponse {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use entities::ObjectId;

    use super::*;

    #[test]
    fn test_book_conversion_renders_hex_ids() {
        let owner = ObjectId::parse_str("61c0ccf11d7bf83d153d7c06").unwrap();
        let entity = entities::Book::new(
            owner,
            "New Book",
            "Book Description",
            "Author",
            100.0,
            Category::Fantasy,
        );

        let book = Book::from(&entity);
        assert_eq!(book.user, "61c0ccf11d7bf83d153d7c06");
        assert_eq!(book.id, entity.id.to_hex());

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["category"], "Fantasy");
        assert_eq!(json["price"], 100.0);
    }
}
