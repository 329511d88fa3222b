//! Book-related entity definitions.

use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EntityError, EntityResult};

/// Shelf category of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Adventure,
    Classics,
    Crime,
    Fantasy,
}

/// A book owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Owning user. Set once at creation.
    pub user: ObjectId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub price: f64,
    pub category: Category,
    /// When this record was created.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Creates a new book owned by `user`.
    pub fn new(
        user: ObjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        price: f64,
        category: Category,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            user,
            title: title.into(),
            description: description.into(),
            author: author.into(),
            price,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks every field rule.
    pub fn validate(&self) -> EntityResult<()> {
        validate_text("title", &self.title)?;
        validate_text("description", &self.description)?;
        validate_text("author", &self.author)?;
        validate_price(self.price)
    }

    /// Applies a partial update in place and bumps `updated_at`.
    ///
    /// The owner is not part of [`BookUpdate`] and is never touched.
    pub fn apply(&mut self, update: &BookUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(author) = &update.author {
            self.author = author.clone();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        self.updated_at = Utc::now();
    }
}

/// A partial update of a book's mutable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
}

impl BookUpdate {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.author.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }

    /// Checks the rules of every supplied field.
    pub fn validate(&self) -> EntityResult<()> {
        if self.is_empty() {
            return Err(EntityError::EmptyUpdate);
        }
        if let Some(title) = &self.title {
            validate_text("title", title)?;
        }
        if let Some(description) = &self.description {
            validate_text("description", description)?;
        }
        if let Some(author) = &self.author {
            validate_text("author", author)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Rejects empty or whitespace-only text.
pub fn validate_text(field: &'static str, value: &str) -> EntityResult<()> {
    if value.trim().is_empty() {
        return Err(EntityError::EmptyField { field });
    }
    Ok(())
}

/// Rejects negative, infinite and NaN prices.
pub fn validate_price(price: f64) -> EntityResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(EntityError::InvalidPrice);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book::new(
            ObjectId::new(),
            "New Book",
            "Book Description",
            "Author",
            100.0,
            Category::Fantasy,
        )
    }

    #[test]
    fn test_book_creation() {
        let owner = ObjectId::new();
        let book = Book::new(
            owner,
            "New Book",
            "Book Description",
            "Author",
            100.0,
            Category::Fantasy,
        );

        assert_eq!(book.user, owner);
        assert_eq!(book.category, Category::Fantasy);
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_apply_keeps_owner_and_untouched_fields() {
        let mut book = sample_book();
        let owner = book.user;
        let before = book.updated_at;

        book.apply(&BookUpdate {
            title: Some("Updated name".to_string()),
            ..Default::default()
        });

        assert_eq!(book.title, "Updated name");
        assert_eq!(book.author, "Author");
        assert_eq!(book.user, owner);
        assert!(book.updated_at >= before);
    }

    #[test]
    fn test_validation_rejects_blank_and_negative() {
        let mut book = sample_book();
        book.title = "   ".to_string();
        assert_eq!(
            book.validate(),
            Err(EntityError::EmptyField { field: "title" })
        );

        let mut book = sample_book();
        book.price = -1.0;
        assert_eq!(book.validate(), Err(EntityError::InvalidPrice));

        assert_eq!(validate_price(f64::NAN), Err(EntityError::InvalidPrice));
    }

    #[test]
    fn test_update_validation() {
        assert_eq!(BookUpdate::default().validate(), Err(EntityError::EmptyUpdate));

        let update = BookUpdate {
            author: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            update.validate(),
            Err(EntityError::EmptyField { field: "author" })
        );

        let update = BookUpdate {
            price: Some(0.0),
            category: Some(Category::Crime),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Fantasy).unwrap();
        assert_eq!(json, "\"Fantasy\"");

        let parsed: Category = serde_json::from_str("\"Classics\"").unwrap();
        assert_eq!(parsed, Category::Classics);
        assert!(serde_json::from_str::<Category>("\"Poetry\"").is_err());
    }
}
