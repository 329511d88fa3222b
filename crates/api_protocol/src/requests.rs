//! HTTP request types.

use entities::{validate_price, validate_text, BookUpdate, Category};
use serde::{Deserialize, Serialize};

use crate::validation::*;

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Please enter a correct email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a correct email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

// ============================================================================
// Book Requests
// ============================================================================

/// Query string of the book listing.
///
/// `page` stays a string so that an unparsable value falls back to page 1
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBooksQuery {
    pub page: Option<String>,
    pub keyword: Option<String>,
}

impl ListBooksQuery {
    /// Returns the requested 1-based page, defaulting to 1.
    pub fn page_number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }
}

/// Body of a book creation. The owner comes from the bearer token, never
/// from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBookRequest {
    pub title: String,
    pub description: String,
    pub author: String,
    pub price: f64,
    pub category: Category,
}

impl Validate for CreateBookRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        add_entity_error(&mut errors, validate_text("title", &self.title));
        add_entity_error(&mut errors, validate_text("description", &self.description));
        add_entity_error(&mut errors, validate_text("author", &self.author));
        add_entity_error(&mut errors, validate_price(self.price));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
}

impl Validate for UpdateBookRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        add_entity_error(&mut errors, BookUpdate::from(self.clone()).validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<UpdateBookRequest> for BookUpdate {
    fn from(request: UpdateBookRequest) -> Self {
        BookUpdate {
            title: request.title,
            description: request.description,
            author: request.author,
            price: request.price,
            category: request.category,
        }
    }
}
