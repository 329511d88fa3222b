//! Request validation.
//!
//! Field rules on auth bodies are declared with `validator` attributes. Book
//! bodies reuse the entity rules so that the HTTP layer and the stored
//! documents agree on what a valid book is.

use std::borrow::Cow;

use entities::{EntityError, EntityResult};
pub use validator::{Validate, ValidationError, ValidationErrors};

/// Field an entity rule violation is reported under.
fn entity_field(error: &EntityError) -> &'static str {
    match error {
        EntityError::EmptyField { field } => field,
        EntityError::InvalidPrice => "price",
        EntityError::EmptyUpdate => "body",
    }
}

/// Records a failed entity rule in `errors`.
pub(crate) fn add_entity_error(errors: &mut ValidationErrors, result: EntityResult<()>) {
    if let Err(e) = result {
        let mut error = ValidationError::new("entity");
        error.message = Some(Cow::Owned(e.to_string()));
        errors.add(entity_field(&e), error);
    }
}

/// Joins the messages of every failed rule, ordered for stable output.
pub fn error_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
