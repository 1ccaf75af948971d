//! Field rules for create and update payloads.

use bookstore_http::AppError;
use serde::Serialize;
use thiserror::Error;

use super::models::{BookPayload, NewBook};

/// Minimum number of characters in `title` and `author`
pub const MIN_TEXT_LEN: usize = 2;
/// Quantity applied when a payload omits it
pub const DEFAULT_QUANTITY: i64 = 1;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: String,
}

/// Every rule violation found in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("book payload failed validation on {}", field_names(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn field_names(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors.to_string();
        let details = errors
            .errors
            .iter()
            .map(|e| serde_json::json!({ "field": e.field, "error": e.error }))
            .collect();
        AppError::validation(details, message)
    }
}

fn check_text(field: &'static str, value: Option<String>, errors: &mut Vec<FieldError>) -> String {
    match value {
        None => {
            errors.push(FieldError {
                field,
                error: "field required".to_string(),
            });
            String::new()
        }
        Some(text) => {
            if text.chars().count() < MIN_TEXT_LEN {
                errors.push(FieldError {
                    field,
                    error: format!("must be at least {} characters", MIN_TEXT_LEN),
                });
            }
            text
        }
    }
}

impl BookPayload {
    /// Check every field and produce the values to store.
    ///
    /// All violations are collected rather than stopping at the first one.
    pub fn validate(self) -> Result<NewBook, ValidationErrors> {
        let mut errors = Vec::new();

        let title = check_text("title", self.title, &mut errors);
        let author = check_text("author", self.author, &mut errors);

        let price = match self.price {
            None => {
                errors.push(FieldError {
                    field: "price",
                    error: "field required".to_string(),
                });
                0.0
            }
            Some(price) if !price.is_finite() || price <= 0.0 => {
                errors.push(FieldError {
                    field: "price",
                    error: "must be greater than 0".to_string(),
                });
                price
            }
            Some(price) => price,
        };

        let quantity = match self.quantity {
            None => DEFAULT_QUANTITY,
            Some(None) => {
                errors.push(FieldError {
                    field: "quantity",
                    error: "must be an integer, not null".to_string(),
                });
                DEFAULT_QUANTITY
            }
            Some(Some(quantity)) if quantity < 0 => {
                errors.push(FieldError {
                    field: "quantity",
                    error: "must be greater than or equal to 0".to_string(),
                });
                quantity
            }
            Some(Some(quantity)) => quantity,
        };

        if !errors.is_empty() {
            return Err(ValidationErrors { errors });
        }

        Ok(NewBook {
            title,
            author,
            price,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, author: &str, price: f64, quantity: Option<i64>) -> BookPayload {
        BookPayload {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            price: Some(price),
            quantity: quantity.map(Some),
        }
    }

    #[test]
    fn accepts_valid_payload_and_defaults_quantity() {
        let book = payload("Go in Action", "W. Kennedy", 39.99, None)
            .validate()
            .unwrap();

        assert_eq!(book.title, "Go in Action");
        assert_eq!(book.author, "W. Kennedy");
        assert_eq!(book.price, 39.99);
        assert_eq!(book.quantity, DEFAULT_QUANTITY);
    }

    #[test]
    fn zero_quantity_is_allowed() {
        let book = payload("Go", "Al", 1.0, Some(0)).validate().unwrap();
        assert_eq!(book.quantity, 0);
    }

    #[test]
    fn short_text_fields_are_rejected() {
        let err = payload("G", "A", 10.0, None).validate().unwrap_err();
        assert_eq!(err.fields(), vec!["title", "author"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // One character, two bytes
        let err = payload("é", "Jo", 10.0, None).validate().unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);

        assert!(payload("éé", "Jo", 10.0, None).validate().is_ok());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        for price in [0.0, -1.5, f64::NAN] {
            let err = payload("Title", "Author", price, None).validate().unwrap_err();
            assert_eq!(err.fields(), vec!["price"]);
        }
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = payload("Title", "Author", 5.0, Some(-1)).validate().unwrap_err();
        assert_eq!(err.fields(), vec!["quantity"]);
    }

    #[test]
    fn null_quantity_is_rejected() {
        let mut body = payload("Title", "Author", 5.0, None);
        body.quantity = Some(None);

        let err = body.validate().unwrap_err();
        assert_eq!(err.fields(), vec!["quantity"]);
    }

    #[test]
    fn nul_characters_count_toward_length() {
        let book = payload("A\u{0}", "Author", 5.0, None).validate().unwrap();
        assert_eq!(book.title.chars().count(), 2);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let err = BookPayload::default().validate().unwrap_err();
        assert_eq!(err.fields(), vec!["title", "author", "price"]);
        assert_eq!(err.errors[0].error, "field required");
        assert_eq!(
            err.to_string(),
            "book payload failed validation on title, author, price"
        );
    }

    #[test]
    fn converts_into_unprocessable_entity() {
        let err = payload("T", "Author", 5.0, None).validate().unwrap_err();
        let app_error = AppError::from(err);
        assert_eq!(app_error.status(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }
}
