//! Book (catalog entry) model and related types

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError};

use super::validate_storable;

/// Numeric catalog identifier, assigned by the store
pub type BookId = u32;

/// One catalog title and its shelf stock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Copies currently on the shelf (not on loan)
    pub quantity: u32,
}

/// Letters, hyphens and spaces, with at least one letter
static AUTHOR_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L} -]*\p{L}[\p{L} -]*$").expect("valid regex"));

fn validate_author(value: &str) -> Result<(), ValidationError> {
    if !AUTHOR_NAME.is_match(value.trim()) {
        let mut err = ValidationError::new("author");
        err.message = Some(
            concat!(
                "Author name should only contain alphabetic characters, ",
                "hyphens, and spaces between words"
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

/// Add book request, as collected by the menu
#[derive(Debug, Clone, Validate)]
pub struct NewBook {
    #[validate(custom(function = "validate_storable"))]
    pub title: String,
    #[validate(custom(function = "validate_author"))]
    pub author: String,
    pub quantity: u32,
}

/// Result of adding copies of a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddBookOutcome {
    /// A new record was created
    Created(Book),
    /// The title already existed; its quantity now holds the new total
    Restocked(Book),
}

impl AddBookOutcome {
    pub fn book(&self) -> &Book {
        match self {
            AddBookOutcome::Created(book) | AddBookOutcome::Restocked(book) => book,
        }
    }
}

/// Result of removing copies of a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveBookOutcome {
    /// Every copy was removed and the record deleted
    Deleted(Book),
    /// Some copies remain
    Reduced { book: Book, removed: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(author: &str) -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author: author.to_string(),
            quantity: 1,
        }
    }

    #[test]
    fn test_author_validation() {
        assert!(request("Frank Herbert").validate().is_ok());
        assert!(request("Jean-Paul Sartre").validate().is_ok());
        assert!(request("  Émile Zola ").validate().is_ok());
        assert!(request("R2D2").validate().is_err());
        assert!(request("J.R.R. Tolkien").validate().is_err());
        assert!(request(" - ").validate().is_err());
        assert!(request("").validate().is_err());
    }

    #[test]
    fn test_title_separator_rejected() {
        let mut book = request("Herbert");
        book.title = "Dune, part one".to_string();
        assert!(book.validate().is_err());
    }
}
