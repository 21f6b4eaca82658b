//! Data models for the Elidune store

pub mod book;
pub mod rental;
pub mod student;

// Re-export commonly used types
pub use book::{AddBookOutcome, Book, BookId, NewBook, RemoveBookOutcome};
pub use rental::{RentOutcome, RentalKey, RentalLine, RentedBook, ReturnOutcome, StudentRentals};
pub use student::{NewStudent, Student};

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::error::{AppError, AppResult};

/// Characters that would break the one-record-per-line file format
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\r\n]").expect("valid regex"));

/// Reject a field that cannot be stored in a comma-separated line
pub fn ensure_storable(field: &str, value: &str) -> AppResult<()> {
    if SEPARATORS.is_match(value) {
        return Err(AppError::Validation(format!(
            "{} must not contain commas or line breaks",
            field
        )));
    }
    Ok(())
}

/// `validator` hook for request structs
pub(crate) fn validate_storable(value: &str) -> Result<(), ValidationError> {
    if SEPARATORS.is_match(value) {
        let mut err = ValidationError::new("separator");
        err.message = Some("Fields must not contain commas or line breaks".into());
        return Err(err);
    }
    Ok(())
}
