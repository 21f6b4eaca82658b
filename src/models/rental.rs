//! Rental (loan) model and related types

use super::book::{Book, BookId};

/// Placeholder shown for a rented book that is no longer in the catalog
pub const UNKNOWN_TITLE: &str = "Unknown";

/// The student pair a rental set is filed under.
///
/// The name is the one supplied when the loan was made, so it can drift from
/// the student table if that record is later deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RentalKey {
    pub student_name: String,
    pub student_id: String,
}

impl RentalKey {
    pub fn new(student_name: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            student_id: student_id.into(),
        }
    }
}

/// Result of a rent request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentOutcome {
    /// One copy left the shelf; `book.quantity` is the remaining stock
    Rented { key: RentalKey, book: Book },
    /// The pair already holds this book, nothing changed
    AlreadyHeld { key: RentalKey, book: Book },
}

/// Result of a return request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// The copy is back on the shelf
    Restocked { key: RentalKey, book: Book },
    /// The loan was cleared but the book has been deleted from the catalog
    BookMissing { key: RentalKey, book_id: BookId },
}

/// A rented book resolved against the catalog for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentedBook {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub quantity: u32,
}

impl RentedBook {
    pub fn resolve(book_id: BookId, book: Option<&Book>) -> Self {
        match book {
            Some(book) => Self {
                book_id,
                title: book.title.clone(),
                author: book.author.clone(),
                quantity: book.quantity,
            },
            None => Self {
                book_id,
                title: UNKNOWN_TITLE.to_string(),
                author: UNKNOWN_TITLE.to_string(),
                quantity: 0,
            },
        }
    }
}

/// Every book on loan to one student pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRentals {
    pub key: RentalKey,
    pub books: Vec<RentedBook>,
}

/// One (student, book) loan, as listed across the whole table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalLine {
    /// Current name from the student table, or the name on the rental key
    pub student_name: String,
    pub student_id: String,
    pub book_id: BookId,
    pub book_title: String,
}
