//! Catalog management: adding, removing and looking up books

use super::Library;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{AddBookOutcome, Book, BookId, RemoveBookOutcome},
        ensure_storable,
    },
};

impl Library {
    /// Add `quantity` copies of a title.
    ///
    /// A title already in the catalog (compared case-insensitively) is
    /// restocked under its existing ID; otherwise a new record is created
    /// under the next unused ID.
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        quantity: u32,
    ) -> AppResult<AddBookOutcome> {
        let title = title.trim();
        let author = author.trim();
        ensure_storable("Title", title)?;
        ensure_storable("Author", author)?;

        let books = &mut self.repository.books;

        let outcome = if let Some(existing) = books.find_by_title(title).map(|b| b.id) {
            let book = books.get_mut(existing).ok_or_else(|| {
                AppError::book_not_found(format!(
                    "Book with ID '{}' not found in the library.",
                    existing
                ))
            })?;
            book.quantity = book.quantity.checked_add(quantity).ok_or_else(|| {
                AppError::InvalidQuantity(format!(
                    "Quantity of book '{}' would overflow",
                    book.title
                ))
            })?;
            tracing::info!(
                "Catalog add: restocked '{}' (id={}) by {} to {}",
                book.title,
                book.id,
                quantity,
                book.quantity
            );
            AddBookOutcome::Restocked(book.clone())
        } else {
            let book = books.insert(title.to_string(), author.to_string(), quantity)?;
            tracing::info!(
                "Catalog add: created '{}' by {} (id={}) with quantity {}",
                book.title,
                book.author,
                book.id,
                book.quantity
            );
            AddBookOutcome::Created(book.clone())
        };

        books.save()?;
        Ok(outcome)
    }

    /// Remove `quantity` copies of a book; removing every copy deletes it
    pub fn remove_book(&mut self, id: BookId, quantity: u32) -> AppResult<RemoveBookOutcome> {
        let books = &mut self.repository.books;
        let book = books
            .get_mut(id)
            .ok_or_else(|| AppError::book_not_found("Book not found in the library."))?;

        if quantity == 0 || quantity > book.quantity {
            return Err(AppError::InvalidQuantity(format!(
                "Cannot remove {} copies of '{}' (currently {})",
                quantity, book.title, book.quantity
            )));
        }

        let outcome = if quantity == book.quantity {
            let removed = books
                .remove(id)
                .ok_or_else(|| AppError::book_not_found("Book not found in the library."))?;
            tracing::info!("Catalog remove: deleted '{}' (id={})", removed.title, id);
            RemoveBookOutcome::Deleted(removed)
        } else {
            book.quantity -= quantity;
            tracing::info!(
                "Catalog remove: {} copies of '{}' (id={}), {} left",
                quantity,
                book.title,
                id,
                book.quantity
            );
            RemoveBookOutcome::Reduced {
                book: book.clone(),
                removed: quantity,
            }
        };

        books.save()?;
        Ok(outcome)
    }

    /// Look up a book by ID
    pub fn find_book(&self, id: BookId) -> AppResult<&Book> {
        tracing::debug!("Catalog lookup: id={}", id);
        self.repository
            .books
            .get(id)
            .ok_or_else(|| AppError::book_not_found("Book not found in the library."))
    }

    /// Every book, by ascending ID
    pub fn list_books(&self) -> Vec<&Book> {
        self.repository.books.iter().collect()
    }
}
