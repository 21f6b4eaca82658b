//! Loan management service: the operations that touch books and rentals together

use super::Library;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookId,
        ensure_storable,
        rental::{
            RentOutcome, RentalKey, RentalLine, RentedBook, ReturnOutcome, StudentRentals,
            UNKNOWN_TITLE,
        },
    },
};

impl Library {
    /// Lend one copy of `book_id` to the student pair `(name, id)`.
    ///
    /// Both the book and the student ID must exist and the book must have a
    /// copy on the shelf. Asking again for a book the pair already holds
    /// changes nothing.
    pub fn rent(&mut self, name: &str, id: &str, book_id: BookId) -> AppResult<RentOutcome> {
        let name = name.trim();
        let id = id.trim();
        ensure_storable("Student name", name)?;

        let repo = &mut self.repository;
        let book = repo.books.get(book_id).ok_or_else(|| {
            AppError::book_not_found(format!(
                "Book with ID '{}' not found in the library.",
                book_id
            ))
        })?;

        if !repo.students.contains(id) {
            return Err(AppError::student_not_found("Student not found in the database."));
        }

        if book.quantity == 0 {
            return Err(AppError::OutOfStock(format!(
                "Book '{}' with ID '{}' is out of stock.",
                book.title, book_id
            )));
        }

        let key = RentalKey::new(name, id);
        if repo.rentals.holds(&key, book_id) {
            tracing::debug!(
                "Loan: '{}' (id={}) already holds book {}",
                key.student_name,
                key.student_id,
                book_id
            );
            return Ok(RentOutcome::AlreadyHeld {
                key,
                book: book.clone(),
            });
        }

        repo.rentals.add(key.clone(), book_id);
        let book = repo.books.get_mut(book_id).ok_or_else(|| {
            AppError::book_not_found(format!(
                "Book with ID '{}' not found in the library.",
                book_id
            ))
        })?;
        book.quantity -= 1;
        let book = book.clone();

        repo.rentals.save()?;
        repo.books.save()?;

        tracing::info!(
            "Loan: book '{}' (id={}) rented to '{}' (id={}), {} left",
            book.title,
            book_id,
            key.student_name,
            key.student_id,
            book.quantity
        );
        Ok(RentOutcome::Rented { key, book })
    }

    /// Take back `book_id` from the student pair `(name, id)`.
    ///
    /// The loan is cleared even when the book has since been deleted from the
    /// catalog; in that case no stock is restored.
    pub fn return_book(
        &mut self,
        name: &str,
        id: &str,
        book_id: BookId,
    ) -> AppResult<ReturnOutcome> {
        let key = RentalKey::new(name.trim(), id.trim());

        let repo = &mut self.repository;
        if !repo.rentals.remove(&key, book_id) {
            return Err(AppError::rental_not_found(
                "No matching rental found for the provided student and book details.",
            ));
        }

        let Some(book) = repo.books.get_mut(book_id) else {
            repo.rentals.save()?;
            tracing::warn!(
                "Return: book {} from '{}' (id={}) is no longer in the catalog, not restocked",
                book_id,
                key.student_name,
                key.student_id
            );
            return Ok(ReturnOutcome::BookMissing { key, book_id });
        };

        book.quantity = book.quantity.saturating_add(1);
        let book = book.clone();

        repo.rentals.save()?;
        repo.books.save()?;

        tracing::info!(
            "Return: book '{}' (id={}) returned by '{}' (id={}), {} on shelf",
            book.title,
            book_id,
            key.student_name,
            key.student_id,
            book.quantity
        );
        Ok(ReturnOutcome::Restocked { key, book })
    }

    /// Books on loan under a student ID, resolved against the catalog
    pub fn rentals_for_student(&self, id: &str) -> AppResult<StudentRentals> {
        let id = id.trim();
        let repo = &self.repository;

        let (key, book_ids) = repo.rentals.find_by_student_id(id).ok_or_else(|| {
            AppError::rental_not_found(format!(
                "No rentals found for the student with ID '{}'.",
                id
            ))
        })?;

        let books = book_ids
            .iter()
            .map(|book_id| RentedBook::resolve(*book_id, repo.books.get(*book_id)))
            .collect();

        Ok(StudentRentals {
            key: key.clone(),
            books,
        })
    }

    /// Every current loan, with the student's present name when known
    pub fn list_rentals(&self) -> Vec<RentalLine> {
        let repo = &self.repository;
        repo.rentals
            .iter()
            .map(|(key, book_id)| {
                let student_name = repo
                    .students
                    .get(&key.student_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| key.student_name.clone());
                let book_title = repo
                    .books
                    .get(book_id)
                    .map(|b| b.title.clone())
                    .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
                RentalLine {
                    student_name,
                    student_id: key.student_id.clone(),
                    book_id,
                    book_title,
                }
            })
            .collect()
    }

    /// Whether any student pair is on file, even with no books out
    pub fn has_rental_records(&self) -> bool {
        !self.repository.rentals.is_empty()
    }
}
