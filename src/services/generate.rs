//! Synthetic data for exercising the search paths at scale.
//!
//! Generated records go through the same entry points as manual input.

use rand::Rng;

use super::Library;
use crate::{
    error::{AppError, AppResult},
    models::book::AddBookOutcome,
};

/// What a bulk generation run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// New records created
    pub created: usize,
    /// Existing titles that were restocked instead
    pub restocked: usize,
    /// Requests rejected as conflicts
    pub skipped: usize,
}

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn random_letters<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> String {
    let len = rng.gen_range(min..=max);
    (0..len)
        .map(|_| char::from(LETTERS[rng.gen_range(0..LETTERS.len())]))
        .collect()
}

fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

impl Library {
    /// Add `count` books with random titles, authors and quantities
    pub fn generate_books<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> AppResult<GenerateSummary> {
        let mut summary = GenerateSummary::default();
        for _ in 0..count {
            let title = random_letters(rng, 5, 15);
            let author = random_letters(rng, 5, 15);
            let quantity = rng.gen_range(1..=100);
            match self.add_book(&title, &author, quantity)? {
                AddBookOutcome::Created(_) => summary.created += 1,
                AddBookOutcome::Restocked(_) => summary.restocked += 1,
            }
        }
        tracing::info!(
            "Generated books: {} created, {} restocked",
            summary.created,
            summary.restocked
        );
        Ok(summary)
    }

    /// Add `count` students with random names and 7-digit IDs
    pub fn generate_students<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> AppResult<GenerateSummary> {
        let mut summary = GenerateSummary::default();
        for _ in 0..count {
            let name = random_letters(rng, 5, 12);
            let id = random_digits(rng, 7);
            match self.add_student(&name, &id) {
                Ok(_) => summary.created += 1,
                Err(AppError::Conflict(msg)) => {
                    tracing::debug!("Generated student skipped: {}", msg);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(
            "Generated students: {} created, {} skipped",
            summary.created,
            summary.skipped
        );
        Ok(summary)
    }
}
