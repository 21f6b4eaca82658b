//! Rental table: student pair -> set of borrowed book IDs

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::flatfile::FlatFile;
use crate::{
    error::AppResult,
    models::{book::BookId, rental::RentalKey},
};

/// In-memory rental table backed by `student_name,student_id,book_id` lines.
///
/// A pair whose set becomes empty stays in memory until the next reload; it
/// produces no lines on disk.
#[derive(Debug)]
pub struct RentalsRepository {
    file: FlatFile,
    rentals: IndexMap<RentalKey, BTreeSet<BookId>>,
}

impl RentalsRepository {
    /// Load the table, skipping lines that cannot be decoded
    pub fn load(file: FlatFile) -> AppResult<Self> {
        let mut rentals: IndexMap<RentalKey, BTreeSet<BookId>> = IndexMap::new();
        let mut skipped = 0usize;

        for (line_no, line) in file.read_lines()? {
            let fields: Vec<&str> = line.split(',').collect();
            let [student_name, student_id, book_id] = fields.as_slice() else {
                tracing::warn!(
                    "Ignoring line {} in {}: '{}' does not contain valid data",
                    line_no,
                    file.name(),
                    line
                );
                skipped += 1;
                continue;
            };
            let Ok(book_id) = book_id.parse::<BookId>() else {
                tracing::warn!(
                    "Ignoring line {} in {}: invalid book id '{}'",
                    line_no,
                    file.name(),
                    book_id
                );
                skipped += 1;
                continue;
            };

            rentals
                .entry(RentalKey::new(*student_name, *student_id))
                .or_default()
                .insert(book_id);
        }

        tracing::info!(
            "Loaded {} rental groups from {:?} ({} lines skipped)",
            rentals.len(),
            file.path(),
            skipped
        );

        Ok(Self { file, rentals })
    }

    pub fn save(&self) -> AppResult<()> {
        let lines = self.rentals.iter().flat_map(|(key, books)| {
            books.iter().map(move |book_id| {
                format!("{},{},{}", key.student_name, key.student_id, book_id)
            })
        });
        self.file.write_lines(lines)?;
        Ok(())
    }

    pub fn file(&self) -> &FlatFile {
        &self.file
    }

    /// Number of student pairs, including ones with no current loans
    pub fn len(&self) -> usize {
        self.rentals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rentals.is_empty()
    }

    pub fn get(&self, key: &RentalKey) -> Option<&BTreeSet<BookId>> {
        self.rentals.get(key)
    }

    pub fn holds(&self, key: &RentalKey, book_id: BookId) -> bool {
        self.rentals
            .get(key)
            .map(|books| books.contains(&book_id))
            .unwrap_or(false)
    }

    /// Record a loan, creating the pair's set on first use.
    ///
    /// Returns `false` if the pair already held the book.
    pub fn add(&mut self, key: RentalKey, book_id: BookId) -> bool {
        self.rentals.entry(key).or_default().insert(book_id)
    }

    /// Clear a loan; the pair's entry is kept even if it becomes empty
    pub fn remove(&mut self, key: &RentalKey, book_id: BookId) -> bool {
        self.rentals
            .get_mut(key)
            .map(|books| books.remove(&book_id))
            .unwrap_or(false)
    }

    /// Binary search over keys sorted by student ID.
    ///
    /// When several pairs share the ID, the earliest one in table order that
    /// still holds books wins; a pair with an empty set is only returned when
    /// every pair under the ID is empty.
    pub fn find_by_student_id(
        &self,
        student_id: &str,
    ) -> Option<(&RentalKey, &BTreeSet<BookId>)> {
        let mut keys: Vec<&RentalKey> = self.rentals.keys().collect();
        keys.sort_by(|a, b| a.student_id.cmp(&b.student_id));

        let start = keys.partition_point(|k| k.student_id.as_str() < student_id);
        let end = keys.partition_point(|k| k.student_id.as_str() <= student_id);

        let mut matches = keys[start..end]
            .iter()
            .filter_map(|key| self.rentals.get_key_value(*key));
        let first = matches.next()?;
        if !first.1.is_empty() {
            return Some(first);
        }
        matches.find(|(_, books)| !books.is_empty()).or(Some(first))
    }

    /// Every (pair, book) loan, in table order
    pub fn iter(&self) -> impl Iterator<Item = (&RentalKey, BookId)> {
        self.rentals
            .iter()
            .flat_map(|(key, books)| books.iter().map(move |id| (key, *id)))
    }
}
