//! Repository layer: the three in-memory tables and their files

pub mod books;
pub mod flatfile;
pub mod rentals;
pub mod students;

use crate::{config::StorageConfig, error::AppResult};
use flatfile::FlatFile;

/// Main repository struct holding every table
#[derive(Debug)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub students: students::StudentsRepository,
    pub rentals: rentals::RentalsRepository,
}

impl Repository {
    /// Load every table, creating missing files empty
    pub fn open(storage: &StorageConfig) -> AppResult<Self> {
        let books_file = FlatFile::new(storage.books_path());
        let students_file = FlatFile::new(storage.students_path());
        let rentals_file = FlatFile::new(storage.rentals_path());

        for file in [&books_file, &students_file, &rentals_file] {
            file.ensure_exists()?;
        }

        Ok(Self {
            books: books::BooksRepository::load(books_file)?,
            students: students::StudentsRepository::load(students_file)?,
            rentals: rentals::RentalsRepository::load(rentals_file)?,
        })
    }
}
