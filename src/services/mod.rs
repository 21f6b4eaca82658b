//! Business logic services
//!
//! [`Library`] is the single store object. Each submodule adds the operations
//! for one table; cross-table rules live in [`loans`].

pub mod catalog;
pub mod generate;
pub mod loans;
pub mod students;

use crate::{config::StorageConfig, error::AppResult, repository::Repository};

pub use generate::GenerateSummary;

/// The catalog, patron and loan store
#[derive(Debug)]
pub struct Library {
    repository: Repository,
}

impl Library {
    /// Open the store, loading all three tables from `storage`
    pub fn open(storage: &StorageConfig) -> AppResult<Self> {
        let repository = Repository::open(storage)?;
        tracing::info!(
            books = repository.books.len(),
            students = repository.students.len(),
            rentals = repository.rentals.len(),
            "Library opened from {:?}",
            storage.data_dir
        );
        Ok(Self { repository })
    }

    /// Read access to the underlying tables
    pub fn repository(&self) -> &Repository {
        &self.repository
    }
}
