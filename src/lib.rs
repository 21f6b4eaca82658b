//! Elidune Store
//!
//! An in-process record store for a library's catalog, students and active
//! loans, persisted as flat comma-separated files and searched with binary
//! search over sorted snapshots.

pub mod config;
pub mod error;
pub mod menu;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::Library;
