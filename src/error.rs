//! Error types for the Elidune store

use thiserror::Error;

/// Stable status codes reported alongside every failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    StorageFailure = 3,
    NoSuchUser = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    BadValue = 18,
    NoSuchData = 20,
}

/// Which table a not-found condition refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Student,
    Rental,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {message}")]
    NotFound { entity: Entity, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed line {line} in {file}: {message}")]
    Format {
        file: String,
        line: usize,
        message: String,
    },

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn book_not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            entity: Entity::Book,
            message: message.into(),
        }
    }

    pub fn student_not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            entity: Entity::Student,
            message: message.into(),
        }
    }

    pub fn rental_not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            entity: Entity::Rental,
            message: message.into(),
        }
    }

    /// Status code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound { entity, .. } => match entity {
                Entity::Book => ErrorCode::NoSuchItem,
                Entity::Student => ErrorCode::NoSuchUser,
                Entity::Rental => ErrorCode::NoSuchData,
            },
            AppError::Conflict(_) => ErrorCode::Duplicate,
            AppError::InvalidQuantity(_) | AppError::Validation(_) => ErrorCode::BadValue,
            AppError::OutOfStock(_) => ErrorCode::ItemNotAvailable,
            AppError::Format { .. } | AppError::Io(_) => ErrorCode::StorageFailure,
            AppError::Config(_) => ErrorCode::Failure,
        }
    }

    /// Human-readable message without the category prefix
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound { message, .. } => message.clone(),
            AppError::Conflict(msg)
            | AppError::InvalidQuantity(msg)
            | AppError::OutOfStock(msg)
            | AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("invalid {}", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for store operations
pub type AppResult<T> = Result<T, AppError>;
