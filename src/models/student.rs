//! Student (patron) model

use validator::Validate;

use super::validate_storable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Caller-supplied identifier, stored as opaque text
    pub id: String,
    pub name: String,
}

/// Add student request, as collected by the menu
#[derive(Debug, Clone, Validate)]
pub struct NewStudent {
    #[validate(
        length(min = 1, message = "Student name must not be empty"),
        custom(function = "validate_storable")
    )]
    pub name: String,
    #[validate(
        length(min = 1, message = "Student ID must not be empty"),
        custom(function = "validate_storable")
    )]
    pub id: String,
}
