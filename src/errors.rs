//! Error types for directory queries
//!
//! A single structured error enum covers the three failure classes the
//! service distinguishes: absent rows, rejected input, and store failures.

use thiserror::Error;

/// Errors produced by the directory services
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Activity name lookup matched no row
    #[error("Activity '{0}' not found")]
    ActivityNotFound(String),

    /// Organization lookup matched no row
    #[error("Organization '{0}' not found")]
    OrganizationNotFound(String),

    /// Malformed input rejected before querying
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Stored coordinates are not a two-element [lat, lon] array
    #[error("Building {0} has malformed coordinates")]
    MalformedCoordinates(i32),

    /// Organization references a building row that does not exist
    #[error("Organization {organization} references missing building {building}")]
    MissingBuilding { organization: i32, building: i32 },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Result type alias for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_result_alias() {
        let result: DirectoryResult<i32> = Err(DirectoryError::ActivityNotFound("Еда".into()));
        assert!(result.is_err());
    }

    #[test]
    fn test_error_display_contains_name() {
        let err = DirectoryError::ActivityNotFound("Медицина".into());
        assert!(err.to_string().contains("Медицина"));
    }
}
