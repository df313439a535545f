//! Error types for the tip split engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a store mutation, a distribution run, configuration
//! loading or the persistence layer can report.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the tip split engine.
///
/// Every domain variant is recoverable by the user: its `Display` output is
/// the human-readable status message handed to the notification channel.
///
/// # Example
///
/// ```
/// use tip_split::error::EngineError;
///
/// let error = EngineError::AreaNotFound {
///     name: "Kitchen".to_string(),
/// };
/// assert_eq!(error.to_string(), "Area not found: Kitchen");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input value was missing or malformed.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The input that was rejected.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// A name is already taken within its scope.
    #[error("{kind} name already in use: {name}")]
    DuplicateName {
        /// What kind of entity collided (e.g. "Area", "Employee").
        kind: String,
        /// The colliding name.
        name: String,
    },

    /// Adding the requested percentage would push the area total past 100%.
    #[error("Area percentages cannot exceed 100%: requested {requested}%, only {available}% available")]
    BudgetExceeded {
        /// The percentage that was requested.
        requested: Decimal,
        /// The percentage still unassigned.
        available: Decimal,
    },

    /// No area with the given name exists.
    #[error("Area not found: {name}")]
    AreaNotFound {
        /// The area name that was looked up.
        name: String,
    },

    /// An employee position does not exist in the area.
    #[error("Employee index {index} out of range for area '{area}' ({len} employees)")]
    IndexOutOfRange {
        /// The area that was addressed.
        area: String,
        /// The requested position.
        index: usize,
        /// The number of employees in the area.
        len: usize,
    },

    /// No employee with the given identifier exists in the area.
    #[error("Employee {id} not found in area '{area}'")]
    EmployeeNotFound {
        /// The area that was addressed.
        area: String,
        /// The employee identifier that was looked up.
        id: String,
    },

    /// Distribution was requested before the area percentages add up to 100%.
    #[error("Area percentages must add up to 100% before distributing tips (currently {total}%)")]
    IncompletePercentageAllocation {
        /// The current sum of all area percentages.
        total: Decimal,
    },

    /// An arithmetic step of the distribution could not be represented.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The key-value backend failed to read or write an entry.
    #[error("Storage error for key '{key}': {message}")]
    Storage {
        /// The key being read or written.
        key: String,
        /// A description of the storage failure.
        message: String,
    },

    /// A snapshot could not be serialized.
    #[error("Serialization error: {message}")]
    Serialization {
        /// A description of the serialization failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Validation`] for the given input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a [`EngineError::AreaNotFound`] for the given area name.
    pub fn area_not_found(name: impl Into<String>) -> Self {
        EngineError::AreaNotFound { name: name.into() }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = EngineError::validation("percentage", "must be a number");
        assert_eq!(error.to_string(), "Invalid percentage: must be a number");
    }

    #[test]
    fn test_duplicate_name_displays_kind_and_name() {
        let error = EngineError::DuplicateName {
            kind: "Employee".to_string(),
            name: "Ana".to_string(),
        };
        assert_eq!(error.to_string(), "Employee name already in use: Ana");
    }

    #[test]
    fn test_budget_exceeded_displays_requested_and_available() {
        let error = EngineError::BudgetExceeded {
            requested: Decimal::new(30, 0),
            available: Decimal::new(20, 0),
        };
        assert_eq!(
            error.to_string(),
            "Area percentages cannot exceed 100%: requested 30%, only 20% available"
        );
    }

    #[test]
    fn test_index_out_of_range_displays_area_and_bounds() {
        let error = EngineError::IndexOutOfRange {
            area: "Bar".to_string(),
            index: 4,
            len: 2,
        };
        assert_eq!(
            error.to_string(),
            "Employee index 4 out of range for area 'Bar' (2 employees)"
        );
    }

    #[test]
    fn test_incomplete_allocation_displays_total() {
        let error = EngineError::IncompletePercentageAllocation {
            total: Decimal::new(99, 0),
        };
        assert_eq!(
            error.to_string(),
            "Area percentages must add up to 100% before distributing tips (currently 99%)"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_storage_error_displays_key() {
        let error = EngineError::Storage {
            key: "areas".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Storage error for key 'areas': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_area_not_found() -> EngineResult<()> {
            Err(EngineError::area_not_found("Patio"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_area_not_found()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::AreaNotFound { .. })
        ));
    }
}
