//! Employee edits.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::validation::{finite_decimal, parse_hours};

/// The employee fields a user may edit. Tips are derived and not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    /// The employee's name.
    Name,
    /// Hours worked.
    Hours,
}

impl EmployeeField {
    /// Parses a field name, accepting the stored snapshot spellings too.
    ///
    /// Returns `None` for anything else, including `"tips"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tip_split::store::EmployeeField;
    ///
    /// assert_eq!(EmployeeField::parse("hours"), Some(EmployeeField::Hours));
    /// assert_eq!(EmployeeField::parse("nombre"), Some(EmployeeField::Name));
    /// assert_eq!(EmployeeField::parse("propinas"), None);
    /// ```
    pub fn parse(field: &str) -> Option<Self> {
        match field.trim() {
            "name" | "nombre" => Some(EmployeeField::Name),
            "hours" | "horas" => Some(EmployeeField::Hours),
            _ => None,
        }
    }
}

/// A change to one employee field.
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeEdit {
    /// Rename the employee.
    Name(String),
    /// Set hours worked.
    Hours(Decimal),
}

impl EmployeeEdit {
    /// Builds an edit from raw field input. Hours must be a number.
    pub fn parse(field: EmployeeField, value: &str) -> EngineResult<Self> {
        match field {
            EmployeeField::Name => Ok(EmployeeEdit::Name(value.to_string())),
            EmployeeField::Hours => parse_hours(value).map(EmployeeEdit::Hours),
        }
    }

    /// Builds an hours edit from a number input.
    pub fn hours(hours: f64) -> EngineResult<Self> {
        finite_decimal("hours", hours).map(EmployeeEdit::Hours)
    }
}
