//! Input validation helpers.
//!
//! A presentation layer hands the store raw names, `f64` values from number
//! inputs and free text from edit fields. These helpers turn them into
//! trimmed names and finite [`Decimal`] values, or a
//! [`EngineError::Validation`] describing what was wrong.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// The percentage every area share adds up to.
pub const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Validates a required name and returns it trimmed.
///
/// # Example
///
/// ```
/// use tip_split::validation::validate_name;
///
/// assert_eq!(validate_name("area name", "  Bar ").unwrap(), "Bar");
/// assert!(validate_name("area name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> EngineResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Converts a number coming from an input widget into a [`Decimal`].
///
/// NaN and infinities are rejected rather than stored.
pub fn finite_decimal(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::validation(field, "must be a number"));
    }
    Decimal::try_from(value).map_err(|_| EngineError::validation(field, "is out of range"))
}

/// Validates an area percentage: a positive number.
///
/// The upper bound is a budget question and is left to the caller, which
/// knows how much of the 100% is still free.
///
/// # Example
///
/// ```
/// use tip_split::validation::validate_percentage;
///
/// assert!(validate_percentage(60.0).is_ok());
/// assert!(validate_percentage(0.0).is_err());
/// assert!(validate_percentage(f64::NAN).is_err());
/// ```
pub fn validate_percentage(value: f64) -> EngineResult<Decimal> {
    let percentage = finite_decimal("percentage", value)?;
    if percentage <= Decimal::ZERO {
        return Err(EngineError::validation("percentage", "must be greater than 0"));
    }
    Ok(percentage)
}

/// Validates hours for a new employee: finite and strictly positive.
pub fn validate_new_hours(value: f64) -> EngineResult<Decimal> {
    let hours = finite_decimal("hours", value)?;
    if hours <= Decimal::ZERO {
        return Err(EngineError::validation("hours", "must be greater than 0"));
    }
    Ok(hours)
}

/// Validates edited hours, where zero is allowed.
pub fn validate_hours(hours: Decimal) -> EngineResult<Decimal> {
    if hours.is_sign_negative() && !hours.is_zero() {
        return Err(EngineError::validation("hours", "must not be negative"));
    }
    Ok(hours)
}

/// Parses hours typed into an edit field.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tip_split::validation::parse_hours;
///
/// assert_eq!(parse_hours(" 7.5 ").unwrap(), Decimal::new(75, 1));
/// assert!(parse_hours("seven").is_err());
/// ```
pub fn parse_hours(value: &str) -> EngineResult<Decimal> {
    let hours = Decimal::from_str(value.trim())
        .map_err(|_| EngineError::validation("hours", format!("'{}' is not a number", value)))?;
    validate_hours(hours)
}

/// Parses a non-negative amount; blank input counts as zero.
pub fn parse_amount(field: &str, value: &str) -> EngineResult<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| EngineError::validation(field, format!("'{}' is not a number", trimmed)))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EngineError::validation(field, "must not be negative"));
    }
    Ok(amount)
}
