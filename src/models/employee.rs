//! Employee model and its stable identifier.
//!
//! This module defines the Employee struct and the EmployeeId newtype
//! used to address employees independently of their display position.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an employee.
///
/// Positions inside an area shift when employees are removed; the id does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A worker within an area, with hours worked and the tips assigned to them.
///
/// Field names on the wire follow the stored snapshot layout
/// (`nombre`, `horas`, `propinas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Stable identifier; regenerated for snapshots that predate it.
    #[serde(default)]
    pub id: EmployeeId,
    /// Name, unique within the owning area.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Hours worked.
    #[serde(rename = "horas", with = "rust_decimal::serde::arbitrary_precision")]
    pub hours: Decimal,
    /// Tips assigned by the last distribution run.
    #[serde(rename = "propinas", with = "rust_decimal::serde::arbitrary_precision", default)]
    pub tips: Decimal,
}

impl Employee {
    /// Creates an employee with no tips assigned yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use tip_split::models::Employee;
    ///
    /// let employee = Employee::new("Ana", Decimal::new(6, 0));
    /// assert_eq!(employee.tips, Decimal::ZERO);
    /// ```
    pub fn new(name: impl Into<String>, hours: Decimal) -> Self {
        Self {
            id: EmployeeId::new(),
            name: name.into(),
            hours,
            tips: Decimal::ZERO,
        }
    }
}
