//! Area model.
//!
//! An area holds a percentage share of the tip pool and the employees who
//! split that share by hours worked.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::checked_sum;
use super::employee::{Employee, EmployeeId};
use crate::error::{EngineError, EngineResult};
use crate::validation::{validate_hours, validate_name};

/// A named group's share of the tip pool and its employees.
///
/// The name is not stored here; it is the key in
/// [`AreaCollection`](super::AreaCollection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Share of the total pool, in `(0, 100]`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percentage: Decimal,
    /// Employees in insertion order.
    #[serde(rename = "empleados", default)]
    pub employees: Vec<Employee>,
}

impl Area {
    /// Creates an area with no employees.
    pub fn new(percentage: Decimal) -> Self {
        Self {
            percentage,
            employees: Vec::new(),
        }
    }

    /// Sum of hours worked by every employee in the area.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use tip_split::models::{Area, Employee};
    ///
    /// let mut area = Area::new(Decimal::new(60, 0));
    /// area.employees.push(Employee::new("x", Decimal::new(2, 0)));
    /// area.employees.push(Employee::new("y", Decimal::new(35, 1)));
    /// assert_eq!(area.total_hours()?, Decimal::new(55, 1));
    /// # Ok::<(), tip_split::error::EngineError>(())
    /// ```
    pub fn total_hours(&self) -> EngineResult<Decimal> {
        checked_sum("total hours", self.employees.iter().map(|e| e.hours))
    }

    /// Sum of tips currently assigned to the area's employees.
    pub fn total_tips(&self) -> EngineResult<Decimal> {
        checked_sum("total tips", self.employees.iter().map(|e| e.tips))
    }

    /// Position of the employee with the given id.
    pub fn position(&self, id: EmployeeId) -> Option<usize> {
        self.employees.iter().position(|e| e.id == id)
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Looks up an employee by exact (case-sensitive) name.
    pub fn employee_named(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.name == name)
    }

    /// Checks the employee list of the area called `area_name`: trimmed,
    /// non-empty names unique within the area, unique ids, non-negative hours
    /// and tips, and a total of hours that fits in a [`Decimal`].
    pub fn validate_employees(&self, area_name: &str) -> EngineResult<()> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();

        for employee in &self.employees {
            if validate_name("employee name", &employee.name)? != employee.name {
                return Err(EngineError::validation(
                    "employee name",
                    format!("'{}' has surrounding whitespace", employee.name),
                ));
            }
            if !names.insert(employee.name.as_str()) {
                return Err(EngineError::DuplicateName {
                    kind: "Employee".to_string(),
                    name: employee.name.clone(),
                });
            }
            if !ids.insert(employee.id) {
                return Err(EngineError::validation(
                    "employee id",
                    format!("{} appears twice in area {}", employee.id, area_name),
                ));
            }
            validate_hours(employee.hours)?;
            if employee.tips.is_sign_negative() && !employee.tips.is_zero() {
                return Err(EngineError::validation(
                    "tips",
                    format!("{} has negative tips in area {}", employee.name, area_name),
                ));
            }
        }

        self.total_hours().map(|_| ())
    }
}
