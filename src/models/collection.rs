//! The collection of all areas, keyed by unique name.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::area::Area;
use super::checked_sum;
use crate::error::{EngineError, EngineResult};
use crate::validation::{MAX_PERCENTAGE, validate_name};

/// Every area, keyed by its unique name.
///
/// This is the store's root state and the shape of the persisted snapshot.
/// Iteration is ordered by area name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaCollection {
    areas: BTreeMap<String, Area>,
}

impl AreaCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Returns true if there are no areas.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Returns true if an area with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.areas.contains_key(name)
    }

    /// Looks up an area by name.
    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.get(name)
    }

    pub(crate) fn area_mut(&mut self, name: &str) -> Option<&mut Area> {
        self.areas.get_mut(name)
    }

    pub(crate) fn insert(&mut self, name: String, area: Area) {
        self.areas.insert(name, area);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Area> {
        self.areas.remove(name)
    }

    /// Iterates areas in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Area)> {
        self.areas.iter()
    }

    /// Area names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    /// Total number of employees across all areas.
    pub fn employee_count(&self) -> usize {
        self.areas.values().map(|a| a.employees.len()).sum()
    }

    /// Sum of every area's percentage.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use tip_split::models::{Area, AreaCollection};
    ///
    /// let areas: AreaCollection = [
    ///     ("Bar".to_string(), Area::new(Decimal::new(60, 0))),
    ///     ("Kitchen".to_string(), Area::new(Decimal::new(30, 0))),
    /// ]
    /// .into_iter()
    /// .collect();
    /// assert_eq!(areas.total_percentage()?, Decimal::new(90, 0));
    /// assert_eq!(areas.remaining_percentage()?, Decimal::new(10, 0));
    /// # Ok::<(), tip_split::error::EngineError>(())
    /// ```
    pub fn total_percentage(&self) -> EngineResult<Decimal> {
        checked_sum("total percentage", self.areas.values().map(|a| a.percentage))
    }

    /// Percentage not yet assigned to any area.
    pub fn remaining_percentage(&self) -> EngineResult<Decimal> {
        let total = self.total_percentage()?;
        MAX_PERCENTAGE
            .checked_sub(total)
            .ok_or_else(|| EngineError::CalculationError {
                message: "remaining percentage overflowed".to_string(),
            })
    }

    /// Returns true when the area percentages add up to exactly 100.
    pub fn is_fully_allocated(&self) -> bool {
        matches!(self.total_percentage(), Ok(total) if total == MAX_PERCENTAGE)
    }

    /// Checks the invariants every store mutation maintains.
    ///
    /// Area names are trimmed and non-empty, each percentage lies in
    /// `(0, 100]` and they add up to at most 100, and every area passes
    /// [`Area::validate_employees`]. A collection that did not come through
    /// the store, such as a loaded snapshot, should pass this before use.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, area) in &self.areas {
            if validate_name("area name", name)? != *name {
                return Err(EngineError::validation(
                    "area name",
                    format!("'{}' has surrounding whitespace", name),
                ));
            }
            if area.percentage <= Decimal::ZERO || area.percentage > MAX_PERCENTAGE {
                return Err(EngineError::validation(
                    "percentage",
                    format!("{}% for area {} is outside (0, 100]", area.percentage, name),
                ));
            }
            area.validate_employees(name)?;
        }

        let total = self.total_percentage()?;
        if total > MAX_PERCENTAGE {
            return Err(EngineError::validation(
                "percentage",
                format!("areas add up to {}%, more than 100%", total),
            ));
        }
        Ok(())
    }
}

impl FromIterator<(String, Area)> for AreaCollection {
    /// Builds a collection as-is, without budget checks; mutations that must
    /// respect the budget go through [`AreaStore`](crate::store::AreaStore).
    fn from_iter<I: IntoIterator<Item = (String, Area)>>(iter: I) -> Self {
        Self {
            areas: iter.into_iter().collect(),
        }
    }
}
