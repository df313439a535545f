//! Core data models for the tip split engine.
//!
//! This module contains the area/employee domain models and the transient
//! tip pool used by a distribution run.

mod area;
mod collection;
mod employee;
mod tip_pool;

pub use area::Area;
pub use collection::AreaCollection;
pub use employee::{Employee, EmployeeId};
pub use tip_pool::TotalTipPool;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Adds up `values`, failing with [`EngineError::CalculationError`] instead of
/// overflowing.
pub(crate) fn checked_sum(
    what: &str,
    values: impl IntoIterator<Item = Decimal>,
) -> EngineResult<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |total, value| {
        total
            .checked_add(value)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("{} overflowed", what),
            })
    })
}
