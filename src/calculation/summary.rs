//! Per-area totals for a distribution.

use rust_decimal::Decimal;
use serde::Serialize;

use super::distribution::area_share;
use crate::error::EngineResult;
use crate::models::{AreaCollection, TotalTipPool, checked_sum};

/// Totals for one area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaSummary {
    /// The area name.
    pub name: String,
    /// The area's percentage of the pool.
    pub percentage: Decimal,
    /// The area's share of the pool.
    pub share: Decimal,
    /// Hours worked across the area.
    pub total_hours: Decimal,
    /// Tips currently assigned to the area's employees.
    pub allocated: Decimal,
}

impl AreaSummary {
    /// Share that no employee received, e.g. an area with no hours recorded.
    pub fn unallocated(&self) -> Decimal {
        self.share - self.allocated
    }
}

/// Totals for a whole collection against a pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// One entry per area, in name order.
    pub areas: Vec<AreaSummary>,
    /// The pool the shares were computed from.
    pub pool: Decimal,
    /// Sum of tips assigned to every employee.
    pub total_allocated: Decimal,
}

/// Summarizes the tips currently assigned in `collection` against `pool`.
///
/// Shares are computed from the percentages whether or not they add up to
/// 100, so the summary can be shown before a distribution is possible.
pub fn summarize(collection: &AreaCollection, pool: TotalTipPool) -> EngineResult<DistributionSummary> {
    let areas = collection
        .iter()
        .map(|(name, area)| {
            Ok(AreaSummary {
                name: name.clone(),
                percentage: area.percentage,
                share: area_share(pool.amount(), area.percentage)?,
                total_hours: area.total_hours()?,
                allocated: area.total_tips()?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total_allocated = checked_sum("total allocated", areas.iter().map(|a| a.allocated))?;

    Ok(DistributionSummary {
        areas,
        pool: pool.amount(),
        total_allocated,
    })
}
