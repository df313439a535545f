//! Tip distribution.
//!
//! Splits a tip pool across areas by percentage, then within each area across
//! employees in proportion to hours worked.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Area, AreaCollection, Employee, TotalTipPool};
use crate::validation::MAX_PERCENTAGE;

/// Computes every employee's tips for the given pool.
///
/// The area percentages must add up to exactly 100; otherwise
/// [`EngineError::IncompletePercentageAllocation`] is returned and nothing is
/// computed. Each area receives `total * percentage / 100`, which is then split
/// among its employees by `hours / total_hours`. An area whose employees have
/// no hours at all assigns zero tips to each of them.
///
/// The input is not modified; the caller decides whether to install the
/// returned collection.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tip_split::calculation::distribute;
/// use tip_split::models::{Area, AreaCollection, Employee, TotalTipPool};
///
/// let mut bar = Area::new(Decimal::new(60, 0));
/// bar.employees.push(Employee::new("x", Decimal::new(2, 0)));
/// bar.employees.push(Employee::new("y", Decimal::new(2, 0)));
/// let mut kitchen = Area::new(Decimal::new(40, 0));
/// kitchen.employees.push(Employee::new("z", Decimal::new(5, 0)));
///
/// let areas: AreaCollection = [("Bar".to_string(), bar), ("Kitchen".to_string(), kitchen)]
///     .into_iter()
///     .collect();
/// let pool = TotalTipPool::new(Decimal::ONE_HUNDRED).unwrap();
///
/// let result = distribute(&areas, pool).unwrap();
/// assert_eq!(result.area("Bar").unwrap().employees[0].tips, Decimal::new(30, 0));
/// assert_eq!(result.area("Kitchen").unwrap().employees[0].tips, Decimal::new(40, 0));
/// ```
pub fn distribute(collection: &AreaCollection, pool: TotalTipPool) -> EngineResult<AreaCollection> {
    let total = collection.total_percentage()?;
    if total != MAX_PERCENTAGE {
        return Err(EngineError::IncompletePercentageAllocation { total });
    }

    let distributed = collection
        .iter()
        .map(|(name, area)| {
            let allocated = allocate_area(area, pool.amount())?;
            debug!(
                area = %name,
                percentage = %area.percentage,
                employees = allocated.employees.len(),
                "Allocated area share"
            );
            Ok((name.clone(), allocated))
        })
        .collect::<EngineResult<AreaCollection>>()?;

    Ok(distributed)
}

/// The part of the pool that belongs to an area: `total * percentage / 100`.
pub fn area_share(total: Decimal, percentage: Decimal) -> EngineResult<Decimal> {
    total
        .checked_mul(percentage)
        .and_then(|v| v.checked_div(MAX_PERCENTAGE))
        .ok_or_else(|| overflow("area share", total))
}

/// An employee's part of an area share: `share * hours / total_hours`, or
/// zero when the area has no hours.
pub fn employee_share(
    area_share: Decimal,
    hours: Decimal,
    total_hours: Decimal,
) -> EngineResult<Decimal> {
    if total_hours <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    area_share
        .checked_mul(hours)
        .and_then(|v| v.checked_div(total_hours))
        .ok_or_else(|| overflow("employee share", area_share))
}

fn allocate_area(area: &Area, total: Decimal) -> EngineResult<Area> {
    let share = area_share(total, area.percentage)?;
    let total_hours = area.total_hours()?;

    let employees = area
        .employees
        .iter()
        .map(|employee| {
            Ok(Employee {
                tips: employee_share(share, employee.hours, total_hours)?,
                ..employee.clone()
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(Area {
        percentage: area.percentage,
        employees,
    })
}

fn overflow(step: &str, amount: Decimal) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflowed for amount {}", step, amount),
    }
}
