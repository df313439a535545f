//! Calculation logic for the tip split engine.
//!
//! This module contains the distribution of a tip pool across areas and
//! employees, and the per-area summary derived from a distributed collection.

mod distribution;
mod summary;

pub use distribution::{area_share, distribute, employee_share};
pub use summary::{AreaSummary, DistributionSummary, summarize};
