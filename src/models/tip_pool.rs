//! The total tip amount for a distribution run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::validation::{finite_decimal, parse_amount};

/// A non-negative tip amount to distribute.
///
/// Transient: it is supplied fresh for each run and never persisted with the
/// areas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TotalTipPool(Decimal);

impl TotalTipPool {
    /// An empty pool.
    pub const ZERO: TotalTipPool = TotalTipPool(Decimal::ZERO);

    /// Creates a pool from a decimal amount.
    pub fn new(amount: Decimal) -> EngineResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(EngineError::validation("total tips", "must not be negative"));
        }
        Ok(Self(amount))
    }

    /// Creates a pool from a number input.
    pub fn from_f64(amount: f64) -> EngineResult<Self> {
        Self::new(finite_decimal("total tips", amount)?)
    }

    /// Parses the total tips field; blank input is an empty pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use tip_split::models::TotalTipPool;
    ///
    /// assert_eq!(TotalTipPool::parse("").unwrap(), TotalTipPool::ZERO);
    /// assert_eq!(TotalTipPool::parse(" 120.50 ").unwrap().amount(), Decimal::new(12050, 2));
    /// assert!(TotalTipPool::parse("-5").is_err());
    /// ```
    pub fn parse(input: &str) -> EngineResult<Self> {
        parse_amount("total tips", input).map(Self)
    }

    /// The amount to distribute.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}
