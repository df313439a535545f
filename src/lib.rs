//! Tip split engine.
//!
//! This crate manages named areas, each holding a percentage share of a tip
//! pool and a list of employees with hours worked, and distributes a total
//! tip amount first across areas by percentage and then within each area
//! across employees in proportion to hours worked.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod notification;
pub mod persistence;
pub mod session;
pub mod store;
pub mod validation;
