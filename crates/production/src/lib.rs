//! Production units domain module.
//!
//! A production unit is either agricultural (profitability per hectare) or
//! livestock (profitability per animal per month). Both embed a [`UnitBase`]
//! with the shared cost/quantity/price attributes; [`ProductionUnit`] is the
//! sum type callers use to treat them uniformly.

pub mod agricultural;
pub mod livestock;
pub mod treatment;
pub mod unit;

pub use agricultural::AgriculturalProduct;
pub use livestock::LivestockProduct;
pub use treatment::{ApplicationRecord, Species};
pub use unit::{ProductionUnit, Sector, UnitBase};
