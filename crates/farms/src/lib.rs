//! Farms domain module.
//!
//! A farm is a land parcel record. Production units point at a farm by its
//! code; they never own it.

pub mod farm;

pub use farm::{ContactInfo, Farm};
