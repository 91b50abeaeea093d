//! `agrocoop-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! entity identity, record codes, the error model, boundary validation and the
//! cooperative-wide configuration record.

pub mod cooperative;
pub mod entity;
pub mod error;
pub mod id;
pub mod validation;

pub use cooperative::{CooperativeInfo, SharedCooperative};
pub use entity::{Entity, Record};
pub use error::{DomainError, DomainResult};
pub use id::{CodeSequence, FarmCode, UnitId};
pub use validation::{Validate, ValidationErrors};
