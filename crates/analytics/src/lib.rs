//! `agrocoop-analytics`
//!
//! Read-only aggregation over the production repositories: sector averages,
//! inventory totals, the most profitable unit and the text reports built from
//! them.
//!
//! Nothing here mutates a repository. Every report is computed from one
//! snapshot of the repositories so its figures agree with each other.

pub mod calculator;
pub mod comparison;
pub mod dashboard;
pub mod recommendation;
pub mod statistics;

pub use calculator::{ProfitabilityCalculator, Snapshot};
pub use comparison::{ComparativeAnalysis, Conclusion, BALANCE_TOLERANCE};
pub use dashboard::{DashboardTotals, DashboardView};
pub use recommendation::{EXPANSION_FACTOR, Recommendation, SUGGESTED_ACTIONS};
pub use statistics::{GeneralStatistics, MostProfitable, SectorAverages};
