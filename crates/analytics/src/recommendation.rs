//! Strategic recommendation drawn from the sector averages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::statistics::SectorAverages;

/// A sector must beat the other by this factor to be worth expanding.
pub const EXPANSION_FACTOR: f64 = 1.2;

/// Follow-up actions listed under every recommendation.
pub const SUGGESTED_ACTIONS: [&str; 5] = [
    "Optimize production costs of the least profitable units",
    "Research more productive crop varieties or breeds",
    "Evaluate precision-farming technologies",
    "Consider organic certification for premium products",
    "Analyze vertical integration opportunities",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ExpandAgricultural,
    ExpandLivestock,
    Diversify,
}

impl Recommendation {
    /// Plain signed comparison against the other average scaled by
    /// [`EXPANSION_FACTOR`].
    pub fn from_averages(averages: SectorAverages) -> Self {
        let (a, b) = (averages.agricultural, averages.livestock);
        if a > b * EXPANSION_FACTOR {
            Recommendation::ExpandAgricultural
        } else if b > a * EXPANSION_FACTOR {
            Recommendation::ExpandLivestock
        } else {
            Recommendation::Diversify
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Recommendation::ExpandAgricultural => "Consider expanding agricultural production",
            Recommendation::ExpandLivestock => "Consider expanding livestock production",
            Recommendation::Diversify => "Keep a diversified portfolio",
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Recommendation::ExpandAgricultural => {
                "Agricultural profitability is well above livestock profitability"
            }
            Recommendation::ExpandLivestock => {
                "Livestock profitability is well above agricultural profitability"
            }
            Recommendation::Diversify => "Both sectors show similar profitability",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== STRATEGIC RECOMMENDATIONS ===")?;
        writeln!(f)?;
        writeln!(f, "RECOMMENDATION: {}", self.headline())?;
        writeln!(f, "  Reason: {}", self.reason())?;
        writeln!(f)?;
        writeln!(f, "SUGGESTED ACTIONS:")?;
        for action in SUGGESTED_ACTIONS {
            writeln!(f, "- {action}")?;
        }
        Ok(())
    }
}
