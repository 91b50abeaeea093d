//! Side-by-side comparison of the two sectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::statistics::{GeneralStatistics, SectorAverages, share_pct};

/// Averages closer than this fraction of the larger magnitude count as balanced.
pub const BALANCE_TOLERANCE: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Balanced,
    AgriculturalLeads,
    LivestockLeads,
}

impl Conclusion {
    /// Relative difference is `|a - b| / max(|a|, |b|)`; two zero averages
    /// are balanced.
    pub fn from_averages(averages: SectorAverages) -> Self {
        let (a, b) = (averages.agricultural, averages.livestock);
        let scale = a.abs().max(b.abs());
        if scale == 0.0 || (a - b).abs() / scale < BALANCE_TOLERANCE {
            Conclusion::Balanced
        } else if a > b {
            Conclusion::AgriculturalLeads
        } else {
            Conclusion::LivestockLeads
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Conclusion::Balanced => {
                "Both sectors show balanced profitability. Keep the current diversification."
            }
            Conclusion::AgriculturalLeads => {
                "The agricultural sector is more profitable. Consider optimizing livestock operations."
            }
            Conclusion::LivestockLeads => {
                "The livestock sector is more profitable. Look for improvement opportunities in agriculture."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub agricultural_units: usize,
    pub livestock_units: usize,
    pub agricultural_share_pct: f64,
    pub livestock_share_pct: f64,
    pub averages: SectorAverages,
    /// Summed agricultural profitability per cultivated hectare.
    pub per_hectare: Option<f64>,
    /// Summed livestock profitability per animal.
    pub per_animal: Option<f64>,
    pub conclusion: Conclusion,
}

impl ComparativeAnalysis {
    pub fn new(stats: &GeneralStatistics, averages: SectorAverages) -> Self {
        let per_hectare = (stats.agricultural_units > 0 && stats.cultivated_hectares > 0.0).then(|| {
            averages.agricultural * stats.agricultural_units as f64 / stats.cultivated_hectares
        });
        let per_animal = (stats.livestock_units > 0 && stats.total_animals > 0).then(|| {
            averages.livestock * stats.livestock_units as f64 / stats.total_animals as f64
        });

        Self {
            agricultural_units: stats.agricultural_units,
            livestock_units: stats.livestock_units,
            agricultural_share_pct: share_pct(stats.agricultural_units, stats.total_units),
            livestock_share_pct: share_pct(stats.livestock_units, stats.total_units),
            averages,
            per_hectare,
            per_animal,
            conclusion: Conclusion::from_averages(averages),
        }
    }
}

impl fmt::Display for ComparativeAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DETAILED COMPARATIVE ANALYSIS ===")?;
        writeln!(f)?;
        writeln!(f, "UNIT COUNT:")?;
        writeln!(
            f,
            "Agricultural units: {} ({:.1}%)",
            self.agricultural_units, self.agricultural_share_pct
        )?;
        writeln!(
            f,
            "Livestock units: {} ({:.1}%)",
            self.livestock_units, self.livestock_share_pct
        )?;
        writeln!(f)?;
        writeln!(f, "AVERAGE PROFITABILITY:")?;
        writeln!(f, "Agricultural sector: ${:.2}", self.averages.agricultural)?;
        writeln!(f, "Livestock sector: ${:.2}", self.averages.livestock)?;
        writeln!(f)?;
        writeln!(f, "EFFICIENCY:")?;
        if let Some(value) = self.per_hectare {
            writeln!(f, "Profitability per hectare: ${value:.2}")?;
        }
        if let Some(value) = self.per_animal {
            writeln!(f, "Profitability per animal: ${value:.2}")?;
        }
        writeln!(f)?;
        writeln!(f, "CONCLUSION:")?;
        write!(f, "{}", self.conclusion.recommendation())
    }
}
