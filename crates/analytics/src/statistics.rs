use std::fmt;

use serde::{Deserialize, Serialize};

use agrocoop_production::Sector;

/// Mean profitability per sector; 0 for an empty sector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectorAverages {
    /// Per hectare.
    pub agricultural: f64,
    /// Per animal per month.
    pub livestock: f64,
}

impl SectorAverages {
    pub fn get(&self, sector: Sector) -> f64 {
        match sector {
            Sector::Agricultural => self.agricultural,
            Sector::Livestock => self.livestock,
        }
    }

    /// Which sector has the higher average, without tolerance.
    pub fn leader(&self) -> Option<Sector> {
        if self.agricultural > self.livestock {
            Some(Sector::Agricultural)
        } else if self.livestock > self.agricultural {
            Some(Sector::Livestock)
        } else {
            None
        }
    }
}

/// Inventory-wide totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneralStatistics {
    pub agricultural_units: usize,
    pub livestock_units: usize,
    pub total_units: usize,
    pub cultivated_hectares: f64,
    pub total_animals: u64,
    /// Herd output for one day across every livestock unit.
    pub daily_production: f64,
    /// Kilograms.
    pub total_weight: f64,
}

/// The unit with the highest profitability across both sectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostProfitable {
    pub id: String,
    pub name: String,
    pub sector: Sector,
    pub profitability: f64,
}

impl fmt::Display for MostProfitable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Most profitable unit: {} ({}) - ${:.2} {}",
            self.name,
            self.sector,
            self.profitability,
            self.sector.profitability_unit()
        )
    }
}

/// Shown in place of [`MostProfitable`] when both repositories are empty.
pub const NO_UNITS: &str = "No production units registered";

/// `part` as a percentage of `whole`; 0 when `whole` is 0.
pub(crate) fn share_pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(Vec::new()), 0.0);
        assert_eq!(mean([2.0, 4.0]), 3.0);
    }

    #[test]
    fn share_guards_empty_inventory() {
        assert_eq!(share_pct(0, 0), 0.0);
        assert_eq!(share_pct(2, 5), 40.0);
    }

    #[test]
    fn leader_uses_plain_comparison() {
        let close = SectorAverages {
            agricultural: 100.0,
            livestock: 99.0,
        };
        assert_eq!(close.leader(), Some(Sector::Agricultural));
        assert_eq!(SectorAverages::default().leader(), None);
    }

    #[test]
    fn most_profitable_line() {
        let best = MostProfitable {
            id: "GAN003".to_string(),
            name: "Gallinas Ponedoras".to_string(),
            sector: Sector::Livestock,
            profitability: 3_870_000.0,
        };
        assert_eq!(
            best.to_string(),
            "Most profitable unit: Gallinas Ponedoras (Livestock) - $3870000.00 per animal/month"
        );
    }

    #[test]
    fn statistics_serialize_with_field_names() {
        let stats = GeneralStatistics {
            total_units: 1,
            agricultural_units: 1,
            cultivated_hectares: 5.0,
            ..GeneralStatistics::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_units"], 1);
        assert_eq!(json["cultivated_hectares"], 5.0);
    }
}
