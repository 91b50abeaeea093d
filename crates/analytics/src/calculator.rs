//! Profitability aggregation over the production repositories.

use std::fmt::Write as _;

use agrocoop_infra::Repository;
use agrocoop_production::{AgriculturalProduct, LivestockProduct, ProductionUnit, Sector};

use crate::comparison::ComparativeAnalysis;
use crate::recommendation::Recommendation;
use crate::statistics::{GeneralStatistics, MostProfitable, NO_UNITS, SectorAverages, mean};

/// Point-in-time copy of both production repositories.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub agricultural: Vec<AgriculturalProduct>,
    pub livestock: Vec<LivestockProduct>,
}

impl Snapshot {
    pub fn averages(&self) -> SectorAverages {
        SectorAverages {
            agricultural: mean(self.agricultural.iter().map(AgriculturalProduct::profitability)),
            livestock: mean(self.livestock.iter().map(LivestockProduct::profitability)),
        }
    }

    pub fn statistics(&self) -> GeneralStatistics {
        GeneralStatistics {
            agricultural_units: self.agricultural.len(),
            livestock_units: self.livestock.len(),
            total_units: self.agricultural.len() + self.livestock.len(),
            cultivated_hectares: self.agricultural.iter().map(|u| u.cultivated_hectares).sum(),
            total_animals: self.livestock.iter().map(|u| u64::from(u.animal_count)).sum(),
            daily_production: self.livestock.iter().map(LivestockProduct::daily_output).sum(),
            total_weight: self.livestock.iter().map(LivestockProduct::total_weight).sum(),
        }
    }

    /// Agricultural units first, then livestock, each in repository order.
    pub fn units(&self) -> impl Iterator<Item = ProductionUnit> + '_ {
        self.agricultural
            .iter()
            .cloned()
            .map(ProductionUnit::from)
            .chain(self.livestock.iter().cloned().map(ProductionUnit::from))
    }

    /// Highest profitability across both sectors; the earliest unit wins ties.
    pub fn most_profitable(&self) -> Option<MostProfitable> {
        let mut best: Option<(ProductionUnit, f64)> = None;
        for unit in self.units() {
            let value = unit.profitability();
            if best.as_ref().is_none_or(|(_, max)| value > *max) {
                best = Some((unit, value));
            }
        }

        best.map(|(unit, profitability)| MostProfitable {
            id: unit.base().id().to_string(),
            name: unit.name().to_string(),
            sector: unit.sector(),
            profitability,
        })
    }

    pub fn profitability_report(&self) -> String {
        let averages = self.averages();
        let mut report = String::from("=== PROFITABILITY REPORT ===\n\n");

        section(
            &mut report,
            Sector::Agricultural,
            self.agricultural
                .iter()
                .map(|u| (u.base.name.as_str(), u.profitability())),
            averages.agricultural,
        );
        section(
            &mut report,
            Sector::Livestock,
            self.livestock
                .iter()
                .map(|u| (u.base.name.as_str(), u.profitability())),
            averages.livestock,
        );

        if !self.agricultural.is_empty() && !self.livestock.is_empty() {
            report.push_str("COMPARISON:\n");
            report.push_str(match averages.leader() {
                Some(Sector::Agricultural) => {
                    "Agricultural products show higher average profitability.\n"
                }
                Some(Sector::Livestock) => "Livestock products show higher average profitability.\n",
                None => "Both sectors show similar profitability.\n",
            });
        }

        report
    }

    pub fn comparative_analysis(&self) -> ComparativeAnalysis {
        ComparativeAnalysis::new(&self.statistics(), self.averages())
    }

    pub fn recommendation(&self) -> Recommendation {
        Recommendation::from_averages(self.averages())
    }

    pub fn most_profitable_summary(&self) -> String {
        self.most_profitable()
            .map_or_else(|| NO_UNITS.to_string(), |best| best.to_string())
    }

    pub fn executive_summary(&self) -> String {
        let stats = self.statistics();
        let averages = self.averages();

        let mut summary = String::from("=== EXECUTIVE SUMMARY ===\n\n");
        summary.push_str("INVENTORY:\n");
        let _ = writeln!(summary, "- Registered units: {}", stats.total_units);
        let _ = writeln!(
            summary,
            "- Hectares under cultivation: {:.2} ha",
            stats.cultivated_hectares
        );
        let _ = writeln!(summary, "- Total animals: {} head", stats.total_animals);
        summary.push_str("\nAVERAGE PROFITABILITY:\n");
        let _ = writeln!(
            summary,
            "- Agricultural sector: ${:.2} {}",
            averages.agricultural,
            Sector::Agricultural.profitability_unit()
        );
        let _ = writeln!(
            summary,
            "- Livestock sector: ${:.2} {}",
            averages.livestock,
            Sector::Livestock.profitability_unit()
        );
        summary.push('\n');
        summary.push_str(&self.most_profitable_summary());
        summary
    }
}

fn section<'a>(
    report: &mut String,
    sector: Sector,
    rows: impl Iterator<Item = (&'a str, f64)>,
    average: f64,
) {
    let unit = sector.profitability_unit();
    let _ = writeln!(report, "{} PRODUCTS:", sector.label().to_uppercase());

    let mut any = false;
    for (name, profitability) in rows {
        any = true;
        let _ = writeln!(report, "- {name}: ${profitability:.2} {unit}");
    }
    if any {
        let _ = writeln!(report, "{} average: ${average:.2} {unit}\n", sector.label());
    }
}

/// Aggregates profitability over an agricultural and a livestock repository.
///
/// Each report takes one [`Snapshot`]; callers that need several reports over
/// the same state should take the snapshot themselves.
#[derive(Debug, Clone)]
pub struct ProfitabilityCalculator<A, L> {
    agricultural: A,
    livestock: L,
}

impl<A, L> ProfitabilityCalculator<A, L>
where
    A: Repository<AgriculturalProduct>,
    L: Repository<LivestockProduct>,
{
    pub fn new(agricultural: A, livestock: L) -> Self {
        Self {
            agricultural,
            livestock,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            agricultural: self.agricultural.list(),
            livestock: self.livestock.list(),
        }
    }

    pub fn averages(&self) -> SectorAverages {
        self.snapshot().averages()
    }

    pub fn statistics(&self) -> GeneralStatistics {
        self.snapshot().statistics()
    }

    pub fn most_profitable(&self) -> Option<MostProfitable> {
        self.snapshot().most_profitable()
    }

    pub fn most_profitable_summary(&self) -> String {
        self.snapshot().most_profitable_summary()
    }

    pub fn profitability_report(&self) -> String {
        self.snapshot().profitability_report()
    }

    pub fn comparative_analysis(&self) -> ComparativeAnalysis {
        self.snapshot().comparative_analysis()
    }

    pub fn recommendation(&self) -> Recommendation {
        self.snapshot().recommendation()
    }

    pub fn executive_summary(&self) -> String {
        self.snapshot().executive_summary()
    }
}
