//! Farm queries and per-municipality statistics.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use agrocoop_farms::Farm;

use super::{FarmRepository, Repository};

/// Farm count and summed area for one municipality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MunicipalityStats {
    pub municipality: String,
    pub farm_count: usize,
    pub total_area: f64,
}

impl fmt::Display for MunicipalityStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} farms, {:.2} ha",
            self.municipality, self.farm_count, self.total_area
        )
    }
}

impl FarmRepository {
    /// Farms whose owner contains `owner`, ignoring case.
    pub fn by_owner(&self, owner: &str) -> Vec<Farm> {
        let wanted = owner.to_lowercase();
        self.filter(|farm| farm.owner.to_lowercase().contains(&wanted))
    }

    /// Farms located in `municipality`, ignoring case.
    pub fn by_municipality(&self, municipality: &str) -> Vec<Farm> {
        let wanted = municipality.to_lowercase();
        self.filter(|farm| farm.municipality.to_lowercase() == wanted)
    }

    pub fn large_farms(&self) -> Vec<Farm> {
        self.filter(Farm::is_large)
    }

    pub fn irrigated_farms(&self) -> Vec<Farm> {
        self.filter(Farm::has_irrigation)
    }

    pub fn total_area(&self) -> f64 {
        self.sum_by(|farm| farm.total_area)
    }

    pub fn total_cultivable_area(&self) -> f64 {
        self.sum_by(Farm::cultivable_area)
    }

    /// One entry per distinct municipality, sorted by name.
    ///
    /// Names are grouped exactly: `Ibagué` and `IBAGUÉ` are separate entries,
    /// each counting only its own farms.
    pub fn stats_by_municipality(&self) -> Vec<MunicipalityStats> {
        let mut grouped: BTreeMap<String, (usize, f64)> = BTreeMap::new();
        for farm in self.list() {
            let entry = grouped.entry(farm.municipality.clone()).or_default();
            entry.0 += 1;
            entry.1 += farm.total_area;
        }

        grouped
            .into_iter()
            .map(|(municipality, (farm_count, total_area))| MunicipalityStats {
                municipality,
                farm_count,
                total_area,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm(code: &str, owner: &str, municipality: &str, area: f64) -> Farm {
        let mut farm = Farm::new(code);
        farm.name = format!("Finca {code}");
        farm.owner = owner.to_string();
        farm.municipality = municipality.to_string();
        farm.total_area = area;
        farm
    }

    fn sample() -> FarmRepository {
        FarmRepository::from_records(vec![
            farm("F001", "Carlos Rodríguez", "Ibagué", 25.5),
            farm("F002", "María González", "Espinal", 120.0),
            farm("F003", "José Martínez", "Ibagué", 45.0),
        ])
    }

    #[test]
    fn owner_search_is_a_substring_match() {
        let repo = sample();
        let found = repo.by_owner("gonzález");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code(), "F002");
        assert_eq!(repo.by_owner("MAR").len(), 2);
    }

    #[test]
    fn municipality_search_is_exact() {
        let repo = sample();
        assert_eq!(repo.by_municipality("IBAGUÉ").len(), 2);
        assert!(repo.by_municipality("Iba").is_empty());
    }

    #[test]
    fn large_and_irrigated_farms() {
        let repo = sample();
        let mut irrigated = farm("F004", "Ana", "Chaparral", 10.0);
        irrigated.infrastructure = "Sistema de Riego por goteo".to_string();
        repo.create(irrigated);

        let large: Vec<_> = repo.large_farms().into_iter().map(|f| f.code().to_string()).collect();
        assert_eq!(large, ["F002"]);
        let wet: Vec<_> = repo.irrigated_farms().into_iter().map(|f| f.code().to_string()).collect();
        assert_eq!(wet, ["F004"]);
    }

    #[test]
    fn area_totals() {
        let repo = sample();
        assert_eq!(repo.total_area(), 190.5);
        assert!((repo.total_cultivable_area() - 171.45).abs() < 1e-9);
    }

    #[test]
    fn stats_keep_differently_cased_names_apart() {
        let repo = sample();
        repo.create(farm("F004", "Ana", "IBAGUÉ", 4.5));

        let stats = repo.stats_by_municipality();
        let counts: Vec<_> = stats
            .iter()
            .map(|s| (s.municipality.as_str(), s.farm_count))
            .collect();
        assert_eq!(counts, vec![("Espinal", 1), ("IBAGUÉ", 1), ("Ibagué", 2)]);
        assert_eq!(repo.by_municipality("ibagué").len(), 3);
    }

    #[test]
    fn stats_group_sorted_by_municipality() {
        let stats = sample().stats_by_municipality();
        assert_eq!(
            stats,
            vec![
                MunicipalityStats {
                    municipality: "Espinal".to_string(),
                    farm_count: 1,
                    total_area: 120.0,
                },
                MunicipalityStats {
                    municipality: "Ibagué".to_string(),
                    farm_count: 2,
                    total_area: 70.5,
                },
            ]
        );
        assert_eq!(stats[1].to_string(), "Ibagué: 2 farms, 70.50 ha");
    }
}
