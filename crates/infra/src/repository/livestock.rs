//! Herd-unit queries and treatment application.

use chrono::{NaiveDate, Utc};

use agrocoop_events::ChangeEvent;
use agrocoop_production::LivestockProduct;

use super::{LivestockRepository, Repository};

impl LivestockRepository {
    /// Units whose livestock type contains `livestock_type`, ignoring case.
    pub fn by_livestock_type(&self, livestock_type: &str) -> Vec<LivestockProduct> {
        let wanted = livestock_type.to_lowercase();
        self.filter(|unit| unit.livestock_type.to_lowercase().contains(&wanted))
    }

    /// Apply today's treatment to the unit under `key`.
    pub fn apply_treatment(&self, key: &str) -> bool {
        self.apply_treatment_on(key, Utc::now().date_naive())
    }

    /// Apply a treatment dated `date`.
    ///
    /// Fails (and notifies nobody) when the key is unknown or the unit is not
    /// eligible.
    pub fn apply_treatment_on(&self, key: &str, date: NaiveDate) -> bool {
        self.modify(key, ChangeEvent::TreatmentApplied, |unit| unit.apply_on(date))
    }

    pub fn application_status(&self, key: &str) -> Option<String> {
        self.find(key).map(|unit| unit.application_status())
    }

    /// Herd output for one day, summed across units.
    pub fn total_daily_production(&self) -> f64 {
        self.sum_by(LivestockProduct::daily_output)
    }

    pub fn total_weight(&self) -> f64 {
        self.sum_by(LivestockProduct::total_weight)
    }

    pub fn total_animals(&self) -> u64 {
        self.fold(0, |sum, unit| sum + u64::from(unit.animal_count))
    }

    /// Sum of per-animal monthly profitability across units.
    pub fn total_profitability(&self) -> f64 {
        self.sum_by(LivestockProduct::profitability)
    }
}
