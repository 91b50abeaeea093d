use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use agrocoop_core::{CodeSequence, Entity, Record, UnitId, Validate, ValidationErrors};

use crate::treatment::{ApplicationRecord, Species};
use crate::unit::UnitBase;

/// Fixed month length used by every per-month figure.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Herd/flock production unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivestockProduct {
    pub base: UnitBase,
    pub livestock_type: String,
    pub animal_count: u32,
    /// Kilograms.
    pub average_weight: f64,
    /// Output per animal per day (liters, eggs, kg...).
    pub daily_production: f64,
    pub feeding_type: String,
    applications: ApplicationRecord,
}

impl LivestockProduct {
    pub fn new(id: impl Into<UnitId>) -> Self {
        Self {
            base: UnitBase::new(id),
            livestock_type: String::new(),
            animal_count: 0,
            average_weight: 0.0,
            daily_production: 0.0,
            feeding_type: "Pastoreo".to_string(),
            applications: ApplicationRecord::new(),
        }
    }

    /// Net result per animal per month; 0 for an empty herd.
    pub fn profitability(&self) -> f64 {
        if self.animal_count == 0 {
            return 0.0;
        }

        let animals = f64::from(self.animal_count);
        let monthly_income_per_animal =
            self.daily_production * self.base.sale_price * DAYS_PER_MONTH;
        let total_income = monthly_income_per_animal * animals;
        let total_cost = self.base.production_cost * animals;

        (total_income - total_cost) / animals
    }

    pub fn total_weight(&self) -> f64 {
        f64::from(self.animal_count) * self.average_weight
    }

    pub fn monthly_production(&self) -> f64 {
        self.daily_production * f64::from(self.animal_count) * DAYS_PER_MONTH
    }

    /// Herd-wide output for one day.
    pub fn daily_output(&self) -> f64 {
        self.daily_production * f64::from(self.animal_count)
    }

    pub fn cost_per_animal_per_day(&self) -> f64 {
        if self.animal_count == 0 {
            return 0.0;
        }
        self.base.production_cost / f64::from(self.animal_count) / DAYS_PER_MONTH
    }

    pub fn species(&self) -> Species {
        Species::classify(&self.livestock_type)
    }

    pub fn applications(&self) -> &ApplicationRecord {
        &self.applications
    }

    pub fn applied_treatments(&self) -> &[String] {
        self.applications.applied()
    }

    pub fn set_application_eligible(&mut self, eligible: bool) {
        self.applications.set_eligible(eligible);
    }

    pub fn can_receive_application(&self) -> bool {
        self.applications.is_eligible() && self.animal_count > 0
    }

    /// Apply today's treatment. See [`LivestockProduct::apply_on`].
    pub fn apply(&mut self) -> bool {
        self.apply_on(Utc::now().date_naive())
    }

    /// Record an application dated `date` if the unit can receive one.
    pub fn apply_on(&mut self, date: NaiveDate) -> bool {
        if !self.can_receive_application() {
            return false;
        }
        let species = self.species();
        self.applications.record(date, species);
        true
    }

    pub fn application_status(&self) -> String {
        self.applications.status()
    }
}

impl PartialEq for LivestockProduct {
    fn eq(&self, other: &Self) -> bool {
        self.base.id() == other.base.id()
    }
}

impl Eq for LivestockProduct {}

impl Entity for LivestockProduct {
    type Id = UnitId;

    fn id(&self) -> &Self::Id {
        self.base.id()
    }
}

impl Record for LivestockProduct {
    const SEQUENCE: CodeSequence = CodeSequence::new("GAN");

    fn rekey(&mut self, id: Self::Id) {
        self.base.rekey(id);
    }
}

impl Validate for LivestockProduct {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.base.check(&mut errors);
        errors.require_text(&self.livestock_type, "livestock type is required");
        errors.check(self.animal_count > 0, "animal count must be greater than zero");
        errors.check(self.average_weight >= 0.0, "average weight cannot be negative");
        errors.check(self.daily_production >= 0.0, "daily production cannot be negative");
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holstein() -> LivestockProduct {
        let mut p = LivestockProduct::new("GAN001");
        p.base.name = "Ganado Holstein".to_string();
        p.livestock_type = "Bovino lechero".to_string();
        p.animal_count = 45;
        p.average_weight = 520.0;
        p.daily_production = 18.5;
        p.base.production_cost = 3_500_000.0;
        p.base.sale_price = 1200.0;
        p.base.quantity_produced = 25_000.0;
        p.feeding_type = "Pastoreo + suplemento".to_string();
        p
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn profitability_is_per_animal_per_month() {
        // 18.5 * 1200 * 30 = 666,000 income per animal, 3.5M cost per animal
        assert_eq!(holstein().profitability(), -2_834_000.0);
    }

    #[test]
    fn empty_herd_yields_zero() {
        let mut p = holstein();
        p.animal_count = 0;
        assert_eq!(p.profitability(), 0.0);
        assert_eq!(p.cost_per_animal_per_day(), 0.0);
        assert_eq!(p.total_weight(), 0.0);
    }

    #[test]
    fn herd_totals() {
        let p = holstein();
        assert_eq!(p.total_weight(), 23_400.0);
        assert_eq!(p.monthly_production(), 24_975.0);
        assert_eq!(p.daily_output(), 832.5);
        assert!((p.cost_per_animal_per_day() - 3_500_000.0 / 45.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn application_appends_and_stays_eligible() {
        let mut p = holstein();
        assert!(p.can_receive_application());

        assert!(p.apply_on(day()));
        assert!(p.apply_on(day()));

        assert!(p.can_receive_application());
        assert_eq!(
            p.applied_treatments(),
            [
                "Application performed on 2025-06-10",
                "Foot-and-mouth vaccine applied",
                "Application performed on 2025-06-10",
                "Foot-and-mouth vaccine applied",
            ]
        );
    }

    #[test]
    fn application_requires_animals_and_eligibility() {
        let mut empty = holstein();
        empty.animal_count = 0;
        assert!(!empty.apply_on(day()));
        assert!(empty.applied_treatments().is_empty());

        let mut gated = holstein();
        gated.set_application_eligible(false);
        assert!(!gated.apply_on(day()));
        assert_eq!(gated.application_status(), "No applications performed");
    }

    #[test]
    fn new_unit_defaults() {
        let p = LivestockProduct::new("GAN010");
        assert_eq!(p.feeding_type, "Pastoreo");
        assert!(p.applications().is_eligible());
        assert!(!p.can_receive_application());
    }

    #[test]
    fn validation_requires_animals() {
        assert_eq!(holstein().validate(), Ok(()));

        let mut p = holstein();
        p.animal_count = 0;
        p.average_weight = -3.0;
        let errors = p.validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                "animal count must be greater than zero",
                "average weight cannot be negative",
            ]
        );
    }
}
