use serde::{Deserialize, Serialize};

use agrocoop_core::{CodeSequence, Entity, FarmCode, Record, UnitId, Validate, ValidationErrors};

use crate::unit::UnitBase;

/// Crop production unit.
///
/// `farm_code` is a lookup key into the farm repository, not ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgriculturalProduct {
    pub base: UnitBase,
    pub soil_type: String,
    pub season: String,
    pub cultivated_hectares: f64,
    /// Tons per hectare.
    pub yield_per_hectare: f64,
    pub crop_type: String,
    pub farm_code: Option<FarmCode>,
}

impl AgriculturalProduct {
    pub fn new(id: impl Into<UnitId>) -> Self {
        Self {
            base: UnitBase::new(id),
            soil_type: "Franco".to_string(),
            season: "Todo el año".to_string(),
            cultivated_hectares: 0.0,
            yield_per_hectare: 0.0,
            crop_type: String::new(),
            farm_code: None,
        }
    }

    /// Net result per cultivated hectare; 0 when nothing is cultivated.
    pub fn profitability(&self) -> f64 {
        if self.cultivated_hectares == 0.0 {
            return 0.0;
        }

        let total_cost = self.base.production_cost * self.cultivated_hectares;
        (self.base.income_total() - total_cost) / self.cultivated_hectares
    }

    /// Expected harvest from area and yield.
    pub fn total_production(&self) -> f64 {
        self.cultivated_hectares * self.yield_per_hectare
    }

    pub fn cost_per_kg(&self) -> f64 {
        if self.base.quantity_produced == 0.0 {
            return 0.0;
        }
        self.base.production_cost / self.base.quantity_produced
    }

    /// Dry season and "temporada alta" count as high season.
    pub fn is_high_season(&self) -> bool {
        let season = self.season.to_lowercase();
        ["alta", "seca", "high", "dry"]
            .iter()
            .any(|keyword| season.contains(keyword))
    }
}

impl PartialEq for AgriculturalProduct {
    fn eq(&self, other: &Self) -> bool {
        self.base.id() == other.base.id()
    }
}

impl Eq for AgriculturalProduct {}

impl Entity for AgriculturalProduct {
    type Id = UnitId;

    fn id(&self) -> &Self::Id {
        self.base.id()
    }
}

impl Record for AgriculturalProduct {
    const SEQUENCE: CodeSequence = CodeSequence::new("AGR");

    fn rekey(&mut self, id: Self::Id) {
        self.base.rekey(id);
    }
}

impl Validate for AgriculturalProduct {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.base.check(&mut errors);
        errors.require_text(&self.crop_type, "crop type is required");
        errors.check(
            self.cultivated_hectares > 0.0,
            "cultivated hectares must be greater than zero",
        );
        errors.into_result()
    }
}
