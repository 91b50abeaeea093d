//! Shared base record and the production-unit sum type.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use agrocoop_core::{Entity, UnitId, ValidationErrors};

use crate::agricultural::AgriculturalProduct;
use crate::livestock::LivestockProduct;

/// Attributes every production unit carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitBase {
    id: UnitId,
    pub name: String,
    pub production_date: NaiveDate,
    /// Currency units.
    pub production_cost: f64,
    pub quantity_produced: f64,
    /// Currency units per unit of quantity.
    pub sale_price: f64,
}

impl UnitBase {
    /// Zeroed base record dated today.
    pub fn new(id: impl Into<UnitId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            production_date: Utc::now().date_naive(),
            production_cost: 0.0,
            quantity_produced: 0.0,
            sale_price: 0.0,
        }
    }

    pub fn id(&self) -> &UnitId {
        &self.id
    }

    pub(crate) fn rekey(&mut self, id: UnitId) {
        self.id = id;
    }

    pub fn income_total(&self) -> f64 {
        self.quantity_produced * self.sale_price
    }

    /// Margin of sale price over production cost, in percent; 0 when cost is 0.
    pub fn profit_margin_pct(&self) -> f64 {
        if self.production_cost == 0.0 {
            return 0.0;
        }
        (self.sale_price - self.production_cost) / self.production_cost * 100.0
    }

    pub(crate) fn check(&self, errors: &mut ValidationErrors) {
        errors.require_text(self.id.as_str(), "id is required");
        errors.require_text(&self.name, "name is required");
        errors.check(self.production_cost > 0.0, "production cost must be greater than zero");
        errors.check(self.sale_price >= 0.0, "sale price cannot be negative");
        errors.check(self.quantity_produced >= 0.0, "quantity produced cannot be negative");
    }
}

/// Which kind of production a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Agricultural,
    Livestock,
}

impl Sector {
    pub fn label(&self) -> &'static str {
        match self {
            Sector::Agricultural => "Agricultural",
            Sector::Livestock => "Livestock",
        }
    }

    /// What one unit of profitability is measured against.
    pub fn profitability_unit(&self) -> &'static str {
        match self {
            Sector::Agricultural => "per hectare",
            Sector::Livestock => "per animal/month",
        }
    }
}

impl core::fmt::Display for Sector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Any production unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "sector", rename_all = "lowercase")]
pub enum ProductionUnit {
    Agricultural(AgriculturalProduct),
    Livestock(LivestockProduct),
}

impl ProductionUnit {
    pub fn base(&self) -> &UnitBase {
        match self {
            ProductionUnit::Agricultural(p) => &p.base,
            ProductionUnit::Livestock(p) => &p.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn sector(&self) -> Sector {
        match self {
            ProductionUnit::Agricultural(_) => Sector::Agricultural,
            ProductionUnit::Livestock(_) => Sector::Livestock,
        }
    }

    /// Net result per hectare (agricultural) or per animal per month (livestock).
    pub fn profitability(&self) -> f64 {
        match self {
            ProductionUnit::Agricultural(p) => p.profitability(),
            ProductionUnit::Livestock(p) => p.profitability(),
        }
    }
}

impl Entity for ProductionUnit {
    type Id = UnitId;

    fn id(&self) -> &Self::Id {
        self.base().id()
    }
}

impl PartialEq for ProductionUnit {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ProductionUnit {}

impl From<AgriculturalProduct> for ProductionUnit {
    fn from(value: AgriculturalProduct) -> Self {
        ProductionUnit::Agricultural(value)
    }
}

impl From<LivestockProduct> for ProductionUnit {
    fn from(value: LivestockProduct) -> Self {
        ProductionUnit::Livestock(value)
    }
}
