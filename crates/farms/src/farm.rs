use serde::{Deserialize, Serialize};

use agrocoop_core::validation::{is_email, is_phone};
use agrocoop_core::{CodeSequence, Entity, FarmCode, Record, Validate, ValidationErrors};

/// Share of a farm's total area assumed usable for crops (the rest is
/// buildings, roads and water).
pub const CULTIVABLE_SHARE: f64 = 0.9;

/// Farms above this many hectares count as large.
pub const LARGE_FARM_HECTARES: f64 = 50.0;

/// Contact information for a farm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Land parcel record.
///
/// Two farms are equal when their codes are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    code: FarmCode,
    pub name: String,
    pub owner: String,
    pub municipality: String,
    pub village: String,
    /// Hectares.
    pub total_area: f64,
    pub terrain_type: String,
    /// Free text; irrigation is detected by keyword.
    pub infrastructure: String,
    pub contact: ContactInfo,
}

impl Farm {
    /// A farm with the cooperative's defaults for everything but the code.
    pub fn new(code: impl Into<FarmCode>) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            owner: String::new(),
            municipality: "Ibagué".to_string(),
            village: String::new(),
            total_area: 0.0,
            terrain_type: "Plano".to_string(),
            infrastructure: "Básica".to_string(),
            contact: ContactInfo::default(),
        }
    }

    pub fn code(&self) -> &FarmCode {
        &self.code
    }

    pub fn cultivable_area(&self) -> f64 {
        self.total_area * CULTIVABLE_SHARE
    }

    pub fn is_large(&self) -> bool {
        self.total_area > LARGE_FARM_HECTARES
    }

    pub fn has_irrigation(&self) -> bool {
        let infrastructure = self.infrastructure.to_lowercase();
        infrastructure.contains("riego") || infrastructure.contains("irrigation")
    }

    /// `MUN-VIL-CODE`, e.g. `IBA-LA -F001`; `GEN` stands in for a missing village.
    pub fn location_code(&self) -> String {
        let municipality = abbreviate(&self.municipality);
        let village = if self.village.is_empty() {
            "GEN".to_string()
        } else {
            abbreviate(&self.village)
        };
        format!("{municipality}-{village}-{}", self.code)
    }
}

fn abbreviate(value: &str) -> String {
    value.chars().take(3).collect::<String>().to_uppercase()
}

impl PartialEq for Farm {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Farm {}

impl Entity for Farm {
    type Id = FarmCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

impl Record for Farm {
    const SEQUENCE: CodeSequence = CodeSequence::new("F");

    fn rekey(&mut self, id: Self::Id) {
        self.code = id;
    }
}

impl Validate for Farm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require_text(self.code.as_str(), "code is required");
        errors.require_text(&self.name, "farm name is required");
        errors.require_text(&self.owner, "owner is required");
        errors.check(self.total_area > 0.0, "area must be greater than zero");
        errors.require_text(&self.municipality, "municipality is required");

        if let Some(phone) = self.contact.phone.as_deref() {
            errors.check(is_phone(phone), format!("malformed phone number: {phone}"));
        }
        if let Some(email) = self.contact.email.as_deref() {
            errors.check(is_email(email), format!("malformed email: {email}"));
        }

        errors.into_result()
    }
}
