//! Crop-unit queries.

use agrocoop_production::AgriculturalProduct;

use super::AgriculturalRepository;

impl AgriculturalRepository {
    /// Units whose crop type equals `crop_type`, ignoring case.
    pub fn by_crop_type(&self, crop_type: &str) -> Vec<AgriculturalProduct> {
        let wanted = crop_type.to_lowercase();
        self.filter(|unit| unit.crop_type.to_lowercase() == wanted)
    }

    /// Units planted on the farm with code `farm_code`.
    pub fn by_farm(&self, farm_code: &str) -> Vec<AgriculturalProduct> {
        self.filter(|unit| unit.farm_code.as_ref().is_some_and(|code| code == farm_code))
    }

    pub fn total_hectares(&self) -> f64 {
        self.sum_by(|unit| unit.cultivated_hectares)
    }

    /// Sum of per-hectare profitability across units.
    pub fn total_profitability(&self) -> f64 {
        self.sum_by(AgriculturalProduct::profitability)
    }
}
