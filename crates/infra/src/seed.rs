//! Cooperative reference data.
//!
//! Repositories built here are loaded without notifications: nobody can be
//! subscribed to a repository that does not exist yet.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};

use agrocoop_farms::{ContactInfo, Farm};
use agrocoop_production::{AgriculturalProduct, LivestockProduct};

use crate::repository::{AgriculturalRepository, FarmRepository, LivestockRepository};

/// The three repositories, shareable across views.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub agricultural: Arc<AgriculturalRepository>,
    pub livestock: Arc<LivestockRepository>,
    pub farms: Arc<FarmRepository>,
}

impl Repositories {
    pub fn seeded() -> Self {
        Self {
            agricultural: Arc::new(agricultural_repository()),
            livestock: Arc::new(livestock_repository()),
            farms: Arc::new(farm_repository()),
        }
    }

    pub fn empty() -> Self {
        Self {
            agricultural: AgriculturalRepository::arc(),
            livestock: LivestockRepository::arc(),
            farms: FarmRepository::arc(),
        }
    }
}

pub fn agricultural_repository() -> AgriculturalRepository {
    AgriculturalRepository::from_records(agricultural_units())
}

pub fn livestock_repository() -> LivestockRepository {
    LivestockRepository::from_records(livestock_units(Utc::now().date_naive()))
}

pub fn farm_repository() -> FarmRepository {
    FarmRepository::from_records(farms())
}

pub fn agricultural_units() -> Vec<AgriculturalProduct> {
    vec![
        crop(CropSeed {
            id: "AGR001",
            name: "Café Arábica",
            crop_type: "Café",
            hectares: 5.0,
            yield_per_hectare: 1.8,
            cost: 2_500_000.0,
            price: 8_500.0,
            quantity: 9_000.0,
            soil_type: "Franco arcilloso",
            season: "Cosecha principal",
        }),
        crop(CropSeed {
            id: "AGR002",
            name: "Arroz Fedearroz 67",
            crop_type: "Arroz",
            hectares: 12.0,
            yield_per_hectare: 6.5,
            cost: 4_800_000.0,
            price: 1_850.0,
            quantity: 78_000.0,
            soil_type: "Franco",
            season: "Temporada seca",
        }),
    ]
}

/// Herd units dated relative to `today`.
pub fn livestock_units(today: NaiveDate) -> Vec<LivestockProduct> {
    vec![
        herd(
            HerdSeed {
                id: "GAN001",
                name: "Ganado Holstein",
                livestock_type: "Bovino lechero",
                animals: 45,
                average_weight: 520.0,
                daily_production: 18.5,
                cost: 3_500_000.0,
                price: 1_200.0,
                quantity: 25_000.0,
                feeding_type: "Pastoreo + suplemento",
                age_days: 30,
            },
            today,
        ),
        herd(
            HerdSeed {
                id: "GAN002",
                name: "Cerdos Pietrain",
                livestock_type: "Porcino de engorde",
                animals: 120,
                average_weight: 85.0,
                daily_production: 0.8,
                cost: 2_800_000.0,
                price: 7_500.0,
                quantity: 10_200.0,
                feeding_type: "Concentrado balanceado",
                age_days: 15,
            },
            today,
        ),
        herd(
            HerdSeed {
                id: "GAN003",
                name: "Gallinas Ponedoras",
                livestock_type: "Avícola ponedora",
                animals: 500,
                average_weight: 2.2,
                daily_production: 420.0,
                cost: 1_800_000.0,
                price: 450.0,
                quantity: 12_600.0,
                feeding_type: "Concentrado especializado",
                age_days: 7,
            },
            today,
        ),
    ]
}

pub fn farms() -> Vec<Farm> {
    vec![
        farm(FarmSeed {
            code: "F001",
            name: "Villa María",
            owner: "Carlos Rodríguez",
            municipality: "Ibagué",
            village: "La Gaviota",
            area: 25.5,
            terrain: "Ondulado",
            infrastructure: "Riego por aspersión, bodega, casa",
            phone: "310-555-0123",
            email: "carlos.rodriguez@email.com",
        }),
        farm(FarmSeed {
            code: "F002",
            name: "El Horizonte",
            owner: "Ana Patricia López",
            municipality: "Espinal",
            village: "San Rafael",
            area: 48.0,
            terrain: "Plano",
            infrastructure: "Riego por goteo, silos, oficina",
            phone: "320-555-0456",
            email: "ana.lopez@email.com",
        }),
        farm(FarmSeed {
            code: "F003",
            name: "La Esperanza",
            owner: "Miguel Ángel Torres",
            municipality: "Guamo",
            village: "El Carmen",
            area: 15.8,
            terrain: "Montañoso",
            infrastructure: "Básica, tanque de agua",
            phone: "315-555-0789",
            email: "miguel.torres@email.com",
        }),
    ]
}

struct CropSeed {
    id: &'static str,
    name: &'static str,
    crop_type: &'static str,
    hectares: f64,
    yield_per_hectare: f64,
    cost: f64,
    price: f64,
    quantity: f64,
    soil_type: &'static str,
    season: &'static str,
}

fn crop(seed: CropSeed) -> AgriculturalProduct {
    let mut unit = AgriculturalProduct::new(seed.id);
    unit.base.name = seed.name.to_string();
    unit.base.production_cost = seed.cost;
    unit.base.sale_price = seed.price;
    unit.base.quantity_produced = seed.quantity;
    unit.crop_type = seed.crop_type.to_string();
    unit.cultivated_hectares = seed.hectares;
    unit.yield_per_hectare = seed.yield_per_hectare;
    unit.soil_type = seed.soil_type.to_string();
    unit.season = seed.season.to_string();
    unit
}

struct HerdSeed {
    id: &'static str,
    name: &'static str,
    livestock_type: &'static str,
    animals: u32,
    average_weight: f64,
    daily_production: f64,
    cost: f64,
    price: f64,
    quantity: f64,
    feeding_type: &'static str,
    age_days: u64,
}

fn herd(seed: HerdSeed, today: NaiveDate) -> LivestockProduct {
    let mut unit = LivestockProduct::new(seed.id);
    unit.base.name = seed.name.to_string();
    unit.base.production_cost = seed.cost;
    unit.base.sale_price = seed.price;
    unit.base.quantity_produced = seed.quantity;
    unit.base.production_date = today
        .checked_sub_days(Days::new(seed.age_days))
        .unwrap_or(today);
    unit.livestock_type = seed.livestock_type.to_string();
    unit.animal_count = seed.animals;
    unit.average_weight = seed.average_weight;
    unit.daily_production = seed.daily_production;
    unit.feeding_type = seed.feeding_type.to_string();
    unit
}

struct FarmSeed {
    code: &'static str,
    name: &'static str,
    owner: &'static str,
    municipality: &'static str,
    village: &'static str,
    area: f64,
    terrain: &'static str,
    infrastructure: &'static str,
    phone: &'static str,
    email: &'static str,
}

fn farm(seed: FarmSeed) -> Farm {
    let mut farm = Farm::new(seed.code);
    farm.name = seed.name.to_string();
    farm.owner = seed.owner.to_string();
    farm.municipality = seed.municipality.to_string();
    farm.village = seed.village.to_string();
    farm.total_area = seed.area;
    farm.terrain_type = seed.terrain.to_string();
    farm.infrastructure = seed.infrastructure.to_string();
    farm.contact = ContactInfo {
        phone: Some(seed.phone.to_string()),
        email: Some(seed.email.to_string()),
    };
    farm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use agrocoop_core::Validate;

    #[test]
    fn reference_data_is_valid() {
        for unit in agricultural_units() {
            unit.validate().unwrap();
        }
        for unit in livestock_units(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()) {
            unit.validate().unwrap();
        }
        for farm in farms() {
            farm.validate().unwrap();
        }
    }

    #[test]
    fn seeded_repositories_continue_the_sequences() {
        let repos = Repositories::seeded();
        assert_eq!(repos.agricultural.next_id(), "AGR003");
        assert_eq!(repos.livestock.next_id(), "GAN004");
        assert_eq!(repos.farms.next_id(), "F004");
        assert!(repos.agricultural.observers().is_empty());
    }

    #[test]
    fn herd_dates_trail_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let dates: Vec<_> = livestock_units(today)
            .into_iter()
            .map(|unit| unit.base.production_date)
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
                NaiveDate::from_ymd_opt(2025, 5, 17).unwrap(),
                NaiveDate::from_ymd_opt(2025, 5, 25).unwrap(),
            ]
        );
    }

    #[test]
    fn seeded_figures() {
        let repos = Repositories::seeded();
        assert_eq!(repos.agricultural.total_hectares(), 17.0);
        assert_eq!(repos.livestock.total_animals(), 665);
        assert_eq!(repos.farms.irrigated_farms().len(), 2);
        assert!(repos.farms.large_farms().is_empty());
    }
}
