//! Infrastructure layer: in-memory repositories and reference data.

pub mod repository;
pub mod seed;

pub use repository::{
    AgriculturalRepository, FarmRepository, InMemoryRepository, LivestockRepository,
    MunicipalityStats, Repository,
};
pub use seed::Repositories;
