//! Observable in-memory repositories, one per record kind.
//!
//! Each repository is the exclusive owner of its collection: callers only ever
//! receive clones. Every successful mutation is followed by a change
//! notification to the repository's observers; failed mutations notify nobody.

pub mod agricultural;
pub mod farms;
pub mod in_memory;
pub mod livestock;
pub mod store;

pub use farms::MunicipalityStats;
pub use in_memory::InMemoryRepository;
pub use store::Repository;

use agrocoop_farms::Farm;
use agrocoop_production::{AgriculturalProduct, LivestockProduct};

pub type AgriculturalRepository = InMemoryRepository<AgriculturalProduct>;
pub type LivestockRepository = InMemoryRepository<LivestockProduct>;
pub type FarmRepository = InMemoryRepository<Farm>;
