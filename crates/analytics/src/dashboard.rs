//! Live totals kept current by repository notifications.

use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde::Serialize;

use agrocoop_events::{ChangeEvent, Observer};
use agrocoop_infra::{
    AgriculturalRepository, FarmRepository, LivestockRepository, Repositories, Repository,
};

use crate::calculator::Snapshot;
use crate::statistics::{GeneralStatistics, SectorAverages};

/// What the dashboard shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub statistics: GeneralStatistics,
    pub averages: SectorAverages,
    pub farm_count: usize,
    pub farm_area: f64,
    /// Number of recomputations, the initial one included.
    pub refreshes: u64,
    pub last_event: Option<ChangeEvent>,
}

/// Observer that re-pulls totals from every repository on each change.
///
/// Holds the repositories weakly; a dropped repository reads as empty.
#[derive(Debug)]
pub struct DashboardView {
    agricultural: Weak<AgriculturalRepository>,
    livestock: Weak<LivestockRepository>,
    farms: Weak<FarmRepository>,
    totals: RwLock<DashboardTotals>,
}

impl DashboardView {
    /// Compute the initial totals and subscribe to all three repositories.
    pub fn attach(repos: &Repositories) -> Arc<Self> {
        let view = Arc::new(Self {
            agricultural: Arc::downgrade(&repos.agricultural),
            livestock: Arc::downgrade(&repos.livestock),
            farms: Arc::downgrade(&repos.farms),
            totals: RwLock::new(DashboardTotals::default()),
        });
        view.refresh(None);

        let observer: Arc<dyn Observer> = view.clone();
        repos.agricultural.subscribe(Arc::clone(&observer));
        repos.livestock.subscribe(Arc::clone(&observer));
        repos.farms.subscribe(observer);
        view
    }

    /// Stop listening to `repos`. Returns `true` if any subscription was removed.
    pub fn detach(self: &Arc<Self>, repos: &Repositories) -> bool {
        let observer: Arc<dyn Observer> = self.clone();
        let agricultural = repos.agricultural.observers().unsubscribe_observer(&observer);
        let livestock = repos.livestock.observers().unsubscribe_observer(&observer);
        let farms = repos.farms.observers().unsubscribe_observer(&observer);
        agricultural || livestock || farms
    }

    pub fn totals(&self) -> DashboardTotals {
        self.totals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn refresh(&self, event: Option<ChangeEvent>) {
        let snapshot = Snapshot {
            agricultural: self.agricultural.upgrade().map(|r| r.list()).unwrap_or_default(),
            livestock: self.livestock.upgrade().map(|r| r.list()).unwrap_or_default(),
        };
        let (farm_count, farm_area) = self
            .farms
            .upgrade()
            .map(|r| (r.total(), r.total_area()))
            .unwrap_or_default();

        let mut totals = self.totals.write().unwrap_or_else(PoisonError::into_inner);
        totals.statistics = snapshot.statistics();
        totals.averages = snapshot.averages();
        totals.farm_count = farm_count;
        totals.farm_area = farm_area;
        totals.refreshes += 1;
        if event.is_some() {
            totals.last_event = event;
        }

        tracing::debug!(
            units = totals.statistics.total_units,
            farms = totals.farm_count,
            refreshes = totals.refreshes,
            "dashboard refreshed"
        );
    }
}

impl Observer for DashboardView {
    fn on_change(&self, event: ChangeEvent) {
        self.refresh(Some(event));
    }
}
