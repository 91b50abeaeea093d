//! Report runner behind the `agrocoop` binary.
//!
//! Seeds the repositories with the cooperative's reference data, keeps a
//! dashboard attached while a few routine mutations happen, and writes every
//! report to the given sink.

use std::io::Write;
use std::sync::{Arc, PoisonError};

use anyhow::Context;

use agrocoop_analytics::{DashboardView, ProfitabilityCalculator};
use agrocoop_core::SharedCooperative;
use agrocoop_farms::Farm;
use agrocoop_infra::{Repositories, Repository};

pub fn run(out: &mut impl Write, cooperative: &SharedCooperative) -> anyhow::Result<()> {
    {
        let info = cooperative.read().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(cooperative = %info.summary(), "starting");
        writeln!(out, "{}", info.full_information())?;
    }

    let repos = Repositories::seeded();
    let dashboard = DashboardView::attach(&repos);
    let calculator =
        ProfitabilityCalculator::new(Arc::clone(&repos.agricultural), Arc::clone(&repos.livestock));

    register_member_farm(&repos, cooperative)?;

    if repos.livestock.apply_treatment("GAN001") {
        if let Some(status) = repos.livestock.application_status("GAN001") {
            writeln!(out, "GAN001 {status}")?;
        }
    } else {
        tracing::warn!(key = "GAN001", "treatment not applied");
    }

    let snapshot = calculator.snapshot();
    let statistics = serde_json::to_string_pretty(&snapshot.statistics())
        .context("serializing general statistics")?;
    writeln!(out, "\n=== GENERAL STATISTICS ===\n{statistics}\n")?;
    writeln!(out, "{}", snapshot.profitability_report())?;
    writeln!(out, "{}\n", snapshot.comparative_analysis())?;
    writeln!(out, "{}\n", snapshot.executive_summary())?;
    writeln!(out, "{}", snapshot.recommendation())?;

    writeln!(out, "=== FARMS BY MUNICIPALITY ===")?;
    for stats in repos.farms.stats_by_municipality() {
        writeln!(out, "{stats}")?;
    }

    let totals = serde_json::to_string_pretty(&dashboard.totals())
        .context("serializing dashboard totals")?;
    writeln!(out, "\n=== DASHBOARD ===\n{totals}")?;

    dashboard.detach(&repos);
    Ok(())
}

/// Register a new member's farm and count the member.
fn register_member_farm(repos: &Repositories, cooperative: &SharedCooperative) -> anyhow::Result<()> {
    let mut farm = Farm::new(repos.farms.next_id());
    farm.name = "Los Naranjos".to_string();
    farm.owner = "Luisa Fernanda Ríos".to_string();
    farm.municipality = "Ibagué".to_string();
    farm.village = "Totumo".to_string();
    farm.total_area = 32.0;
    farm.infrastructure = "Riego por goteo, beneficiadero".to_string();

    repos
        .farms
        .create_validated(farm)
        .context("registering member farm")?;

    let mut info = cooperative.write().unwrap_or_else(PoisonError::into_inner);
    info.increment_members();
    Ok(())
}
