//! Cooperative-wide configuration record.
//!
//! Built once at process start (`CooperativeInfo::from_env`) and shared by
//! reference as a [`SharedCooperative`]. Writers are expected to be rare and
//! single; the lock only keeps readers from seeing a torn record.

use std::sync::{Arc, RwLock};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Shared handle to the process-wide cooperative record.
pub type SharedCooperative = Arc<RwLock<CooperativeInfo>>;

/// Identity of the cooperative operating the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooperativeInfo {
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub municipality: String,
    pub manager: String,
    pub founded_at: NaiveDateTime,
    pub member_count: u32,
    pub system_version: String,
}

impl Default for CooperativeInfo {
    fn default() -> Self {
        Self {
            name: "Cooperativa Agropecuaria del Tolima - COAGROTOL".to_string(),
            tax_id: "890.123.456-7".to_string(),
            address: "Carrera 3 # 12-34, Ibagué, Tolima".to_string(),
            phone: "(608) 261-1234".to_string(),
            email: "info@coagrotol.co".to_string(),
            municipality: "Ibagué".to_string(),
            manager: "María Elena Rodríguez".to_string(),
            founded_at: NaiveDate::from_ymd_opt(1995, 8, 15)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
                .unwrap_or_default(),
            member_count: 245,
            system_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl CooperativeInfo {
    /// Defaults overridden by `AGROCOOP_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `AGROCOOP_*` key.
    ///
    /// Malformed numbers or dates keep the default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut info = Self::default();

        let text_fields: [(&str, &mut String); 7] = [
            ("AGROCOOP_NAME", &mut info.name),
            ("AGROCOOP_TAX_ID", &mut info.tax_id),
            ("AGROCOOP_ADDRESS", &mut info.address),
            ("AGROCOOP_PHONE", &mut info.phone),
            ("AGROCOOP_EMAIL", &mut info.email),
            ("AGROCOOP_MUNICIPALITY", &mut info.municipality),
            ("AGROCOOP_MANAGER", &mut info.manager),
        ];
        for (key, field) in text_fields {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }

        if let Some(raw) = lookup("AGROCOOP_MEMBERS") {
            match raw.trim().parse::<u32>() {
                Ok(count) => info.member_count = count,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring AGROCOOP_MEMBERS"),
            }
        }

        if let Some(raw) = lookup("AGROCOOP_FOUNDED_AT") {
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => info.founded_at = date.and_time(info.founded_at.time()),
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring AGROCOOP_FOUNDED_AT"),
            }
        }

        info
    }

    /// Wrap into the shared, process-wide handle.
    pub fn shared(self) -> SharedCooperative {
        Arc::new(RwLock::new(self))
    }

    pub fn increment_members(&mut self) {
        self.member_count = self.member_count.saturating_add(1);
    }

    pub fn update_manager(&mut self, manager: impl Into<String>) {
        self.manager = manager.into();
    }

    pub fn full_information(&self) -> String {
        let mut out = String::from("=== COOPERATIVE INFORMATION ===\n\n");
        out.push_str(&format!("Name: {}\n", self.name));
        out.push_str(&format!("Tax ID: {}\n", self.tax_id));
        out.push_str(&format!("Address: {}\n", self.address));
        out.push_str(&format!("Phone: {}\n", self.phone));
        out.push_str(&format!("Email: {}\n", self.email));
        out.push_str(&format!("Municipality: {}\n", self.municipality));
        out.push_str(&format!("Manager: {}\n", self.manager));
        out.push_str(&format!("Founded: {}\n", self.founded_at.format("%d/%m/%Y")));
        out.push_str(&format!("Members: {}\n", self.member_count));
        out.push_str(&format!("System version: {}\n", self.system_version));
        out
    }

    pub fn summary(&self) -> String {
        format!(
            "{} - {} | Members: {}",
            self.name, self.municipality, self.member_count
        )
    }
}
