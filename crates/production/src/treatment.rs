//! Treatment/application sub-state of a livestock unit.
//!
//! A unit starts eligible and stays eligible after every application: there is
//! no cooldown between applications. Records are append-only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coarse species classification used to pick the routine treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Bovine,
    Porcine,
    Poultry,
    Other,
}

impl Species {
    /// Classify a free-text livestock type such as "Bovino lechero".
    pub fn classify(livestock_type: &str) -> Self {
        let t = livestock_type.to_lowercase();
        if t.contains("bovin") {
            Species::Bovine
        } else if t.contains("porcin") {
            Species::Porcine
        } else if t.contains("avícola") || t.contains("avicola") || t.contains("poultry") {
            Species::Poultry
        } else {
            Species::Other
        }
    }

    /// Treatment recorded alongside every application for this species.
    pub fn routine_treatment(&self) -> Option<&'static str> {
        match self {
            Species::Bovine => Some("Foot-and-mouth vaccine applied"),
            Species::Porcine => Some("Deworming applied"),
            Species::Poultry => Some("Vitamins applied"),
            Species::Other => None,
        }
    }
}

/// Eligibility gate plus the ordered log of applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    eligible: bool,
    applied: Vec<String>,
}

impl Default for ApplicationRecord {
    fn default() -> Self {
        Self {
            eligible: true,
            applied: Vec::new(),
        }
    }
}

impl ApplicationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    pub fn set_eligible(&mut self, eligible: bool) {
        self.eligible = eligible;
    }

    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// Append the records for one application on `date`.
    ///
    /// Leaves the unit eligible.
    pub(crate) fn record(&mut self, date: NaiveDate, species: Species) {
        self.applied.push(format!("Application performed on {date}"));
        if let Some(treatment) = species.routine_treatment() {
            self.applied.push(treatment.to_string());
        }
        self.eligible = true;
    }

    /// Human-readable listing of everything applied so far.
    pub fn status(&self) -> String {
        if self.applied.is_empty() {
            return "No applications performed".to_string();
        }

        let mut status = String::from("Applications performed:\n");
        for entry in &self.applied {
            status.push_str("- ");
            status.push_str(entry);
            status.push('\n');
        }
        status
    }
}
