use serde::{Deserialize, Serialize};

/// Kind of mutation a repository just applied.
///
/// The serialized form is the short tag that presentation code already keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeEvent {
    #[serde(rename = "CREAR")]
    Created,
    #[serde(rename = "ACTUALIZAR")]
    Updated,
    #[serde(rename = "ELIMINAR")]
    Deleted,
    #[serde(rename = "APLICAR_TRATAMIENTO")]
    TreatmentApplied,
}

impl ChangeEvent {
    /// Stable short tag for this event.
    pub fn tag(&self) -> &'static str {
        match self {
            ChangeEvent::Created => "CREAR",
            ChangeEvent::Updated => "ACTUALIZAR",
            ChangeEvent::Deleted => "ELIMINAR",
            ChangeEvent::TreatmentApplied => "APLICAR_TRATAMIENTO",
        }
    }
}

impl core::fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}
