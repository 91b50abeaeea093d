//! Boundary validation with aggregated, human-readable messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All constraint violations found for one candidate record.
#[derive(Debug, Error, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[error("validation failed: {}", .0.join(", "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Record `message` unless `ok` holds.
    pub fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.push(message);
        }
    }

    /// Record `message` when `value` is empty or whitespace.
    pub fn require_text(&mut self, value: &str, message: impl Into<String>) {
        self.check(!value.trim().is_empty(), message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Domain constraints checked before a record is committed.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// `NNN-NNN-NNNN` or ten bare digits.
pub fn is_phone(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.len() {
        10 => bytes.iter().all(u8::is_ascii_digit),
        12 => bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        }),
        _ => false,
    }
}

/// `local@domain.tld` with a purely alphabetic top-level domain of 2+ letters.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'));

    let domain_chars_ok = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));

    let tld_ok = match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    };

    local_ok && domain_chars_ok && tld_ok
}
