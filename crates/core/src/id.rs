//! Strongly-typed record codes used across the domain.
//!
//! Codes are short, human-readable keys such as `AGR001` or `F003`: a fixed
//! alphabetic prefix followed by a zero-padded sequence number.

use serde::{Deserialize, Serialize};

/// Identifier of a production unit (agricultural or livestock).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

/// Identifier of a farm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmCode(String);

macro_rules! impl_code_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $t {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

impl_code_newtype!(UnitId);
impl_code_newtype!(FarmCode);

/// Sequential code generator for one record kind.
///
/// The prefix is stripped **by length**, not by matching: `XYZ007` counts as 7
/// for an `AGR` sequence. A suffix that is missing or not a number counts as 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CodeSequence {
    prefix: &'static str,
}

impl CodeSequence {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Numeric suffix of `code` under this sequence.
    ///
    /// Suffixes are unsigned: a signed suffix such as `AGR-4` counts as 0.
    pub fn suffix_of(&self, code: &str) -> u32 {
        code.get(self.prefix.len()..)
            .and_then(|digits| digits.parse::<u32>().ok())
            .unwrap_or(0)
    }

    /// Render `n` as a code, zero-padded to three digits.
    pub fn render(&self, n: u32) -> String {
        format!("{}{:03}", self.prefix, n)
    }

    /// Next free code after the highest suffix among `codes`.
    pub fn next<'a, I>(&self, codes: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let max = codes
            .into_iter()
            .map(|code| self.suffix_of(code))
            .max()
            .unwrap_or(0);

        self.render(max.saturating_add(1))
    }
}
