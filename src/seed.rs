// this_file: src/seed.rs

//! Seed values and the rolling hash every random draw is built on.
//!
//! The hash is the classic 31-multiplier string hash over UTF-16 code units,
//! wrapped to a signed 32-bit integer and folded to its absolute value. Every
//! derived draw (material, punch count, layout attempts, slot rotation) hashes
//! the seed text concatenated with a component suffix, so the exact string
//! forms produced here are part of the rendering contract.

use crate::error::Result;
use crate::security::validate_seed_text;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash a string to a non-negative integer.
///
/// `i32::MIN` folds to `2^31`, which is why the result is `u32`.
pub fn hash_code(text: &str) -> u32 {
    let hash = text
        .encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)));
    hash.unsigned_abs()
}

/// Opaque, immutable seed driving every selection for one token.
///
/// Equality and hashing follow the text content, so two seeds built
/// independently from the same characters select identical outputs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

impl Seed {
    /// Build a seed from text, rejecting empty or unusable input.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        validate_seed_text(&text)?;
        Ok(Self(text))
    }

    /// Wrap text produced internally from a known-good alphabet.
    pub(crate) fn from_trusted(text: String) -> Self {
        debug_assert!(validate_seed_text(&text).is_ok());
        Self(text)
    }

    /// Seed text exactly as it is hashed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hash of the seed text.
    pub fn hash(&self) -> u32 {
        hash_code(&self.0)
    }

    /// Integer value when the text is a canonical decimal number
    /// (digits only, no leading zeros) that fits in 128 bits.
    pub fn as_integer(&self) -> Option<u128> {
        let text = self.0.as_str();
        let canonical = !text.is_empty()
            && text.bytes().all(|b| b.is_ascii_digit())
            && (text == "0" || !text.starts_with('0'));
        if canonical {
            text.parse().ok()
        } else {
            None
        }
    }

    /// Seed as shown in token metadata: `0x` hex for integer seeds, the
    /// text itself otherwise.
    pub fn display_form(&self) -> String {
        match self.as_integer() {
            Some(value) => format!("0x{value:x}"),
            None => self.0.clone(),
        }
    }

    /// Namespaced derivation: `"{seed}_{component}"`.
    pub fn derive(&self, component: &str) -> String {
        format!("{}_{}", self.0, component)
    }

    /// Hash of the seed text followed directly by `suffix`.
    pub(crate) fn hash_with(&self, suffix: impl fmt::Display) -> u32 {
        hash_code(&format!("{}{}", self.0, suffix))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for Seed {
    fn from(value: u128) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<String> for Seed {
    type Error = crate::error::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Seed {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl std::str::FromStr for Seed {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
