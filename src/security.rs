// this_file: src/security.rs
//! Input limits and validation for untrusted boundaries (CLI, batch specs,
//! catalog files).

use crate::error::{Error, Result};
use log::warn;

/// Maximum allowed JSON input size (10MB)
pub const MAX_JSON_SIZE: usize = 10 * 1024 * 1024;

/// Maximum allowed number of jobs in a single spec
pub const MAX_JOBS_PER_SPEC: usize = 10_000;

/// Maximum allowed seed length in UTF-16 code units
pub const MAX_SEED_LENGTH: usize = 256;

/// Maximum number of materials a catalog may declare
pub const MAX_CATALOG_SIZE: usize = 256;

/// Maximum length of a material name
pub const MAX_LABEL_LENGTH: usize = 64;

/// Validate JSON input size
pub fn validate_json_size(json: &str) -> Result<()> {
    if json.len() > MAX_JSON_SIZE {
        return Err(Error::InvalidJobSpec {
            reason: format!(
                "JSON input too large: {} bytes (max: {} bytes)",
                json.len(),
                MAX_JSON_SIZE
            ),
        });
    }
    Ok(())
}

/// Validate raw seed text before it is wrapped in a [`crate::Seed`].
pub fn validate_seed_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::MalformedSeed {
            reason: "seed is empty".into(),
        });
    }

    let units = text.encode_utf16().count();
    if units > MAX_SEED_LENGTH {
        return Err(Error::MalformedSeed {
            reason: format!("seed too long: {units} code units (max: {MAX_SEED_LENGTH})"),
        });
    }

    if text.chars().any(char::is_control) {
        warn!("Rejected seed containing control characters");
        return Err(Error::MalformedSeed {
            reason: "seed contains control characters".into(),
        });
    }

    Ok(())
}

/// Validate a `#rrggbb` color used inside SVG attributes.
pub fn validate_color(color: &str) -> Result<()> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(Error::InvalidCatalog {
            reason: format!("color '{color}' is not of the form #rrggbb"),
        });
    }
    Ok(())
}

/// Validate a label that is written verbatim into SVG text nodes.
pub fn validate_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(Error::InvalidCatalog {
            reason: "label is empty".into(),
        });
    }
    if label.chars().count() > MAX_LABEL_LENGTH {
        return Err(Error::InvalidCatalog {
            reason: format!("label '{label}' exceeds {MAX_LABEL_LENGTH} characters"),
        });
    }
    if label
        .chars()
        .any(|c| c.is_control() || matches!(c, '<' | '>' | '&' | '"'))
    {
        return Err(Error::InvalidCatalog {
            reason: format!("label '{label}' contains markup or control characters"),
        });
    }
    Ok(())
}
