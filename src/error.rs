// this_file: src/error.rs
//! Error types for the omamori library

use thiserror::Error;

/// Main error type for omamori operations
#[derive(Debug, Error)]
pub enum Error {
    /// Major or minor id outside the fixed 12 x 4 catalog
    #[error("Invalid {kind} id {id} (expected 0..{limit})")]
    InvalidCategoryId {
        kind: &'static str,
        id: u32,
        limit: u32,
    },

    /// Material id outside the loaded catalog
    #[error("Invalid material id {id} (catalog has {count} materials)")]
    InvalidMaterialId { id: u32, count: usize },

    /// Empty or otherwise unusable seed text
    #[error("Malformed seed: {reason}")]
    MalformedSeed { reason: String },

    /// Attribute record that violates its own invariants
    #[error("Invalid token attributes: {reason}")]
    InvalidTokenAttributes { reason: String },

    /// Material catalog that failed validation
    #[error("Invalid material catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// Batch job specification error
    #[error("Invalid job specification: {reason}")]
    InvalidJobSpec { reason: String },

    /// Token metadata or token URI that cannot be decoded
    #[error("Invalid token metadata: {reason}")]
    InvalidMetadata { reason: String },

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for omamori operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_error_names_the_range() {
        let err = Error::InvalidCategoryId {
            kind: "major",
            id: 12,
            limit: 12,
        };
        assert_eq!(err.to_string(), "Invalid major id 12 (expected 0..12)");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = parse.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
