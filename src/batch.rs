// this_file: src/batch.rs

//! Batch job processing and JSONL I/O.
//!
//! A job spec is one JSON document holding many render requests; each job
//! produces exactly one JSONL result line, in input order.

use crate::error::{Error, Result};
use crate::materials::Tier;
use crate::security::{validate_seed_text, MAX_JOBS_PER_SPEC};
use serde::{Deserialize, Serialize};

/// Only supported spec version.
pub const SPEC_VERSION: &str = "1.0";

/// Complete batch job specification (top-level JSON input).
#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    /// API version (must be "1.0")
    pub version: String,
    /// Render requests, processed independently
    pub jobs: Vec<Job>,
}

/// Single render request.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Unique job identifier for correlation with results
    pub id: String,
    /// Seed text
    pub seed: String,
    /// Major category id (0..12)
    pub major: u32,
    /// Minor category id (0..4)
    pub minor: u32,
    /// Material override; drawn from the seed when absent
    #[serde(default)]
    pub material: Option<u32>,
    /// Token id used in metadata output
    #[serde(default)]
    pub token_id: Option<u64>,
    /// Burned amount in wei as a decimal string (metadata only)
    #[serde(default)]
    pub hype_burned: Option<String>,
    /// Output selection
    #[serde(default)]
    pub output: OutputConfig,
}

/// What a job emits and how it is encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// "svg", "metadata" or "attributes"
    #[serde(default = "default_format")]
    pub format: String,
    /// "utf8" or "base64"
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_format() -> String {
    "svg".to_string()
}

fn default_encoding() -> String {
    "utf8".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            encoding: default_encoding(),
        }
    }
}

/// Job result (JSONL output line).
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    /// Job ID (matches input)
    pub id: String,
    /// Status: "success" or "error"
    pub status: String,
    /// Resolved selections (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributesOutput>,
    /// Document output (absent for "attributes" jobs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendering: Option<RenderingOutput>,
    /// Error message (only present on error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the SVG came from the render cache
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    /// Timing information
    pub timing: TimingInfo,
}

/// Resolved token attributes with display names.
#[derive(Debug, Clone, Serialize)]
pub struct AttributesOutput {
    pub major_id: u32,
    pub minor_id: u32,
    pub major: String,
    pub minor: String,
    pub material_id: u32,
    pub material: String,
    pub tier: Tier,
    pub punch_count: u8,
    pub seed: String,
}

/// Encoded document.
#[derive(Debug, Clone, Serialize)]
pub struct RenderingOutput {
    /// "svg" or "metadata"
    pub format: String,
    /// "utf8" or "base64"
    pub encoding: String,
    /// SVG text, metadata JSON, or their base64/data-URI form
    pub data: String,
}

/// Timing statistics for a job.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimingInfo {
    /// Time spent rendering (milliseconds)
    pub render_ms: f64,
    /// Total time for job (milliseconds)
    pub total_ms: f64,
}

impl JobResult {
    /// Convenience constructor for emitting error results in streaming/CLI paths.
    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: "error".to_string(),
            attributes: None,
            rendering: None,
            error: Some(message.into()),
            cached: None,
            timing: TimingInfo::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

impl JobSpec {
    /// Parse and size-check a spec without validating individual jobs.
    pub fn from_json(json: &str) -> Result<Self> {
        crate::security::validate_json_size(json)?;
        let spec: JobSpec = serde_json::from_str(json)?;
        spec.validate_header()?;
        Ok(spec)
    }

    /// Validate job specification structure and parameters.
    pub fn validate(&self) -> Result<()> {
        self.validate_header()?;

        for job in &self.jobs {
            job.validate()?;
        }

        Ok(())
    }

    /// Validate header-level constraints (version + job counts) without per-job validation.
    pub fn validate_header(&self) -> Result<()> {
        if self.version != SPEC_VERSION {
            return Err(Error::InvalidJobSpec {
                reason: format!(
                    "Unsupported API version '{}', expected '{SPEC_VERSION}'",
                    self.version
                ),
            });
        }

        if self.jobs.is_empty() {
            return Err(Error::InvalidJobSpec {
                reason: "Jobs array is empty".to_string(),
            });
        }

        if self.jobs.len() > MAX_JOBS_PER_SPEC {
            return Err(Error::InvalidJobSpec {
                reason: format!(
                    "Too many jobs in spec: {} (max: {})",
                    self.jobs.len(),
                    MAX_JOBS_PER_SPEC
                ),
            });
        }

        Ok(())
    }
}

impl Job {
    /// Validate request-level parameters. Category and material ids are
    /// checked against the catalogs when the job runs.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidJobSpec {
                reason: "Job ID is empty".to_string(),
            });
        }

        validate_seed_text(&self.seed)?;

        if !matches!(self.output.format.as_str(), "svg" | "metadata" | "attributes") {
            return Err(Error::InvalidJobSpec {
                reason: format!(
                    "Invalid output format '{}', expected 'svg', 'metadata', or 'attributes'",
                    self.output.format
                ),
            });
        }

        if !matches!(self.output.encoding.as_str(), "utf8" | "base64") {
            return Err(Error::InvalidJobSpec {
                reason: format!(
                    "Invalid encoding '{}', expected 'utf8' or 'base64'",
                    self.output.encoding
                ),
            });
        }

        self.hype_burned_wei()?;
        Ok(())
    }

    /// Parsed burned amount; absent means zero.
    pub fn hype_burned_wei(&self) -> Result<u128> {
        match self.hype_burned.as_deref() {
            None => Ok(0),
            Some(text) => text.parse::<u128>().map_err(|_| Error::InvalidJobSpec {
                reason: format!("hype_burned '{text}' is not a non-negative integer wei amount"),
            }),
        }
    }
}
