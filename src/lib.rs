// this_file: src/lib.rs
//! Omamori - deterministic talisman artwork and rarity engine
//!
//! This library provides functionality for:
//! - Seed hashing and seed-driven selectors (material, punch count)
//! - The fixed 12 x 4 category catalog and its glyph layouts
//! - Collision-free punch layout with integer-only geometry
//! - SVG composition and token metadata
//! - Batch processing via JSON job specifications

pub mod arcana;
pub mod batch;
pub mod cache;
pub mod compose;
pub mod error;
pub mod glyphs;
pub mod logging;
pub mod materials;
pub mod metadata;
pub mod punch;
pub mod rarity;
pub mod security;
pub mod seed;
mod svg;

// Re-export commonly used types
pub use arcana::{Major, Minor};
pub use batch::{Job, JobResult, JobSpec};
pub use cache::{RenderCache, RenderCacheStats, RenderKey};
pub use compose::{render, render_seeded, render_seeded_with, TokenAttributes};
pub use error::{Error, Result};
pub use glyphs::{render_major_glyph, render_minor_glyph};
pub use materials::{Material, MaterialCatalog, Tier};
pub use metadata::TokenMetadata;
pub use punch::{layout_punches, PunchLayout, PunchSlot};
pub use rarity::{pick_material, pick_material_from, punch_count};
pub use seed::{hash_code, Seed};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use batch::{AttributesOutput, RenderingOutput, TimingInfo};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared state for job execution: the material catalog and an optional
/// caller-owned render cache.
#[derive(Clone, Debug)]
pub struct ExecutionOptions {
    pub catalog: Arc<MaterialCatalog>,
    pub cache: Option<RenderCache>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            catalog: Arc::new(MaterialCatalog::builtin().clone()),
            cache: None,
        }
    }
}

impl ExecutionOptions {
    pub fn new(catalog: MaterialCatalog, cache_size: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cache: RenderCache::new(cache_size),
        }
    }
}

/// Aggregate counters for one batch run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchStats {
    pub jobs: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<RenderCacheStats>,
}

/// Process a single job. Never panics on bad input; failures become error
/// results carrying the job id.
pub fn process_job_with_options(job: &Job, options: &ExecutionOptions) -> JobResult {
    let start = Instant::now();
    match run_job(job, options) {
        Ok(mut result) => {
            result.timing.total_ms = elapsed_ms(start);
            result
        }
        Err(e) => {
            log::debug!("Job {} failed: {}", job.id, e);
            let mut result = JobResult::error(job.id.clone(), e.to_string());
            result.timing.total_ms = elapsed_ms(start);
            result
        }
    }
}

/// Process a single job with default options.
pub fn process_job(job: &Job) -> JobResult {
    process_job_with_options(job, &ExecutionOptions::default())
}

/// Process all jobs in parallel; results keep input order.
pub fn process_jobs(jobs: &[Job], options: &ExecutionOptions) -> (Vec<JobResult>, BatchStats) {
    let start = Instant::now();
    let results: Vec<JobResult> = jobs
        .par_iter()
        .map(|job| process_job_with_options(job, options))
        .collect();
    let succeeded = results.iter().filter(|r| r.is_success()).count();
    let stats = BatchStats {
        jobs: results.len(),
        succeeded,
        failed: results.len() - succeeded,
        elapsed_ms: elapsed_ms(start),
        cache: options.cache.as_ref().map(RenderCache::stats),
    };
    (results, stats)
}

fn run_job(job: &Job, options: &ExecutionOptions) -> Result<JobResult> {
    job.validate()?;
    let catalog = options.catalog.as_ref();
    let seed = Seed::new(job.seed.as_str())?;
    let attributes = TokenAttributes::from_seed(seed, job.major, job.minor, job.material, catalog)?;
    let material = catalog.get(attributes.material_id())?;

    let mut timing = TimingInfo::default();
    let mut cached = None;
    let base64 = job.output.encoding == "base64";

    let rendering = match job.output.format.as_str() {
        "attributes" => None,
        "svg" => {
            let t0 = Instant::now();
            let svg: Arc<str> = match &options.cache {
                Some(cache) => {
                    let (svg, hit) =
                        cache.get_or_render(RenderKey::from(&attributes), || render(&attributes, catalog))?;
                    cached = Some(hit);
                    svg
                }
                None => Arc::from(render(&attributes, catalog)?),
            };
            timing.render_ms = elapsed_ms(t0);
            let data = if base64 {
                STANDARD.encode(svg.as_bytes())
            } else {
                svg.to_string()
            };
            Some(RenderingOutput {
                format: "svg".to_string(),
                encoding: job.output.encoding.clone(),
                data,
            })
        }
        "metadata" => {
            let t0 = Instant::now();
            let token_id = job.token_id.unwrap_or(0);
            let meta = TokenMetadata::build(token_id, &attributes, catalog, job.hype_burned_wei()?)?;
            timing.render_ms = elapsed_ms(t0);
            let data = if base64 {
                meta.token_uri()?
            } else {
                serde_json::to_string(&meta)?
            };
            Some(RenderingOutput {
                format: "metadata".to_string(),
                encoding: job.output.encoding.clone(),
                data,
            })
        }
        other => {
            return Err(Error::InvalidJobSpec {
                reason: format!("Invalid output format '{other}'"),
            })
        }
    };

    Ok(JobResult {
        id: job.id.clone(),
        status: "success".to_string(),
        attributes: Some(AttributesOutput {
            major_id: attributes.major().id(),
            minor_id: attributes.minor().id(),
            major: attributes.major().name().to_string(),
            minor: attributes.minor().name().to_string(),
            material_id: material.id,
            material: material.name.clone(),
            tier: material.tier,
            punch_count: attributes.punch_count(),
            seed: attributes.seed().to_string(),
        }),
        rendering,
        error: None,
        cached,
        timing,
    })
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
