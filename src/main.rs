// this_file: src/main.rs
//! Omamori CLI - deterministic talisman renderer

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use omamori::batch::{Job, JobResult, JobSpec};
use omamori::logging::{self, Timer};
use omamori::rarity::{sample_seeds, Distribution};
use omamori::{
    layout_punches, process_job_with_options, process_jobs, render, ExecutionOptions,
    MaterialCatalog, Seed, TokenAttributes, TokenMetadata,
};
use std::io::{self, BufRead, Read, Write};

/// Omamori - deterministic talisman artwork and rarity engine
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: String,

    /// Enable quiet mode (only errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "log_level")]
    quiet: bool,

    /// Material catalog JSON replacing the built-in table
    #[arg(long, global = true)]
    catalog: Option<Utf8PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one token to SVG
    Render {
        #[command(flatten)]
        token: TokenArgs,

        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Print the selections and punch layout for a token as JSON
    Inspect {
        #[command(flatten)]
        token: TokenArgs,
    },

    /// Print token metadata JSON (or a data URI with --uri)
    Metadata {
        #[command(flatten)]
        token: TokenArgs,

        /// Token id
        #[arg(long, default_value_t = 0)]
        token_id: u64,

        /// Burned amount in wei
        #[arg(long, default_value_t = 0)]
        hype_burned: u128,

        /// Emit `data:application/json;base64,...`
        #[arg(long)]
        uri: bool,
    },

    /// Process a JSON job specification from stdin, emitting JSONL
    Batch {
        /// Worker threads (default: all cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Render cache capacity in documents (0 disables)
        #[arg(long, default_value_t = 512)]
        cache_size: usize,

        /// Emit an `OMAMORI_STATS {json}` summary line on stderr
        #[arg(long)]
        stats: bool,
    },

    /// Process one JSON job per stdin line, emitting one result per line
    Stream {
        /// Render cache capacity in documents (0 disables)
        #[arg(long, default_value_t = 512)]
        cache_size: usize,
    },

    /// Validate JSON job specification
    Validate {
        /// Input file (uses stdin if not specified)
        #[arg(short, long)]
        input: Option<Utf8PathBuf>,
    },

    /// Measure selector distributions over reproducible random seeds
    Distribution {
        /// Number of seeds
        #[arg(short = 'n', long, default_value_t = 100_000)]
        samples: usize,

        /// Generator seed for the sample
        #[arg(long, default_value_t = 0)]
        rng_seed: u64,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct TokenArgs {
    /// Seed text
    #[arg(short, long)]
    seed: String,

    /// Major category id (0-11)
    #[arg(long)]
    major: u32,

    /// Minor category id (0-3)
    #[arg(long)]
    minor: u32,

    /// Material id override (default: drawn from the seed)
    #[arg(long)]
    material: Option<u32>,
}

impl TokenArgs {
    fn attributes(&self, catalog: &MaterialCatalog) -> Result<TokenAttributes> {
        let seed = Seed::new(self.seed.as_str())?;
        Ok(TokenAttributes::from_seed(
            seed,
            self.major,
            self.minor,
            self.material,
            catalog,
        )?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level, cli.quiet);

    let catalog = load_catalog(cli.catalog.as_ref())?;

    match cli.command {
        Commands::Render { token, output } => {
            let attributes = token.attributes(&catalog)?;
            let svg = render(&attributes, &catalog)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &svg).with_context(|| format!("writing {path}"))?;
                    info!("Wrote {} bytes to {}", svg.len(), path);
                }
                None => println!("{svg}"),
            }
        }
        Commands::Inspect { token } => {
            let attributes = token.attributes(&catalog)?;
            inspect(&attributes, &catalog)?;
        }
        Commands::Metadata {
            token,
            token_id,
            hype_burned,
            uri,
        } => {
            let attributes = token.attributes(&catalog)?;
            let meta = TokenMetadata::build(token_id, &attributes, &catalog, hype_burned)?;
            if uri {
                println!("{}", meta.token_uri()?);
            } else {
                println!("{}", serde_json::to_string_pretty(&meta)?);
            }
        }
        Commands::Batch {
            jobs,
            cache_size,
            stats,
        } => {
            if let Some(threads) = jobs {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("configuring worker threads")?;
            }
            let options = ExecutionOptions::new(catalog, cache_size);
            run_batch(&options, stats)?;
        }
        Commands::Stream { cache_size } => {
            let options = ExecutionOptions::new(catalog, cache_size);
            run_stream(&options)?;
        }
        Commands::Validate { input } => {
            validate_spec(input)?;
        }
        Commands::Distribution { samples, rng_seed } => {
            let _timer = Timer::new(format!("distribution over {samples} seeds"));
            let seeds = sample_seeds(samples, rng_seed);
            let report = Distribution::measure(&catalog, &seeds);
            info!(
                "Distribution: max material deviation {:.4}pp, max punch deviation {:.4}pp",
                report.max_material_deviation() * 100.0,
                report.max_punch_deviation() * 100.0
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Version => {
            println!("omamori version {}", omamori::VERSION);
            println!("Deterministic talisman renderer");
            println!("Built-in catalog: {} materials", MaterialCatalog::builtin().len());
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&Utf8PathBuf>) -> Result<MaterialCatalog> {
    match path {
        Some(path) => MaterialCatalog::load(path)
            .with_context(|| format!("loading material catalog {path}")),
        None => Ok(MaterialCatalog::builtin().clone()),
    }
}

fn inspect(attributes: &TokenAttributes, catalog: &MaterialCatalog) -> Result<()> {
    let material = catalog.get(attributes.material_id())?;
    let layout = layout_punches(attributes.seed(), attributes.punch_count());
    let report = serde_json::json!({
        "seed": attributes.seed(),
        "hash": attributes.seed().hash(),
        "major": attributes.major().name(),
        "minor": attributes.minor().name(),
        "material": material,
        "punchCount": attributes.punch_count(),
        "layout": layout,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Process a whole job spec from stdin
fn run_batch(options: &ExecutionOptions, emit_stats: bool) -> Result<()> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let spec = match JobSpec::from_json(&buffer) {
        Ok(spec) => spec,
        Err(e) => {
            error!("Failed to parse job specification: {}", e);
            return Err(e.into());
        }
    };

    info!("Processing {} jobs", spec.jobs.len());
    let timer = Timer::new(format!("batch of {} jobs", spec.jobs.len()));
    let (results, stats) = process_jobs(&spec.jobs, options);
    drop(timer);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for result in &results {
        writeln!(out, "{}", serde_json::to_string(result)?)?;
    }
    out.flush()?;

    if stats.failed > 0 {
        warn!("{} of {} jobs failed", stats.failed, stats.jobs);
    }
    info!("Finished processing all jobs");
    if emit_stats {
        eprintln!("OMAMORI_STATS {}", serde_json::to_string(&stats)?);
    }
    Ok(())
}

/// Process one job per stdin line
fn run_stream(options: &ExecutionOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut processed = 0usize;

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let result = match serde_json::from_str::<Job>(&line) {
            Ok(job) => process_job_with_options(&job, options),
            Err(e) => JobResult::error(format!("line-{}", index + 1), format!("Invalid job JSON: {e}")),
        };
        writeln!(out, "{}", serde_json::to_string(&result)?)?;
        out.flush()?;
        processed += 1;
    }

    info!("Streamed {} jobs", processed);
    Ok(())
}

/// Validate job specification
fn validate_spec(input: Option<Utf8PathBuf>) -> Result<()> {
    let json = if let Some(path) = input {
        std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    match JobSpec::from_json(&json).and_then(|spec| spec.validate().map(|()| spec)) {
        Ok(spec) => {
            println!("✓ Valid job specification");
            println!("  Version: {}", spec.version);
            println!("  Jobs: {}", spec.jobs.len());
            Ok(())
        }
        Err(e) => {
            println!("✗ Invalid job specification: {}", e);
            Err(e.into())
        }
    }
}
