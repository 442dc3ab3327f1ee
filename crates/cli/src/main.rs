//! `curbgen`: design a curb adapter from a JSON spec and write its
//! fabrication files.
//!
//! ```text
//! curbgen --spec spec.json --out build/rtu-48 --advanced --segments 6
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

mod input;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use adapter_engine::design;
use fab_export::write_export_batch;

use crate::input::{build_request, Overrides, SpecFile};

/// Curb adapter generator
#[derive(Parser)]
#[command(name = "curbgen")]
#[command(about = "Generate models and fabrication files for rooftop curb adapters", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with the adapter dimensions
    #[arg(long)]
    spec: PathBuf,

    /// Directory the export batch is written into
    #[arg(long)]
    out: PathBuf,

    /// Build the segmented loft with flared ducts
    #[arg(long)]
    advanced: bool,

    /// Loft layers (advanced mode)
    #[arg(long)]
    segments: Option<usize>,

    /// Slope budget in degrees (advanced mode)
    #[arg(long)]
    max_slope: Option<f64>,

    /// Duct flare factor, at least 1 (advanced mode)
    #[arg(long)]
    flare: Option<f64>,

    /// Adapter height, inches
    #[arg(long)]
    height: Option<f64>,

    /// Steel gauge number
    #[arg(long)]
    gauge: Option<f64>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            advanced: self.advanced,
            segments: self.segments,
            max_slope: self.max_slope,
            flare: self.flare,
            height: self.height,
            gauge: self.gauge,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let text = fs::read_to_string(&cli.spec).with_context(|| format!("reading {}", cli.spec.display()))?;
    let file: SpecFile =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", cli.spec.display()))?;

    let request = build_request(file, &cli.overrides())?;
    let bundle = design(&request)?;
    let manifest = write_export_batch(&cli.out, &bundle.to_export_batch()?)?;

    for advisory in &bundle.advisories {
        eprintln!("warning: {advisory}");
    }
    println!(
        "wrote {} files to {} (batch {})",
        manifest.files.len(),
        cli.out.display(),
        manifest.batch_id
    );
    Ok(())
}
