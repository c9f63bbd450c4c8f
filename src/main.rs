//! levelgen: LDtk export → GBA world and level headers
//!
//! Reads the LDtk project named by `LDTK_PATH` (or `--input`) and writes:
//!   include/generated/world_config.h        tile/entity enums, world lookup grid
//!   include/generated/levels_intgrid.h      level index
//!   include/generated/levels/level_N.h      entity tables and level record
//!   graphics/generated/levels/levels_NNNN   palettized background + descriptor
//!
//! Usage:
//!   LDTK_PATH=assets/world.ldtk levelgen
//!   levelgen --input assets/world.ldtk --config levelgen.ron --out-dir .

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use levelgen::PipelineConfig;

#[derive(Parser)]
#[command(name = "levelgen", version)]
#[command(about = "Generate GBA world and level headers from an LDtk project")]
struct Cli {
    /// LDtk project file
    #[arg(long, env = "LDTK_PATH")]
    input: PathBuf,

    /// RON file overriding pipeline defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root directory for generated include/ and graphics/
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// World lookup grid width in cells
    #[arg(long)]
    canvas_width: Option<usize>,

    /// World lookup grid height in cells
    #[arg(long)]
    canvas_height: Option<usize>,

    /// Only generate headers, leave backgrounds untouched
    #[arg(long)]
    skip_images: bool,

    /// Log per-level and per-file detail
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };

        config.input = self.input;
        if let Some(out_dir) = self.out_dir {
            config.out_dir = out_dir;
        }
        if let Some(width) = self.canvas_width {
            config.canvas.width = width;
        }
        if let Some(height) = self.canvas_height {
            config.canvas.height = height;
        }
        config.skip_images |= self.skip_images;

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "levelgen=debug" } else { "levelgen=info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config = cli.into_config()?;
    let input = config.input.clone();

    levelgen::run(&config)
        .with_context(|| format!("Failed to generate levels from {}", input.display()))?;

    Ok(())
}
