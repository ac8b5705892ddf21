//! grid_mapping - build an occupancy map from a recorded session.
//!
//! # Usage
//!
//! ```bash
//! # Angle grid with default settings
//! grid_mapping session.json --output map.json
//!
//! # Plain occupancy grid from a config file
//! grid_mapping session.json --config configs/config.toml --dump
//!
//! # Continue from a prior map
//! grid_mapping session.json --prior map.json --output map2.json
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info};

use grid_mapping::io::{session, snapshot};
use grid_mapping::{GridKind, GridLayout, MappingConfig, OccupancyMap, Result, ScanUpdate};

/// Build an occupancy grid from scans with known poses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded session (JSON)
    session: PathBuf,

    /// Configuration file path (defaults to configs/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Heading bins per cell; selects an angle grid
    #[arg(short, long)]
    layers: Option<usize>,

    /// Start from a previously saved snapshot instead of an empty grid
    #[arg(short, long)]
    prior: Option<PathBuf>,

    /// Write the final grid snapshot here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the textual grid dump to stdout
    #[arg(short, long)]
    dump: bool,
}

fn load_config(args: &Args) -> Result<MappingConfig> {
    let mut config = match &args.config {
        Some(path) => MappingConfig::load(path)?,
        None => MappingConfig::load_default()?,
    };
    if let Some(layers) = args.layers {
        config.grid.kind = GridKind::Angle;
        config.grid.layers = layers;
        config.validate()?;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let session = session::load(&args.session)?;

    let mut map = match &args.prior {
        Some(path) => OccupancyMap::from_snapshot(&snapshot::load(path)?, config.log_odds)?,
        None => OccupancyMap::from_config(&config),
    };
    info!(
        "Mapping {} scans into {} grid ({} layers, {} m cells)",
        session.len(),
        map.kind(),
        map.layers(),
        map.base().resolution()
    );

    let start = Instant::now();
    let mut total = ScanUpdate::default();
    for record in session.records {
        let mut scan = record.scan;
        config.sensor.apply(&mut scan);
        total.merge(&map.insert_scan(&scan, record.pose));
    }

    let base = map.base();
    info!(
        "Done in {:.2?}: {} beams, {} cell updates, grid {}x{} at {}",
        start.elapsed(),
        total.beams_used,
        total.cells_updated(),
        base.width(),
        base.height(),
        base.origin()
    );

    if let Some(path) = &args.output {
        snapshot::save(&map.snapshot(), path)?;
    }
    if args.dump {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}", map)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
