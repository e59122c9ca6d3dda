//! minimap-finder CLI
//!
//! Build every MiniMap for one nucleus from its WholeMap.
//!
//! Usage:
//!     minimap-finder 102 154
//!     minimap-finder 102 154 --minimap-dir out --read-chunk 50000
//!     minimap-finder 102 154 --config finder.json --report run.json

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use minimap_finder::{FileStore, FinderConfig, MiniMapFinder, Nucleus, load_config};

/// Create 6D and 4D MiniMaps from a WholeMap file, including B10-constant maps.
#[derive(Parser)]
#[command(name = "minimap-finder")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Proton number
    protons: u32,

    /// Neutron number
    neutrons: u32,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the WholeMaps
    #[arg(long)]
    whole_map_dir: Option<PathBuf>,

    /// Directory the MiniMaps are written to
    #[arg(long)]
    minimap_dir: Option<PathBuf>,

    /// Records per read chunk
    #[arg(long)]
    read_chunk: Option<usize>,

    /// Rows per write piece
    #[arg(long)]
    write_chunk: Option<usize>,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> minimap_finder::Result<(FinderConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => FinderConfig::default(),
        };
        if let Some(dir) = self.whole_map_dir {
            config.whole_map_dir = dir;
        }
        if let Some(dir) = self.minimap_dir {
            config.minimap_dir = dir;
        }
        if let Some(n) = self.read_chunk {
            config.read_chunk = n;
        }
        if let Some(n) = self.write_chunk {
            config.write_chunk = n;
        }
        config.validate()?;
        Ok((config, self.report))
    }
}

fn run(cli: Cli) -> minimap_finder::Result<()> {
    let nucleus = Nucleus::new(cli.protons, cli.neutrons);
    let (config, report_path) = cli.into_config()?;

    let store = FileStore::new(&config.whole_map_dir, &config.minimap_dir);
    let finder = MiniMapFinder::with_config(store, config);
    let report = finder.run(nucleus)?;

    if let Some(path) = report_path {
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, &report)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
