use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "spardha")]
#[command(about = "Media cache, particle pool and performance monitor", long_about = None)]
pub struct Cli {
    /// Config file (default: <data_local_dir>/spardha/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch and cache media; falls back to the configured preload list
    Preload {
        urls: Vec<String>,
    },
    /// Print the cached source for a URL, or the URL itself
    Url {
        url: String,
    },
    /// Build a particle batch and print it
    Particles {
        /// star, orb, shooting, nebula or constellation
        kind: String,
        #[arg(short = 'n', long, default_value_t = 50)]
        count: usize,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 720.0)]
        height: f64,
        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one metrics snapshot
    Metrics {
        #[arg(long)]
        json: bool,
    },
    /// Run the metrics loop and print every refresh
    Monitor {
        /// Stop after N seconds (default: until Ctrl+C)
        #[arg(short, long)]
        duration: Option<u64>,
    },
    /// Remove every cached media entry
    Clear,
}
