//! Command-line and environment configuration shared by the binaries.

use clap::Args;
use std::path::PathBuf;

use crate::loader::CsvDirectory;

/// Where the five source CSVs live.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory containing orders.csv, delivery_performance.csv, etc.
    #[arg(long, env = "NEXGEN_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

impl DataArgs {
    pub fn source(&self) -> CsvDirectory {
        CsvDirectory::new(&self.data_dir)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(long, env = "NEXGEN_PORT", default_value = "8080")]
    pub port: u16,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Install the global `tracing` subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
