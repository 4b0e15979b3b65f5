use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{inspect, serve};

#[derive(Parser)]
#[command(name = "bloodcast")]
#[command(about = "Blood supply shortage forecast dashboard backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:8000, 127.0.0.1:8080)
        /// Overrides `server.bind_address` from the configuration.
        #[arg(short, long, env = "BLOODCAST_BIND_ADDRESS")]
        bind_address: Option<String>,

        /// Path to the precomputed forecast dataset (JSON)
        #[arg(short, long, env = "BLOODCAST_DATA_PATH")]
        data_path: Option<PathBuf>,
    },
    /// Load the dataset and print a severity summary per horizon
    Inspect {
        /// Path to the precomputed forecast dataset (JSON)
        #[arg(short, long, env = "BLOODCAST_DATA_PATH")]
        data_path: Option<PathBuf>,

        /// Also list segments classified as 정상
        #[arg(short, long)]
        include_all: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, data_path } => {
                serve(bind_address, data_path).await?;
            }
            Commands::Inspect { data_path, include_all } => {
                inspect(data_path, include_all)?;
            }
        }
        Ok(())
    }
}
