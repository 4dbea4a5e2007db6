//! `fsmd serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use fsmd_config::{CliSettings, Config};
use fsmd_server::{run_server, server_config_from_config};
use fsmd_storage::{FsStorage, Storage};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover fsmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory holding the markdown tree (overrides config).
    #[arg(short, long, env = "FSMD_ROOT")]
    root: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and cache logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            root: self.root,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let content_dir = config
            .content_resolved
            .root
            .join(&config.content_resolved.content_dir);
        if !content_dir_exists(&config) {
            output.warning(&format!(
                "Content directory {} does not exist; every page will be not found",
                content_dir.display()
            ));
        }

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Content directory: {}", content_dir.display()));
        output.info(&format!(
            "Cache capacity: {} pages, {} sitemaps, {} details",
            config.cache.pages, config.cache.sitemaps, config.cache.details
        ));

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        output.success("Server stopped");
        Ok(())
    }
}

/// True when the configured content directory is present in the store.
fn content_dir_exists(config: &Config) -> bool {
    let storage = FsStorage::new(config.content_resolved.root.clone());
    storage.exists(&config.content_resolved.content_dir)
}
