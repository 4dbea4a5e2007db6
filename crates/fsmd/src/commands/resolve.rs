//! `fsmd resolve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::Term;
use fsmd_config::{CliSettings, Config};
use fsmd_content::{ContentResolver, Resolution, ResolverConfig};
use fsmd_storage::FsStorage;
use tracing::debug;

use crate::error::CliError;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Content path to resolve (e.g. `/docs/intro`).
    path: String,

    /// Path to configuration file (default: auto-discover fsmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory holding the markdown tree (overrides config).
    #[arg(short, long, env = "FSMD_ROOT")]
    root: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output (store and cache logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// Prints the resolved page as JSON to stdout. Returns whether the page
    /// was found.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the content can't be read.
    pub(crate) fn execute(self) -> Result<bool, CliError> {
        let cli_settings = CliSettings {
            root: self.root,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        debug!(
            path = %self.path,
            root = %config.content_resolved.root.display(),
            "Resolving page"
        );
        let resolution = resolve(&config, &self.path)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&*resolution.page)?
        } else {
            serde_json::to_string(&*resolution.page)?
        };
        Term::stdout().write_line(&json)?;

        Ok(resolution.found)
    }
}

/// Resolve one path against the configured content root.
fn resolve(config: &Config, path: &str) -> Result<Resolution, CliError> {
    let storage = Arc::new(FsStorage::new(config.content_resolved.root.clone()));
    let resolver_config = ResolverConfig {
        content_dir: config.content_resolved.content_dir.clone(),
        page_cache_capacity: config.cache.pages,
        sitemap_cache_capacity: config.cache.sitemaps,
        detail_cache_capacity: config.cache.details,
    };
    let resolver = ContentResolver::new(storage, resolver_config);

    Ok(resolver.resolve(path)?)
}
