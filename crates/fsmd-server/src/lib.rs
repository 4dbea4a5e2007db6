//! HTTP server for the fsmd content engine.
//!
//! This crate exposes the content resolver over HTTP using axum:
//! - `GET /api/pages/{path}`: the resolved page with its navigation, as JSON
//! - `GET /robots.txt`: configured robots policy
//! - `GET /healthz`: liveness check
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use fsmd_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         root: PathBuf::from("site"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum server (fsmd-server)
//!                        │
//!                        ├─► /api/pages ──spawn_blocking──► ContentResolver
//!                        │                                      │
//!                        │                                      └─► FsStorage
//!                        │
//!                        └─► /robots.txt, /healthz
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use fsmd_content::{ContentResolver, ResolverConfig};
use fsmd_storage::{FsStorage, Storage};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Root of the file store.
    pub root: PathBuf,
    /// Store-relative directory holding the markdown tree.
    pub content_dir: String,
    /// Time allowed for one request before answering with a timeout.
    pub request_timeout: Duration,
    /// Body served at `/robots.txt`.
    pub robots_txt: String,
    /// Page cache capacity.
    pub page_cache_capacity: usize,
    /// Sitemap cache capacity.
    pub sitemap_cache_capacity: usize,
    /// Detailed page cache capacity.
    pub detail_cache_capacity: usize,
    /// Application version (for `ETag` invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let resolver = ResolverConfig::default();
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            root: PathBuf::from("."),
            content_dir: resolver.content_dir,
            request_timeout: Duration::from_secs(60),
            robots_txt: "User-agent: *\nDisallow:\n".to_owned(),
            page_cache_capacity: resolver.page_cache_capacity,
            sitemap_cache_capacity: resolver.sitemap_cache_capacity,
            detail_cache_capacity: resolver.detail_cache_capacity,
            version: String::new(),
        }
    }
}

impl ServerConfig {
    /// Resolver settings derived from this configuration.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            content_dir: self.content_dir.clone(),
            page_cache_capacity: self.page_cache_capacity,
            sitemap_cache_capacity: self.sitemap_cache_capacity,
            detail_cache_capacity: self.detail_cache_capacity,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.root.clone()));
    let resolver = Arc::new(ContentResolver::new(storage, config.resolver_config()));

    let state = Arc::new(AppState {
        resolver,
        robots_txt: config.robots_txt.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state, config.request_timeout);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, root = %config.root.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from fsmd config.
///
/// # Arguments
///
/// * `config` - fsmd configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &fsmd_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        root: config.content_resolved.root.clone(),
        content_dir: config.content_resolved.content_dir.clone(),
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        robots_txt: config.site.robots_txt.clone(),
        page_cache_capacity: config.cache.pages,
        sitemap_cache_capacity: config.cache.sitemaps,
        detail_cache_capacity: config.cache.details,
        version,
    }
}
