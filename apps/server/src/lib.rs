//! # Machex Server
//!
//! Boot and lifecycle for the machinery-catalog backend: loads config,
//! connects `SurrealDB`, initializes the feature slices, and serves the
//! axum router over HTTP or HTTPS until a shutdown signal arrives.
//!
//! ## Example
//! ```no_run
//! use machex_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result, anyhow};
use axum_server::Handle;
use machex::domain::config::ApiConfig;
use machex::kernel::server::ApiState;
use machex_database::Database;
use machex_event_bus::EventBus;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_GRACE: std::time::Duration = std::time::Duration::from_secs(30);

/// Configures and bootstraps a [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Replaces the whole configuration tree (normally the output of
    /// `load_config`).
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    async fn init_database(&self) -> Result<Database> {
        let db_cfg = &self.cfg.database;
        let mut builder =
            Database::builder().url(&db_cfg.url).session(&db_cfg.namespace, &db_cfg.database);

        if let Some(creds) = &db_cfg.credentials {
            builder = builder.auth(&creds.username, &creds.password);
        }

        builder.init().await.context("Failed to establish database connection")
    }

    /// TLS material must exist before the database comes up, so a typo in
    /// the cert path fails fast instead of after migrations ran.
    fn validate_ssl_config(&self) -> Result<()> {
        let Some(ssl) = &self.cfg.server.ssl else {
            return Ok(());
        };

        if !ssl.cert.exists() {
            anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
        }
        if !ssl.key.exists() {
            anyhow::bail!("SSL key not found at: {}", ssl.key.display());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = ssl.key.metadata()?;
            if metadata.permissions().mode() & 0o077 != 0 {
                warn!(
                    key = %ssl.key.display(),
                    "SSL private key is readable by group/other, expected mode 600"
                );
            }
        }
        Ok(())
    }

    /// Bootstraps the server: database connection and migrations, then the
    /// catalog/iam/audit slices, folded into the shared [`ApiState`].
    ///
    /// # Errors
    /// Returns an error when TLS files are missing, the database is
    /// unreachable or rejects the credentials, or a feature slice fails to
    /// initialize.
    pub async fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let db = self.init_database().await?;

        let events = EventBus::new();
        let slices = machex::init(&self.cfg, &db, &events)
            .await
            .map_err(|e| anyhow!("Feature initialization failed: {e}"))?;

        let mut state = ApiState::builder().config(self.cfg).db(db).events(events);
        for slice in slices {
            state = state.register_slice(slice);
        }
        let state = state.build().context("Failed to assemble application state")?;

        Ok(Server { state })
    }
}

/// A bootstrapped server holding the assembled [`ApiState`]; [`run`](Self::run)
/// binds the listener and blocks until shutdown.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Serves requests until SIGINT/SIGTERM, then drains in-flight
    /// connections for up to [`SHUTDOWN_GRACE`].
    ///
    /// # Errors
    /// Returns an error when the listener cannot bind or the TLS material
    /// fails to load.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        let app = router::init(self.state);

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, draining connections");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            info!("Listening on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Listening on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// The assembled application state (config, database, slices).
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Resolves on SIGINT (Ctrl+C) or, on unix, SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
