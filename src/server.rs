//! Reusable broker server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: database init and migrations,
//! the REST server, the SOAP availability responder, metrics and graceful
//! shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::{AvailabilityGateway, AvailabilityResponder, ReservationOrchestrator};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::{init_database, run_migrations, DatabaseConfig, SoapAvailabilityClient};
use crate::interfaces::http::modules::metrics::prometheus_handle;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::interfaces::soap::{create_soap_router, SoapState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::support::wsdl::{availability_wsdl, SOAP_ENDPOINT_PATH};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the broker.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running broker.
///
/// ```rust,no_run
/// use hotel_broker::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub api_addr: SocketAddr,
    /// Address the SOAP responder is bound to, if enabled.
    pub soap_addr: Option<SocketAddr>,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
    soap_task: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Start the broker with the given options.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Start the SOAP availability responder (if enabled)
    /// 4. Start the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting hotel reservation broker...");

        let metrics = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&DatabaseConfig::from(&app_cfg.database)).await?;
        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── SOAP availability responder ────────────────────────
        let (soap_addr, soap_task) = if app_cfg.server.soap_enabled {
            let listener = tokio::net::TcpListener::bind(app_cfg.soap_address()).await?;
            let addr = listener.local_addr()?;
            let location = format!("http://{}{}", addr, SOAP_ENDPOINT_PATH);

            let router = create_soap_router(SoapState {
                responder: Arc::new(AvailabilityResponder::new(repos.clone())),
                wsdl: availability_wsdl(&location).into(),
            });
            info!("SOAP availability service listening on {}", location);

            let task = spawn_server("SOAP", listener, router, shutdown_signal.clone());
            (Some(addr), Some(task))
        } else {
            info!("SOAP availability service disabled; using remote backend");
            (None, None)
        };

        // ── REST API server ────────────────────────────────────
        let gateway: Arc<dyn AvailabilityGateway> =
            Arc::new(SoapAvailabilityClient::from_config(&app_cfg.backend)?);
        info!("Availability backend: {}", app_cfg.backend.endpoint);

        let api_router = create_api_router(ApiState {
            db: db.clone(),
            repos: repos.clone(),
            orchestrator: Arc::new(ReservationOrchestrator::new(repos.clone(), gateway)),
            backend_endpoint: app_cfg.backend.endpoint.as_str().into(),
            metrics,
            started_at: Arc::new(Instant::now()),
        });

        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let api_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_task = spawn_server("REST API", listener, api_router, shutdown_signal);

        info!("All servers started.");

        Ok(Self {
            repos,
            config: app_cfg,
            api_addr,
            soap_addr,
            db,
            shutdown,
            api_task,
            soap_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the servers to drain after shutdown has been triggered, then
    /// close the database pool.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");
        let timeout = Duration::from_secs(self.shutdown.timeout_secs());

        let servers = async {
            join_server("REST API", self.api_task).await;
            if let Some(task) = self.soap_task {
                join_server("SOAP", task).await;
            }
        };
        if tokio::time::timeout(timeout, servers).await.is_err() {
            warn!("Servers did not stop within {}s", timeout.as_secs());
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Broker shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down broker...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if any server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
            || self.soap_task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn spawn_server(
    name: &'static str,
    listener: tokio::net::TcpListener,
    router: axum::Router,
    shutdown: ShutdownSignal,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            shutdown.wait().await;
            info!("{} server received shutdown signal", name);
        });
        if let Err(e) = server.await {
            error!("{} server error: {}", name, e);
        }
    })
}

async fn join_server(name: &str, task: JoinHandle<()>) {
    match task.await {
        Ok(()) => info!("{} server stopped", name),
        Err(e) => error!("{} server task panicked: {}", name, e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` wins over `logging.level` when set.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}
