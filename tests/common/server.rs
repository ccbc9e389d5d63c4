//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own database.

use super::constants::*;
use super::fixtures::create_test_db;
use release_dashboard_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use release_dashboard_server::{DashboardHandler, HandlerSettings, SqliteDashboardStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated database
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    #[allow(dead_code)]
    pub port: u16,

    /// Database file for direct access in tests, `None` when spawned without one
    #[allow(dead_code)]
    pub db_path: Option<PathBuf>,

    // Private fields - keep resources alive until drop
    _temp_db_dir: Option<TempDir>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port, with default handler settings
    pub async fn spawn() -> Self {
        Self::spawn_with_settings(HandlerSettings::default()).await
    }

    /// Spawns a test server over the fixture database
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be created, the port cannot be bound or
    /// the server doesn't become ready within timeout.
    pub async fn spawn_with_settings(settings: HandlerSettings) -> Self {
        let (temp_db_dir, db_path) = create_test_db().expect("Failed to create test database");
        let database_url = format!("sqlite://{}", db_path.display());
        Self::start(Some(database_url), settings, Some(db_path), Some(temp_db_dir)).await
    }

    /// Spawns a test server with no database url configured
    pub async fn spawn_without_database(settings: HandlerSettings) -> Self {
        Self::start(None, settings, None, None).await
    }

    async fn start(
        database_url: Option<String>,
        settings: HandlerSettings,
        db_path: Option<PathBuf>,
        temp_db_dir: Option<TempDir>,
    ) -> Self {
        let store = Arc::new(SqliteDashboardStore::new(database_url));
        let handler = Arc::new(DashboardHandler::new(store, settings));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, handler);

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            db_path,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Opens a direct connection to the test database
    #[allow(dead_code)]
    pub fn db(&self) -> rusqlite::Connection {
        let path = self.db_path.as_ref().expect("Server has no database");
        rusqlite::Connection::open(path).expect("Failed to open test database")
    }

    /// Waits for the server to become ready by polling the status endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
        // TempDir will be cleaned up automatically
    }
}
