//! # HTTP Server
//!
//! Combines the package and health routers behind a CORS layer.

use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::health_routes::health_routes;
use super::package_routes::{package_routes, PackageState};
use crate::config::ServerConfig;
use crate::observability::Logger;
use crate::package::PackageStore;

/// HTTP server for the package API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already-opened store
    pub fn new(config: ServerConfig, store: Arc<dyn PackageStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    fn build_router(config: &ServerConfig, store: Arc<dyn PackageStore>) -> Router {
        let package_state = Arc::new(PackageState::new(store));

        // Origins are checked when the config is loaded; an unchecked bad
        // list allows no origin at all.
        let allow_origin = match config.allowed_origins() {
            Ok(None) => AllowOrigin::from(Any),
            Ok(Some(origins)) => AllowOrigin::list(origins),
            Err(_) => AllowOrigin::list(Vec::new()),
        };
        let cors = CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes())
            .merge(package_routes(package_state))
            .layer(cors)
    }

    pub fn bind_addr(&self) -> String {
        self.config.bind_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), io::Error> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        let local = listener.local_addr()?.to_string();

        Logger::info("HTTP_SERVER_START", &[("addr", local.as_str())]);

        axum::serve(listener, self.router).await
    }
}
