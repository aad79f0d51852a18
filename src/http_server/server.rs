//! # HTTP Server
//!
//! Hosts a [`Dispatcher`] behind axum: the telefunc route, `/health` and CORS.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::server::Dispatcher;

use super::config::TelefuncConfig;
use super::telefunc_routes::{health_routes, telefunc_routes, TelefuncState};

/// HTTP server for a set of telefunctions
pub struct HttpServer {
    config: TelefuncConfig,
    router: Router,
}

impl HttpServer {
    /// The dispatcher's shield failure policy and the log level are taken
    /// from `config`.
    pub fn with_config(config: TelefuncConfig, dispatcher: Dispatcher) -> Self {
        Logger::set_min_severity(config.log_level);
        let dispatcher = dispatcher.with_shield_failure(config.shield_failure);
        let router = Self::build_router(&config, dispatcher);
        Self { config, router }
    }

    fn build_router(config: &TelefuncConfig, dispatcher: Dispatcher) -> Router {
        let state = Arc::new(TelefuncState::new(dispatcher, config.telefunc_url.clone()));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes(Arc::clone(&state)))
            .merge(telefunc_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process stops.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let local = listener.local_addr()?.to_string();
        log_event_with_fields(
            Event::Serving,
            &[("addr", local.as_str()), ("telefunc_url", self.config.telefunc_url.as_str())],
        );

        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shield::ShieldRegistry;
    use crate::telefunction::TelefunctionRegistry;

    fn empty_dispatcher() -> Dispatcher {
        Dispatcher::new(TelefunctionRegistry::new(), ShieldRegistry::new())
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::with_config(TelefuncConfig::with_port(8080), empty_dispatcher());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let config = TelefuncConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config, empty_dispatcher()).router();
    }

    #[tokio::test]
    async fn test_invalid_host_is_error() {
        let config = TelefuncConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        let result = HttpServer::with_config(config, empty_dispatcher()).start().await;
        assert!(result.is_err());
    }
}
