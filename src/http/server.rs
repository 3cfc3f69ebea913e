//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all gateway handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Compile the route table and bind forwarders at startup
//! - Apply CORS headers to every response via the outermost layer
//! - Dispatch requests: preflight short-circuit, route lookup, path rewrite,
//!   forwarding, not-found fallback
//! - Log method, original path, and elapsed time for every request

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::SetRequestIdLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::{ConfigError, GatewayConfig};
use crate::http::headers;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::proxy::upstream_client;
use crate::routing::{rewrite, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Compiles the route table; an invalid route is a startup-fatal
    /// configuration error.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let client = upstream_client();
        let routes = Arc::new(RouteTable::from_config(&config.routes, &client)?);

        let state = AppState { routes };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            // Outermost: even middleware-generated responses (e.g. request
            // timeouts) leave with the CORS headers.
            .layer(middleware::from_fn(cors_layer))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops gracefully on Ctrl+C or when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Programmatic shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Set the CORS headers on every outgoing response.
async fn cors_layer(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    headers::apply_cors(response.headers_mut());
    response
}

/// Gateway dispatcher.
///
/// Per-request flow: `OPTIONS` short-circuits to an empty 200; otherwise
/// route lookup → path rewrite → forward, or an empty 404 when nothing
/// matches. CORS headers are applied by the outermost layer. The terminal
/// log line runs for every branch, including forwarding failures (those
/// surface as a 502 response from the forwarder, never as an error).
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let response = dispatch(&state, request).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = %response.status(),
        elapsed = ?start.elapsed(),
        "Request completed"
    );

    response
}

/// Route and forward one request. Always converges to a response.
async fn dispatch(state: &AppState, request: Request<Body>) -> Response {
    // CORS preflight never reaches the route table or a backend.
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let path = request.uri().path().to_string();
    match state.routes.lookup(&path) {
        Some(route) => {
            let forwarded_path = rewrite(route.prefix(), &path);
            tracing::debug!(
                prefix = %route.prefix(),
                backend = %route.forwarder().authority(),
                forwarded_path = %forwarded_path,
                "Route matched"
            );
            route.forwarder().forward(request, &forwarded_path).await
        }
        None => {
            tracing::warn!(path = %path, "No route matched");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
