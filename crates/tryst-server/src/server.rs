//! Core rendezvous server implementation.
//!
//! Provides the axum router over the session registry, the flat error
//! rendering every failure shares, and the process lifecycle (bind, serve,
//! graceful shutdown).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Query, Request, State},
    http::{Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tryst_core::{RegistryError, SessionRegistry};

use crate::config::ServerConfig;
use crate::wire::{
    Empty, ErrorBody, FetchGuestQuery, FetchGuestResponse, FetchHostQuery, FetchHostResponse,
    RegisterGuestRequest, RegisterHostRequest, RegisterHostResponse,
};

/// The rendezvous server: one registry, one listening socket.
#[derive(Debug)]
pub struct SignalServer {
    /// Server bind address
    bind_address: String,
    /// The process-wide session registry
    registry: Arc<Mutex<SessionRegistry>>,
}

/// Shared server state for axum handlers.
#[derive(Clone)]
pub struct ServerState {
    /// The process-wide session registry
    pub registry: Arc<Mutex<SessionRegistry>>,
}

impl ServerState {
    /// Create state around a fresh, empty registry.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(SessionRegistry::new())),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalServer {
    /// Create a new server from configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            bind_address: config.bind_address,
            registry: Arc::new(Mutex::new(SessionRegistry::new())),
        }
    }

    /// Number of live sessions in the registry.
    pub fn session_count(&self) -> usize {
        self.registry.lock().session_count()
    }

    /// Build the application router over `state`.
    ///
    /// Exposed separately from [`start`](Self::start) so tests can drive the
    /// router without binding a socket.
    pub fn router(state: ServerState) -> Router {
        Router::new()
            .route("/host", get(fetch_host).post(register_host))
            .route("/guest", get(fetch_guest).post(register_guest))
            .route("/debug", get(debug_probe))
            .fallback(unhandled)
            .layer(middleware::from_fn(log_failures))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(state)
    }

    /// Bind and serve until a shutdown signal arrives.
    pub async fn start(self) -> Result<()> {
        let state = ServerState {
            registry: self.registry.clone(),
        };
        let app = Self::router(state);

        let addr: SocketAddr = self.bind_address.parse()?;
        info!("Starting rendezvous server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Rendezvous server stopped");
        Ok(())
    }
}

/// Wait for ctrl-c or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

// =============================================================================
// Error rendering
// =============================================================================

/// Handler-side failure, rendered as the one flat wire error.
///
/// The wire deliberately does not distinguish failure kinds; the kind is
/// logged for operators before it is erased.
struct ApiError(RegistryError);

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        (StatusCode::NOT_FOUND, Json(ErrorBody::generic())).into_response()
    }
}

/// Log rejected requests with their transport context.
///
/// Runs outside the handlers so malformed and unrecognized requests are
/// captured with the same detail as registry failures.
async fn log_failures(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers = request.headers().clone();

    let response = next.run(request).await;
    if response.status().is_client_error() {
        error!(%method, %uri, ?headers, "request rejected");
    }
    response
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /host`: register a host description, returning the session id.
async fn register_host(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<RegisterHostResponse>, ApiError> {
    let request: RegisterHostRequest = serde_json::from_slice(&body)
        .map_err(|e| RegistryError::unrecognized(format!("malformed request body: {e}")))?;

    let requested_id = (!request.id.is_empty()).then_some(request.id.as_str());
    let id = state
        .registry
        .lock()
        .register_host(&request.description, requested_id)?;

    Ok(Json(RegisterHostResponse { id }))
}

/// `GET /host?id=`: fetch the host description a guest needs to join.
///
/// The query extractor is optional so an undecodable query string falls
/// through to the registry's own lookup failure instead of a framework
/// rejection with a different wire shape.
async fn fetch_host(
    State(state): State<ServerState>,
    query: Option<Query<FetchHostQuery>>,
) -> Result<Json<FetchHostResponse>, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let description = state.registry.lock().fetch_host(&query.id)?;

    Ok(Json(FetchHostResponse {
        id: query.id,
        description,
    }))
}

/// `POST /guest`: deposit a guest description into a host's session.
async fn register_guest(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<Empty>, ApiError> {
    let request: RegisterGuestRequest = serde_json::from_slice(&body)
        .map_err(|e| RegistryError::unrecognized(format!("malformed request body: {e}")))?;

    state
        .registry
        .lock()
        .register_guest(&request.host_id, &request.guest_description)?;

    Ok(Json(Empty {}))
}

/// `GET /guest?hostId=`: retrieve the guest description, consuming the
/// session when one has been deposited.
async fn fetch_guest(
    State(state): State<ServerState>,
    query: Option<Query<FetchGuestQuery>>,
) -> Result<Json<FetchGuestResponse>, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let guest_description = state.registry.lock().fetch_guest(&query.host_id)?;

    Ok(Json(FetchGuestResponse { guest_description }))
}

/// `GET /debug`: diagnostic no-op; always succeeds, never touches state.
async fn debug_probe() -> Json<Empty> {
    Json(Empty {})
}

/// Fallback for every request that matches no known operation shape.
async fn unhandled(method: Method, uri: Uri) -> ApiError {
    ApiError::from(RegistryError::unrecognized(format!(
        "unhandled endpoint: {method} {uri}"
    )))
}
