//! HTTP front for the election contract.

use crate::config::RegistryConfig;
use crate::contract;
use crate::dispatch::{contract_info, ContractInfo, Operation, Outcome};
use crate::election::Election;
use crate::error::{RegistryError, Result};
use crate::storage::{create_storage, LedgerStore};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

type SharedStore = Arc<dyn LedgerStore>;

#[derive(Clone)]
struct AppState {
    store: SharedStore,
}

#[derive(Deserialize)]
struct InvokeRequest {
    #[serde(default)]
    args: Vec<String>,
}

#[derive(Serialize)]
struct InvokeResponse {
    result: Outcome,
}

#[derive(Serialize)]
struct ExistsResponse {
    exists: bool,
}

#[derive(Deserialize)]
struct CreateRequest {
    id: String,
    name: String,
    description: String,
}

#[derive(Deserialize)]
struct UpdateRequest {
    name: String,
    description: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RegistryError::AlreadyExists(_) => StatusCode::CONFLICT,
            RegistryError::NotFound(_) | RegistryError::UnknownOperation(_) => {
                StatusCode::NOT_FOUND
            }
            RegistryError::InvalidArguments { .. } | RegistryError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            RegistryError::CorruptRecord { .. } | RegistryError::Store(_) => {
                warn!("Request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for RegistryError {
    fn from(rejection: JsonRejection) -> Self {
        RegistryError::InvalidRequest(rejection.body_text())
    }
}

/// The registry server.
///
/// Serves the election contract over HTTP, either through the generic
/// `/transactions/{operation}` endpoint or the resource-style
/// `/elections` routes.
pub struct RegistryServer {
    addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl RegistryServer {
    /// Creates and starts a new registry server with the given configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use election_registry::{RegistryServer, RegistryConfig};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = RegistryConfig::memory();
    /// let server = RegistryServer::new(config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: RegistryConfig) -> Result<Self> {
        let store = create_storage(&config.storage).await?;
        Self::with_store(store, &config).await
    }

    /// Starts a server over a caller-supplied ledger. `config.storage` is ignored.
    pub async fn with_store(store: Arc<dyn LedgerStore>, config: &RegistryConfig) -> Result<Self> {
        let app = router(store);

        let listener = TcpListener::bind(config.bind_addr()).await?;
        let addr = listener.local_addr()?;

        info!("Election registry listening on {}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Returns the socket address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the full URL of the registry server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Returns the port number the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

fn router(store: SharedStore) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/contract", get(describe_contract))
        .route("/transactions/{operation}", post(invoke))
        .route("/elections", post(create_election))
        .route(
            "/elections/{id}",
            get(read_election)
                .head(check_election)
                .put(update_election)
                .delete(delete_election),
        )
        .route("/elections/{id}/exists", get(election_exists))
        .layer(tower::ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn describe_contract() -> Json<ContractInfo> {
    Json(contract_info())
}

async fn invoke(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    body: std::result::Result<Json<InvokeRequest>, JsonRejection>,
) -> Result<Json<InvokeResponse>> {
    let operation: Operation = operation.parse()?;
    let Json(request) = body?;
    info!("Invoking transaction: {}", operation);

    let result = operation.invoke(state.store.as_ref(), &request.args).await?;
    Ok(Json(InvokeResponse { result }))
}

async fn check_election(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    info!("Checking election: {}", id);

    match contract::election_exists(state.store.as_ref(), &id).await {
        Ok(true) => StatusCode::OK,
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            warn!("Failed to check election {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn election_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExistsResponse>> {
    let exists = contract::election_exists(state.store.as_ref(), &id).await?;
    Ok(Json(ExistsResponse { exists }))
}

async fn create_election(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(request) = body?;
    info!("Creating election: {}", request.id);

    contract::create_election(
        state.store.as_ref(),
        &request.id,
        &request.name,
        &request.description,
    )
    .await?;
    Ok(StatusCode::CREATED)
}

async fn read_election(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Election>> {
    info!("Reading election: {}", id);

    let election = contract::read_election(state.store.as_ref(), &id).await?;
    Ok(Json(election))
}

async fn update_election(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(request) = body?;
    info!("Updating election: {}", id);

    contract::update_election(
        state.store.as_ref(),
        &id,
        &request.name,
        &request.description,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_election(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    info!("Deleting election: {}", id);

    contract::delete_election(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
