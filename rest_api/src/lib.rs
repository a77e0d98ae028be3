use axum::{
    Json, Router,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, oneshot};
use tower_http::cors::{Any, CorsLayer};

use anyhow::Context;
use anyhow::Error as AnyhowError;

use models::{
    ClinicalAction, ClinicalActionPatch, DEPARTMENTS, NewClinicalAction, NewPatient, Patient,
    ServerEvent, WorkflowError,
};
use store::RecordStore;

pub mod channel;
mod config;

pub use crate::channel::LiveChannel;
pub use crate::config::{DEFAULT_PORT, ServerConfig, load_server_config};

// Define the REST API error enum
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

// Implement IntoResponse for ApiError to convert it into an HTTP response.
// Both workflow error kinds are unknown-id lookups, so they render as 404
// with the flat error body the front-ends expect.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Workflow(e) => (StatusCode::NOT_FOUND, e.to_string()),
        };

        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}

// Shared state for the Axum application
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<RecordStore>>,
    live: LiveChannel,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            live: LiveChannel::new(),
        }
    }

    pub fn live(&self) -> &LiveChannel {
        &self.live
    }
}

// Handler for GET /api/patients
async fn list_patients_handler(State(state): State<AppState>) -> Json<Vec<Patient>> {
    let store = state.store.lock().await;
    Json(store.patients().to_vec())
}

// Handler for GET /api/patients/{id}
async fn get_patient_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let store = state.store.lock().await;
    let patient = store
        .patient(&id)
        .cloned()
        .ok_or(WorkflowError::PatientNotFound)?;
    Ok(Json(patient))
}

// Handler for POST /api/patients. Only the legacy script UI posts here;
// the component UI reads patients but never creates them.
async fn create_patient_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewPatient>,
) -> impl IntoResponse {
    // Broadcast while still holding the store lock so event order on the
    // live channel always matches the order mutations hit the store.
    let mut store = state.store.lock().await;
    let patient = store.create_patient(payload);
    tracing::info!("Patient {} registered", patient.id);

    state
        .live
        .broadcast(ServerEvent::PatientCreated(patient.clone()));
    drop(store);

    (StatusCode::CREATED, Json(patient))
}

// Handler for GET /api/clinical-actions
async fn list_actions_handler(State(state): State<AppState>) -> Json<Vec<ClinicalAction>> {
    let store = state.store.lock().await;
    Json(store.actions().to_vec())
}

// Handler for GET /api/clinical-actions/patient/{patientId}
async fn list_patient_actions_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Json<Vec<ClinicalAction>> {
    // An unknown patient id is not an error here, just an empty list.
    let store = state.store.lock().await;
    Json(store.actions_for_patient(&patient_id))
}

// Handler for POST /api/clinical-actions
async fn create_action_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewClinicalAction>,
) -> impl IntoResponse {
    let mut store = state.store.lock().await;
    let action = store.create_action(payload);
    tracing::info!(
        "Clinical action {} created for patient {}",
        action.id,
        action.patient_id
    );

    // The broadcast carries the full record and goes out before the
    // response; the front-ends refresh from the event, not the body.
    // Sent under the store lock so event order matches mutation order.
    state
        .live
        .broadcast(ServerEvent::ClinicalActionCreated(action.clone()));
    drop(store);

    (StatusCode::CREATED, Json(action))
}

// Handler for PUT /api/clinical-actions/{id}
async fn update_action_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ClinicalActionPatch>,
) -> Result<Json<ClinicalAction>, ApiError> {
    let mut store = state.store.lock().await;
    let action = store.update_action(&id, patch)?;
    tracing::info!("Clinical action {} updated", action.id);

    // Sent under the store lock so event order matches mutation order.
    state
        .live
        .broadcast(ServerEvent::ClinicalActionUpdated(action.clone()));
    drop(store);

    Ok(Json(action))
}

// Handler for GET /api/departments
async fn departments_handler() -> Json<Vec<&'static str>> {
    Json(DEPARTMENTS.to_vec())
}

/// Builds the application router. Route casing is part of the contract
/// with the existing front-ends and must not change.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route(
            "/api/patients",
            get(list_patients_handler).post(create_patient_handler),
        )
        .route("/api/patients/:id", get(get_patient_handler))
        .route(
            "/api/clinical-actions",
            get(list_actions_handler).post(create_action_handler),
        )
        .route("/api/clinical-actions/:id", put(update_action_handler))
        .route(
            "/api/clinical-actions/patient/:patient_id",
            get(list_patient_actions_handler),
        )
        .route("/api/departments", get(departments_handler))
        .route("/ws", get(channel::ws_handler))
        .with_state(state)
        .layer(cors)
}

// Main function to start the workflow server
pub async fn start_server(
    config: ServerConfig,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), AnyhowError> {
    let state = AppState::new(RecordStore::seeded());
    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    tracing::info!("Clinical workflow server listening on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
            tracing::info!("Received shutdown signal.");
        })
        .await
        .context("Clinical workflow server failed to start or run")?;

    tracing::info!("Clinical workflow server stopped.");
    Ok(())
}
