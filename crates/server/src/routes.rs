use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use models::employee::{EmployeeInput, Model as Employee};
use service::employee_service;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// POST /api/employees — 201 with the stored record, 409 on duplicate email.
async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<EmployeeInput>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let created = employee_service::save_employee(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/employees — always 200, possibly an empty list.
async fn get_all_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let all = employee_service::get_all_employees(&state.db).await?;
    Ok(Json(all))
}

/// GET /api/employees/:id — absence is 404, never a server error.
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    match employee_service::get_employee_by_id(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(ApiError::not_found("employee")),
    }
}

/// PUT /api/employees/:id — full replacement of every non-id field. The
/// store's update-if-exists is atomic, so a missing target comes back as
/// `NotFound` and maps to 404 without a separate existence round trip.
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<EmployeeInput>,
) -> Result<Json<Employee>, ApiError> {
    let updated = employee_service::update_employee(&state.db, id, &input).await?;
    Ok(Json(updated))
}

/// DELETE /api/employees/:id — 200 even when the id never existed.
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    employee_service::delete_employee(&state.db, id).await?;
    Ok(StatusCode::OK)
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/employees",
            get(get_all_employees).post(create_employee),
        )
        .route(
            "/api/employees/:id",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
