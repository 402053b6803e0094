use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::{ReceiptCode, StudentRecord};
use super::repository::{RepositoryError, ScoreRepository, StudentRecordRepository};
use super::service::{ScoreService, ScoreServiceError};

/// Router builder exposing record intake and score calculation.
pub fn score_router<R, S>(service: Arc<ScoreService<R, S>>) -> Router
where
    R: StudentRecordRepository + 'static,
    S: ScoreRepository + 'static,
{
    Router::new()
        .route("/api/v1/records", post(register_handler::<R, S>))
        .route("/api/v1/scores/preview", post(preview_handler::<R, S>))
        .route(
            "/api/v1/scores/:receipt_code",
            post(calculate_handler::<R, S>).get(latest_handler::<R, S>),
        )
        .with_state(service)
}

pub(crate) async fn register_handler<R, S>(
    State(service): State<Arc<ScoreService<R, S>>>,
    axum::Json(record): axum::Json<StudentRecord>,
) -> Response
where
    R: StudentRecordRepository + 'static,
    S: ScoreRepository + 'static,
{
    match service.register(record) {
        Ok(stored) => {
            let payload = json!({ "receipt_code": stored.receipt_code });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<R, S>(
    State(service): State<Arc<ScoreService<R, S>>>,
    axum::Json(record): axum::Json<StudentRecord>,
) -> Response
where
    R: StudentRecordRepository + 'static,
    S: ScoreRepository + 'static,
{
    match service.preview(&record) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn calculate_handler<R, S>(
    State(service): State<Arc<ScoreService<R, S>>>,
    Path(receipt_code): Path<u32>,
) -> Response
where
    R: StudentRecordRepository + 'static,
    S: ScoreRepository + 'static,
{
    match service.calculate(ReceiptCode(receipt_code)) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_handler<R, S>(
    State(service): State<Arc<ScoreService<R, S>>>,
    Path(receipt_code): Path<u32>,
) -> Response
where
    R: StudentRecordRepository + 'static,
    S: ScoreRepository + 'static,
{
    match service.latest(ReceiptCode(receipt_code)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScoreServiceError) -> Response {
    let status = match &error {
        ScoreServiceError::RecordNotFound(_) | ScoreServiceError::ScoreNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        ScoreServiceError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoreServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ScoreServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
