//! QR record handlers: create, list, delete.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, post};
use axum::{Json, Router};

use crate::api::dto::{CreateQrRequest, MessageResponse};
use crate::app_state::AppState;
use crate::domain::{QrRecord, RecordId, UserId};
use crate::error::{ErrorResponse, LedgerError};

/// `POST /qr/{userId}`: Store a new record for a user.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidBody`] when the body does not bind, or
/// [`LedgerError::Persistence`] when the insert fails.
#[utoipa::path(
    post,
    path = "/qr/{userId}",
    tag = "QR Records",
    summary = "Store a QR record",
    description = "Stores the URL, date and image of a QR code for the user in the path. A `userId` in the body is ignored.",
    params(
        ("userId" = String, Path, description = "Owner key"),
    ),
    request_body = CreateQrRequest,
    responses(
        (status = 200, description = "Record stored", body = QrRecord),
        (status = 400, description = "Body did not bind", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn create_record(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<CreateQrRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LedgerError> {
    let Json(req) = payload?;

    let record = state
        .qr_service
        .create(UserId::from(user_id), req.url, req.date, req.image)
        .await?;

    Ok((StatusCode::OK, Json(record)))
}

/// `GET /qr/{userId}`: List a user's records.
///
/// # Errors
///
/// Returns [`LedgerError::Persistence`] when the query fails.
#[utoipa::path(
    get,
    path = "/qr/{userId}",
    tag = "QR Records",
    summary = "List a user's QR records",
    description = "Returns every live record of the user, ordered by id. Unknown users get an empty array.",
    params(
        ("userId" = String, Path, description = "Owner key"),
    ),
    responses(
        (status = 200, description = "Records of the user", body = Vec<QrRecord>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_records(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, LedgerError> {
    let records = state.qr_service.list(&UserId::from(user_id)).await?;
    Ok(Json(records))
}

/// `DELETE /qr/{userId}/{id}`: Soft-delete one record.
///
/// # Errors
///
/// Returns [`LedgerError::RecordNotFound`] if no live record matches both
/// path keys (a non-numeric `id` included), or
/// [`LedgerError::Persistence`] on store failure.
#[utoipa::path(
    delete,
    path = "/qr/{userId}/{id}",
    tag = "QR Records",
    summary = "Delete a QR record",
    description = "Marks the record as deleted. An id owned by another user is reported as not found.",
    params(
        ("userId" = String, Path, description = "Owner key"),
        ("id" = i64, Path, description = "Record id"),
    ),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn delete_record(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, LedgerError> {
    let id: RecordId = id.parse().map_err(|_| LedgerError::RecordNotFound)?;

    state
        .qr_service
        .delete(&UserId::from(user_id), id)
        .await?;

    Ok(Json(MessageResponse::record_deleted()))
}

/// QR record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/qr/{userId}", post(create_record).get(list_records))
        .route("/qr/{userId}/{id}", delete(delete_record))
}
