use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("User not found")]
    UserNotFound,

    #[error("{message}")]
    MissingCartItems {
        message: String,
        missing_ids: Vec<Uuid>,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    AlreadyBooked {
        message: String,
        booked_ids: Vec<Uuid>,
    },

    #[error("{message}")]
    InvalidStatus {
        message: String,
        valid: &'static [&'static str],
    },

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, json!({ "message": message }))
            }
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, json!({ "message": self.to_string() }))
            }
            AppError::MissingCartItems {
                message,
                missing_ids,
            } => (
                StatusCode::NOT_FOUND,
                json!({ "message": message, "missingIds": missing_ids }),
            ),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AppError::AlreadyBooked {
                message,
                booked_ids,
            } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "alreadyBookedIds": booked_ids }),
            ),
            AppError::InvalidStatus { message, valid } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "validStatuses": valid }),
            ),
            AppError::DbError(err) => {
                tracing::error!(error = %err, "database error");
                internal_body()
            }
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "orm error");
                internal_body()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                internal_body()
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

// Unexpected failures are logged with full detail server-side; the client
// only ever sees the generic message.
fn internal_body() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "Internal Server Error" }),
    )
}

pub type AppResult<T> = Result<T, AppError>;
