//! HTTP response DTOs and error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::dto::PokemonDto;
use crate::application::ports::{IdentityError, Trainer};
use crate::domain::inventory::errors::InventoryError;
use crate::domain::shared::PageError;
use crate::domain::trading::errors::TradeError;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// A trainer's public profile with the creatures they hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerProfileResponse {
    /// The trainer.
    #[serde(flatten)]
    pub trainer: Trainer,
    /// Every creature the trainer currently holds.
    pub pokemons: Vec<PokemonDto>,
}

/// API error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Offending field, for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Failure reason code, for executor-declined trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// An error ready to be sent as an HTTP response.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// Serialized body.
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: String) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message,
                field: None,
                reason: None,
            },
        }
    }

    /// Resource not found.
    #[must_use]
    pub fn not_found(message: String) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Missing or unknown bearer token.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "missing or invalid bearer token".to_string(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        let message = err.to_string();
        match err {
            InventoryError::Validation { field, .. } => {
                let mut api = Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message);
                api.body.field = Some(field);
                api
            }
            InventoryError::NotOwner { .. } => {
                Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
            }
            InventoryError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
            }
            InventoryError::BoxNotEmpty { .. } => {
                Self::new(StatusCode::CONFLICT, "BOX_NOT_EMPTY", message)
            }
            InventoryError::Conflict { .. } => {
                Self::new(StatusCode::CONFLICT, "CONFLICT", message)
            }
            InventoryError::Storage { .. } => {
                tracing::error!(error = message, "inventory storage failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal error".to_string(),
                )
            }
        }
    }
}

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        let message = err.to_string();
        match err {
            TradeError::Validation { field, .. } => {
                let mut api = Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message);
                api.body.field = Some(field);
                api
            }
            TradeError::NotOwner { .. } | TradeError::NotReceiver { .. } => {
                Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
            }
            TradeError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message),
            TradeError::AlreadyResolved { .. } => {
                Self::new(StatusCode::CONFLICT, "ALREADY_RESOLVED", message)
            }
            TradeError::Conflict { .. } => Self::new(StatusCode::CONFLICT, "CONFLICT", message),
            TradeError::Failed { reason } => {
                let mut api = Self::new(StatusCode::CONFLICT, "TRADE_FAILED", message);
                api.body.reason = Some(reason.code().to_string());
                api
            }
            TradeError::Storage { .. } => {
                tracing::error!(error = message, "trade storage failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal error".to_string(),
                )
            }
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        tracing::error!(error = %err, "identity directory failure");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error".to_string(),
        )
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        let mut api = Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string());
        api.body.field = Some("pageSize".to_string());
        api
    }
}
