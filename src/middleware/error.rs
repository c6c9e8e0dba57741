use std::fmt;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::middleware::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    Validation { description: String },
    Config { description: String },
    EntityFailIdNotFound { ident: String },
    AlreadyAssigned { ident: String },
    AlreadyRated { ident: String },
    InvalidTransition { ident: String, from: String, to: String },
    Serde { source: String },
    SurrealDb { source: String },
    WriteConflict { source: String },
    SurrealDbNoResult { source: String, id: String },
}

/// CtxError carries the req_id reported to the client and implements IntoResponse.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Any error produced before a request context exists (repositories, config, startup).
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl CtxError {
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            req_id: ctx.req_id(),
            error: err.into(),
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

impl From<surrealdb::Error> for CtxError {
    fn from(value: surrealdb::Error) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value.into(),
        }
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::Validation { description } => write!(f, "{description}"),
            Self::Config { description } => write!(f, "Config error - {description}"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id= {ident} not found"),
            Self::AlreadyAssigned { ident } => {
                write!(f, "Project {ident} already has an assigned freelancer")
            }
            Self::AlreadyRated { ident } => write!(f, "Project {ident} has already been rated"),
            Self::InvalidTransition { ident, from, to } => {
                write!(f, "Project {ident} can not move from {from} to {to}")
            }
            Self::Serde { source } => write!(f, "Serde error - {source}"),
            Self::SurrealDb { .. } | Self::WriteConflict { .. } => write!(f, "{INTERNAL}"),
            Self::SurrealDbNoResult { id, .. } => write!(f, "No result for id {id}"),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EntityFailIdNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AlreadyAssigned { .. }
            | AppError::AlreadyRated { .. }
            | AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::Generic { .. } | AppError::Validation { .. } | AppError::Serde { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config { .. }
            | AppError::SurrealDb { .. }
            | AppError::WriteConflict { .. }
            | AppError::SurrealDbNoResult { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseBody {
    success: bool,
    error: String,
    req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            success: false,
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.error.status_code();
        if status_code.is_server_error() {
            error!(req_id = %self.req_id, error = ?self.error, "request failed");
        }
        let body = ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string()));
        let mut response = (status_code, Json(body)).into_response();
        // the real error stays available for response layers
        response.extensions_mut().insert(self.error);
        response
    }
}

// External Errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

/// Optimistic transaction conflicts between concurrent writers.
const RETRYABLE_MARKER: &str = "can be retried";

impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        let retryable = matches!(
            value,
            surrealdb::Error::Db(surrealdb::error::Db::TxRetryable)
        ) || value.to_string().contains(RETRYABLE_MARKER);
        if retryable {
            Self::WriteConflict {
                source: value.to_string(),
            }
        } else {
            Self::SurrealDb {
                source: value.to_string(),
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation {
            description: value.to_string(),
        }
    }
}

impl From<ValidationErrors> for CtxError {
    fn from(value: ValidationErrors) -> Self {
        AppError::from(value).into()
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}
