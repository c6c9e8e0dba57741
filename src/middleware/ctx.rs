use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use super::error::{AppError, CtxError};
use crate::middleware::mw_ctx::CtxState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id sent by the caller, or a fresh one when missing or unparsable.
pub fn request_id(headers: &HeaderMap) -> Uuid {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4)
}

#[derive(Clone, Debug)]
pub struct Ctx {
    req_id: Uuid,
}

impl Ctx {
    pub fn new(req_id: Uuid) -> Self {
        Self { req_id }
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            req_id: self.req_id,
            error,
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Ctx::new(request_id(&parts.headers)))
    }
}
