use axum::body::Body;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{
    async_trait,
    response::{IntoResponse, Response},
    Form, Json, RequestExt,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::ctx::request_id;
use crate::middleware::error::ErrorResponseBody;

fn error_response(status: StatusCode, message: String, req_id: Uuid) -> Response {
    (
        status,
        Json(ErrorResponseBody::new(message, Some(req_id.to_string()))),
    )
        .into_response()
}

/// Accepts `application/json` or `application/x-www-form-urlencoded` bodies and runs
/// `validator` rules before the handler sees the payload.
#[derive(Debug)]
pub struct JsonOrFormValidated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrFormValidated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let req_id = request_id(req.headers());
        let bad_request =
            |message: String| error_response(StatusCode::BAD_REQUEST, message, req_id);

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let payload = if content_type.starts_with("application/json") {
            let Json(payload) = req
                .extract::<Json<T>, _>()
                .await
                .map_err(|rejection| bad_request(rejection.body_text()))?;
            payload
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = req
                .extract::<Form<T>, _>()
                .await
                .map_err(|rejection| bad_request(rejection.body_text()))?;
            payload
        } else {
            return Err(error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported content type '{content_type}'"),
                req_id,
            ));
        };

        payload
            .validate()
            .map_err(|err| bad_request(err.to_string()))?;
        Ok(Self(payload))
    }
}
