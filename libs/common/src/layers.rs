//! Outer HTTP layers shared by both services
//!
//! [`cors`] answers browser preflights before routing or authentication
//! runs, so it has to be the outermost layer. [`catch_panic`] turns a
//! panicking handler into the same generic 500 body the error types use.

use axum::{
    Json,
    http::{HeaderName, HeaderValue, Method, StatusCode, header, header::InvalidHeaderValue},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::{any::Any, time::Duration};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};
use tracing::error;

use crate::request_id::REQUEST_ID_HEADER;

/// Origin allowed when nothing is configured: the local web client
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// How long a browser may cache a preflight answer
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(300);

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Credentialed CORS for an explicit list of origins
pub fn cors<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE))
}

/// Log the panic and answer 500 instead of dropping the connection
pub fn catch_panic() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };

    error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
