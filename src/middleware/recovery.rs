use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;

use crate::error::ApiError;

/// Catches a panic raised while handling the request, logs the request line,
/// and answers 500 instead of dropping the connection.
pub async fn recover_panic(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let content_length = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            tracing::error!(
                method = %method,
                path = %path,
                datetime = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                bytes = content_length,
                "Recovered from panic: {}",
                panic_message(panic.as_ref())
            );
            ApiError::internal_server_error("internal server error").into_response()
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
