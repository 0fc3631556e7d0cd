//! API key middleware
//!
//! Requests to protected routes must carry the shared key in the
//! `X-API-Key` header: 401 when the header is absent, 403 when it does not
//! match the effective key (configured or persisted).

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::server::app::AppState;
use crate::services::AuthService;

pub const API_KEY_HEADER: &str = "X-API-Key";

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let Some(provided) = provided else {
        return error_response(StatusCode::UNAUTHORIZED, "API key not provided");
    };

    let expected = match state
        .auth
        .effective_api_key(state.config.api_key.as_deref())
        .await
    {
        Ok(expected) => expected,
        Err(err) => {
            tracing::error!("Failed to load API key: {}", err);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            );
        }
    };

    match expected {
        Some(expected) if AuthService::verify(&provided, &expected) => next.run(request).await,
        _ => error_response(StatusCode::FORBIDDEN, "Invalid API key"),
    }
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": detail }))).into_response()
}
