use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::DirectoryError;
use crate::server::app::AppState;
use crate::server::middleware::api_key::API_KEY_HEADER;

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub api_key: String,
    /// "created" on first issuance, "existing" afterwards
    pub status: String,
    pub header_name: String,
}

/// Issue the API key, generating and persisting one on first call.
pub async fn get_token(
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, DirectoryError> {
    let issued = state
        .auth
        .get_or_create_api_key(state.config.api_key.as_deref())
        .await?;

    Ok(Json(TokenResponse {
        api_key: issued.api_key,
        status: if issued.created {
            "created".to_string()
        } else {
            "existing".to_string()
        },
        header_name: API_KEY_HEADER.to_string(),
    }))
}
