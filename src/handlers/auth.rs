// handlers/auth.rs - POST /api/Auth/token
//
// Tokens are generic client credentials: no body, no user lookup.

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn token(State(state): State<AppState>) -> ApiResult<TokenResponse> {
    let token = state.tokens.generate()?;
    tracing::info!("Issued API token");
    Ok(ApiResponse::success(TokenResponse { token }))
}
