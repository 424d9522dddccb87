use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::error::ApiError;

/// Raw token from the Authorization header. The value is used as-is; there is
/// no scheme prefix and no signature to check.
pub fn token_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let token = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    if token.trim().is_empty() {
        return Err(ApiError::unauthorized("Empty session token"));
    }
    Ok(token.to_string())
}
