//! Request identity. Credentials are checked upstream; by the time a request
//! reaches these extractors the principal id is trusted but still has to be
//! present and well formed.

use crate::errors::AppError;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub const USER_HEADER: &str = "x-user-id";
pub const ADMIN_HEADER: &str = "x-admin-token";

/// Verified owner of the account a request operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(pub String);

impl Principal {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let id = raw.trim();
        let valid = !id.is_empty()
            && id.len() <= 64
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'));
        if valid {
            Ok(Self(id.to_string()))
        } else {
            Err(AppError::unauthorized("invalid user id"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("missing user id"))?;
        Self::parse(raw)
    }
}

/// Passes only when the request carries the configured admin token.
#[derive(Debug)]
pub struct AdminGuard;

#[async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let expected = state
            .config
            .admin_token
            .as_deref()
            .ok_or_else(|| AppError::unauthorized("admin access disabled"))?;
        let supplied = parts
            .headers
            .get(ADMIN_HEADER)
            .map(|value| value.as_bytes())
            .unwrap_or_default();

        if tokens_match(supplied, expected.as_bytes()) {
            Ok(Self)
        } else {
            Err(AppError::unauthorized("bad admin token"))
        }
    }
}

/// Compares every byte regardless of where the first mismatch is.
fn tokens_match(supplied: &[u8], expected: &[u8]) -> bool {
    if supplied.len() != expected.len() {
        return false;
    }
    supplied
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
