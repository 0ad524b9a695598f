use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::Error, AppState};

/// The authenticated account behind a `Bearer` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAccount {
    pub id: i64,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = parts.headers.get(axum::http::header::AUTHORIZATION) else {
            return Err(Error::Unauthorized("missing_authorization".to_string()));
        };
        let Ok(auth_str) = auth_header.to_str() else {
            return Err(Error::Unauthorized("bad_authorization".to_string()));
        };
        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return Err(Error::Unauthorized("unsupported_scheme".to_string()));
        };

        let id = state.account_service.authenticate(token.trim())?;
        Ok(Self { id })
    }
}
