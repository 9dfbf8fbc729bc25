//! Request-scoped user identity.
//!
//! Core operations never derive the current user themselves; they take an
//! explicit [`UserContext`] resolved once at the handler boundary. Session
//! issuance and real authentication live outside this application.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::error::AppError;

pub const USER_HEADER: &str = "x-ritual-user";
pub const USER_COOKIE: &str = "ritual_user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: Uuid,
}

impl UserContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let raw = header_value(parts, USER_HEADER)
            .or_else(|| cookie_value(parts, USER_COOKIE))
            .ok_or_else(|| AppError::Unauthorized("No user identity provided".to_string()))?;

        let user_id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::Unauthorized("Invalid user identity".to_string()))?;

        Ok(UserContext { user_id })
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}
