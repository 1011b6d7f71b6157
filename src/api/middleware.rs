//! API middleware
//!
//! Contains:
//! - `AppState`, the shared services handed to every handler
//! - `ApiError`, the JSON body for framework-level failures
//! - session resolution (`load_session`) and the `RequestContext` it attaches

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

use crate::db::DynDatabasePool;
use crate::services::{AccountService, NewsService, PlayerService};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub account_service: Arc<AccountService>,
    pub player_service: Arc<PlayerService>,
    pub news_service: Arc<NewsService>,
    /// Name of the cookie carrying the session token
    pub session_cookie: Arc<str>,
}

/// Session identity of the current request.
///
/// Always present on requests that went through [`load_session`];
/// `account_id` is `None` for anonymous callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub account_id: Option<i64>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(account_id: i64) -> Self {
        Self {
            account_id: Some(account_id),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .copied()
            .unwrap_or_default())
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new("UNSUPPORTED_MEDIA_TYPE", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "BAD_REQUEST" => StatusCode::BAD_REQUEST,
            "UNSUPPORTED_MEDIA_TYPE" => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Request failed: {:#}", err);
        Self::internal_error(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Extract the session token: a bearer token wins over the session cookie
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    for cookie_header in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let token = cookie
                    .trim()
                    .strip_prefix(cookie_name)
                    .and_then(|rest| rest.strip_prefix('='));
                if let Some(token) = token.filter(|t| !t.is_empty()) {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Session middleware.
///
/// Never rejects: attaches a [`RequestContext`] that handlers inspect to
/// decide whether to redirect to the login page.
pub async fn load_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut context = RequestContext::anonymous();

    if let Some(token) = extract_session_token(request.headers(), &state.session_cookie) {
        match state.account_service.validate_session(&token).await {
            Ok(account_id) => context.account_id = account_id,
            Err(e) => tracing::warn!("Session lookup failed: {:#}", e),
        }
    }

    request.extensions_mut().insert(context);
    next.run(request).await
}

// ============================================================================
// Tests
// ============================================================================
