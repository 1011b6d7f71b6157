//! Page handler results
//!
//! Handlers return a [`PageResult`] instead of short-circuiting: a redirect,
//! page data, or an action failure carrying field messages.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::FieldErrors;

/// Where anonymous callers are sent
pub const LOGIN_PATH: &str = "/login";

/// Key for messages that belong to the whole form rather than a field
pub const GLOBAL_ERROR_KEY: &str = "global";

pub const NO_MAIN_CHARACTER: &str = "No main character found";
pub const CREATE_NEWS_FAILED: &str = "Failed to create news article";

/// Body of a failed form action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFailure {
    /// Set when the submission itself was rejected
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub invalid: bool,
    pub errors: FieldErrors,
}

impl ActionFailure {
    /// Rejected submission with per-field messages
    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            invalid: true,
            errors,
        }
    }

    /// Rejected submission with a single form-level message
    pub fn invalid_global(message: impl Into<String>) -> Self {
        Self::invalid(global_errors(message))
    }

    /// Form-level failure that is not the submitter's fault
    pub fn global(message: impl Into<String>) -> Self {
        Self {
            invalid: false,
            errors: global_errors(message),
        }
    }
}

fn global_errors(message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(GLOBAL_ERROR_KEY.to_string(), vec![message.into()]);
    errors
}

/// Outcome of a page load or form action
#[derive(Debug)]
pub enum PageResult<T> {
    /// 302 to the given location, no body
    Redirect(String),
    /// 200 with the page data as JSON
    Data(T),
    /// 4xx action failure
    ClientError(StatusCode, ActionFailure),
    /// 5xx action failure
    ServerError(StatusCode, ActionFailure),
}

impl<T> PageResult<T> {
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect(location.into())
    }

    /// Redirect to the login page
    pub fn login() -> Self {
        Self::redirect(LOGIN_PATH)
    }

    pub fn bad_request(failure: ActionFailure) -> Self {
        Self::ClientError(StatusCode::BAD_REQUEST, failure)
    }

    pub fn internal_error(failure: ActionFailure) -> Self {
        Self::ServerError(StatusCode::INTERNAL_SERVER_ERROR, failure)
    }
}

impl<T: Serialize> IntoResponse for PageResult<T> {
    fn into_response(self) -> Response {
        match self {
            PageResult::Redirect(location) => {
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
            PageResult::Data(data) => Json(data).into_response(),
            PageResult::ClientError(status, failure) | PageResult::ServerError(status, failure) => {
                (status, Json(failure)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_flag_omitted_when_false() {
        let failure = ActionFailure::global(CREATE_NEWS_FAILED);
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({ "errors": { "global": ["Failed to create news article"] } })
        );
    }

    #[test]
    fn test_invalid_global_shape() {
        let failure = ActionFailure::invalid_global(NO_MAIN_CHARACTER);
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({ "invalid": true, "errors": { "global": ["No main character found"] } })
        );
    }

    #[test]
    fn test_redirect_response() {
        let response = PageResult::<()>::login().into_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[test]
    fn test_failure_statuses() {
        let client = PageResult::<()>::bad_request(ActionFailure::default()).into_response();
        assert_eq!(client.status(), StatusCode::BAD_REQUEST);

        let server = PageResult::<()>::internal_error(ActionFailure::default()).into_response();
        assert_eq!(server.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_data_response_is_ok() {
        let response = PageResult::Data(json!({ "title": "x" })).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
