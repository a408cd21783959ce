use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::flash::{self, Level};
use crate::views;

/// Failures that escape a request handler.
///
/// Recoverable kinds turn into a flash message plus a redirect back to the
/// form they came from; the rest are plain status responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected form input, e.g. mismatched registration passwords.
    #[error("{0}")]
    Validation(&'static str),
    /// Attempt to claim a username that is already taken.
    #[error("{0}")]
    Conflict(&'static str),
    /// Login with an unknown username or a wrong password.
    #[error("invalid credentials")]
    Authentication,
    /// Task lookup miss, including tasks owned by another account.
    #[error("not found")]
    NotFound,
    /// Malformed due-date string; surfaces as a server error.
    #[error("invalid due date: {0}")]
    DueDate(#[from] time::error::Parse),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Validation and conflict errors only arise from the
            // registration form; authentication errors only from login.
            AppError::Validation(message) | AppError::Conflict(message) => {
                flash::redirect_with("/register/", Level::Error, message)
            }
            AppError::Authentication => {
                flash::redirect_with("/login/", Level::Error, "Invalid credentials")
            }
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
            }
            AppError::DueDate(e) => {
                error!(error = %e, "due date parse failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use crate::flash::decode;

    fn flash_payload(response: &Response) -> Vec<crate::flash::FlashMessage> {
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        let payload = cookie
            .strip_prefix("taskpad_flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        decode(payload)
    }

    #[test]
    fn validation_error_flashes_back_to_registration() {
        let response = AppError::Validation("Passwords do not match").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/register/");
        assert_eq!(flash_payload(&response)[0].text, "Passwords do not match");
    }

    #[test]
    fn conflict_error_flashes_back_to_registration() {
        let response = AppError::Conflict("Username already exists").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/register/");
    }

    #[test]
    fn authentication_error_flashes_back_to_login() {
        let response = AppError::Authentication.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login/");
        assert_eq!(flash_payload(&response)[0].text, "Invalid credentials");
    }

    #[test]
    fn not_found_is_a_404_page() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn malformed_due_date_is_a_server_error() {
        let parse_err = crate::tasks::dto::parse_due_date("not-a-date").unwrap_err();
        let response = AppError::from(parse_err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
