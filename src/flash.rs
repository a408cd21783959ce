use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use crate::cookies;

pub const FLASH_COOKIE: &str = "taskpad_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: Level,
    pub text: String,
}

/// Pending messages decoded from the incoming request's flash cookie.
///
/// Pages that render these must also send [`clear_cookie`] so the messages
/// are shown exactly once.
#[derive(Debug, Default)]
pub struct Flashes(pub Vec<FlashMessage>);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Flashes {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let messages = cookies::cookie_value(&parts.headers, FLASH_COOKIE)
            .map(decode)
            .unwrap_or_default();
        Ok(Flashes(messages))
    }
}

pub fn encode(messages: &[FlashMessage]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    Base64UrlUnpadded::encode_string(&json)
}

/// Tampered or malformed cookies decode to no messages rather than an error.
pub fn decode(raw: &str) -> Vec<FlashMessage> {
    Base64UrlUnpadded::decode_vec(raw)
        .ok()
        .and_then(|json| serde_json::from_slice(&json).ok())
        .unwrap_or_default()
}

/// Redirect that leaves one message for the next rendered page.
pub fn redirect_with(to: &str, level: Level, text: &str) -> Response {
    let payload = encode(&[FlashMessage {
        level,
        text: text.to_string(),
    }]);
    let cookie = cookies::format_cookie(FLASH_COOKIE, &payload, None);
    ([(header::SET_COOKIE, cookie)], Redirect::to(to)).into_response()
}

/// Set-Cookie value consuming the pending messages.
pub fn clear_cookie() -> String {
    cookies::format_cookie(FLASH_COOKIE, "", Some(0))
}
