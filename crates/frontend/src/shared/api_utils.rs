//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use crate::system::auth::storage;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Port of the backend server relative to the page host
pub const API_PORT: u16 = 3000;

/// Failure of a call to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Ошибка сети: {0}")]
    Network(String),
    #[error("Ошибка сервера: HTTP {status} {body}")]
    Status { status: u16, body: String },
    #[error("Ошибка сериализации: {0}")]
    Serialize(String),
    #[error("Ошибка парсинга: {0}")]
    Parse(String),
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using [`API_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Attach `Authorization: Bearer …` when a session token is stored
fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

/// GET `path` and decode the JSON body
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = with_auth(Request::get(&api_url(path)))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// PUT a JSON body to `path`; only the status of the response is inspected
pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let request = with_auth(Request::put(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Serialize(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(response).await.map(|_| ())
}

/// POST a JSON body to `path` and decode the JSON response
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let request = with_auth(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Serialize(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
