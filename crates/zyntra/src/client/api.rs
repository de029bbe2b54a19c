//! Wellness backend client for authenticated requests
//!
//! Wraps the gait, posture and wellness endpoints. Every request carries
//! the session's bearer token.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{multipart, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::client::tokens::AuthSession;
use crate::error::{Result, ZyntraError};
use crate::models::auth::ErrorDetail;

/// Tunnels in front of the backend answer browsers with an HTML interstitial without this
const SKIP_BROWSER_WARNING: &str = "ngrok-skip-browser-warning";

/// Raw outcome of a request that callers want to inspect without failing
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }
}

/// Authenticated client for the wellness backend
#[derive(Clone)]
pub struct WellnessClient {
    client: Client,
    base_url: String,
    session: AuthSession,
}

impl WellnessClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: &str, session: AuthSession, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ZyntraError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Create a client with a 30s timeout (for testing)
    #[doc(hidden)]
    pub fn new_with_base_url(base_url: &str, session: AuthSession) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Build the full URL for a given path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build headers with authorization
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(SKIP_BROWSER_WARNING, HeaderValue::from_static("true"));
        let auth = HeaderValue::from_str(&self.session.authorization_header())
            .map_err(|_| ZyntraError::auth("Stored token contains invalid characters"))?;
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    /// Make an authenticated GET request and return the response
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.build_url(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers()?)
            .send()
            .await
            .map_err(ZyntraError::Network)?;

        handle_response_status(response).await
    }

    /// Make an authenticated GET request and deserialize JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        response.json().await.map_err(|e| {
            ZyntraError::invalid_response(format!("Failed to parse JSON response: {}", e))
        })
    }

    /// GET without status handling; transport errors still surface
    pub async fn get_raw(&self, path: &str) -> Result<RawResponse> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.build_headers()?)
            .send()
            .await
            .map_err(ZyntraError::Network)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(ZyntraError::Network)?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    /// Make an authenticated DELETE request, returning the JSON body if any
    pub async fn delete(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.build_url(path);
        debug!(%url, "DELETE");

        let response = self
            .client
            .delete(&url)
            .headers(self.build_headers()?)
            .send()
            .await
            .map_err(ZyntraError::Network)?;

        let response = handle_response_status(response).await?;
        let body = response.text().await.map_err(ZyntraError::Network)?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Upload a file using multipart form data (field `file`)
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, file_path: &Path) -> Result<T> {
        let url = self.build_url(path);

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.mp4")
            .to_string();

        let file_bytes = tokio::fs::read(file_path).await?;
        debug!(%url, file = %file_name, bytes = file_bytes.len(), "uploading");

        let part = multipart::Part::bytes(file_bytes)
            .file_name(file_name)
            .mime_str(guess_mime(file_path))
            .map_err(|e| ZyntraError::invalid_response(format!("Invalid MIME type: {}", e)))?;

        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .multipart(form)
            .send()
            .await
            .map_err(ZyntraError::Network)?;

        let response = handle_response_status(response).await?;
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Err(ZyntraError::invalid_response(
                "Server returned non-JSON response. The API endpoint might be incorrect or the tunnel URL may have expired.",
            ));
        }

        response.json().await.map_err(|e| {
            ZyntraError::invalid_response(format!("Failed to parse upload response: {}", e))
        })
    }
}

/// Handle response status codes and convert to errors
pub(crate) async fn handle_response_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ZyntraError::NotAuthenticated);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ZyntraError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pull `detail` out of an error body, else return the body itself
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorDetail>(body)
        .map(|d| d.message())
        .unwrap_or_else(|_| body.trim().chars().take(200).collect())
}

/// Whether the file extension names a video container the backend accepts
pub fn is_video_file(path: &Path) -> bool {
    guess_mime(path).starts_with("video/")
}

fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_trims_slash() {
        let client = WellnessClient::new_with_base_url("http://localhost:8000/", AuthSession::new("t"));
        assert_eq!(
            client.build_url("/wellness/forest"),
            "http://localhost:8000/wellness/forest"
        );
    }

    #[test]
    fn test_headers_carry_bearer() {
        let client = WellnessClient::new_with_base_url("http://localhost", AuthSession::new("abc"));
        let headers = client.build_headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"detail": "Not allowed"}"#), "Not allowed");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("clip.MP4")), "video/mp4");
        assert_eq!(guess_mime(Path::new("clip")), "application/octet-stream");
        assert!(is_video_file(Path::new("/tmp/hall.webm")));
        assert!(!is_video_file(Path::new("notes.txt")));
    }
}
