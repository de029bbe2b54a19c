//! Login and registration against the auth service

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::client::api::error_message;
use crate::client::tokens::AuthSession;
use crate::error::{Result, ZyntraError};
use crate::models::{LoginRequest, RegisterRequest};

const LOGIN_FALLBACK: &str = "Sign in failed. Please check your credentials.";
const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";

/// Unauthenticated client for `/auth/*`
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ZyntraError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange credentials for a bearer session
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = self.post("/auth/login", &request, LOGIN_FALLBACK).await?;

        let session: AuthSession = serde_json::from_str(&body).map_err(|e| {
            ZyntraError::invalid_response(format!("Unexpected login response: {}", e))
        })?;
        if session.access_token.is_empty() {
            return Err(ZyntraError::invalid_response("Login response carried no access token"));
        }

        info!(user_type = %session.user_type, "signed in");
        Ok(session)
    }

    /// Create an account. The server returns the created user.
    pub async fn register(&self, request: &RegisterRequest) -> Result<serde_json::Value> {
        let body = self.post("/auth/register", request, REGISTER_FALLBACK).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a JSON body; non-2xx turns into an authentication error carrying the server detail
    async fn post<B: Serialize>(&self, path: &str, body: &B, fallback: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(ZyntraError::Network)?;

        let status = response.status();
        let text = response.text().await.map_err(ZyntraError::Network)?;

        if status.is_success() {
            return Ok(text);
        }

        let detail = error_message(&text);
        let looks_like_detail = text.contains("\"detail\"");
        if looks_like_detail && !detail.is_empty() {
            Err(ZyntraError::auth(detail))
        } else {
            Err(ZyntraError::auth(fallback))
        }
    }
}
