//! Request and profile payloads for the auth service

use serde::{Deserialize, Serialize};

/// Admin account new users are attached to unless told otherwise
pub const DEFAULT_ADMIN_ID: i64 = 2;

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub admin_id: i64,
}

impl RegisterRequest {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        full_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            full_name: full_name.into(),
            password: password.into(),
            admin_id: DEFAULT_ADMIN_ID,
        }
    }

    pub fn with_admin(mut self, admin_id: i64) -> Self {
        self.admin_id = admin_id;
        self
    }
}

/// User profile blob returned alongside the access token.
///
/// Only a few fields are read; the rest is kept verbatim so the stored
/// blob round-trips unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserData {
    /// Name to greet the user with: full name, else email
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Error body shape used by the backend (`{"detail": "..."}`)
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Flatten `detail`, which is either a string or a list of validation errors
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_defaults_admin() {
        let req = RegisterRequest::new("a@b.c", "ab", "A B", "pw");
        assert_eq!(req.admin_id, DEFAULT_ADMIN_ID);

        let json = serde_json::to_value(req.with_admin(7)).unwrap();
        assert_eq!(json["admin_id"], 7);
        assert_eq!(json["full_name"], "A B");
    }

    #[test]
    fn test_user_data_display_name() {
        let mut user = UserData {
            email: "jane@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "jane@example.com");

        user.full_name = Some("Jane Doe".to_string());
        assert_eq!(user.display_name(), "Jane Doe");
    }

    #[test]
    fn test_user_data_keeps_unknown_fields() {
        let json = r#"{"id": 3, "email": "x@y.z", "department": "R&D"}"#;
        let user: UserData = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, Some(3));
        assert_eq!(user.extra["department"], "R&D");

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["department"], "R&D");
    }

    #[test]
    fn test_error_detail_message() {
        let plain: ErrorDetail = serde_json::from_str(r#"{"detail": "Bad creds"}"#).unwrap();
        assert_eq!(plain.message(), "Bad creds");

        let list: ErrorDetail = serde_json::from_str(
            r#"{"detail": [{"msg": "field required"}, {"msg": "too short"}]}"#,
        )
        .unwrap();
        assert_eq!(list.message(), "field required; too short");
    }
}
