use serde::{Deserialize, Serialize};

use crate::models::UserData;

/// Bearer session returned by `POST /auth/login`.
/// The token is opaque; the server decides its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub user_type: String,
    #[serde(default)]
    pub user_data: UserData,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl AuthSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            user_type: String::new(),
            user_data: UserData::default(),
        }
    }

    pub fn with_user(mut self, user_type: impl Into<String>, user_data: UserData) -> Self {
        self.user_type = user_type.into();
        self.user_data = user_data;
        self
    }

    /// Returns the Authorization header value.
    /// The backend hands out `bearer` in lower case; the header always says `Bearer`.
    pub fn authorization_header(&self) -> String {
        let scheme = if self.token_type.eq_ignore_ascii_case("bearer") || self.token_type.is_empty() {
            "Bearer"
        } else {
            self.token_type.as_str()
        };
        format!("{} {}", scheme, self.access_token)
    }

    /// Whether the account has the admin role
    pub fn is_admin(&self) -> bool {
        self.user_type.eq_ignore_ascii_case("admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_login_response() {
        let json = r#"{
            "access_token": "abc123",
            "token_type": "bearer",
            "user_type": "employee",
            "user_data": {"id": 9, "email": "e@x.io", "full_name": "Emp Loyee"}
        }"#;

        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.access_token, "abc123");
        assert_eq!(session.user_type, "employee");
        assert_eq!(session.user_data.id, Some(9));
        assert!(!session.is_admin());
    }

    #[test]
    fn test_authorization_header() {
        let session = AuthSession::new("my_access_token");
        assert_eq!(session.authorization_header(), "Bearer my_access_token");

        let mut custom = AuthSession::new("tok");
        custom.token_type = "Token".to_string();
        assert_eq!(custom.authorization_header(), "Token tok");
    }

    #[test]
    fn test_missing_token_type_defaults_to_bearer() {
        let session: AuthSession = serde_json::from_str(r#"{"access_token": "t"}"#).unwrap();
        assert_eq!(session.token_type, "bearer");
        assert_eq!(session.authorization_header(), "Bearer t");
    }

    #[test]
    fn test_is_admin() {
        let session = AuthSession::new("t").with_user("Admin", UserData::default());
        assert!(session.is_admin());
    }
}
