use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_username(&self.username)?;
        validate_password(&self.password)
    }
}

/// Registration input. Serialized with an explicit `id: null` as the auth
/// service expects for new records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub password: String,
    pub role: String,
}

impl RegisterRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: impl Into<String>) -> Self {
        Self { id: None, username: username.into(), password: password.into(), role: role.into() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_username(&self.username)?;
        validate_password(&self.password)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginReply {
    pub username: String,
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterReply {
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub token: String,
}

/// Authenticated session handed back to the caller after login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
    pub role: String,
}

impl Session {
    /// Sentinel returned when login fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.token.is_empty() && self.role.is_empty()
    }
}

/// JWT payload fields this layer reads; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleClaims {
    /// Absent and `null` both read as `None`.
    #[serde(default)]
    pub role: Option<String>,
}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.trim().is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    if password.is_empty() {
        return Err(ModelError::Validation("password required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_sends_null_id() {
        let v = serde_json::to_value(RegisterRequest::new("ana", "pw", "ADMIN")).unwrap();
        assert!(v["id"].is_null());
        assert_eq!(v["role"], "ADMIN");
    }

    #[test]
    fn login_reply_reads_camel_case_token() {
        let r: LoginReply = serde_json::from_str(r#"{"username":"ana","jwtToken":"a.b.c"}"#).unwrap();
        assert_eq!(r.jwt_token, "a.b.c");
    }

    #[test]
    fn register_reply_tolerates_null_message() {
        let r: RegisterReply = serde_json::from_str(r#"{"errorMessage":null,"token":"t"}"#).unwrap();
        assert_eq!(r.error_message, None);
        assert_eq!(r.token, "t");
    }

    #[test]
    fn empty_session_is_sentinel() {
        assert!(Session::empty().is_empty());
        let s = Session { username: "ana".into(), token: "t".into(), role: "CLIENT".into() };
        assert!(!s.is_empty());
    }

    #[test]
    fn blank_credentials_fail_validation() {
        assert!(Credentials::new(" ", "pw").validate().is_err());
        assert!(Credentials::new("ana", "").validate().is_err());
        assert!(Credentials::new("ana", "pw").validate().is_ok());
    }
}
