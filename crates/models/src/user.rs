use serde::{Deserialize, Serialize};

/// Record held by the user registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
}

impl MicroUser {
    /// New record with a null id, as sent on creation.
    pub fn unsaved(username: impl Into<String>) -> Self {
        Self { id: None, username: username.into() }
    }

    pub fn placeholder() -> Self {
        Self { id: Some(0), username: String::new() }
    }
}

/// Record held by the auth service. `password` is whatever the service
/// stores, normally a hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroAuth {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl MicroAuth {
    /// Stand-in for a user that has no auth record.
    pub fn placeholder() -> Self {
        Self { id: Some(0), username: String::new(), password: String::new(), role: String::new() }
    }
}

/// A user as shown to the caller: registry record paired with its auth record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserModel {
    pub u: MicroUser,
    pub a: MicroAuth,
}

impl UserModel {
    /// Zero-value record returned when add or update fails.
    pub fn placeholder() -> Self {
        Self { u: MicroUser::placeholder(), a: MicroAuth::placeholder() }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_user_serializes_null_id() {
        let v = serde_json::to_value(MicroUser::unsaved("ana")).unwrap();
        assert_eq!(v, serde_json::json!({"id": null, "username": "ana"}));
    }

    #[test]
    fn auth_reply_fields_default_when_missing() {
        let a: MicroAuth = serde_json::from_str(r#"{"username":"ana"}"#).unwrap();
        assert_eq!(a.id, None);
        assert_eq!(a.role, "");
    }

    #[test]
    fn placeholder_has_zero_ids() {
        let p = UserModel::placeholder();
        assert_eq!(p.u.id, Some(0));
        assert_eq!(p.a.id, Some(0));
        assert!(p.is_placeholder());
    }
}
