use serde::{Deserialize, Serialize};

/// Bulk delete body for the user and auth services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteByIds {
    pub ids: Vec<i64>,
}

/// Bulk delete body for the device service, which keys users by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteByUsernames {
    pub usernames: Vec<String>,
}
