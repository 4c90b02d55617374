//! Device registry notifications for user creation and removal.

use std::sync::Arc;

use common::http::{self, bearer};
use models::{DeleteByUsernames, MicroUser};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use tracing::debug;

use crate::endpoints::Endpoints;
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct DeviceClient {
    http: Client,
    endpoints: Arc<Endpoints>,
}

impl DeviceClient {
    pub fn new(http: Client, endpoints: Arc<Endpoints>) -> Self {
        Self { http, endpoints }
    }

    /// Register `username` with the device service. Expects 201.
    pub async fn add_user(&self, token: &str, username: &str) -> Result<(), ServiceError> {
        debug!(%username, "device: add user");
        let req = self.http
            .post(&self.endpoints.device_add_user)
            .header(AUTHORIZATION, bearer(token))
            .json(&MicroUser::unsaved(username));
        http::send_expecting_empty(req, StatusCode::CREATED).await?;
        Ok(())
    }

    /// Drop the given users and their devices. Expects 200.
    pub async fn delete_users(&self, token: &str, usernames: Vec<String>) -> Result<(), ServiceError> {
        debug!(count = usernames.len(), "device: delete users");
        let req = self.http
            .delete(&self.endpoints.device_delete_user)
            .header(AUTHORIZATION, bearer(token))
            .json(&DeleteByUsernames { usernames });
        http::send_expecting_empty(req, StatusCode::OK).await?;
        Ok(())
    }
}
