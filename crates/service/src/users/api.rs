//! One function per user-registry endpoint.

use std::sync::Arc;

use common::http::{self, bearer};
use common::CoreError;
use models::{DeleteByIds, MicroUser};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use tracing::{debug, warn};

use crate::endpoints::Endpoints;
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct UserApi {
    http: Client,
    endpoints: Arc<Endpoints>,
}

impl UserApi {
    pub fn new(http: Client, endpoints: Arc<Endpoints>) -> Self {
        Self { http, endpoints }
    }

    /// Look up one user by name.
    ///
    /// The registry answers 200 with the record or 204 with no body when the
    /// user is unknown; both are success. A 200 body that is not a user record
    /// also counts as unknown. Any non-2xx status is an error.
    pub async fn find_one(&self, token: &str, username: &str) -> Result<Option<MicroUser>, ServiceError> {
        debug!(%username, "user: find one");
        let url = self.endpoints.user_find_one(username)?;
        let resp = http::send(self.http.get(url).header(AUTHORIZATION, bearer(token))).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Status {
                expected: StatusCode::OK.as_u16(),
                actual: status.as_u16(),
                url: resp.url().to_string(),
            }
            .into());
        }
        if status != StatusCode::OK {
            return Ok(None);
        }
        let body = resp.bytes().await.map_err(|e| CoreError::Decode(e.to_string()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice::<Option<MicroUser>>(&body) {
            Ok(user) => Ok(user),
            Err(e) => {
                warn!(%username, error = %e, "user: lookup body is not a user record");
                Ok(None)
            }
        }
    }

    pub async fn find_all(&self, token: &str) -> Result<Vec<MicroUser>, ServiceError> {
        let req = self.http.get(&self.endpoints.user_find_all).header(AUTHORIZATION, bearer(token));
        Ok(http::send_expecting(req, StatusCode::OK).await?)
    }

    /// Create a user entry with a server-assigned id. Expects 201.
    pub async fn create(&self, token: &str, username: &str) -> Result<MicroUser, ServiceError> {
        debug!(%username, "user: create");
        let req = self.http
            .post(&self.endpoints.user_add)
            .header(AUTHORIZATION, bearer(token))
            .json(&MicroUser::unsaved(username));
        Ok(http::send_expecting(req, StatusCode::CREATED).await?)
    }

    pub async fn update(&self, token: &str, user: &MicroUser) -> Result<MicroUser, ServiceError> {
        debug!(username = %user.username, "user: update");
        let req = self.http
            .put(&self.endpoints.user_add)
            .header(AUTHORIZATION, bearer(token))
            .json(user);
        Ok(http::send_expecting(req, StatusCode::OK).await?)
    }

    pub async fn delete(&self, token: &str, ids: Vec<i64>) -> Result<(), ServiceError> {
        debug!(count = ids.len(), "user: delete");
        let req = self.http
            .delete(&self.endpoints.user_delete)
            .header(AUTHORIZATION, bearer(token))
            .json(&DeleteByIds { ids });
        Ok(http::send_expecting_empty(req, StatusCode::OK).await?)
    }
}
