//! One function per auth-service endpoint. No workflow logic here.

use std::sync::Arc;

use common::http::{self, bearer};
use models::{Credentials, DeleteByIds, LoginReply, MicroAuth, RegisterReply, RegisterRequest};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use tracing::debug;

use crate::endpoints::Endpoints;
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct AuthApi {
    http: Client,
    endpoints: Arc<Endpoints>,
}

impl AuthApi {
    pub fn new(http: Client, endpoints: Arc<Endpoints>) -> Self {
        Self { http, endpoints }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ServiceError> {
        debug!(username = %credentials.username, "auth: login");
        let req = self.http.post(&self.endpoints.auth_login).json(credentials);
        Ok(http::send_expecting(req, StatusCode::OK).await?)
    }

    /// Self-registration; the reply carries a token for the new account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterReply, ServiceError> {
        debug!(username = %request.username, "auth: register");
        let req = self.http.post(&self.endpoints.auth_register).json(request);
        Ok(http::send_expecting(req, StatusCode::CREATED).await?)
    }

    /// Registration performed by an already authenticated user; the reply is
    /// read as the stored auth record.
    pub async fn register_record(&self, token: &str, request: &RegisterRequest) -> Result<MicroAuth, ServiceError> {
        debug!(username = %request.username, "auth: register record");
        let req = self.http
            .post(&self.endpoints.auth_register)
            .header(AUTHORIZATION, bearer(token))
            .json(request);
        Ok(http::send_expecting(req, StatusCode::CREATED).await?)
    }

    pub async fn find_all(&self, token: &str) -> Result<Vec<MicroAuth>, ServiceError> {
        let req = self.http.get(&self.endpoints.auth_find_all).header(AUTHORIZATION, bearer(token));
        Ok(http::send_expecting(req, StatusCode::OK).await?)
    }

    pub async fn update(&self, token: &str, record: &MicroAuth) -> Result<MicroAuth, ServiceError> {
        debug!(username = %record.username, "auth: update");
        let req = self.http
            .put(&self.endpoints.auth_update)
            .header(AUTHORIZATION, bearer(token))
            .json(record);
        Ok(http::send_expecting(req, StatusCode::OK).await?)
    }

    pub async fn delete(&self, token: &str, ids: Vec<i64>) -> Result<(), ServiceError> {
        debug!(count = ids.len(), "auth: delete");
        let req = self.http
            .delete(&self.endpoints.auth_delete)
            .header(AUTHORIZATION, bearer(token))
            .json(&DeleteByIds { ids });
        Ok(http::send_expecting_empty(req, StatusCode::OK).await?)
    }
}
