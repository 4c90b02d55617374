//! Request helpers shared by every service client.
//!
//! Each backend call is checked against one exact status code; anything else,
//! including other 2xx codes, is reported as `CoreError::Status`.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::CoreError;

/// Value for an `Authorization` header carrying a bearer token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Send a request, mapping transport failures to `CoreError::Network`.
pub async fn send(req: RequestBuilder) -> Result<Response, CoreError> {
    let resp = req.send().await.map_err(|e| CoreError::Network(e.to_string()))?;
    debug!(url = %resp.url(), status = resp.status().as_u16(), "response received");
    Ok(resp)
}

/// Fail unless the response carries exactly `expected`.
pub fn expect_status(resp: &Response, expected: StatusCode) -> Result<(), CoreError> {
    if resp.status() != expected {
        return Err(CoreError::Status {
            expected: expected.as_u16(),
            actual: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}

/// Decode a JSON body.
pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, CoreError> {
    resp.json::<T>().await.map_err(|e| CoreError::Decode(e.to_string()))
}

/// Send, check the exact status, and decode the JSON reply.
pub async fn send_expecting<T: DeserializeOwned>(req: RequestBuilder, expected: StatusCode) -> Result<T, CoreError> {
    let resp = send(req).await?;
    expect_status(&resp, expected)?;
    read_json(resp).await
}

/// Send and check the exact status, discarding the body.
pub async fn send_expecting_empty(req: RequestBuilder, expected: StatusCode) -> Result<(), CoreError> {
    let resp = send(req).await?;
    expect_status(&resp, expected)
}
