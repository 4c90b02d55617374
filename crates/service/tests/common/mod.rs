#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use service::session::{StaticToken, TokenStore};
use service::{Endpoints, Portal};
use wiremock::MockServer;

/// All three services behind one mock server, split by path prefix so the
/// request log keeps the global call order.
pub fn endpoints(server: &MockServer) -> Endpoints {
    let uri = server.uri();
    Endpoints::with_bases(&format!("{uri}/auth"), &format!("{uri}/users"), &format!("{uri}/devices"))
}

pub fn portal(server: &MockServer, token: Option<&str>) -> Portal {
    let tokens: Arc<dyn TokenStore> = Arc::new(StaticToken(token.unwrap_or_default().to_string()));
    Portal::new(endpoints(server), tokens)
}

/// A token as the auth service would issue it; the key is irrelevant here.
pub fn token_with_role(username: &str, role: &str) -> String {
    token_with_claims(json!({"sub": username, "role": role, "exp": 4_102_444_800u64}))
}

pub fn token_with_claims(claims: serde_json::Value) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"not-the-real-key")).expect("encode test token")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}
