use models::{Credentials, RegisterRequest, Session};
use tracing::{debug, info, instrument, warn};

use crate::auth::api::AuthApi;
use crate::auth::token::decode_role;
use crate::device::DeviceClient;
use crate::errors::{or_fallback, ServiceError};
use crate::session::SessionStore;
use crate::users::api::UserApi;

/// Reply text returned by `register` on any failure.
pub const REGISTER_FAILED: &str = "Error";

/// Login and self-registration.
#[derive(Clone)]
pub struct AuthClient {
    auth: AuthApi,
    users: UserApi,
    device: DeviceClient,
}

impl AuthClient {
    pub fn new(auth: AuthApi, users: UserApi, device: DeviceClient) -> Self {
        Self { auth, users, device }
    }

    /// Log in; `Session::empty()` on any failure.
    pub async fn login(&self, credentials: &Credentials) -> Session {
        or_fallback("login", self.try_login(credentials).await, Session::empty)
    }

    /// Log in, then make sure the user registry knows the user before
    /// returning the session with the role read from the token.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn try_login(&self, credentials: &Credentials) -> Result<Session, ServiceError> {
        credentials.validate()?;
        let reply = self.auth.login(credentials).await?;
        let token = reply.jwt_token;

        let existing = self.users.find_one(&token, &credentials.username).await?;
        if !matches!(&existing, Some(u) if u.username == credentials.username) {
            debug!("no user registry entry, creating one");
            self.users.create(&token, &credentials.username).await?;
        }

        let role = decode_role(&token)?;
        info!(%role, "login_succeeded");
        Ok(Session { username: reply.username, token, role })
    }

    /// Log in and keep the session in `store` when it succeeded.
    pub async fn login_and_store<S>(&self, credentials: &Credentials, store: &S) -> Session
    where
        S: SessionStore + ?Sized,
    {
        let session = self.login(credentials).await;
        if !session.is_empty() {
            if let Err(e) = store.save(session.clone()).await {
                warn!(error = %e, "session not persisted");
            }
        }
        session
    }

    /// Register an account and its user/device entries. Returns the server's
    /// message (empty when none) or `REGISTER_FAILED`.
    pub async fn register(&self, request: &RegisterRequest) -> String {
        or_fallback("register", self.try_register(request).await, || REGISTER_FAILED.to_string())
    }

    #[instrument(skip(self, request), fields(username = %request.username, role = %request.role))]
    pub async fn try_register(&self, request: &RegisterRequest) -> Result<String, ServiceError> {
        request.validate()?;
        let reply = self.auth.register(request).await?;

        self.users.create(&reply.token, &request.username).await?;
        self.device.add_user(&reply.token, &request.username).await?;

        info!("registration_succeeded");
        Ok(reply.error_message.unwrap_or_default())
    }
}
