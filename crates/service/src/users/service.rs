use std::sync::Arc;

use models::auth::validate_username;
use models::{RegisterRequest, UserModel};
use tracing::{info, instrument};

use crate::auth::api::AuthApi;
use crate::device::DeviceClient;
use crate::errors::{or_fallback, ServiceError};
use crate::session::TokenStore;
use crate::users::api::UserApi;
use crate::users::join::join_by_username;

/// User management workflows spanning the user, auth and device services.
///
/// Every call authenticates with the token currently held by the
/// `TokenStore`. The plain methods never fail: errors are logged and replaced
/// by a fallback value. The `try_` variants return the error instead.
#[derive(Clone)]
pub struct UserClient {
    users: UserApi,
    auth: AuthApi,
    device: DeviceClient,
    tokens: Arc<dyn TokenStore>,
}

impl UserClient {
    pub fn new(users: UserApi, auth: AuthApi, device: DeviceClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self { users, auth, device, tokens }
    }

    async fn token(&self) -> Result<String, ServiceError> {
        self.tokens.token().await.ok_or(ServiceError::MissingToken)
    }

    /// All users joined with their auth records; empty on failure.
    pub async fn find_all(&self) -> Vec<UserModel> {
        or_fallback("find_all_users", self.try_find_all().await, Vec::new)
    }

    #[instrument(skip(self))]
    pub async fn try_find_all(&self) -> Result<Vec<UserModel>, ServiceError> {
        let token = self.token().await?;
        let users = self.users.find_all(&token).await?;
        let auths = self.auth.find_all(&token).await?;
        Ok(join_by_username(users, &auths))
    }

    /// Create the user entry, its auth record and its device-registry entry.
    /// Returns `UserModel::placeholder()` on failure.
    pub async fn add(&self, user: &UserModel) -> UserModel {
        or_fallback("add_user", self.try_add(user).await, UserModel::placeholder)
    }

    #[instrument(skip(self, user), fields(username = %user.u.username))]
    pub async fn try_add(&self, user: &UserModel) -> Result<UserModel, ServiceError> {
        validate_username(&user.u.username)?;
        validate_username(&user.a.username)?;
        let token = self.token().await?;

        let u = self.users.create(&token, &user.u.username).await?;
        let request = RegisterRequest::new(&user.a.username, &user.a.password, &user.a.role);
        let a = self.auth.register_record(&token, &request).await?;
        self.device.add_user(&token, &user.a.username).await?;

        info!(user_id = ?u.id, auth_id = ?a.id, "user_added");
        Ok(UserModel { u, a })
    }

    /// Update the user entry then the auth record. Returns
    /// `UserModel::placeholder()` on failure.
    pub async fn update(&self, user: &UserModel) -> UserModel {
        or_fallback("update_user", self.try_update(user).await, UserModel::placeholder)
    }

    #[instrument(skip(self, user), fields(username = %user.u.username))]
    pub async fn try_update(&self, user: &UserModel) -> Result<UserModel, ServiceError> {
        validate_username(&user.u.username)?;
        validate_username(&user.a.username)?;
        let token = self.token().await?;

        let u = self.users.update(&token, &user.u).await?;
        let a = self.auth.update(&token, &user.a).await?;

        info!(user_id = ?u.id, auth_id = ?a.id, "user_updated");
        Ok(UserModel { u, a })
    }

    /// Delete from the user service, then the auth service, then the device
    /// service. Stops at the first failure and returns `false`.
    pub async fn remove(&self, users: &[UserModel]) -> bool {
        or_fallback("remove_users", self.try_remove(users).await.map(|()| true), || false)
    }

    #[instrument(skip(self, users), fields(count = users.len()))]
    pub async fn try_remove(&self, users: &[UserModel]) -> Result<(), ServiceError> {
        let token = self.token().await?;

        let user_ids = users.iter().map(|m| m.u.id.unwrap_or(0)).collect();
        self.users.delete(&token, user_ids).await?;

        let auth_ids = users.iter().map(|m| m.a.id.unwrap_or(0)).collect();
        self.auth.delete(&token, auth_ids).await?;

        let usernames = users.iter().map(|m| m.a.username.clone()).collect();
        self.device.delete_users(&token, usernames).await?;

        info!("users_removed");
        Ok(())
    }
}
