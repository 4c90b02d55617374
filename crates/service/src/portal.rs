use std::sync::Arc;

use configs::ServicesConfig;
use reqwest::Client;

use crate::auth::{api::AuthApi, AuthClient};
use crate::device::DeviceClient;
use crate::endpoints::Endpoints;
use crate::session::TokenStore;
use crate::users::{api::UserApi, UserClient};

/// Auth and user clients sharing one HTTP client and one endpoint table.
#[derive(Clone)]
pub struct Portal {
    pub auth: AuthClient,
    pub users: UserClient,
}

impl Portal {
    pub fn new(endpoints: Endpoints, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_client(Client::new(), endpoints, tokens)
    }

    pub fn from_config(cfg: &ServicesConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self::new(Endpoints::from_config(cfg), tokens)
    }

    pub fn with_client(http: Client, endpoints: Endpoints, tokens: Arc<dyn TokenStore>) -> Self {
        let endpoints = Arc::new(endpoints);
        let auth_api = AuthApi::new(http.clone(), Arc::clone(&endpoints));
        let user_api = UserApi::new(http.clone(), Arc::clone(&endpoints));
        let device = DeviceClient::new(http, endpoints);
        Self {
            auth: AuthClient::new(auth_api.clone(), user_api.clone(), device.clone()),
            users: UserClient::new(user_api, auth_api, device, tokens),
        }
    }
}
