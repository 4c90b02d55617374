//! Absolute URLs for every backend call, resolved once from configuration.

use configs::ServicesConfig;
use reqwest::Url;

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth_login: String,
    pub auth_register: String,
    pub auth_find_all: String,
    pub auth_update: String,
    pub auth_delete: String,
    user_find_one_prefix: String,
    pub user_find_all: String,
    pub user_add: String,
    pub user_delete: String,
    pub device_add_user: String,
    pub device_delete_user: String,
}

impl Endpoints {
    pub fn from_config(cfg: &ServicesConfig) -> Self {
        let (a, u, d) = (&cfg.auth, &cfg.user, &cfg.device);
        Self {
            auth_login: join(&a.base_url, &a.login_path),
            auth_register: join(&a.base_url, &a.register_path),
            auth_find_all: join(&a.base_url, &a.find_all_path),
            auth_update: join(&a.base_url, &a.update_path),
            auth_delete: join(&a.base_url, &a.delete_path),
            user_find_one_prefix: join(&u.base_url, &u.find_one_path),
            user_find_all: join(&u.base_url, &u.find_all_path),
            user_add: join(&u.base_url, &u.add_path),
            user_delete: join(&u.base_url, &u.delete_path),
            device_add_user: join(&d.base_url, &d.add_user_path),
            device_delete_user: join(&d.base_url, &d.delete_user_path),
        }
    }

    /// Default routes under the given base URLs.
    pub fn with_bases(auth: &str, user: &str, device: &str) -> Self {
        let mut cfg = ServicesConfig::default();
        cfg.auth.base_url = auth.trim_end_matches('/').to_string();
        cfg.user.base_url = user.trim_end_matches('/').to_string();
        cfg.device.base_url = device.trim_end_matches('/').to_string();
        Self::from_config(&cfg)
    }

    /// Single-user lookup; the username becomes one percent-encoded segment.
    pub fn user_find_one(&self, username: &str) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&self.user_find_one_prefix)
            .map_err(|e| ServiceError::Validation(format!("user lookup url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::Validation("user lookup url cannot take a path".into()))?
            .pop_if_empty()
            .push(username);
        Ok(url)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes_follow_controllers() {
        let e = Endpoints::with_bases("http://a:1", "http://u:2/", "http://d:3");
        assert_eq!(e.auth_login, "http://a:1/login");
        assert_eq!(e.auth_delete, "http://a:1/");
        assert_eq!(e.user_find_all, "http://u:2/all");
        assert_eq!(e.user_add, "http://u:2/");
        assert_eq!(e.device_add_user, "http://d:3/user");
    }

    #[test]
    fn find_one_appends_username_segment() {
        let e = Endpoints::with_bases("http://a", "http://u/users", "http://d");
        assert_eq!(e.user_find_one("ana").unwrap().as_str(), "http://u/users/ana");
    }

    #[test]
    fn find_one_escapes_path_characters() {
        let e = Endpoints::with_bases("http://a", "http://u", "http://d");
        assert_eq!(e.user_find_one("a/b c").unwrap().as_str(), "http://u/a%2Fb%20c");
    }
}
