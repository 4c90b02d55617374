use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServicesConfig {
    #[serde(default)]
    pub auth: AuthServiceConfig,
    #[serde(default)]
    pub user: UserServiceConfig,
    #[serde(default)]
    pub device: DeviceServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceConfig {
    #[serde(default = "default_auth_url")]
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    #[serde(default = "default_find_all_path")]
    pub find_all_path: String,
    #[serde(default = "default_update_path")]
    pub update_path: String,
    #[serde(default = "default_root_path")]
    pub delete_path: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_auth_url(),
            login_path: default_login_path(),
            register_path: default_register_path(),
            find_all_path: default_find_all_path(),
            update_path: default_update_path(),
            delete_path: default_root_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserServiceConfig {
    #[serde(default = "default_user_url")]
    pub base_url: String,
    /// Prefix for single-user lookups; the username is appended as one segment.
    #[serde(default = "default_root_path")]
    pub find_one_path: String,
    #[serde(default = "default_find_all_path")]
    pub find_all_path: String,
    /// Used for both creation (POST) and update (PUT).
    #[serde(default = "default_root_path")]
    pub add_path: String,
    #[serde(default = "default_root_path")]
    pub delete_path: String,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_user_url(),
            find_one_path: default_root_path(),
            find_all_path: default_find_all_path(),
            add_path: default_root_path(),
            delete_path: default_root_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceServiceConfig {
    #[serde(default = "default_device_url")]
    pub base_url: String,
    #[serde(default = "default_device_user_path")]
    pub add_user_path: String,
    #[serde(default = "default_device_user_path")]
    pub delete_user_path: String,
}

impl Default for DeviceServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_device_url(),
            add_user_path: default_device_user_path(),
            delete_user_path: default_device_user_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { file: default_session_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_auth_url() -> String { "http://127.0.0.1:8081".into() }
fn default_user_url() -> String { "http://127.0.0.1:8082".into() }
fn default_device_url() -> String { "http://127.0.0.1:8083".into() }
fn default_login_path() -> String { "/login".into() }
fn default_register_path() -> String { "/register".into() }
fn default_find_all_path() -> String { "/all".into() }
fn default_update_path() -> String { "/update".into() }
fn default_root_path() -> String { "/".into() }
fn default_device_user_path() -> String { "/user".into() }
fn default_session_file() -> String { ".portal/session.json".into() }
fn default_log_format() -> String { "compact".into() }

/// Load `CONFIG_PATH` (or `portal.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "portal.toml".to_string());
    if std::fs::metadata(&path).is_err() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_overrides(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay `PORTAL_*` variables looked up through `get`.
    pub fn apply_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("PORTAL_AUTH_URL") { self.services.auth.base_url = v; }
        if let Some(v) = get("PORTAL_USER_URL") { self.services.user.base_url = v; }
        if let Some(v) = get("PORTAL_DEVICE_URL") { self.services.device.base_url = v; }
        if let Some(v) = get("PORTAL_SESSION_FILE") { self.session.file = v; }
        if let Some(v) = get("PORTAL_LOG_FORMAT") { self.logging.format = v; }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        let auth = &mut self.services.auth;
        auth.base_url = normalize_base_url("services.auth", &auth.base_url)?;
        for (name, p) in [
            ("services.auth.login_path", &auth.login_path),
            ("services.auth.register_path", &auth.register_path),
            ("services.auth.find_all_path", &auth.find_all_path),
            ("services.auth.update_path", &auth.update_path),
            ("services.auth.delete_path", &auth.delete_path),
        ] {
            validate_path(name, p)?;
        }

        let user = &mut self.services.user;
        user.base_url = normalize_base_url("services.user", &user.base_url)?;
        for (name, p) in [
            ("services.user.find_one_path", &user.find_one_path),
            ("services.user.find_all_path", &user.find_all_path),
            ("services.user.add_path", &user.add_path),
            ("services.user.delete_path", &user.delete_path),
        ] {
            validate_path(name, p)?;
        }

        let device = &mut self.services.device;
        device.base_url = normalize_base_url("services.device", &device.base_url)?;
        validate_path("services.device.add_user_path", &device.add_user_path)?;
        validate_path("services.device.delete_user_path", &device.delete_user_path)?;

        if self.session.file.trim().is_empty() {
            return Err(anyhow!("session.file must not be empty"));
        }
        Ok(())
    }
}

fn normalize_base_url(section: &str, url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let lower = trimmed.to_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(anyhow!("{section}.base_url must start with http:// or https://, got {url:?}"));
    }
    Ok(trimmed.to_string())
}

fn validate_path(name: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(anyhow!("{name} must start with '/', got {path:?}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_document_yields_defaults() {
        let mut cfg = load_from_str("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.services.auth.base_url, "http://127.0.0.1:8081");
        assert_eq!(cfg.services.auth.login_path, "/login");
        assert_eq!(cfg.services.user.find_all_path, "/all");
        assert_eq!(cfg.services.device.add_user_path, "/user");
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn shipped_example_is_valid() {
        let mut cfg = load_from_str(include_str!("../../../portal.toml.example")).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.services.device.base_url, "http://127.0.0.1:8083");
        assert_eq!(cfg.session.file, ".portal/session.json");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let mut cfg = load_from_str(
            r#"
            [services.auth]
            base_url = "https://auth.example.com/api/"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.services.auth.base_url, "https://auth.example.com/api");
        assert_eq!(cfg.services.auth.register_path, "/register");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut cfg = load_from_str(
            r#"
            [services.device]
            base_url = "ftp://devices"
            "#,
        )
        .unwrap();
        let err = cfg.normalize_and_validate().unwrap_err();
        assert!(err.to_string().contains("services.device.base_url"));
    }

    #[test]
    fn relative_path_is_rejected() {
        let mut cfg = load_from_str(
            r#"
            [services.user]
            find_all_path = "all"
            "#,
        )
        .unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            ("PORTAL_USER_URL", "http://users.internal:9000/"),
            ("PORTAL_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.services.user.base_url, "http://users.internal:9000");
        assert_eq!(cfg.services.auth.base_url, "http://127.0.0.1:8081");
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn blank_session_file_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.session.file = "  ".into();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
