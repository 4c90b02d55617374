use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::Session;
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::ServiceError;
use crate::session::store::{token_of, SessionStore, TokenStore};

/// Session persisted as a JSON file between command invocations.
#[derive(Clone)]
pub struct FileSessionStore {
    inner: Arc<RwLock<Option<Session>>>,
    file_path: PathBuf,
}

impl FileSessionStore {
    /// Load the session at `path`; a missing or unreadable file means no session.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        }

        let session = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice::<Session>(&bytes) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!(path = %file_path.display(), error = %e, "ignoring unreadable session file");
                    None
                }
            },
            Err(_) => None,
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(session)), file_path }))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }
}

#[async_trait]
impl TokenStore for FileSessionStore {
    async fn token(&self) -> Option<String> {
        token_of(self.inner.read().await.as_ref())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn session(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    async fn save(&self, session: Session) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(&session).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        *self.inner.write().await = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        *self.inner.write().await = None;
        match fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }
}
