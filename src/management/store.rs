use std::{io::ErrorKind, path::PathBuf};

use crate::{Res, config};

pub const CLIENT_ID_KEY: &str = "spotify_client_id";
pub const CODE_VERIFIER_KEY: &str = "code_verifier";

/// Small key/value store for the two values that outlive a session: the
/// client id and the PKCE code verifier of an authorization in flight.
///
/// Each key is a plain file under `<root>/storage/`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStore {
    /// Store under the configured data directory.
    pub fn new() -> Self {
        Self::at(config::data_dir())
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        LocalStore { root: root.into() }
    }

    pub async fn get(&self, key: &str) -> Res<Option<String>> {
        match async_fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn set(&self, key: &str, value: &str) -> Res<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        async_fs::write(path, value).await?;
        Ok(())
    }

    /// Removing a key that was never set is not an error.
    pub async fn remove(&self, key: &str) -> Res<()> {
        match async_fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn client_id(&self) -> Res<Option<String>> {
        Ok(self
            .get(CLIENT_ID_KEY)
            .await?
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty()))
    }

    pub async fn set_client_id(&self, client_id: &str) -> Res<()> {
        self.set(CLIENT_ID_KEY, client_id).await
    }

    pub async fn code_verifier(&self) -> Res<Option<String>> {
        Ok(self
            .get(CODE_VERIFIER_KEY)
            .await?
            .filter(|v| !v.is_empty()))
    }

    pub async fn set_code_verifier(&self, verifier: &str) -> Res<()> {
        self.set(CODE_VERIFIER_KEY, verifier).await
    }

    pub async fn clear_code_verifier(&self) -> Res<()> {
        self.remove(CODE_VERIFIER_KEY).await
    }

    fn path(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.push(format!("storage/{key}", key = key));
        path
    }
}
