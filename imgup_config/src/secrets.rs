use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use imgup::SecretStore;

const SECRETS_FILE_NAME: &str = "secrets.json";

/// Secret store backed by a single JSON object file.
///
/// This is the fallback for environments without a platform keychain. The
/// file is created on the first `set` and restricted to the owning user on
/// unix. Every operation re-reads the file, so concurrent processes see
/// each other's writes on their next access.
#[derive(Debug, Clone)]
pub struct FsSecretStore {
    path: PathBuf,
}

impl FsSecretStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.config/imgup/secrets.json`.
    pub fn new_default() -> Result<Self, anyhow::Error> {
        let home = std::env::home_dir().context("Could not determine home directory")?;

        Ok(Self {
            path: home.join(".config").join("imgup").join(SECRETS_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, anyhow::Error> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read secrets file: '{}'", self.path.display())
                });
            }
        };

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse secrets file: '{}'", self.path.display()))
    }

    fn write_all(&self, secrets: &BTreeMap<String, String>) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create secrets directory '{}'", parent.display())
            })?;
        }

        let contents =
            serde_json::to_string_pretty(secrets).context("Failed to serialize secrets")?;
        std::fs::write(&self.path, contents).with_context(|| {
            format!("Failed to write secrets file: '{}'", self.path.display())
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| {
                    format!(
                        "Failed to restrict permissions on '{}'",
                        self.path.display()
                    )
                })?;
        }

        Ok(())
    }

    fn get_sync(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set_sync(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        let mut secrets = self.read_all()?;
        secrets.insert(key.to_string(), value.to_string());
        self.write_all(&secrets)
    }

    fn delete_sync(&self, key: &str) -> Result<(), anyhow::Error> {
        let mut secrets = self.read_all()?;
        if secrets.remove(key).is_some() {
            self.write_all(&secrets)?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SecretStore for FsSecretStore {
    async fn get(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
        #[cfg(feature = "tokio")]
        {
            let store = self.clone();
            let key = key.to_string();
            tokio::task::spawn_blocking(move || store.get_sync(&key))
                .await
                .context("Failed to read secret")?
        }

        #[cfg(not(feature = "tokio"))]
        {
            self.get_sync(key)
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        #[cfg(feature = "tokio")]
        {
            let store = self.clone();
            let key = key.to_string();
            let value = value.to_string();
            tokio::task::spawn_blocking(move || store.set_sync(&key, &value))
                .await
                .context("Failed to store secret")?
        }

        #[cfg(not(feature = "tokio"))]
        {
            self.set_sync(key, value)
        }
    }

    async fn delete(&self, key: &str) -> Result<(), anyhow::Error> {
        #[cfg(feature = "tokio")]
        {
            let store = self.clone();
            let key = key.to_string();
            tokio::task::spawn_blocking(move || store.delete_sync(&key))
                .await
                .context("Failed to delete secret")?
        }

        #[cfg(not(feature = "tokio"))]
        {
            self.delete_sync(key)
        }
    }
}
