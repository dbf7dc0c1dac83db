#[cfg(test)]
#[path = "users_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::UserRecord;

/// Keeps the one user record this client knows about, as YAML on disk.
pub struct UserStore {
    pub file_path: path::PathBuf,
}

impl Default for UserStore {
    fn default() -> UserStore {
        return UserStore::new(path::PathBuf::from(Config::get(ConfigKey::UserFile)));
    }
}

impl UserStore {
    pub fn new(file_path: path::PathBuf) -> UserStore {
        return UserStore { file_path };
    }

    pub async fn load(&self) -> Result<Option<UserRecord>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        let user: UserRecord = serde_yaml::from_str(&payload)?;

        return Ok(Some(user));
    }

    pub async fn save(&self, user: &UserRecord) -> Result<()> {
        let payload = serde_yaml::to_string(user)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;
        tracing::debug!(user_id = user.id, path = ?self.file_path, "User saved");

        return Ok(());
    }

    pub async fn clear(&self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.file_path).await?;
        return Ok(());
    }
}
