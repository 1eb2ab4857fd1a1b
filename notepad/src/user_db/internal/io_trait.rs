use std::io::ErrorKind;
use std::path::PathBuf;
use async_trait::async_trait;
use log::error;
use tokio::{fs, io};
use crate::rng::make_uuid;
use crate::util::tmp_path_for;

#[async_trait]
pub(super) trait UserDbIo: Send + Sync {
    /// `None` if there is no users file yet.
    async fn read_users(&self) -> io::Result<Option<String>>;

    /// Replaces the users file atomically.
    async fn write_users(&self, data: String) -> io::Result<()>;
}

pub struct ProductionUserDbIo {
    path: PathBuf,
}

impl ProductionUserDbIo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProductionUserDbIo {
            path: path.into(),
        }
    }
}

#[async_trait]
impl UserDbIo for ProductionUserDbIo {
    async fn read_users(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn write_users(&self, data: String) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let tmp_path = tmp_path_for(&self.path, make_uuid(&mut rand::rng()));
        let result = match fs::write(&tmp_path, data).await {
            Ok(()) => fs::rename(&tmp_path, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            error!(
                "failed to replace the users file \"{}\": {e}",
                self.path.display(),
            );
            if let Err(e) = fs::remove_file(&tmp_path).await {
                error!(
                    "failed to remove tmp file \"{}\": {e}",
                    tmp_path.display(),
                );
            }
            return Err(e);
        }
        Ok(())
    }
}
