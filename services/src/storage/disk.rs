//! Local disk storage backed by the OpenDAL `fs` service.

use super::traits::UploadStorage;
use super::types::StorageError;
use bytes::Bytes;
use opendal::Operator;
use std::path::{Path, PathBuf};

/// Permissions for a freshly created upload directory.
#[cfg(unix)]
const UPLOAD_DIR_MODE: u32 = 0o755;

/// Uploads stored as plain files in one local directory.
#[derive(Clone)]
pub struct DiskStorage {
    root: PathBuf,
    operator: Operator,
}

impl DiskStorage {
    /// Opens (and creates, if missing) the upload directory at `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = std::path::absolute(root.as_ref())?;
        create_root(&root)?;

        let builder = opendal::services::Fs::default().root(&root.to_string_lossy());
        let operator = Operator::new(builder)?.finish();

        Ok(Self { root, operator })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn create_root(root: &Path) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(UPLOAD_DIR_MODE);
    }
    builder.create(root)
}

impl UploadStorage for DiskStorage {
    type Error = StorageError;

    async fn ensure_root(&self) -> Result<(), Self::Error> {
        if tokio::fs::try_exists(&self.root).await? {
            return Ok(());
        }

        tracing::info!(root = %self.root.display(), "Creating upload directory");
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || create_root(&root))
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))??;
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool, Self::Error> {
        Ok(self.operator.exists(name).await?)
    }

    async fn persist(&self, name: &str, content: Bytes) -> Result<(), Self::Error> {
        self.operator.write(name, content).await?;
        Ok(())
    }

    async fn is_available(&self) -> bool {
        self.operator.check().await.is_ok()
    }
}
