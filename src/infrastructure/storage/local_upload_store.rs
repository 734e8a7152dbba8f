use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{UploadStore, UploadStoreError};
use crate::domain::UploadKey;

/// Stages uploaded background music on local disk so the transcoder can
/// read it by path. Uploads over `max_bytes` are aborted.
pub struct LocalUploadStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
    max_bytes: u64,
}

impl LocalUploadStore {
    pub fn new(base_path: PathBuf, max_bytes: u64) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&base_path).map_err(UploadStoreError::Io)?;
        let base_path = std::fs::canonicalize(&base_path).map_err(UploadStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
            max_bytes,
        })
    }
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(
        &self,
        key: &UploadKey,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError> {
        let store_path = StorePath::from(key.as_str());
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(UploadStoreError::Io(e));
                }
            };
            total_bytes += bytes.len() as u64;
            if total_bytes > self.max_bytes {
                let _ = upload.abort().await;
                return Err(UploadStoreError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(UploadStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(key = %key, bytes = total_bytes, "Upload staged");
        Ok(total_bytes)
    }

    fn local_path(&self, key: &UploadKey) -> PathBuf {
        self.base_path.join(key.as_str())
    }

    async fn delete(&self, key: &UploadKey) -> Result<(), UploadStoreError> {
        let store_path = StorePath::from(key.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| UploadStoreError::DeleteFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<usize, UploadStoreError> {
        let locations: Vec<StorePath> = self
            .inner
            .list(None)
            .map_ok(|meta| meta.location)
            .try_collect()
            .await
            .map_err(|e| UploadStoreError::DeleteFailed(e.to_string()))?;

        for location in &locations {
            self.inner
                .delete(location)
                .await
                .map_err(|e| UploadStoreError::DeleteFailed(e.to_string()))?;
        }
        Ok(locations.len())
    }
}
