use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::UploadKey;

#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    async fn store(
        &self,
        key: &UploadKey,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError>;

    /// Filesystem path the transcoder can read the upload from.
    fn local_path(&self, key: &UploadKey) -> PathBuf;

    async fn delete(&self, key: &UploadKey) -> Result<(), UploadStoreError>;

    /// Deletes every staged upload and returns how many were removed.
    async fn clear(&self) -> Result<usize, UploadStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("upload exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
