use std::io;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;
use uuid::Uuid;

use sub_music::application::ports::{UploadStore, UploadStoreError};
use sub_music::domain::UploadKey;
use sub_music::infrastructure::storage::LocalUploadStore;

fn create_test_store(max_bytes: u64) -> (tempfile::TempDir, LocalUploadStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalUploadStore::new(dir.path().to_path_buf(), max_bytes).unwrap();
    (dir, store)
}

fn chunks(parts: &[&'static [u8]]) -> futures::stream::BoxStream<'static, Result<Bytes, io::Error>> {
    let parts: Vec<Result<Bytes, io::Error>> = parts
        .iter()
        .map(|part| Ok(Bytes::from_static(part)))
        .collect();
    stream::iter(parts).boxed()
}

#[tokio::test]
async fn given_stream_within_limit_when_storing_then_file_is_readable_by_path() {
    let (_dir, store) = create_test_store(1024);
    let key = UploadKey::new(Uuid::new_v4(), "calm.mp3");

    let written = store.store(&key, chunks(&[b"ID3", b"-audio"])).await.unwrap();

    assert_eq!(written, 9);
    let path = store.local_path(&key);
    assert_eq!(std::fs::read(path).unwrap(), b"ID3-audio");
}

#[tokio::test]
async fn given_stream_over_limit_when_storing_then_returns_too_large_and_leaves_no_file() {
    let (_dir, store) = create_test_store(4);
    let key = UploadKey::new(Uuid::new_v4(), "big.mp3");

    let result = store.store(&key, chunks(&[b"ID3", b"-audio"])).await;

    assert!(matches!(result, Err(UploadStoreError::TooLarge { limit: 4 })));
    assert!(!store.local_path(&key).exists());
}

#[tokio::test]
async fn given_stored_upload_when_deleting_then_file_is_removed() {
    let (_dir, store) = create_test_store(1024);
    let key = UploadKey::new(Uuid::new_v4(), "calm.mp3");
    store.store(&key, chunks(&[b"ID3"])).await.unwrap();

    store.delete(&key).await.unwrap();

    assert!(!store.local_path(&key).exists());
}

#[tokio::test]
async fn given_staged_uploads_when_clearing_then_removes_all_of_them() {
    let (_dir, store) = create_test_store(1024);
    let first = UploadKey::new(Uuid::new_v4(), "calm.mp3");
    let second = UploadKey::new(Uuid::new_v4(), "rain.mp3");
    store.store(&first, chunks(&[b"ID3a"])).await.unwrap();
    store.store(&second, chunks(&[b"ID3b"])).await.unwrap();

    let removed = store.clear().await.unwrap();

    assert_eq!(removed, 2);
    assert!(!store.local_path(&first).exists());
    assert!(!store.local_path(&second).exists());
    assert_eq!(store.clear().await.unwrap(), 0);
}
