//! Storage for environments without a persistence medium.

use async_trait::async_trait;
use super::{Result, Storage, StorageError};

/// A backend that has nowhere to put data. Every call reports
/// [`StorageError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

fn unavailable() -> StorageError {
    StorageError::Unavailable("no persistence medium".to_string())
}

#[async_trait]
impl Storage for UnavailableStorage {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(unavailable())
    }

    async fn set(&mut self, _key: &str, _value: &[u8]) -> Result<()> {
        Err(unavailable())
    }

    async fn remove(&mut self, _key: &str) -> Result<()> {
        Err(unavailable())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Err(unavailable())
    }
}
