//! Durable client-side key/value storage for device ids and the last
//! identity used.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::DeviceKind;

/// Key holding the identity last submitted in the room form
pub const USER_NAME_KEY: &str = "userName";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;

    async fn device_id(&self, kind: DeviceKind) -> Result<Option<String>> {
        self.get(kind.storage_key()).await
    }

    async fn set_device_id(&self, kind: DeviceKind, device_id: &str) -> Result<()> {
        self.set(kind.storage_key(), device_id).await
    }

    async fn clear_device_ids(&self) -> Result<()> {
        self.remove(DeviceKind::Audio.storage_key()).await?;
        self.remove(DeviceKind::Video.storage_key()).await
    }
}
