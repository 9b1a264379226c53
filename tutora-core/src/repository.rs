use async_trait::async_trait;
use std::sync::Arc;

use crate::CoreResult;

/// Remote home of the pricing document (a single well-known key).
#[async_trait]
pub trait RemoteConfigStore: Send + Sync {
    /// Returns `None` when the document has never been written.
    async fn get_document(&self) -> CoreResult<Option<serde_json::Value>>;

    /// With `merge` set, nested objects in `document` are merged into the
    /// stored document instead of replacing it.
    async fn set_document(&self, document: &serde_json::Value, merge: bool) -> CoreResult<()>;
}

/// Single string slot holding the last known config on this node.
pub trait LocalConfigCache: Send + Sync {
    fn read(&self) -> CoreResult<Option<String>>;

    fn write(&self, raw: &str) -> CoreResult<()>;
}

#[async_trait]
impl<T: RemoteConfigStore + ?Sized> RemoteConfigStore for Arc<T> {
    async fn get_document(&self) -> CoreResult<Option<serde_json::Value>> {
        (**self).get_document().await
    }

    async fn set_document(&self, document: &serde_json::Value, merge: bool) -> CoreResult<()> {
        (**self).set_document(document, merge).await
    }
}

impl<T: LocalConfigCache + ?Sized> LocalConfigCache for Arc<T> {
    fn read(&self) -> CoreResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, raw: &str) -> CoreResult<()> {
        (**self).write(raw)
    }
}
