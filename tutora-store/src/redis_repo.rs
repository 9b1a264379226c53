use async_trait::async_trait;
use redis::AsyncCommands;
use serde_json::Value;
use tracing::{info, warn};
use tutora_core::{CoreError, CoreResult, RemoteConfigStore};

use crate::document::merge_documents;

/// Holds the pricing document as a JSON string under one key.
#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
    document_key: String,
}

fn backend(e: redis::RedisError) -> CoreError {
    CoreError::Backend(e.to_string())
}

/// Document to merge into; an unreadable one is replaced outright.
fn merge_base(key: &str, read: CoreResult<Option<Value>>) -> Option<Value> {
    match read {
        Ok(existing) => existing,
        Err(e) => {
            warn!("Could not read {} before merge, replacing it: {}", key, e);
            None
        }
    }
}

impl RedisClient {
    pub async fn new(connection_string: &str, document_key: impl Into<String>) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self {
            client,
            document_key: document_key.into(),
        })
    }

    async fn read_raw(&self, conn: &mut redis::aio::MultiplexedConnection) -> CoreResult<Option<Value>> {
        let raw = conn
            .get::<_, Option<String>>(&self.document_key)
            .await
            .map_err(backend)?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RemoteConfigStore for RedisClient {
    async fn get_document(&self) -> CoreResult<Option<Value>> {
        let mut conn = self.client.get_multiplexed_async_connection().await.map_err(backend)?;
        self.read_raw(&mut conn).await
    }

    async fn set_document(&self, document: &Value, merge: bool) -> CoreResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await.map_err(backend)?;

        // Read-modify-write without WATCH: concurrent admin saves race and the
        // last one wins.
        let existing = if merge {
            merge_base(&self.document_key, self.read_raw(&mut conn).await)
        } else {
            None
        };
        let merged = match existing {
            Some(mut existing) => {
                merge_documents(&mut existing, document);
                existing
            }
            None => document.clone(),
        };

        let payload = serde_json::to_string(&merged)?;
        conn.set::<_, _, ()>(&self.document_key, payload).await.map_err(backend)?;
        info!("Pricing document written to {}", self.document_key);
        Ok(())
    }
}
