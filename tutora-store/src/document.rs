use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tutora_core::{CoreResult, RemoteConfigStore};

/// Merge `patch` into `target` the way document stores treat a merge-write:
/// nested objects are merged field by field, everything else (arrays
/// included) is replaced.
pub fn merge_documents(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                if value.is_object() {
                    if let Some(existing) = target.get_mut(key).filter(|e| e.is_object()) {
                        merge_documents(existing, value);
                        continue;
                    }
                }
                target.insert(key.clone(), value.clone());
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

/// Process-local stand-in for the remote document, for tests and
/// single-node development.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    document: RwLock<Option<Value>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Value) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }

    pub fn snapshot(&self) -> Option<Value> {
        self.document.read().clone()
    }
}

#[async_trait]
impl RemoteConfigStore for InMemoryDocumentStore {
    async fn get_document(&self) -> CoreResult<Option<Value>> {
        Ok(self.document.read().clone())
    }

    async fn set_document(&self, document: &Value, merge: bool) -> CoreResult<()> {
        let mut slot = self.document.write();
        match slot.as_mut() {
            Some(existing) if merge => merge_documents(existing, document),
            _ => *slot = Some(document.clone()),
        }
        Ok(())
    }
}
