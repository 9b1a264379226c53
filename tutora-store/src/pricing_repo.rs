use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use tutora_catalog::{default_pricing_config, merge_with_defaults, PartialPricingConfig, PricingConfig};
use tutora_core::{CoreResult, LocalConfigCache, RemoteConfigStore};

async fn fetch_remote(remote: &dyn RemoteConfigStore) -> CoreResult<Option<PricingConfig>> {
    // A document that is not an object carries nothing to merge.
    let document = remote.get_document().await?.filter(|doc| {
        let usable = doc.is_object();
        if !usable {
            warn!("Remote pricing document is not an object, ignoring it");
        }
        usable
    });
    Ok(document.map(|doc| PricingConfig::from_stored_value(&doc)))
}

fn read_local(cache: &dyn LocalConfigCache) -> CoreResult<Option<PricingConfig>> {
    let Some(raw) = cache.read()? else {
        return Ok(None);
    };
    // An unreadable cache entry counts as no entry.
    Ok(PartialPricingConfig::from_json_str(&raw).map(|partial| merge_with_defaults(Some(partial))))
}

fn write_local(cache: &dyn LocalConfigCache, config: &PricingConfig) -> CoreResult<()> {
    let raw = serde_json::to_string(config)?;
    cache.write(&raw)
}

/// Current pricing config; never fails.
///
/// Reads go remote document, then local cache, then built-in defaults. Storage
/// errors are logged and the next tier is used.
pub async fn load_admin_pricing_config(
    remote: Option<&dyn RemoteConfigStore>,
    cache: &dyn LocalConfigCache,
) -> PricingConfig {
    if let Some(remote) = remote {
        match fetch_remote(remote).await {
            Ok(Some(merged)) => {
                if let Err(e) = write_local(cache, &merged) {
                    warn!("Could not refresh local pricing cache: {}", e);
                }
                return merged;
            }
            Ok(None) => debug!("No remote pricing document, trying local cache"),
            Err(e) => warn!("Remote pricing document unavailable, using local cache: {}", e),
        }
    }

    match read_local(cache) {
        Ok(Some(local)) => local,
        Ok(None) => {
            debug!("No cached pricing config, using defaults");
            default_pricing_config()
        }
        Err(e) => {
            warn!("Local pricing cache unreadable, using defaults: {}", e);
            default_pricing_config()
        }
    }
}

/// Stamp and persist an admin edit. Returns the config as written.
///
/// The local cache is written first, then the remote document best effort.
pub async fn save_admin_pricing_config(
    config: PricingConfig,
    remote: Option<&dyn RemoteConfigStore>,
    cache: &dyn LocalConfigCache,
) -> PricingConfig {
    let normalized = PricingConfig {
        updated_at_iso: Utc::now(),
        ..config
    };

    if let Err(e) = write_local(cache, &normalized) {
        warn!("Failed to write local pricing cache: {}", e);
    }

    if let Some(remote) = remote {
        let pushed = match serde_json::to_value(&normalized) {
            Ok(document) => remote.set_document(&document, true).await,
            Err(e) => Err(e.into()),
        };
        // The local copy stays authoritative for this node until the remote write succeeds.
        if let Err(e) = pushed {
            warn!("Remote pricing save failed, kept local copy: {}", e);
        }
    }

    normalized
}

/// Storage handles for the pricing config, shared across request handlers.
#[derive(Clone)]
pub struct PricingConfigRepository {
    remote: Option<Arc<dyn RemoteConfigStore>>,
    cache: Arc<dyn LocalConfigCache>,
}

impl PricingConfigRepository {
    pub fn new(remote: Option<Arc<dyn RemoteConfigStore>>, cache: Arc<dyn LocalConfigCache>) -> Self {
        Self { remote, cache }
    }

    pub async fn load(&self) -> PricingConfig {
        load_admin_pricing_config(self.remote.as_deref(), self.cache.as_ref()).await
    }

    pub async fn save(&self, config: PricingConfig) -> PricingConfig {
        save_admin_pricing_config(config, self.remote.as_deref(), self.cache.as_ref()).await
    }
}
