use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;
use tutora_shared::{
    normalize_country_key, CampaignBound, CategoryScope, DiscountCampaign, DiscountKind, PricingCategory,
};

use crate::config::{CountryAdjustment, PricePolicyMode, PricingConfig};

/// A stored or submitted pricing document with every field optional.
///
/// Anything read back from storage is untrusted: it may be partial, written by
/// an older schema, or hand-edited. Decoding keeps whatever is well-formed and
/// drops the rest; [`crate::merge_with_defaults`] then fills the gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialPricingConfig {
    pub base_usd: Option<BTreeMap<PricingCategory, f64>>,
    pub usd_to_local_rates: Option<BTreeMap<String, f64>>,
    pub country_adjustments: Option<BTreeMap<String, CountryAdjustment>>,
    pub price_policy_mode: Option<PricePolicyMode>,
    pub discounts: Option<Vec<DiscountCampaign>>,
    pub updated_at_iso: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl PartialPricingConfig {
    /// Decode raw JSON text. `None` when the text is not JSON at all.
    pub fn from_json_str(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Some(Self::from_value(&value)),
            Err(e) => {
                debug!("Discarding unparseable pricing document: {}", e);
                None
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            debug!("Pricing document is not an object, ignoring it");
            return Self::default();
        };

        Self {
            base_usd: obj.get("baseUsd").and_then(Value::as_object).map(decode_base_usd),
            usd_to_local_rates: obj.get("usdToLocalRates").and_then(Value::as_object).map(decode_rates),
            country_adjustments: obj
                .get("countryAdjustments")
                .and_then(Value::as_object)
                .map(decode_adjustments),
            price_policy_mode: obj
                .get("pricePolicyMode")
                .and_then(Value::as_str)
                .and_then(PricePolicyMode::parse),
            discounts: obj.get("discounts").and_then(Value::as_array).map(|items| {
                items.iter().filter_map(decode_campaign).collect()
            }),
            updated_at_iso: obj
                .get("updatedAtIso")
                .and_then(Value::as_str)
                .and_then(parse_instant),
            updated_by: obj.get("updatedBy").and_then(Value::as_str).map(str::to_string),
        }
    }
}

impl From<PricingConfig> for PartialPricingConfig {
    fn from(config: PricingConfig) -> Self {
        Self {
            base_usd: Some(config.base_usd),
            usd_to_local_rates: Some(config.usd_to_local_rates),
            country_adjustments: Some(config.country_adjustments),
            price_policy_mode: Some(config.price_policy_mode),
            discounts: Some(config.discounts),
            updated_at_iso: Some(config.updated_at_iso),
            updated_by: config.updated_by,
        }
    }
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

fn decode_base_usd(obj: &Map<String, Value>) -> BTreeMap<PricingCategory, f64> {
    let mut out = BTreeMap::new();
    for (key, value) in obj {
        match (key.parse::<PricingCategory>(), finite(value)) {
            (Ok(category), Some(price)) => {
                out.insert(category, price);
            }
            _ => debug!("Dropping base price entry {}={}", key, value),
        }
    }
    out
}

fn decode_rates(obj: &Map<String, Value>) -> BTreeMap<String, f64> {
    let mut out = BTreeMap::new();
    for (code, value) in obj {
        match finite(value) {
            Some(rate) => {
                out.insert(code.to_uppercase(), rate);
            }
            None => debug!("Dropping exchange rate {}={}", code, value),
        }
    }
    out
}

fn decode_adjustments(obj: &Map<String, Value>) -> BTreeMap<String, CountryAdjustment> {
    let mut out = BTreeMap::new();
    for (key, value) in obj {
        let Some(record) = value.as_object() else {
            debug!("Dropping country adjustment {}: not an object", key);
            continue;
        };
        let adjustment = CountryAdjustment {
            usd_multiplier: record.get("usdMultiplier").and_then(finite),
            override_usd: record
                .get("overrideUsd")
                .and_then(Value::as_object)
                .map(decode_base_usd)
                .unwrap_or_default(),
        };
        out.insert(normalize_country_key(key), adjustment);
    }
    out
}

fn decode_bound(obj: &Map<String, Value>, field: &str) -> Option<CampaignBound> {
    let raw = match obj.get(field)? {
        Value::Null => return None,
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match parse_instant(&raw) {
        Some(at) => Some(CampaignBound::At(at)),
        None => {
            debug!("Keeping unreadable {} {:?}; the campaign stays inactive", field, raw);
            Some(CampaignBound::Unreadable(raw))
        }
    }
}

fn decode_campaign(value: &Value) -> Option<DiscountCampaign> {
    let obj = value.as_object()?;
    let id = obj.get("id").and_then(Value::as_str).unwrap_or_default().to_string();

    let kind = match obj.get("type").and_then(Value::as_str) {
        Some("percent") => DiscountKind::Percent,
        Some("fixedUsd") => DiscountKind::FixedUsd,
        other => {
            debug!("Dropping campaign {:?}: unknown type {:?}", id, other);
            return None;
        }
    };
    let Some(discount_value) = obj.get("value").and_then(finite) else {
        debug!("Dropping campaign {:?}: value is not a number", id);
        return None;
    };
    let starts_at_iso = decode_bound(obj, "startsAtIso");
    let ends_at_iso = decode_bound(obj, "endsAtIso");

    let country_ids = obj
        .get("countryIds")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).map(normalize_country_key).collect())
        .unwrap_or_default();
    let applies_to = obj
        .get("appliesTo")
        .and_then(Value::as_array)
        .map(|scopes| {
            scopes
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|s| s.parse::<CategoryScope>().ok())
                .collect()
        })
        .unwrap_or_default();

    Some(DiscountCampaign {
        name: obj.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
        id,
        enabled: obj.get("enabled").and_then(Value::as_bool).unwrap_or(false),
        kind,
        value: discount_value,
        starts_at_iso,
        ends_at_iso,
        country_ids,
        applies_to,
    })
}

/// Accepts RFC 3339, ISO 8601 basic offsets (`+0000`), `datetime-local` style
/// input (read as UTC) and bare dates.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
