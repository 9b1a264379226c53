use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tutora_shared::{DiscountCampaign, PricingCategory};

/// How country-specific and shared-group adjustments interact.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PricePolicyMode {
    /// Shared-group countries use the group adjustment only.
    StrictShared,
    /// Country adjustment first, then the group adjustment.
    #[default]
    SharedWithExceptions,
    /// Exact country adjustment only, never the group.
    FullyCountrySpecific,
}

impl PricePolicyMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "strict_shared" => Some(Self::StrictShared),
            "shared_with_exceptions" => Some(Self::SharedWithExceptions),
            "fully_country_specific" => Some(Self::FullyCountrySpecific),
            _ => None,
        }
    }
}

/// Regional affordability adjustment for a country or a shared group.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountryAdjustment {
    /// Multiplies the base USD price (e.g. 0.7 for lower purchasing power).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_multiplier: Option<f64>,

    /// Exact USD prices per category; wins over the multiplier.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub override_usd: BTreeMap<PricingCategory, f64>,
}

impl CountryAdjustment {
    pub fn multiplier(value: f64) -> Self {
        Self {
            usd_multiplier: Some(value),
            override_usd: BTreeMap::new(),
        }
    }
}

/// Admin-owned pricing configuration.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// List price in USD per category
    pub base_usd: BTreeMap<PricingCategory, f64>,

    /// Upper-case currency code to USD multiplier
    pub usd_to_local_rates: BTreeMap<String, f64>,

    /// Keyed by lower-case country id or shared-group key ("waec5")
    pub country_adjustments: BTreeMap<String, CountryAdjustment>,

    pub price_policy_mode: PricePolicyMode,

    /// Evaluated in list order
    pub discounts: Vec<DiscountCampaign>,

    pub updated_at_iso: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl PricingConfig {
    /// List price for a category, never negative.
    pub fn base_price(&self, category: PricingCategory) -> f64 {
        self.base_usd.get(&category).copied().unwrap_or(0.0).max(0.0)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_usd: {
                let mut m = BTreeMap::new();
                m.insert(PricingCategory::ChallengeArena, 15.0);
                m.insert(PricingCategory::VirtualLab, 10.0);
                m.insert(PricingCategory::FullBundle, 20.0);
                m.insert(PricingCategory::PremiumStudent, 5.0);
                m.insert(PricingCategory::PremiumPlus, 10.0);
                m.insert(PricingCategory::InstitutionStarter, 150.0);
                m.insert(PricingCategory::InstitutionGrowth, 300.0);
                m.insert(PricingCategory::InstitutionEnterprise, 500.0);
                m
            },
            usd_to_local_rates: {
                let mut m = BTreeMap::new();
                m.insert("USD".to_string(), 1.0);
                m.insert("GHS".to_string(), 15.5);
                m.insert("NGN".to_string(), 1550.0);
                m.insert("SLL".to_string(), 23000.0);
                m.insert("LRD".to_string(), 190.0);
                m.insert("GMD".to_string(), 68.0);
                m
            },
            country_adjustments: BTreeMap::new(),
            price_policy_mode: PricePolicyMode::default(),
            discounts: Vec::new(),
            updated_at_iso: DateTime::<Utc>::UNIX_EPOCH,
            updated_by: None,
        }
    }
}

/// Config used whenever nothing has been stored yet.
pub fn default_pricing_config() -> PricingConfig {
    PricingConfig::default()
}
