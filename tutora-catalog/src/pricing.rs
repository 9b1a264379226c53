use tutora_shared::{is_shared_group_country, normalize_country_key, PricingCategory, SHARED_GROUP_KEY};

use crate::config::{CountryAdjustment, PricePolicyMode, PricingConfig};

/// Which `countryAdjustments` entry priced a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentSource<'a> {
    Country(&'a str),
    SharedGroup,
}

impl AdjustmentSource<'_> {
    pub fn key(&self) -> &str {
        match self {
            AdjustmentSource::Country(key) => key,
            AdjustmentSource::SharedGroup => SHARED_GROUP_KEY,
        }
    }
}

/// Pick the adjustment that applies to `country_id` under the config's policy mode.
pub fn resolve_adjustment<'a>(
    config: &'a PricingConfig,
    country_id: &str,
) -> Option<(AdjustmentSource<'a>, &'a CountryAdjustment)> {
    let key = normalize_country_key(country_id);
    let in_group = is_shared_group_country(&key);

    let country = config
        .country_adjustments
        .get_key_value(key.as_str())
        .map(|(k, adj)| (AdjustmentSource::Country(k.as_str()), adj));
    let shared = || {
        config
            .country_adjustments
            .get(SHARED_GROUP_KEY)
            .map(|adj| (AdjustmentSource::SharedGroup, adj))
    };

    match config.price_policy_mode {
        PricePolicyMode::StrictShared => {
            if in_group {
                shared()
            } else {
                country
            }
        }
        PricePolicyMode::FullyCountrySpecific => country,
        PricePolicyMode::SharedWithExceptions => country.or_else(|| if in_group { shared() } else { None }),
    }
}

/// Apply one adjustment to a base USD price.
pub fn apply_adjustment(base_amount: f64, category: PricingCategory, adjustment: &CountryAdjustment) -> f64 {
    if let Some(price) = adjustment.override_usd.get(&category).filter(|p| p.is_finite()) {
        return price.max(0.0);
    }
    let multiplier = adjustment.usd_multiplier.filter(|m| m.is_finite()).unwrap_or(1.0);
    (base_amount * multiplier).max(0.0)
}

/// USD price after regional adjustment, before discounts.
///
/// Without a country the base amount is returned untouched, as it is when no
/// adjustment applies to the country.
pub fn get_effective_usd_base_price(
    base_amount: f64,
    category: PricingCategory,
    config: &PricingConfig,
    country_id: Option<&str>,
) -> f64 {
    let Some(country_id) = country_id.filter(|c| !c.trim().is_empty()) else {
        return base_amount;
    };
    match resolve_adjustment(config, country_id) {
        Some((_, adjustment)) => apply_adjustment(base_amount, category, adjustment),
        None => base_amount,
    }
}
