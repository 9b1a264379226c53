use crate::config::PricingConfig;
use crate::partial::PartialPricingConfig;

/// Lay an untrusted partial config over the defaults.
///
/// Scalars from the partial win when present. `baseUsd`, `usdToLocalRates`
/// and `countryAdjustments` merge key by key, keeping default keys the partial
/// does not mention. `discounts` is taken wholesale from the partial when it
/// has a list, with no per-campaign merging.
pub fn merge_with_defaults(partial: Option<PartialPricingConfig>) -> PricingConfig {
    let defaults = PricingConfig::default();
    let Some(partial) = partial else {
        return defaults;
    };

    let mut base_usd = defaults.base_usd;
    base_usd.extend(partial.base_usd.unwrap_or_default());

    let mut usd_to_local_rates = defaults.usd_to_local_rates;
    usd_to_local_rates.extend(
        partial
            .usd_to_local_rates
            .unwrap_or_default()
            .into_iter()
            .map(|(code, rate)| (code.to_uppercase(), rate)),
    );

    let mut country_adjustments = defaults.country_adjustments;
    country_adjustments.extend(partial.country_adjustments.unwrap_or_default());

    PricingConfig {
        base_usd,
        usd_to_local_rates,
        country_adjustments,
        price_policy_mode: partial.price_policy_mode.unwrap_or(defaults.price_policy_mode),
        discounts: partial.discounts.unwrap_or(defaults.discounts),
        updated_at_iso: partial.updated_at_iso.unwrap_or(defaults.updated_at_iso),
        updated_by: partial.updated_by.or(defaults.updated_by),
    }
}

impl PricingConfig {
    /// Decode and merge a stored JSON document.
    pub fn from_stored_value(value: &serde_json::Value) -> Self {
        merge_with_defaults(Some(PartialPricingConfig::from_value(value)))
    }

    /// Decode and merge raw stored text; garbage yields the defaults.
    pub fn from_stored_str(raw: &str) -> Self {
        merge_with_defaults(PartialPricingConfig::from_json_str(raw))
    }
}
