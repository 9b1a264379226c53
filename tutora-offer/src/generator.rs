use chrono::{DateTime, Utc};
use tutora_catalog::{convert_usd_to_local_with_config, get_usd_to_local_rate, pricing, PricingConfig};
use tutora_shared::{normalize_country_key, PricingCategory};

use crate::models::PriceQuote;
use crate::rules::get_discounted_usd_price_at;

/// Runs the full price pipeline against one config snapshot:
/// regional adjustment, then the best campaign, then currency conversion.
pub struct QuoteGenerator<'a> {
    config: &'a PricingConfig,
}

impl<'a> QuoteGenerator<'a> {
    pub fn new(config: &'a PricingConfig) -> Self {
        Self { config }
    }

    pub fn quote(
        &self,
        category: PricingCategory,
        country_id: Option<&str>,
        currency: &str,
        now: DateTime<Utc>,
    ) -> PriceQuote {
        let country_id = country_id
            .map(normalize_country_key)
            .filter(|c| !c.is_empty());
        let country = country_id.as_deref();

        let base_usd = self.config.base_price(category);
        let adjustment = country.and_then(|c| pricing::resolve_adjustment(self.config, c));
        let effective_usd = match adjustment {
            Some((_, adj)) => pricing::apply_adjustment(base_usd, category, adj),
            None => base_usd,
        };

        let discounted = get_discounted_usd_price_at(effective_usd, category, self.config, country, now);
        let currency = currency.trim().to_uppercase();

        PriceQuote {
            category,
            usd_to_local_rate: get_usd_to_local_rate(&currency, self.config),
            local_amount: convert_usd_to_local_with_config(discounted.amount, &currency, self.config),
            adjustment_key: adjustment.map(|(source, _)| source.key().to_string()),
            applied_discount: discounted.applied_discount.cloned(),
            country_id,
            currency,
            base_usd,
            effective_usd,
            discounted_usd: discounted.amount,
        }
    }

    /// Quote every category, in catalog order.
    pub fn quote_catalog(&self, country_id: Option<&str>, currency: &str, now: DateTime<Utc>) -> Vec<PriceQuote> {
        PricingCategory::ALL
            .iter()
            .map(|category| self.quote(*category, country_id, currency, now))
            .collect()
    }
}
