use chrono::{DateTime, Utc};
use tutora_catalog::PricingConfig;
use tutora_shared::region::{ALL_COUNTRIES, GLOBAL_COUNTRY};
use tutora_shared::{normalize_country_key, DiscountCampaign, DiscountKind, PricingCategory};

use crate::expiry::is_within_window;
use crate::models::DiscountedPrice;

/// A campaign applies when it is enabled, inside its window, and scoped to
/// both the country and the category. A request without a country is
/// matched as `"global"`.
pub fn is_discount_active(
    campaign: &DiscountCampaign,
    country_id: Option<&str>,
    category: PricingCategory,
    now: DateTime<Utc>,
) -> bool {
    if !campaign.enabled || !is_within_window(campaign, now) {
        return false;
    }

    let country = country_id
        .map(normalize_country_key)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| GLOBAL_COUNTRY.to_string());
    let country_match = campaign.country_ids.iter().any(|c| {
        let c = normalize_country_key(c);
        c == ALL_COUNTRIES || c == country
    });
    if !country_match {
        return false;
    }

    campaign.applies_to.iter().any(|scope| scope.matches(category))
}

/// Price after one campaign, never negative.
pub fn apply_discount(usd_amount: f64, campaign: &DiscountCampaign) -> f64 {
    let out = match campaign.kind {
        DiscountKind::Percent => usd_amount * (1.0 - campaign.value / 100.0),
        DiscountKind::FixedUsd => usd_amount - campaign.value,
    };
    out.max(0.0)
}

/// Campaigns that would be considered for this request, in list order.
pub fn active_campaigns<'a>(
    config: &'a PricingConfig,
    category: PricingCategory,
    country_id: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<&'a DiscountCampaign> {
    config
        .discounts
        .iter()
        .filter(|d| is_discount_active(d, country_id, category, now))
        .collect()
}

/// Pick the campaign giving the learner the lowest price at `now`.
///
/// Only a strictly lower price replaces the running best, so on a tie the
/// earlier campaign in the list wins.
pub fn get_discounted_usd_price_at<'a>(
    usd_amount: f64,
    category: PricingCategory,
    config: &'a PricingConfig,
    country_id: Option<&str>,
    now: DateTime<Utc>,
) -> DiscountedPrice<'a> {
    let mut best: Option<&DiscountCampaign> = None;
    let mut lowest = usd_amount;

    for campaign in active_campaigns(config, category, country_id, now) {
        let discounted = apply_discount(usd_amount, campaign);
        if discounted < lowest {
            lowest = discounted;
            best = Some(campaign);
        }
    }

    DiscountedPrice {
        amount: lowest,
        applied_discount: best,
    }
}

pub fn get_discounted_usd_price<'a>(
    usd_amount: f64,
    category: PricingCategory,
    config: &'a PricingConfig,
    country_id: Option<&str>,
) -> DiscountedPrice<'a> {
    get_discounted_usd_price_at(usd_amount, category, config, country_id, Utc::now())
}
