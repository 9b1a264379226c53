use serde::Serialize;
use tutora_shared::{DiscountCampaign, PricingCategory};

/// Result of running the discount selector over a USD amount.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountedPrice<'a> {
    pub amount: f64,
    /// Borrowed from the config; `None` when nothing lowered the price.
    pub applied_discount: Option<&'a DiscountCampaign>,
}

/// Full price breakdown for one category as shown to a learner.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub category: PricingCategory,
    pub country_id: Option<String>,
    pub currency: String,
    /// List price from the config
    pub base_usd: f64,
    /// After regional adjustment
    pub effective_usd: f64,
    /// After the best campaign
    pub discounted_usd: f64,
    pub usd_to_local_rate: f64,
    pub local_amount: f64,
    /// Key of the `countryAdjustments` entry that applied, if any
    pub adjustment_key: Option<String>,
    pub applied_discount: Option<DiscountCampaign>,
}

impl PriceQuote {
    /// Local-currency amount the learner would have paid without the campaign.
    pub fn local_amount_before_discount(&self) -> f64 {
        self.effective_usd * self.usd_to_local_rate
    }

    pub fn has_discount(&self) -> bool {
        self.applied_discount.is_some()
    }
}
