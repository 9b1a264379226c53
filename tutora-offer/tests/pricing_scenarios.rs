use chrono::{Duration, Utc};
use tutora_catalog::{
    convert_usd_to_local_with_config, default_pricing_config, get_effective_usd_base_price, CountryAdjustment,
    PricePolicyMode, PricingConfig,
};
use tutora_offer::{get_discounted_usd_price, get_discounted_usd_price_at};
use tutora_shared::{DiscountCampaign, DiscountKind, PricingCategory, SHARED_GROUP_KEY};

fn ghana_config() -> PricingConfig {
    let mut config = default_pricing_config();
    config.price_policy_mode = PricePolicyMode::SharedWithExceptions;
    config
        .country_adjustments
        .insert("ghana".to_string(), CountryAdjustment::multiplier(0.7));
    config
}

fn term_start_campaign() -> DiscountCampaign {
    let mut campaign = DiscountCampaign::new("term-start", "Term start", DiscountKind::Percent, 20.0);
    campaign.starts_at_iso = Some((Utc::now() - Duration::days(1)).into());
    campaign.ends_at_iso = Some((Utc::now() + Duration::days(1)).into());
    campaign.applies_to = vec![PricingCategory::PremiumStudent.into()];
    campaign
}

#[test]
fn test_plain_price_without_country() {
    let config = default_pricing_config();
    let base = config.base_price(PricingCategory::PremiumStudent);

    let effective = get_effective_usd_base_price(base, PricingCategory::PremiumStudent, &config, None);
    let discounted = get_discounted_usd_price(effective, PricingCategory::PremiumStudent, &config, None);
    let local = convert_usd_to_local_with_config(discounted.amount, "GHS", &config);

    assert_eq!(effective, 5.0);
    assert_eq!(discounted.amount, 5.0);
    assert_eq!(local, 77.5);
}

#[test]
fn test_country_multiplier_then_campaign() {
    let mut config = ghana_config();
    let effective = get_effective_usd_base_price(5.0, PricingCategory::PremiumStudent, &config, Some("ghana"));
    assert!((effective - 3.5).abs() < 1e-9);

    config.discounts.push(term_start_campaign());
    let discounted = get_discounted_usd_price(effective, PricingCategory::PremiumStudent, &config, Some("ghana"));
    assert!((discounted.amount - 2.8).abs() < 1e-9);
    assert_eq!(discounted.applied_discount.unwrap().id, "term-start");
}

#[test]
fn test_ended_campaign_is_ignored() {
    let mut config = ghana_config();
    let mut ended = term_start_campaign();
    ended.starts_at_iso = None;
    ended.ends_at_iso = Some((Utc::now() - Duration::hours(2)).into());
    config.discounts.push(ended);

    let discounted = get_discounted_usd_price_at(3.5, PricingCategory::PremiumStudent, &config, Some("ghana"), Utc::now());
    assert_eq!(discounted.amount, 3.5);
    assert!(discounted.applied_discount.is_none());
}

#[test]
fn test_policy_modes_are_exclusive() {
    let mut config = ghana_config();
    config
        .country_adjustments
        .insert(SHARED_GROUP_KEY.to_string(), CountryAdjustment::multiplier(0.5));

    config.price_policy_mode = PricePolicyMode::StrictShared;
    let strict = get_effective_usd_base_price(10.0, PricingCategory::FullBundle, &config, Some("ghana"));
    let mut shared_only = config.clone();
    shared_only.country_adjustments.remove("ghana");
    assert_eq!(
        strict,
        get_effective_usd_base_price(10.0, PricingCategory::FullBundle, &shared_only, Some("ghana"))
    );

    config.price_policy_mode = PricePolicyMode::FullyCountrySpecific;
    let specific = get_effective_usd_base_price(10.0, PricingCategory::FullBundle, &config, Some("ghana"));
    let mut country_only = config.clone();
    country_only.country_adjustments.remove(SHARED_GROUP_KEY);
    assert_eq!(
        specific,
        get_effective_usd_base_price(10.0, PricingCategory::FullBundle, &country_only, Some("ghana"))
    );
    assert_ne!(strict, specific);
}

#[test]
fn test_unknown_currency_keeps_usd_amount() {
    assert_eq!(convert_usd_to_local_with_config(100.0, "XYZ", &default_pricing_config()), 100.0);
}
