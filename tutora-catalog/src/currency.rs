use crate::config::PricingConfig;

/// Rate for a currency code; unknown codes price as USD.
pub fn get_usd_to_local_rate(currency_code: &str, config: &PricingConfig) -> f64 {
    config
        .usd_to_local_rates
        .get(&currency_code.trim().to_uppercase())
        .copied()
        .unwrap_or(1.0)
}

/// Convert a resolved USD amount into the local currency. No rounding here;
/// display formatting belongs to the caller.
pub fn convert_usd_to_local_with_config(usd_amount: f64, currency_code: &str, config: &PricingConfig) -> f64 {
    usd_amount * get_usd_to_local_rate(currency_code, config)
}
