pub mod config;
pub mod currency;
pub mod merge;
pub mod partial;
pub mod pricing;

pub use config::{default_pricing_config, CountryAdjustment, PricePolicyMode, PricingConfig};
pub use currency::{convert_usd_to_local_with_config, get_usd_to_local_rate};
pub use merge::merge_with_defaults;
pub use partial::PartialPricingConfig;
pub use pricing::{get_effective_usd_base_price, resolve_adjustment, AdjustmentSource};
