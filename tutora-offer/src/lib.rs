pub mod expiry;
pub mod generator;
pub mod models;
pub mod rules;

pub use expiry::{campaign_status, is_within_window, CampaignStatus};
pub use generator::QuoteGenerator;
pub use models::{DiscountedPrice, PriceQuote};
pub use rules::{active_campaigns, apply_discount, get_discounted_usd_price, get_discounted_usd_price_at, is_discount_active};
