pub mod models;
pub mod pii;
pub mod region;

pub use models::campaign::{CampaignBound, DiscountCampaign, DiscountKind};
pub use models::category::{CategoryScope, ParseCategoryError, PricingCategory};
pub use pii::Masked;
pub use region::{is_shared_group_country, normalize_country_key, SHARED_GROUP_KEY, WAEC5_COUNTRY_IDS};
