/// Key under which the shared group's adjustment lives in `countryAdjustments`.
pub const SHARED_GROUP_KEY: &str = "waec5";

/// Countries priced together as one region.
pub const WAEC5_COUNTRY_IDS: [&str; 5] = ["ghana", "nigeria", "sierra-leone", "liberia", "gambia"];

/// Campaign country entry matching every country.
pub const ALL_COUNTRIES: &str = "all";

/// Campaign country entry matching requests that carry no country.
pub const GLOBAL_COUNTRY: &str = "global";

/// Country keys are compared lower-case everywhere.
pub fn normalize_country_key(country_id: &str) -> String {
    country_id.trim().to_lowercase()
}

pub fn is_shared_group_country(country_id: &str) -> bool {
    let key = normalize_country_key(country_id);
    WAEC5_COUNTRY_IDS.contains(&key.as_str())
}
