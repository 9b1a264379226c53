use chrono::{DateTime, Utc};
use serde::Serialize;

use super::category::CategoryScope;

/// How a campaign's `value` is applied.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DiscountKind {
    /// `value` is a 0-100 percentage off.
    #[serde(rename = "percent")]
    Percent,
    /// `value` is subtracted from the USD price.
    #[serde(rename = "fixedUsd")]
    FixedUsd,
}

/// One end of a campaign's activation window.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CampaignBound {
    At(DateTime<Utc>),
    /// Stored text that is not a recognisable instant. Written back verbatim
    /// and never satisfied, so the campaign stays inactive until fixed.
    Unreadable(String),
}

impl CampaignBound {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            CampaignBound::At(at) => Some(*at),
            CampaignBound::Unreadable(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for CampaignBound {
    fn from(at: DateTime<Utc>) -> Self {
        CampaignBound::At(at)
    }
}

/// Time-boxed promotional discount scoped to countries and categories.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCampaign {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
    /// Inclusive lower bound; `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at_iso: Option<CampaignBound>,
    /// Inclusive upper bound; `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at_iso: Option<CampaignBound>,
    /// Country keys, or `"all"`, or `"global"` for country-less requests.
    pub country_ids: Vec<String>,
    pub applies_to: Vec<CategoryScope>,
}

impl DiscountCampaign {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: DiscountKind, value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            kind,
            value,
            starts_at_iso: None,
            ends_at_iso: None,
            country_ids: vec!["all".to_string()],
            applies_to: vec![CategoryScope::All],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::PricingCategory;
    use chrono::TimeZone;

    #[test]
    fn test_campaign_wire_shape() {
        let mut campaign = DiscountCampaign::new("c1", "Back to school", DiscountKind::Percent, 20.0);
        campaign.applies_to = vec![PricingCategory::PremiumStudent.into()];

        let json = serde_json::to_value(&campaign).unwrap();
        assert_eq!(json["type"], "percent");
        assert_eq!(json["appliesTo"], serde_json::json!(["premiumStudent"]));
        assert_eq!(json["countryIds"], serde_json::json!(["all"]));
        assert!(json.get("startsAtIso").is_none());
    }

    #[test]
    fn test_unreadable_bound_is_written_back_verbatim() {
        let mut campaign = DiscountCampaign::new("c2", "Typo", DiscountKind::FixedUsd, 1.0);
        campaign.starts_at_iso = Some(CampaignBound::Unreadable("next monday".to_string()));
        campaign.ends_at_iso = Some(Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap().into());

        let json = serde_json::to_value(&campaign).unwrap();
        assert_eq!(json["startsAtIso"], "next monday");
        assert_eq!(json["endsAtIso"], "2026-09-01T00:00:00Z");
        assert!(campaign.starts_at_iso.unwrap().instant().is_none());
    }
}
