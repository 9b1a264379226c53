use chrono::{DateTime, Utc};
use serde::Serialize;
use tutora_shared::{CampaignBound, DiscountCampaign};

/// Where a campaign sits relative to its activation window.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Disabled,
    Scheduled,
    Running,
    Ended,
    /// A window bound could not be read; the campaign never runs.
    InvalidWindow,
}

/// Both bounds are inclusive; a missing bound is open and an unreadable one
/// is never satisfied.
pub fn is_within_window(campaign: &DiscountCampaign, now: DateTime<Utc>) -> bool {
    let start_ok = campaign
        .starts_at_iso
        .as_ref()
        .map_or(true, |bound| bound.instant().is_some_and(|start| start <= now));
    let end_ok = campaign
        .ends_at_iso
        .as_ref()
        .map_or(true, |bound| bound.instant().is_some_and(|end| end >= now));
    start_ok && end_ok
}

pub fn campaign_status(campaign: &DiscountCampaign, now: DateTime<Utc>) -> CampaignStatus {
    if !campaign.enabled {
        return CampaignStatus::Disabled;
    }
    let bounds = [&campaign.starts_at_iso, &campaign.ends_at_iso];
    if bounds.into_iter().flatten().any(|bound| bound.instant().is_none()) {
        return CampaignStatus::InvalidWindow;
    }
    let start = campaign.starts_at_iso.as_ref().and_then(CampaignBound::instant);
    let end = campaign.ends_at_iso.as_ref().and_then(CampaignBound::instant);
    match (start, end) {
        (_, Some(end)) if end < now => CampaignStatus::Ended,
        (Some(start), _) if start > now => CampaignStatus::Scheduled,
        _ => CampaignStatus::Running,
    }
}
