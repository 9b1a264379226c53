use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tutora_catalog::{merge_with_defaults, PartialPricingConfig, PricingConfig};
use tutora_offer::{active_campaigns, campaign_status, CampaignStatus};
use tutora_shared::DiscountCampaign;

use crate::error::AppError;
use crate::middleware::AdminClaims;
use crate::pricing::parse_category;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CampaignStatusResponse {
    pub campaign: DiscountCampaign,
    pub status: CampaignStatus,
}

#[derive(Debug, Deserialize)]
pub struct ActiveDiscountsQuery {
    pub category: String,
    pub country: Option<String>,
}

/// Routes here sit behind `admin_auth_middleware`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/pricing", get(get_pricing_config).put(update_pricing_config))
        .route("/v1/admin/pricing/discounts", get(list_discounts))
        .route("/v1/admin/pricing/discounts/active", get(list_active_discounts))
}

// ============================================================================
// Pricing Config Handlers
// ============================================================================

/// GET /v1/admin/pricing
pub async fn get_pricing_config(State(state): State<AppState>) -> Json<PricingConfig> {
    Json(state.pricing.load().await)
}

/// PUT /v1/admin/pricing
/// The body is treated like any stored document: malformed parts fall back to defaults.
pub async fn update_pricing_config(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Json(body): Json<serde_json::Value>,
) -> Json<PricingConfig> {
    let mut config = merge_with_defaults(Some(PartialPricingConfig::from_value(&body)));
    config.updated_by = Some(claims.sub.clone());

    let saved = state.pricing.save(config).await;
    tracing::info!(
        "Pricing config saved by {} ({} discounts, mode {:?})",
        claims.sub,
        saved.discounts.len(),
        saved.price_policy_mode
    );
    Json(saved)
}

// ============================================================================
// Discount Campaign Handlers
// ============================================================================

/// GET /v1/admin/pricing/discounts
pub async fn list_discounts(State(state): State<AppState>) -> Json<Vec<CampaignStatusResponse>> {
    let config = state.pricing.load().await;
    let now = Utc::now();
    let campaigns = config
        .discounts
        .into_iter()
        .map(|campaign| CampaignStatusResponse {
            status: campaign_status(&campaign, now),
            campaign,
        })
        .collect();
    Json(campaigns)
}

/// GET /v1/admin/pricing/discounts/active
/// Campaigns a learner in `country` buying `category` would be offered right now
pub async fn list_active_discounts(
    State(state): State<AppState>,
    Query(query): Query<ActiveDiscountsQuery>,
) -> Result<Json<Vec<DiscountCampaign>>, AppError> {
    let category = parse_category(&query.category)?;
    let config = state.pricing.load().await;
    let active = active_campaigns(&config, category, query.country.as_deref(), Utc::now())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(active))
}
