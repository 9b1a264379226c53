use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tutora_offer::{PriceQuote, QuoteGenerator};
use tutora_shared::PricingCategory;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub category: String,
    pub country: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub country: Option<String>,
    pub currency: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/pricing/quote", get(get_quote))
        .route("/v1/pricing/catalog", get(get_catalog))
}

pub(crate) fn parse_category(raw: &str) -> Result<PricingCategory, AppError> {
    raw.parse().map_err(|e: tutora_shared::ParseCategoryError| AppError::ValidationError(e.to_string()))
}

fn currency_or_usd(currency: Option<&str>) -> &str {
    currency.filter(|c| !c.trim().is_empty()).unwrap_or("USD")
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/pricing/quote
/// Price one category for a learner's country and currency
pub async fn get_quote(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<PriceQuote>, AppError> {
    let category = parse_category(&query.category)?;
    let config = state.pricing.load().await;

    let quote = QuoteGenerator::new(&config).quote(
        category,
        query.country.as_deref(),
        currency_or_usd(query.currency.as_deref()),
        Utc::now(),
    );
    tracing::debug!(
        "Quoted {} for {:?}: {} {}",
        category,
        quote.country_id,
        quote.local_amount,
        quote.currency
    );
    Ok(Json(quote))
}

/// GET /v1/pricing/catalog
/// Price every category, as rendered on the pricing page
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<PriceQuote>> {
    let config = state.pricing.load().await;
    let quotes = QuoteGenerator::new(&config).quote_catalog(
        query.country.as_deref(),
        currency_or_usd(query.currency.as_deref()),
        Utc::now(),
    );
    Json(quotes)
}
