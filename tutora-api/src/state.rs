use tutora_shared::Masked;
use tutora_store::PricingConfigRepository;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: Masked<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub pricing: PricingConfigRepository,
    pub auth: AuthConfig,
}
