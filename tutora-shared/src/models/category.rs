use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sellable items that carry a list price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PricingCategory {
    ChallengeArena,
    VirtualLab,
    FullBundle,
    PremiumStudent,
    PremiumPlus,
    InstitutionStarter,
    InstitutionGrowth,
    InstitutionEnterprise,
}

impl PricingCategory {
    pub const ALL: [PricingCategory; 8] = [
        PricingCategory::ChallengeArena,
        PricingCategory::VirtualLab,
        PricingCategory::FullBundle,
        PricingCategory::PremiumStudent,
        PricingCategory::PremiumPlus,
        PricingCategory::InstitutionStarter,
        PricingCategory::InstitutionGrowth,
        PricingCategory::InstitutionEnterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingCategory::ChallengeArena => "challengeArena",
            PricingCategory::VirtualLab => "virtualLab",
            PricingCategory::FullBundle => "fullBundle",
            PricingCategory::PremiumStudent => "premiumStudent",
            PricingCategory::PremiumPlus => "premiumPlus",
            PricingCategory::InstitutionStarter => "institutionStarter",
            PricingCategory::InstitutionGrowth => "institutionGrowth",
            PricingCategory::InstitutionEnterprise => "institutionEnterprise",
        }
    }
}

impl fmt::Display for PricingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pricing category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for PricingCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricingCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Category matcher used by campaigns. `all` never names a priced item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryScope {
    All,
    Only(PricingCategory),
}

impl CategoryScope {
    pub fn matches(&self, category: PricingCategory) -> bool {
        match self {
            CategoryScope::All => true,
            CategoryScope::Only(c) => *c == category,
        }
    }
}

impl From<PricingCategory> for CategoryScope {
    fn from(category: PricingCategory) -> Self {
        CategoryScope::Only(category)
    }
}

impl FromStr for CategoryScope {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryScope::All);
        }
        s.parse().map(CategoryScope::Only)
    }
}

impl TryFrom<String> for CategoryScope {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryScope> for String {
    fn from(scope: CategoryScope) -> Self {
        match scope {
            CategoryScope::All => "all".to_string(),
            CategoryScope::Only(c) => c.as_str().to_string(),
        }
    }
}
