//! Data model for a launch-kit run.
//!
//! Stage payloads mirror the JSON produced by the remote stage service and
//! keep its snake_case field names. The brief keeps the camelCase names the
//! service expects as input.

pub mod analysis;
pub mod brief;
pub mod creative;
pub mod kit;
pub mod plan;
pub mod seo;
pub mod snapshot;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use analysis::{Demographics, MarketAnalysis, MarketingInsights, Persona, Psychographics};
pub use brief::UserBrief;
pub use creative::{
    AdCopy, AdCreativeConcept, ColorDefinition, ColorPalette, ContentGeneration, CreativeDraft,
    EmailTemplate, PlatformImageDescription, ProductDescription, SocialMediaPost,
    VisualIdentityProposal, VisualMuse, Wordsmith,
};
pub use kit::{LaunchKit, UNTITLED_KIT};
pub use plan::{CampaignPlan, LaunchPlanPhase, LaunchStrategy, RecommendedChannel};
pub use seo::{
    CategorizedKeywords, ContentRecommendation, Keyword, KeywordResearch,
    SeoContentRecommendations, SeoOutput, StrategyOutput,
};
pub use snapshot::WorkflowSnapshot;
