use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::creative::CreativeDraft;

/// Result of the strategy stage: SEO research plus the creative variants
/// generated from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyOutput {
    pub seo: SeoOutput,
    pub creative_variants: Vec<CreativeDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoOutput {
    pub keyword_research: KeywordResearch,
    pub seo_content_recommendations: SeoContentRecommendations,
    pub research_sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResearch {
    pub overview: String,
    pub categorized_keywords: CategorizedKeywords,
    pub search_trends_and_opportunities: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedKeywords {
    pub informational_keywords: Vec<Keyword>,
    pub commercial_investigation_keywords: Vec<Keyword>,
    pub transactional_keywords: Vec<Keyword>,
    pub long_tail_keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    pub search_intent: String,
    pub relevance_to_persona: String,
    pub content_ideas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoContentRecommendations {
    pub general_guidelines: Vec<String>,
    pub on_page_optimization: Vec<ContentRecommendation>,
    pub content_refinement_suggestions: Vec<ContentRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecommendation {
    pub recommendation: String,
    pub target_content_type: String,
}

impl CategorizedKeywords {
    /// All keywords across the four intent buckets.
    pub fn all(&self) -> impl Iterator<Item = &Keyword> {
        self.informational_keywords
            .iter()
            .chain(&self.commercial_investigation_keywords)
            .chain(&self.transactional_keywords)
            .chain(&self.long_tail_keywords)
    }
}
