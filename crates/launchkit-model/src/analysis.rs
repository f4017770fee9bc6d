use serde::{Deserialize, Serialize};

/// Output of the market analysis stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub target_audience_personas: Vec<Persona>,
    /// Free-form competitor breakdown; its shape varies between runs.
    pub competitor_summary: serde_json::Map<String, serde_json::Value>,
    pub research_sources: Vec<String>,
}

/// A proposed target audience persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub persona_name: String,
    pub demographics: Demographics,
    pub psychographics: Psychographics,
    pub marketing_insights: MarketingInsights,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub age_range: String,
    pub gender_identity: String,
    pub location: String,
    pub income_level: String,
    pub occupation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Psychographics {
    pub interests: Vec<String>,
    pub values: Vec<String>,
    pub pain_points: Vec<String>,
    pub goals: Vec<String>,
    pub online_behavior: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingInsights {
    pub preferred_channels: Vec<String>,
    pub messaging_style: String,
    pub call_to_action_preference: String,
}
