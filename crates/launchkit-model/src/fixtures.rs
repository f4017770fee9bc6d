//! Sample payloads for tests in this and dependent crates.
//!
//! Enabled in dependent crates with the `test-utils` feature.

use std::collections::BTreeMap;

use launchkit_utils::types::Stage;

use crate::analysis::{Demographics, MarketAnalysis, MarketingInsights, Persona, Psychographics};
use crate::brief::UserBrief;
use crate::creative::{
    AdCopy, AdCreativeConcept, ColorDefinition, ColorPalette, ContentGeneration, CreativeDraft,
    EmailTemplate, PlatformImageDescription, ProductDescription, SocialMediaPost,
    VisualIdentityProposal, VisualMuse, Wordsmith,
};
use crate::plan::{CampaignPlan, LaunchPlanPhase, LaunchStrategy, RecommendedChannel};
use crate::seo::{
    CategorizedKeywords, ContentRecommendation, Keyword, KeywordResearch,
    SeoContentRecommendations, SeoOutput, StrategyOutput,
};
use crate::snapshot::WorkflowSnapshot;

pub const CREATIVE_STYLES: [&str; 3] = [
    "Bold & Modern",
    "Professional & Trustworthy",
    "Playful & Engaging",
];

pub const SAMPLE_TOKEN: &str = "thread-7f3a";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub fn sample_brief() -> UserBrief {
    UserBrief {
        product_name: "EcoBottle - Smart Water Bottle".to_string(),
        product_description: "A reusable bottle that tracks hydration and glows to remind you to drink."
            .to_string(),
        usp: "Smart hydration tracking in a bottle made from ocean-bound plastic.".to_string(),
        brand_voice: "Approachable, eco-conscious, innovative.".to_string(),
        target_location: "Urban North America and Western Europe.".to_string(),
        competitors: "HidrateSpark, LARQ".to_string(),
        launch_objective: "First 1,000 sales and 5,000 email subscribers.".to_string(),
        customer_hypothesis: "Health-conscious millennials active on Instagram and TikTok."
            .to_string(),
    }
}

pub fn sample_persona(name: &str) -> Persona {
    Persona {
        persona_name: name.to_string(),
        demographics: Demographics {
            age_range: "25-34".to_string(),
            gender_identity: "Any".to_string(),
            location: "Berlin".to_string(),
            income_level: "Middle".to_string(),
            occupation: "Designer".to_string(),
        },
        psychographics: Psychographics {
            interests: strings(&["yoga", "cycling"]),
            values: strings(&["sustainability"]),
            pain_points: strings(&["forgets to drink"]),
            goals: strings(&["stay hydrated"]),
            online_behavior: "Scrolls Instagram daily".to_string(),
        },
        marketing_insights: MarketingInsights {
            preferred_channels: strings(&["Instagram", "TikTok"]),
            messaging_style: "Warm and direct".to_string(),
            call_to_action_preference: "Shop now".to_string(),
        },
        quote: "Every sip should count.".to_string(),
    }
}

/// Analysis with three personas.
pub fn sample_analysis() -> MarketAnalysis {
    let mut competitor_summary = serde_json::Map::new();
    competitor_summary.insert(
        "HidrateSpark".to_string(),
        serde_json::json!({"strengths": ["app"], "weaknesses": ["price"]}),
    );
    MarketAnalysis {
        target_audience_personas: vec![
            sample_persona("Eco-Conscious Emma"),
            sample_persona("Fitness Felix"),
            sample_persona("Busy Parent Priya"),
        ],
        competitor_summary,
        research_sources: strings(&["https://example.com/hydration-report"]),
    }
}

fn keyword(word: &str) -> Keyword {
    Keyword {
        keyword: word.to_string(),
        search_intent: "informational".to_string(),
        relevance_to_persona: "High".to_string(),
        content_ideas: strings(&["blog post"]),
    }
}

pub fn sample_seo() -> SeoOutput {
    SeoOutput {
        keyword_research: KeywordResearch {
            overview: "Hydration tracking is a growing niche.".to_string(),
            categorized_keywords: CategorizedKeywords {
                informational_keywords: vec![keyword("how much water per day")],
                commercial_investigation_keywords: vec![keyword("best smart water bottle")],
                transactional_keywords: vec![keyword("buy smart bottle")],
                long_tail_keywords: vec![keyword("eco friendly smart water bottle")],
            },
            search_trends_and_opportunities: BTreeMap::from([(
                "rising".to_string(),
                strings(&["recycled plastic bottle"]),
            )]),
        },
        seo_content_recommendations: SeoContentRecommendations {
            general_guidelines: strings(&["Lead with sustainability"]),
            on_page_optimization: vec![ContentRecommendation {
                recommendation: "Use the primary keyword in H1".to_string(),
                target_content_type: "Product page".to_string(),
            }],
            content_refinement_suggestions: Vec::new(),
        },
        research_sources: Vec::new(),
    }
}

fn color(name: &str, hex: &str) -> ColorDefinition {
    ColorDefinition {
        name: name.to_string(),
        hex_code: hex.to_string(),
        mood_association: "calm".to_string(),
        usage_context: "backgrounds".to_string(),
    }
}

fn email(kind: &str) -> EmailTemplate {
    EmailTemplate {
        email_type: kind.to_string(),
        target_persona: "Eco-Conscious Emma".to_string(),
        subject_line_suggestions: strings(&["Meet EcoBottle"]),
        preview_text_suggestion: "Hydration, upgraded.".to_string(),
        body_copy: format!("{kind} body"),
        call_to_action: "Shop now".to_string(),
    }
}

/// A multi-candidate draft.
///
/// Posts: Instagram (3 captions), TikTok (2 captions). Image sets:
/// Instagram (3), TikTok (2) and Pinterest (2, no matching post).
/// Two email templates.
pub fn sample_creative_draft(style: &str) -> CreativeDraft {
    CreativeDraft {
        wordsmith: Wordsmith {
            content_generation: ContentGeneration {
                product_descriptions: vec![ProductDescription {
                    description_type: "Short".to_string(),
                    target_persona: "Eco-Conscious Emma".to_string(),
                    word_count_target: "50".to_string(),
                    copy: format!("{style} copy"),
                    seo_keywords_integrated: strings(&["smart water bottle"]),
                    call_to_action: "Shop now".to_string(),
                }],
                ad_copy_variations: vec![AdCopy {
                    ad_platform: "Instagram".to_string(),
                    target_persona: "Eco-Conscious Emma".to_string(),
                    ad_goal: "Awareness".to_string(),
                    headline_suggestions: strings(&["Drink smarter"]),
                    description_suggestions: strings(&["Glows when you forget"]),
                    call_to_action_options: strings(&["Learn more"]),
                    seo_keywords_integrated: Vec::new(),
                    notes: String::new(),
                }],
                social_media_posts: vec![
                    SocialMediaPost {
                        platform: "Instagram".to_string(),
                        captions: strings(&["IG caption A", "IG caption B", "IG caption C"]),
                        hashtags_suggested: strings(&["#hydrate"]),
                        call_to_action: "Link in bio".to_string(),
                    },
                    SocialMediaPost {
                        platform: "TikTok".to_string(),
                        captions: strings(&["TT caption A", "TT caption B"]),
                        hashtags_suggested: strings(&["#ecotok"]),
                        call_to_action: "Follow for more".to_string(),
                    },
                ],
                email_templates: vec![email("Welcome"), email("Launch Day")],
            },
        },
        muse: VisualMuse {
            visual_identity_proposal: VisualIdentityProposal {
                overall_vision: format!("{style} vision"),
                color_palette: ColorPalette {
                    primary_colors: vec![color("Ocean", "#0077B6")],
                    secondary_colors: vec![color("Sand", "#E9C46A")],
                    accent_colors: vec![color("Coral", "#F4A261")],
                    color_usage_notes: "Ocean dominates.".to_string(),
                },
                ad_creative_concepts: vec![AdCreativeConcept {
                    concept_name: "Glow Reminder".to_string(),
                    target_persona: "Eco-Conscious Emma".to_string(),
                    visual_description: "Bottle glowing on a desk at dusk".to_string(),
                    key_elements: strings(&["bottle", "glow"]),
                    mood_and_tone: "Calm".to_string(),
                    example_ad_text_alignment: "Drink smarter".to_string(),
                }],
                platform_image_descriptions: vec![
                    PlatformImageDescription {
                        platform: "Instagram".to_string(),
                        image_descriptions: strings(&["IG image A", "IG image B", "IG image C"]),
                    },
                    PlatformImageDescription {
                        platform: "TikTok".to_string(),
                        image_descriptions: strings(&["TT image A", "TT image B"]),
                    },
                    PlatformImageDescription {
                        platform: "Pinterest".to_string(),
                        image_descriptions: strings(&["Pin image A", "Pin image B"]),
                    },
                ],
            },
            visual_inspiration_keywords: strings(&["ocean", "minimal"]),
        },
        style: style.to_string(),
    }
}

/// Strategy output with one variant per creative style.
pub fn sample_strategy() -> StrategyOutput {
    StrategyOutput {
        seo: sample_seo(),
        creative_variants: CREATIVE_STYLES
            .iter()
            .map(|style| sample_creative_draft(style))
            .collect(),
    }
}

pub fn sample_plan() -> CampaignPlan {
    CampaignPlan {
        launch_campaign_strategy: LaunchStrategy {
            overall_objective: "Sell 1,000 units in 30 days".to_string(),
            key_metrics_for_success: strings(&["units sold", "email signups"]),
            recommended_channels: vec![RecommendedChannel {
                channel_name: "Instagram".to_string(),
                reasoning: "Where the personas spend time".to_string(),
                primary_role_in_funnel: "Awareness".to_string(),
                estimated_budget_allocation: "40%".to_string(),
                key_actionables: strings(&["Post daily"]),
                expected_kpis: strings(&["Reach"]),
            }],
            high_level_launch_plan_30_days: BTreeMap::from([
                (
                    "Week 1".to_string(),
                    LaunchPlanPhase {
                        focus: "Teasers".to_string(),
                        tasks: strings(&["Countdown posts"]),
                    },
                ),
                (
                    "Week 2".to_string(),
                    LaunchPlanPhase {
                        focus: "Launch".to_string(),
                        tasks: strings(&["Launch email"]),
                    },
                ),
            ]),
            resource_considerations: "One content creator".to_string(),
            next_steps: strings(&["Book photographer"]),
        },
    }
}

/// Snapshot of a run that reached `Complete` with all-zero picks.
pub fn completed_snapshot() -> WorkflowSnapshot {
    let analysis = sample_analysis();
    let strategy = sample_strategy();
    let chosen = strategy.creative_variants[0].clone();
    let mut refined = chosen.clone();
    let content = &mut refined.wordsmith.content_generation;
    content.email_templates.truncate(1);
    for post in &mut content.social_media_posts {
        post.captions.truncate(1);
    }
    for set in &mut refined
        .muse
        .visual_identity_proposal
        .platform_image_descriptions
    {
        if set.platform != "Pinterest" {
            set.image_descriptions.truncate(1);
        }
    }

    WorkflowSnapshot {
        correlation_token: Some(SAMPLE_TOKEN.to_string()),
        stage: Stage::Complete,
        input_brief: Some(sample_brief()),
        selected_persona: Some(analysis.target_audience_personas[0].clone()),
        analysis_output: Some(analysis),
        strategy_output: Some(strategy),
        chosen_creative_variant: Some(chosen),
        refined_creative_variant: Some(refined),
        final_plan_output: Some(sample_plan()),
        is_busy: false,
        status_message: String::new(),
        last_error: None,
    }
}
