use serde::{Deserialize, Serialize};

/// One creative variant produced by the strategy stage.
///
/// In multi-candidate form every post carries several captions, every image
/// set several descriptions, and there are several email templates. After
/// refinement each of those lists holds exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeDraft {
    pub wordsmith: Wordsmith,
    pub muse: VisualMuse,
    /// Creative direction label, e.g. "Bold & Modern".
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wordsmith {
    pub content_generation: ContentGeneration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentGeneration {
    pub product_descriptions: Vec<ProductDescription>,
    pub ad_copy_variations: Vec<AdCopy>,
    pub social_media_posts: Vec<SocialMediaPost>,
    pub email_templates: Vec<EmailTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescription {
    pub description_type: String,
    pub target_persona: String,
    pub word_count_target: String,
    pub copy: String,
    pub seo_keywords_integrated: Vec<String>,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopy {
    pub ad_platform: String,
    pub target_persona: String,
    pub ad_goal: String,
    pub headline_suggestions: Vec<String>,
    pub description_suggestions: Vec<String>,
    pub call_to_action_options: Vec<String>,
    pub seo_keywords_integrated: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaPost {
    pub platform: String,
    pub captions: Vec<String>,
    pub hashtags_suggested: Vec<String>,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub email_type: String,
    pub target_persona: String,
    pub subject_line_suggestions: Vec<String>,
    pub preview_text_suggestion: String,
    pub body_copy: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualMuse {
    pub visual_identity_proposal: VisualIdentityProposal,
    pub visual_inspiration_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualIdentityProposal {
    pub overall_vision: String,
    pub color_palette: ColorPalette,
    pub ad_creative_concepts: Vec<AdCreativeConcept>,
    pub platform_image_descriptions: Vec<PlatformImageDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary_colors: Vec<ColorDefinition>,
    pub secondary_colors: Vec<ColorDefinition>,
    pub accent_colors: Vec<ColorDefinition>,
    pub color_usage_notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDefinition {
    pub name: String,
    pub hex_code: String,
    pub mood_association: String,
    pub usage_context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCreativeConcept {
    pub concept_name: String,
    pub target_persona: String,
    pub visual_description: String,
    pub key_elements: Vec<String>,
    pub mood_and_tone: String,
    pub example_ad_text_alignment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformImageDescription {
    pub platform: String,
    pub image_descriptions: Vec<String>,
}

impl CreativeDraft {
    pub fn social_posts(&self) -> &[SocialMediaPost] {
        &self.wordsmith.content_generation.social_media_posts
    }

    pub fn email_templates(&self) -> &[EmailTemplate] {
        &self.wordsmith.content_generation.email_templates
    }

    pub fn image_sets(&self) -> &[PlatformImageDescription] {
        &self.muse.visual_identity_proposal.platform_image_descriptions
    }

    /// Platform names in post order.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.social_posts().iter().map(|post| post.platform.as_str())
    }

    pub fn post(&self, platform: &str) -> Option<&SocialMediaPost> {
        self.social_posts().iter().find(|post| post.platform == platform)
    }

    /// Image descriptions for `platform`, if the muse produced any.
    pub fn image_set(&self, platform: &str) -> Option<&PlatformImageDescription> {
        self.image_sets().iter().find(|set| set.platform == platform)
    }

    /// First candidate list that is empty, described as `"<slot>"`.
    ///
    /// A freshly generated variant must have at least one candidate in every
    /// list the user picks from.
    pub fn first_empty_candidate_list(&self) -> Option<String> {
        if self.email_templates().is_empty() {
            return Some("email_templates".to_string());
        }
        if let Some(post) = self.social_posts().iter().find(|p| p.captions.is_empty()) {
            return Some(format!("captions for {}", post.platform));
        }
        self.image_sets()
            .iter()
            .find(|set| set.image_descriptions.is_empty())
            .map(|set| format!("image_descriptions for {}", set.platform))
    }

    /// Whether every candidate list the user picks from holds exactly one entry.
    ///
    /// Image sets for platforms without a post are not picked from and are
    /// ignored.
    pub fn is_refined(&self) -> bool {
        self.email_templates().len() == 1
            && self.social_posts().iter().all(|post| {
                post.captions.len() == 1
                    && self
                        .image_set(&post.platform)
                        .is_none_or(|set| set.image_descriptions.len() == 1)
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures;

    #[test]
    fn test_fixture_is_multi_candidate() {
        let draft = fixtures::sample_creative_draft("Bold & Modern");
        assert!(!draft.is_refined());
        assert_eq!(draft.first_empty_candidate_list(), None);
        assert_eq!(
            draft.platforms().collect::<Vec<_>>(),
            vec!["Instagram", "TikTok"]
        );
    }

    #[test]
    fn test_lookup_by_platform() {
        let draft = fixtures::sample_creative_draft("Bold & Modern");
        assert_eq!(draft.post("TikTok").unwrap().captions.len(), 2);
        assert_eq!(draft.image_set("Instagram").unwrap().image_descriptions.len(), 3);
        assert!(draft.post("LinkedIn").is_none());
    }

    #[test]
    fn test_empty_caption_list_is_reported() {
        let mut draft = fixtures::sample_creative_draft("Playful & Engaging");
        draft.wordsmith.content_generation.social_media_posts[1]
            .captions
            .clear();
        assert_eq!(
            draft.first_empty_candidate_list().as_deref(),
            Some("captions for TikTok")
        );
    }

    #[test]
    fn test_singleton_lists_count_as_refined() {
        let mut draft = fixtures::sample_creative_draft("Bold & Modern");
        let content = &mut draft.wordsmith.content_generation;
        content.email_templates.truncate(1);
        for post in &mut content.social_media_posts {
            post.captions.truncate(1);
        }
        for set in &mut draft.muse.visual_identity_proposal.platform_image_descriptions {
            set.image_descriptions.truncate(1);
        }
        assert!(draft.is_refined());
    }
}
