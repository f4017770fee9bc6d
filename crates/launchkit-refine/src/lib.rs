//! Refinement merge engine.
//!
//! A chosen creative variant carries several candidates per slot: captions
//! per social platform, image descriptions per platform, and email
//! templates. [`refine`] produces a copy of the variant in which each of those
//! lists holds only the candidate the user picked. Every other field is
//! carried over unchanged, and the input is never modified.

use std::collections::BTreeMap;

use launchkit_model::CreativeDraft;
use launchkit_utils::error::ValidationError;
use serde::{Deserialize, Serialize};

/// The user's choice for one social platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformPick {
    pub caption_index: usize,
    /// Ignored for platforms that have no image descriptions.
    pub image_index: usize,
}

/// One pick per platform plus one email template pick.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefinementPicks {
    pub platforms: BTreeMap<String, PlatformPick>,
    pub email_index: Option<usize>,
}

impl RefinementPicks {
    /// Picks selecting the first candidate everywhere in `draft`.
    pub fn first_of_each(draft: &CreativeDraft) -> Self {
        Self {
            platforms: draft
                .platforms()
                .map(|platform| (platform.to_string(), PlatformPick::default()))
                .collect(),
            email_index: Some(0),
        }
    }

    pub fn with_platform(mut self, platform: &str, caption_index: usize, image_index: usize) -> Self {
        self.platforms.insert(
            platform.to_string(),
            PlatformPick {
                caption_index,
                image_index,
            },
        );
        self
    }

    pub fn with_email(mut self, email_index: usize) -> Self {
        self.email_index = Some(email_index);
        self
    }
}

/// Narrow `draft` to the candidates named by `picks`.
///
/// Fails without producing anything when a draft platform has no pick, the
/// email pick is absent, a pick names a platform the draft does not have, or
/// any index is outside its candidate list. Image sets for platforms without
/// a social post are carried over untouched.
pub fn refine(draft: &CreativeDraft, picks: &RefinementPicks) -> Result<CreativeDraft, ValidationError> {
    let email_index = check_picks(draft, picks)?;

    let mut refined = draft.clone();

    let content = &mut refined.wordsmith.content_generation;
    for post in &mut content.social_media_posts {
        if let Some(pick) = picks.platforms.get(&post.platform) {
            post.captions = vec![post.captions[pick.caption_index].clone()];
        }
    }
    content.email_templates = vec![content.email_templates[email_index].clone()];

    for set in &mut refined
        .muse
        .visual_identity_proposal
        .platform_image_descriptions
    {
        if let Some(pick) = picks.platforms.get(&set.platform) {
            set.image_descriptions = vec![set.image_descriptions[pick.image_index].clone()];
        }
    }

    Ok(refined)
}

/// Validate `picks` against `draft`, returning the email index.
fn check_picks(draft: &CreativeDraft, picks: &RefinementPicks) -> Result<usize, ValidationError> {
    if let Some(platform) = picks
        .platforms
        .keys()
        .find(|platform| draft.post(platform).is_none())
    {
        return Err(ValidationError::UnknownPlatform {
            platform: platform.clone(),
        });
    }

    let mut missing: Vec<String> = Vec::new();
    for platform in draft.platforms() {
        if !picks.platforms.contains_key(platform) && !missing.iter().any(|m| m == platform) {
            missing.push(platform.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(ValidationError::IncompletePicks { missing });
    }

    let email_index = picks.email_index.ok_or(ValidationError::MissingEmailPick)?;

    for post in draft.social_posts() {
        if let Some(pick) = picks.platforms.get(&post.platform) {
            in_bounds(
                format!("{} caption", post.platform),
                pick.caption_index,
                post.captions.len(),
            )?;
        }
    }
    for set in draft.image_sets() {
        if let Some(pick) = picks.platforms.get(&set.platform) {
            in_bounds(
                format!("{} image", set.platform),
                pick.image_index,
                set.image_descriptions.len(),
            )?;
        }
    }
    in_bounds(
        "email template".to_string(),
        email_index,
        draft.email_templates().len(),
    )?;

    Ok(email_index)
}

fn in_bounds(what: String, index: usize, len: usize) -> Result<(), ValidationError> {
    if index < len {
        Ok(())
    } else {
        Err(ValidationError::IndexOutOfRange { what, index, len })
    }
}
