//! `launchkit run`: drive one run from brief to campaign plan.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use launchkit_archive::KitArchive;
use launchkit_engine::WorkflowSession;
use launchkit_gateway::StageGateway;
use launchkit_model::{CampaignPlan, CreativeDraft, WorkflowSnapshot};
use launchkit_refine::RefinementPicks;
use launchkit_utils::atomic_write::write_json_atomic;
use launchkit_utils::error::{LaunchKitError, WorkflowError};
use launchkit_utils::types::Stage;
use tracing::{debug, info};

use crate::cli::args::PickArg;

/// Everything `launchkit run` needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub brief: PathBuf,
    pub user: String,
    pub persona: usize,
    pub variant: usize,
    pub picks: Vec<PickArg>,
    pub email: Option<usize>,
    pub save: bool,
    /// Write the finished run state here as JSON.
    pub export: Option<PathBuf>,
}

/// Execute the run command
pub async fn execute_run_command(
    options: &RunOptions,
    gateway: Arc<dyn StageGateway>,
    archive: Arc<dyn KitArchive>,
    out: &mut impl Write,
) -> Result<()> {
    let export = options
        .export
        .as_ref()
        .map(|path| {
            Utf8PathBuf::from_path_buf(path.clone())
                .map_err(|raw| anyhow::anyhow!("output path {} is not valid UTF-8", raw.display()))
        })
        .transpose()?;
    let brief = super::load_brief(&options.brief)?;
    let started = Instant::now();
    let mut session = WorkflowSession::new(options.user.as_str(), gateway, archive);

    writeln!(out, "Launch kit for {}", brief.product_name)?;
    let rt = session.runtime_mut();

    progress(out, Stage::AnalysisRunning)?;
    rt.start(brief).await.map_err(stage_error)?;
    print_personas(out, rt.snapshot(), options.persona)?;

    progress(out, Stage::StrategyRunning)?;
    rt.select_persona(options.persona).await.map_err(stage_error)?;
    print_variants(out, rt.snapshot(), options.variant)?;

    rt.select_variant(options.variant).map_err(stage_error)?;
    let chosen = rt
        .snapshot()
        .chosen_creative_variant
        .clone()
        .context("no creative draft selected after selecting a variant")?;
    let picks = build_picks(&chosen, &options.picks, options.email);
    debug!(platforms = picks.platforms.len(), "Refinement picks built");

    progress(out, Stage::PlanRunning)?;
    rt.submit_refinement(picks).await.map_err(stage_error)?;
    if let Some(refined) = &rt.snapshot().refined_creative_variant {
        print_refined(out, refined)?;
    }
    if let Some(plan) = &rt.snapshot().final_plan_output {
        print_plan(out, plan)?;
    }

    info!(
        user = %options.user,
        duration_ms = started.elapsed().as_millis(),
        "Run complete"
    );

    if let Some(target) = &export {
        write_json_atomic(target, rt.snapshot())
            .with_context(|| format!("Failed to export run to {target}"))?;
        writeln!(out, "\n✓ Exported run to {target}")?;
    }

    if options.save {
        let kit = session.save_kit().await?;
        writeln!(out, "\n✓ Saved kit {} ({})", kit.id, kit.product_name)?;
    }

    Ok(())
}

/// Picks for `draft`: the first candidate everywhere, overridden by any
/// explicit `--pick` and `--email`.
pub fn build_picks(draft: &CreativeDraft, overrides: &[PickArg], email: Option<usize>) -> RefinementPicks {
    let mut picks = overrides.iter().fold(RefinementPicks::first_of_each(draft), |picks, pick| {
        picks.with_platform(&pick.platform, pick.caption_index, pick.image_index)
    });
    if let Some(email) = email {
        picks = picks.with_email(email);
    }
    picks
}

fn stage_error(err: WorkflowError) -> LaunchKitError {
    LaunchKitError::Workflow(err)
}

fn progress(out: &mut impl Write, stage: Stage) -> Result<()> {
    writeln!(out, "\n▶ {}: {}", stage.title(), stage.description())?;
    Ok(())
}

fn print_personas(out: &mut impl Write, snapshot: &WorkflowSnapshot, chosen: usize) -> Result<()> {
    let personas = snapshot.personas();
    writeln!(out, "  {} personas", personas.len())?;
    for (index, persona) in personas.iter().enumerate() {
        let marker = if index == chosen { '*' } else { ' ' };
        writeln!(
            out,
            "  {marker} [{index}] {} ({}, {})",
            persona.persona_name, persona.demographics.age_range, persona.demographics.occupation
        )?;
    }
    Ok(())
}

fn print_variants(out: &mut impl Write, snapshot: &WorkflowSnapshot, chosen: usize) -> Result<()> {
    let variants = snapshot.creative_variants();
    writeln!(out, "  {} creative drafts", variants.len())?;
    for (index, draft) in variants.iter().enumerate() {
        let marker = if index == chosen { '*' } else { ' ' };
        let platforms: Vec<&str> = draft.platforms().collect();
        writeln!(out, "  {marker} [{index}] {} ({})", draft.style, platforms.join(", "))?;
    }
    Ok(())
}

fn print_refined(out: &mut impl Write, refined: &CreativeDraft) -> Result<()> {
    writeln!(out, "  Refined \"{}\" draft:", refined.style)?;
    for post in refined.social_posts() {
        let caption = post.captions.first().map(String::as_str).unwrap_or_default();
        writeln!(out, "    {}: {caption}", post.platform)?;
        if let Some(image) = refined
            .image_set(&post.platform)
            .and_then(|set| set.image_descriptions.first())
        {
            writeln!(out, "      image: {image}")?;
        }
    }
    if let Some(email) = refined.email_templates().first() {
        let subject = email
            .subject_line_suggestions
            .first()
            .map(String::as_str)
            .unwrap_or_default();
        writeln!(out, "    email ({}): {subject}", email.email_type)?;
    }
    Ok(())
}

fn print_plan(out: &mut impl Write, plan: &CampaignPlan) -> Result<()> {
    let strategy = &plan.launch_campaign_strategy;
    writeln!(out, "\n✓ Campaign plan: {}", strategy.overall_objective)?;
    for channel in &strategy.recommended_channels {
        writeln!(
            out,
            "  - {} ({}): {}",
            channel.channel_name, channel.estimated_budget_allocation, channel.primary_role_in_funnel
        )?;
    }
    for (period, phase) in &strategy.high_level_launch_plan_30_days {
        writeln!(out, "  {period}: {} ({} tasks)", phase.focus, phase.tasks.len())?;
    }
    if !strategy.next_steps.is_empty() {
        writeln!(out, "  Next steps:")?;
        for step in &strategy.next_steps {
            writeln!(out, "    • {step}")?;
        }
    }
    Ok(())
}
