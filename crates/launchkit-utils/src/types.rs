use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stages of a launch-kit run.
///
/// A run advances through the stages in this order:
///
/// ```text
/// AwaitingStart → AnalysisRunning → AwaitingPersonaFeedback → StrategyRunning
///   → AwaitingCreativeFeedback → RefinementInProgress → PlanRunning → Complete
/// ```
///
/// The `*Running` stages are the only ones with a remote call in flight.
/// A failed remote call rolls the run back to the stage that issued it.
///
/// # Example
///
/// ```rust
/// use launchkit_utils::types::Stage;
///
/// assert_eq!(Stage::AnalysisRunning.as_str(), "analysis_running");
/// assert!(Stage::AnalysisRunning.is_remote());
/// assert!(!Stage::AwaitingPersonaFeedback.is_remote());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::VariantNames,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// No run in progress; a brief may be submitted.
    #[default]
    AwaitingStart,
    /// Market analysis is running remotely.
    AnalysisRunning,
    /// Personas are available; waiting for the user to pick one.
    AwaitingPersonaFeedback,
    /// SEO and creative generation are running remotely.
    StrategyRunning,
    /// Creative variants are available; waiting for the user to pick one.
    AwaitingCreativeFeedback,
    /// The user is narrowing the chosen variant to one candidate per slot.
    RefinementInProgress,
    /// The launch plan is running remotely.
    PlanRunning,
    /// The plan is available. Terminal until reset.
    Complete,
}

impl Stage {
    /// Canonical snake_case name used in logs and CLI output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingStart => "awaiting_start",
            Self::AnalysisRunning => "analysis_running",
            Self::AwaitingPersonaFeedback => "awaiting_persona_feedback",
            Self::StrategyRunning => "strategy_running",
            Self::AwaitingCreativeFeedback => "awaiting_creative_feedback",
            Self::RefinementInProgress => "refinement_in_progress",
            Self::PlanRunning => "plan_running",
            Self::Complete => "complete",
        }
    }

    /// Whether a remote stage call is in flight while in this stage.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::AnalysisRunning | Self::StrategyRunning | Self::PlanRunning
        )
    }

    /// Short progress label.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::AwaitingStart => "Ready?",
            Self::AnalysisRunning => "Market Maven",
            Self::AwaitingPersonaFeedback => "User Feedback",
            Self::StrategyRunning => "SEO Sage & Creative Team",
            Self::AwaitingCreativeFeedback => "User Feedback",
            Self::RefinementInProgress => "Refine Creatives",
            Self::PlanRunning => "Campaign Architect",
            Self::Complete => "Done",
        }
    }

    /// One-line description, also used as the busy status message.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AwaitingStart => "Review the brief and start the workflow.",
            Self::AnalysisRunning => {
                "Analyzing market, competitors, and defining target personas."
            }
            Self::AwaitingPersonaFeedback => "Validate the proposed target audience personas.",
            Self::StrategyRunning => {
                "Generating keyword strategy, copy, and visual concepts."
            }
            Self::AwaitingCreativeFeedback => "Select a creative direction.",
            Self::RefinementInProgress => {
                "Refining copy and visual concepts for each platform."
            }
            Self::PlanRunning => "Synthesizing all data into an actionable launch plan.",
            Self::Complete => "Your Marketing Launch Kit is ready.",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of a configuration value.
///
/// Precedence, highest first: CLI arguments, config file, programmatic
/// overrides, built-in defaults. Serializes to lowercase strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Value provided via CLI argument.
    Cli,
    /// Value loaded from a configuration file.
    Config,
    /// Value set through `ConfigBuilder`.
    Programmatic,
    /// Built-in default.
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "cli"),
            Self::Config => write!(f, "config"),
            Self::Programmatic => write!(f, "programmatic"),
            Self::Default => write!(f, "default"),
        }
    }
}
