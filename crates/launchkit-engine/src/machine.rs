//! The workflow state machine.
//!
//! [`transition`] is a pure function from the current [`WorkflowState`] and
//! one [`Event`] to the next state plus, for events that start a remote
//! stage, the [`Command`] to execute. It performs no I/O; the runtime
//! executes commands and feeds their outcomes back in as completion events.
//!
//! Legal transitions:
//!
//! | From                       | Event               | To                         |
//! |----------------------------|---------------------|----------------------------|
//! | `AwaitingStart`            | `Start`             | `AnalysisRunning`          |
//! | `AnalysisRunning`          | `AnalysisSucceeded` | `AwaitingPersonaFeedback`  |
//! | `AnalysisRunning`          | `AnalysisFailed`    | `AwaitingStart`            |
//! | `AwaitingPersonaFeedback`  | `SelectPersona`     | `StrategyRunning`          |
//! | `StrategyRunning`          | `StrategySucceeded` | `AwaitingCreativeFeedback` |
//! | `StrategyRunning`          | `StrategyFailed`    | `AwaitingPersonaFeedback`  |
//! | `AwaitingCreativeFeedback` | `SelectVariant`     | `RefinementInProgress`     |
//! | `RefinementInProgress`     | `SubmitRefinement`  | `PlanRunning`              |
//! | `PlanRunning`              | `PlanSucceeded`     | `Complete`                 |
//! | `PlanRunning`              | `PlanFailed`        | `RefinementInProgress`     |
//! | any                        | `Reset`             | `AwaitingStart`            |

use launchkit_gateway::AnalysisResponse;
use launchkit_model::{
    CampaignPlan, CreativeDraft, Persona, StrategyOutput, UserBrief, WorkflowSnapshot,
};
use launchkit_refine::{RefinementPicks, refine};
use launchkit_selection::pick;
use launchkit_utils::error::{GatewayError, WorkflowError};
use launchkit_utils::types::Stage;

/// The live snapshot plus the run generation.
///
/// The generation increases on every `Start` and every effective `Reset`, so
/// a completion from an abandoned run can be told apart from one for the
/// current run even when both target the same stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub snapshot: WorkflowSnapshot,
    pub generation: u64,
}

/// Identifies the remote call a completion event answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub generation: u64,
    pub stage: Stage,
}

/// A remote stage call requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RunAnalysis {
        ticket: Ticket,
        brief: UserBrief,
    },
    RunStrategy {
        ticket: Ticket,
        token: String,
        persona: Persona,
    },
    RunPlan {
        ticket: Ticket,
        token: String,
        draft: CreativeDraft,
    },
}

impl Command {
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::RunAnalysis { ticket, .. }
            | Self::RunStrategy { ticket, .. }
            | Self::RunPlan { ticket, .. } => *ticket,
        }
    }
}

/// Everything that can happen to a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start(UserBrief),
    AnalysisSucceeded {
        ticket: Ticket,
        response: AnalysisResponse,
    },
    AnalysisFailed {
        ticket: Ticket,
        error: GatewayError,
    },
    SelectPersona(usize),
    StrategySucceeded {
        ticket: Ticket,
        output: StrategyOutput,
    },
    StrategyFailed {
        ticket: Ticket,
        error: GatewayError,
    },
    SelectVariant(usize),
    SubmitRefinement(RefinementPicks),
    PlanSucceeded {
        ticket: Ticket,
        plan: CampaignPlan,
    },
    PlanFailed {
        ticket: Ticket,
        error: GatewayError,
    },
    Reset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::AnalysisSucceeded { .. } => "analysis_succeeded",
            Self::AnalysisFailed { .. } => "analysis_failed",
            Self::SelectPersona(_) => "select_persona",
            Self::StrategySucceeded { .. } => "strategy_succeeded",
            Self::StrategyFailed { .. } => "strategy_failed",
            Self::SelectVariant(_) => "select_variant",
            Self::SubmitRefinement(_) => "submit_refinement",
            Self::PlanSucceeded { .. } => "plan_succeeded",
            Self::PlanFailed { .. } => "plan_failed",
            Self::Reset => "reset",
        }
    }

    /// The ticket of a completion event; `None` for user events.
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            Self::AnalysisSucceeded { ticket, .. }
            | Self::AnalysisFailed { ticket, .. }
            | Self::StrategySucceeded { ticket, .. }
            | Self::StrategyFailed { ticket, .. }
            | Self::PlanSucceeded { ticket, .. }
            | Self::PlanFailed { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    /// The gateway error carried by a failure event.
    pub fn failure(&self) -> Option<&GatewayError> {
        match self {
            Self::AnalysisFailed { error, .. }
            | Self::StrategyFailed { error, .. }
            | Self::PlanFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WorkflowState,
    pub command: Option<Command>,
}

impl Transition {
    fn to(state: WorkflowState) -> Self {
        Self {
            state,
            command: None,
        }
    }
}

/// Move `snapshot` into `stage` with the transient fields for a successful
/// transition.
fn enter(snapshot: &mut WorkflowSnapshot, stage: Stage) {
    snapshot.stage = stage;
    snapshot.is_busy = stage.is_remote();
    snapshot.status_message = stage.description().to_string();
    snapshot.last_error = None;
}

/// Roll `snapshot` back to `stage` after a remote failure.
fn roll_back(snapshot: &mut WorkflowSnapshot, stage: Stage, error: &GatewayError) {
    snapshot.stage = stage;
    snapshot.is_busy = false;
    snapshot.status_message = stage.description().to_string();
    snapshot.last_error = Some(error.to_string());
}

fn token_of(snapshot: &WorkflowSnapshot) -> String {
    snapshot.correlation_token.clone().unwrap_or_default()
}

/// Apply `event` to `state`.
///
/// # Errors
///
/// - `StaleResponse` for a completion whose ticket is not the current
///   generation and stage
/// - `Busy` for a user event while a remote stage is running
/// - `IllegalTransition` for an event the current stage does not accept
/// - `Validation` when the event's input is rejected; the state is unchanged
pub fn transition(state: &WorkflowState, event: Event) -> Result<Transition, WorkflowError> {
    let current = state.snapshot.stage;

    if matches!(event, Event::Reset) {
        if current == Stage::AwaitingStart && state.snapshot.input_brief.is_none() {
            return Ok(Transition::to(state.clone()));
        }
        let mut snapshot = WorkflowSnapshot::default();
        enter(&mut snapshot, Stage::AwaitingStart);
        return Ok(Transition::to(WorkflowState {
            snapshot,
            generation: state.generation + 1,
        }));
    }

    if let Some(ticket) = event.ticket() {
        if ticket.generation != state.generation || ticket.stage != current {
            return Err(WorkflowError::StaleResponse {
                event: event.name(),
                generation: ticket.generation,
                current: state.generation,
            });
        }
    } else if state.snapshot.is_busy {
        return Err(WorkflowError::Busy { stage: current });
    }

    let illegal = WorkflowError::IllegalTransition {
        stage: current,
        event: event.name(),
    };
    let mut next = state.clone();
    let snapshot = &mut next.snapshot;

    let command = match (current, event) {
        (Stage::AwaitingStart, Event::Start(brief)) => {
            brief.validate()?;
            next.generation += 1;
            let ticket = Ticket {
                generation: next.generation,
                stage: Stage::AnalysisRunning,
            };
            next.snapshot = WorkflowSnapshot {
                input_brief: Some(brief.clone()),
                ..WorkflowSnapshot::default()
            };
            enter(&mut next.snapshot, Stage::AnalysisRunning);
            return Ok(Transition {
                state: next,
                command: Some(Command::RunAnalysis { ticket, brief }),
            });
        }
        (Stage::AnalysisRunning, Event::AnalysisSucceeded { response, .. }) => {
            snapshot.correlation_token = Some(response.token);
            snapshot.analysis_output = Some(response.analysis);
            enter(snapshot, Stage::AwaitingPersonaFeedback);
            None
        }
        (Stage::AnalysisRunning, Event::AnalysisFailed { error, .. }) => {
            roll_back(snapshot, Stage::AwaitingStart, &error);
            None
        }
        (Stage::AwaitingPersonaFeedback, Event::SelectPersona(index)) => {
            let persona = pick(snapshot.personas(), index, "persona")?.clone();
            snapshot.selected_persona = Some(persona.clone());
            enter(snapshot, Stage::StrategyRunning);
            Some(Command::RunStrategy {
                ticket: Ticket {
                    generation: next.generation,
                    stage: Stage::StrategyRunning,
                },
                token: token_of(snapshot),
                persona,
            })
        }
        (Stage::StrategyRunning, Event::StrategySucceeded { output, .. }) => {
            snapshot.strategy_output = Some(output);
            enter(snapshot, Stage::AwaitingCreativeFeedback);
            None
        }
        (Stage::StrategyRunning, Event::StrategyFailed { error, .. }) => {
            snapshot.selected_persona = None;
            roll_back(snapshot, Stage::AwaitingPersonaFeedback, &error);
            None
        }
        (Stage::AwaitingCreativeFeedback, Event::SelectVariant(index)) => {
            let variant = pick(snapshot.creative_variants(), index, "creative variant")?.clone();
            snapshot.chosen_creative_variant = Some(variant);
            enter(snapshot, Stage::RefinementInProgress);
            None
        }
        (Stage::RefinementInProgress, Event::SubmitRefinement(picks)) => {
            let Some(chosen) = snapshot.chosen_creative_variant.as_ref() else {
                return Err(illegal);
            };
            let refined = refine(chosen, &picks)?;
            snapshot.refined_creative_variant = Some(refined.clone());
            enter(snapshot, Stage::PlanRunning);
            Some(Command::RunPlan {
                ticket: Ticket {
                    generation: next.generation,
                    stage: Stage::PlanRunning,
                },
                token: token_of(snapshot),
                draft: refined,
            })
        }
        (Stage::PlanRunning, Event::PlanSucceeded { plan, .. }) => {
            snapshot.final_plan_output = Some(plan);
            enter(snapshot, Stage::Complete);
            None
        }
        (Stage::PlanRunning, Event::PlanFailed { error, .. }) => {
            snapshot.refined_creative_variant = None;
            roll_back(snapshot, Stage::RefinementInProgress, &error);
            None
        }
        _ => return Err(illegal),
    };

    Ok(Transition {
        state: next,
        command,
    })
}
