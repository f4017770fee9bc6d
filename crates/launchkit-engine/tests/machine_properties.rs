//! Property tests for the workflow state machine.
//!
//! Random event sequences, including completions with guessed tickets, must
//! never break the run's structural invariants.

use launchkit_engine::{Event, Ticket, WorkflowState, transition};
use launchkit_gateway::AnalysisResponse;
use launchkit_model::fixtures;
use launchkit_refine::RefinementPicks;
use launchkit_utils::error::{GatewayError, WorkflowError};
use launchkit_utils::types::Stage;
use proptest::prelude::*;

fn proptest_config(default_cases: u32) -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_cases);
    ProptestConfig::with_cases(cases)
}

#[derive(Debug, Clone)]
enum Step {
    Start,
    Succeed { stale: bool },
    Fail { stale: bool },
    SelectPersona(usize),
    SelectVariant(usize),
    SubmitFirstOfEach,
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Start),
        any::<bool>().prop_map(|stale| Step::Succeed { stale }),
        any::<bool>().prop_map(|stale| Step::Fail { stale }),
        (0usize..5).prop_map(Step::SelectPersona),
        (0usize..5).prop_map(Step::SelectVariant),
        Just(Step::SubmitFirstOfEach),
        Just(Step::Reset),
    ]
}

/// Turn a step into a concrete event for the current state.
fn event_for(state: &WorkflowState, step: &Step) -> Event {
    let ticket = |stale: bool| Ticket {
        generation: if stale {
            state.generation.wrapping_sub(1)
        } else {
            state.generation
        },
        stage: state.snapshot.stage,
    };
    match step {
        Step::Start => Event::Start(fixtures::sample_brief()),
        Step::Succeed { stale } => {
            let ticket = ticket(*stale);
            match state.snapshot.stage {
                Stage::AnalysisRunning => Event::AnalysisSucceeded {
                    ticket,
                    response: AnalysisResponse {
                        token: fixtures::SAMPLE_TOKEN.to_string(),
                        analysis: fixtures::sample_analysis(),
                    },
                },
                Stage::StrategyRunning => Event::StrategySucceeded {
                    ticket,
                    output: fixtures::sample_strategy(),
                },
                _ => Event::PlanSucceeded {
                    ticket,
                    plan: fixtures::sample_plan(),
                },
            }
        }
        Step::Fail { stale } => {
            let ticket = ticket(*stale);
            let error = GatewayError::Transport("boom".into());
            match state.snapshot.stage {
                Stage::AnalysisRunning => Event::AnalysisFailed { ticket, error },
                Stage::StrategyRunning => Event::StrategyFailed { ticket, error },
                _ => Event::PlanFailed { ticket, error },
            }
        }
        Step::SelectPersona(i) => Event::SelectPersona(*i),
        Step::SelectVariant(i) => Event::SelectVariant(*i),
        Step::SubmitFirstOfEach => Event::SubmitRefinement(
            state
                .snapshot
                .chosen_creative_variant
                .as_ref()
                .map(RefinementPicks::first_of_each)
                .unwrap_or_default(),
        ),
        Step::Reset => Event::Reset,
    }
}

proptest! {
    #![proptest_config(proptest_config(64))]

    #[test]
    fn invariants_hold_for_any_event_sequence(steps in prop::collection::vec(step(), 0..40)) {
        let mut state = WorkflowState::default();

        for step in &steps {
            let event = event_for(&state, step);
            let before = state.clone();

            match transition(&state, event) {
                Ok(t) => {
                    prop_assert!(t.state.generation >= before.generation);
                    if !matches!(step, Step::Start | Step::Reset) {
                        prop_assert_eq!(t.state.generation, before.generation);
                    }
                    if let Some(command) = &t.command {
                        prop_assert_eq!(command.ticket().generation, t.state.generation);
                        prop_assert_eq!(command.ticket().stage, t.state.snapshot.stage);
                    }
                    state = t.state;
                }
                Err(WorkflowError::Validation(_))
                | Err(WorkflowError::Busy { .. })
                | Err(WorkflowError::IllegalTransition { .. })
                | Err(WorkflowError::StaleResponse { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }

            let snapshot = &state.snapshot;
            prop_assert_eq!(snapshot.is_busy, snapshot.stage.is_remote());
            if snapshot.stage > Stage::AnalysisRunning {
                prop_assert!(snapshot.correlation_token.is_some());
                prop_assert!(snapshot.analysis_output.is_some());
            }
            if snapshot.stage > Stage::StrategyRunning {
                prop_assert!(snapshot.strategy_output.is_some());
                prop_assert!(snapshot.selected_persona.is_some());
            }
            if snapshot.stage >= Stage::RefinementInProgress {
                prop_assert!(snapshot.chosen_creative_variant.is_some());
            }
            if snapshot.stage >= Stage::PlanRunning {
                prop_assert!(snapshot
                    .refined_creative_variant
                    .as_ref()
                    .is_some_and(|draft| draft.is_refined()));
            }
            if snapshot.stage == Stage::Complete {
                prop_assert!(snapshot.final_plan_output.is_some());
            }
        }
    }
}
