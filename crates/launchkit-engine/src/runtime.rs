//! Drives the state machine against a [`StageGateway`].
//!
//! The runtime owns the live [`WorkflowState`]. User events are applied
//! immediately; a transition that requests a remote stage spawns a task that
//! calls the gateway and reports back over a channel as a completion event.
//! Completions are applied one at a time by [`WorkflowRuntime::settle`].

use std::sync::Arc;
use std::time::Instant;

use launchkit_gateway::StageGateway;
use launchkit_model::{UserBrief, WorkflowSnapshot};
use launchkit_refine::RefinementPicks;
use launchkit_utils::error::WorkflowError;
use launchkit_utils::logging::{log_stage_complete, log_stage_error, log_stage_start, stage_span};
use launchkit_utils::types::Stage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, warn};

use crate::machine::{Command, Event, WorkflowState, transition};

pub struct WorkflowRuntime {
    gateway: Arc<dyn StageGateway>,
    state: WorkflowState,
    completions_tx: mpsc::UnboundedSender<Event>,
    completions_rx: mpsc::UnboundedReceiver<Event>,
    in_flight: Option<JoinHandle<()>>,
}

impl WorkflowRuntime {
    pub fn new(gateway: Arc<dyn StageGateway>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            state: WorkflowState::default(),
            completions_tx,
            completions_rx,
            in_flight: None,
        }
    }

    pub fn snapshot(&self) -> &WorkflowSnapshot {
        &self.state.snapshot
    }

    pub fn stage(&self) -> Stage {
        self.state.snapshot.stage
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    pub fn is_busy(&self) -> bool {
        self.state.snapshot.is_busy
    }

    /// Apply one event and launch the command it produces, if any.
    ///
    /// Does not wait for the command; see [`settle`](Self::settle).
    ///
    /// # Errors
    ///
    /// Any error from [`transition`]. Validation errors are also recorded in
    /// the snapshot's `last_error`.
    pub fn dispatch(&mut self, event: Event) -> Result<(), WorkflowError> {
        let event_name = event.name();
        let is_reset = matches!(event, Event::Reset);
        let from = self.state.snapshot.stage;

        let outcome = match transition(&self.state, event) {
            Ok(outcome) => outcome,
            Err(err) => {
                if let WorkflowError::Validation(validation) = &err {
                    self.state.snapshot.last_error = Some(validation.to_string());
                }
                debug!(
                    stage = %from,
                    generation = self.state.generation,
                    event = event_name,
                    error = %err,
                    "Event rejected"
                );
                return Err(err);
            }
        };

        if is_reset && outcome.state.generation != self.state.generation {
            // The in-flight call, if any, keeps running; its completion will
            // carry an old ticket.
            self.in_flight = None;
        }
        self.state = outcome.state;
        info!(
            from = %from,
            stage = %self.state.snapshot.stage,
            generation = self.state.generation,
            event = event_name,
            "Transition applied"
        );

        if let Some(command) = outcome.command {
            self.spawn(command);
        }
        Ok(())
    }

    fn spawn(&mut self, command: Command) {
        let ticket = command.ticket();
        let gateway = Arc::clone(&self.gateway);
        let tx = self.completions_tx.clone();
        log_stage_start(ticket.stage, ticket.generation);

        let task = async move {
            let started = Instant::now();
            let event = match command {
                Command::RunAnalysis { ticket, brief } => {
                    match gateway.run_analysis(&brief).await {
                        Ok(response) => Event::AnalysisSucceeded { ticket, response },
                        Err(error) => Event::AnalysisFailed { ticket, error },
                    }
                }
                Command::RunStrategy {
                    ticket,
                    token,
                    persona,
                } => match gateway.run_strategy(&token, &persona).await {
                    Ok(output) => Event::StrategySucceeded { ticket, output },
                    Err(error) => Event::StrategyFailed { ticket, error },
                },
                Command::RunPlan {
                    ticket,
                    token,
                    draft,
                } => match gateway.run_plan(&token, &draft).await {
                    Ok(plan) => Event::PlanSucceeded { ticket, plan },
                    Err(error) => Event::PlanFailed { ticket, error },
                },
            };

            let elapsed = started.elapsed().as_millis();
            match event.failure() {
                Some(error) => {
                    log_stage_error(ticket.stage, ticket.generation, &error.to_string(), elapsed);
                }
                None => log_stage_complete(ticket.stage, ticket.generation, elapsed),
            }
            // The receiver lives as long as the runtime.
            let _ = tx.send(event);
        };

        self.in_flight = Some(tokio::spawn(
            task.instrument(stage_span(ticket.stage, ticket.generation)),
        ));
    }

    /// Wait for the in-flight remote stage, if any, and apply its outcome.
    ///
    /// Completions left over from abandoned runs are discarded on the way.
    ///
    /// # Errors
    ///
    /// `StageFailed` when the stage failed; the run has already been rolled
    /// back to the stage that issued the call. `Disconnected` when the task
    /// ended without reporting.
    pub async fn settle(&mut self) -> Result<(), WorkflowError> {
        while self.state.snapshot.is_busy {
            let event = self.next_completion().await?;
            let failure = event.failure().cloned();
            let running = self.state.snapshot.stage;

            match self.dispatch(event) {
                Ok(()) => {}
                Err(WorkflowError::StaleResponse {
                    event,
                    generation,
                    current,
                }) => {
                    warn!(event, generation, current, "Discarding late stage response");
                    continue;
                }
                Err(err) => return Err(err),
            }

            if let Some(source) = failure {
                return Err(WorkflowError::StageFailed {
                    stage: running,
                    source,
                });
            }
        }
        Ok(())
    }

    async fn next_completion(&mut self) -> Result<Event, WorkflowError> {
        let stage = self.state.snapshot.stage;
        let Self {
            completions_rx,
            in_flight,
            ..
        } = self;

        loop {
            // The runtime holds a sender, so with no task left only events
            // already queued can arrive.
            let Some(handle) = in_flight.as_mut() else {
                return completions_rx
                    .try_recv()
                    .map_err(|_| WorkflowError::Disconnected { stage });
            };
            let finished = tokio::select! {
                biased;
                Some(event) = completions_rx.recv() => return Ok(event),
                joined = handle => joined,
            };
            *in_flight = None;
            if let Err(err) = finished {
                warn!(%stage, error = %err, "Stage task ended without reporting");
            }
        }
    }

    /// Submit the brief and wait for market analysis.
    pub async fn start(&mut self, brief: UserBrief) -> Result<(), WorkflowError> {
        self.dispatch(Event::Start(brief))?;
        self.settle().await
    }

    /// Choose a persona and wait for the strategy stage.
    pub async fn select_persona(&mut self, index: usize) -> Result<(), WorkflowError> {
        self.dispatch(Event::SelectPersona(index))?;
        self.settle().await
    }

    pub fn select_variant(&mut self, index: usize) -> Result<(), WorkflowError> {
        self.dispatch(Event::SelectVariant(index))
    }

    /// Submit refinement picks and wait for the launch plan.
    pub async fn submit_refinement(&mut self, picks: RefinementPicks) -> Result<(), WorkflowError> {
        self.dispatch(Event::SubmitRefinement(picks))?;
        self.settle().await
    }

    /// Abandon the run. An in-flight call is not cancelled.
    pub fn reset(&mut self) -> Result<(), WorkflowError> {
        self.dispatch(Event::Reset)
    }
}
