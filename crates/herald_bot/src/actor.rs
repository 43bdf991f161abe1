//! Actor runtime for the automation loop.
//!
//! [`AutomationActor`] owns a [`LoopController`] and carries out its
//! commands: cycles run on spawned tasks that report back with
//! [`AutomationMessage::CycleFinished`], and a single timer task sends
//! [`AutomationMessage::Tick`]. The mailbox is never blocked by a cycle, so a
//! tick that arrives mid-cycle reaches the controller and is dropped there.

use crate::{
    Command, ConfigCache, CycleOutcome, LoopController, LoopStatus, RunClient, describe_failure,
};
use chrono::Utc;
use herald_core::{AutomationRequest, LogEntry};
use herald_error::LoopError;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use typed_builder::TypedBuilder;

/// Messages for the automation actor.
pub enum AutomationMessage {
    /// Store a configuration and run it once
    Submit(AutomationRequest),
    /// Start the loop with the stored configuration
    Start(RpcReplyPort<Result<(), LoopError>>),
    /// Stop the loop; an in-flight cycle still finishes
    Stop,
    /// Replace the stored configuration without running it
    Reconfigure(AutomationRequest),
    /// Timer fired; carries the timer generation that sent it
    Tick(u64),
    /// A spawned cycle finished
    CycleFinished(CycleOutcome),
    /// Current status
    Status(RpcReplyPort<LoopStatus>),
    /// Rolling log, oldest first
    Log(RpcReplyPort<Vec<LogEntry>>),
}

/// Startup arguments for [`AutomationActor`].
#[derive(TypedBuilder)]
pub struct AutomationArgs {
    /// Where cycles are sent
    client: Arc<dyn RunClient>,
    /// Where submitted configurations are saved and rehydrated from
    #[builder(default)]
    cache: Option<ConfigCache>,
    /// Configuration to start with; takes precedence over the cache
    #[builder(default)]
    initial: Option<AutomationRequest>,
}

/// Actor state: the controller plus the runtime pieces it drives.
pub struct AutomationState {
    controller: LoopController,
    client: Arc<dyn RunClient>,
    cache: Option<ConfigCache>,
    timer: Option<JoinHandle<()>>,
    timer_generation: u64,
}

impl AutomationState {
    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
            debug!("Timer cancelled");
        }
        // Ticks already queued from the old timer are ignored by generation.
        self.timer_generation += 1;
    }

    fn remember(&self, request: &AutomationRequest) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save(request) {
                warn!(error = %e, "Failed to cache configuration");
            }
        }
    }
}

/// The automation loop actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutomationActor;

impl AutomationActor {
    fn execute(
        &self,
        myself: &ActorRef<AutomationMessage>,
        state: &mut AutomationState,
        commands: Vec<Command>,
    ) {
        for command in commands {
            match command {
                Command::StartCycle(request) => {
                    spawn_cycle(myself.clone(), Arc::clone(&state.client), request)
                }
                Command::ArmTimer(interval) => {
                    state.cancel_timer();
                    let generation = state.timer_generation;
                    state.timer = Some(spawn_timer(myself.clone(), interval, generation));
                    debug!(interval_secs = interval.as_secs(), generation, "Timer armed");
                }
                Command::CancelTimer => state.cancel_timer(),
            }
        }
    }
}

fn spawn_cycle(
    myself: ActorRef<AutomationMessage>,
    client: Arc<dyn RunClient>,
    request: AutomationRequest,
) {
    tokio::spawn(async move {
        let outcome = client.run(&request).await.map_err(|e| {
            warn!(error = %e, "Cycle failed");
            describe_failure(&e)
        });
        if myself.send_message(AutomationMessage::CycleFinished(outcome)).is_err() {
            debug!("Actor gone before cycle finished");
        }
    });
}

fn spawn_timer(
    myself: ActorRef<AutomationMessage>,
    interval: Duration,
    generation: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + interval;
        let mut timer = tokio::time::interval_at(start, interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            timer.tick().await;
            if myself.send_message(AutomationMessage::Tick(generation)).is_err() {
                break;
            }
        }
    })
}

#[async_trait::async_trait]
impl Actor for AutomationActor {
    type Msg = AutomationMessage;
    type State = AutomationState;
    type Arguments = AutomationArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: AutomationArgs,
    ) -> Result<Self::State, ActorProcessingErr> {
        let AutomationArgs {
            client,
            cache,
            initial,
        } = args;

        let config = match initial {
            Some(request) => Some(request),
            None => match cache.as_ref().map(ConfigCache::load) {
                Some(Ok(cached)) => cached,
                Some(Err(e)) => {
                    warn!(error = %e, "Could not read cached configuration");
                    None
                }
                None => None,
            },
        };
        info!(configured = config.is_some(), "Automation actor starting");

        let controller = match config {
            Some(config) => LoopController::with_config(config),
            None => LoopController::new(),
        };
        Ok(AutomationState {
            controller,
            client,
            cache,
            timer: None,
            timer_generation: 0,
        })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.cancel_timer();
        info!("Automation actor stopped");
        Ok(())
    }

    #[instrument(skip_all)]
    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let now = Utc::now();
        match message {
            AutomationMessage::Submit(request) => {
                state.remember(&request);
                let commands = state.controller.submit(request, now);
                self.execute(&myself, state, commands);
            }
            AutomationMessage::Start(reply) => {
                let result = match state.controller.start(now) {
                    Ok(commands) => {
                        self.execute(&myself, state, commands);
                        Ok(())
                    }
                    Err(e) => Err(e),
                };
                let _ = reply.send(result);
            }
            AutomationMessage::Stop => {
                let commands = state.controller.stop(now);
                self.execute(&myself, state, commands);
            }
            AutomationMessage::Reconfigure(request) => {
                state.remember(&request);
                let commands = state.controller.reconfigure(request, now);
                self.execute(&myself, state, commands);
            }
            AutomationMessage::Tick(generation) if generation != state.timer_generation => {
                debug!(generation, current = state.timer_generation, "Stale tick ignored");
            }
            AutomationMessage::Tick(_) => {
                let commands = state.controller.tick(now);
                self.execute(&myself, state, commands);
            }
            AutomationMessage::CycleFinished(outcome) => {
                let commands = state.controller.cycle_finished(outcome, now);
                self.execute(&myself, state, commands);
            }
            AutomationMessage::Status(reply) => {
                let _ = reply.send(state.controller.status());
            }
            AutomationMessage::Log(reply) => {
                let _ = reply.send(state.controller.entries());
            }
        }
        Ok(())
    }
}
