use crate::{AutomationActor, AutomationArgs, AutomationMessage, LoopStatus};
use herald_core::{AutomationRequest, LogEntry};
use herald_error::{HeraldResult, LoopError, LoopErrorKind};
use ractor::{Actor, ActorRef, call};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

fn unavailable(e: impl std::fmt::Display) -> LoopError {
    LoopError::new(LoopErrorKind::ActorUnavailable(e.to_string()))
}

/// Handle to a running automation loop.
pub struct AutomationLoop {
    actor: ActorRef<AutomationMessage>,
    join: JoinHandle<()>,
}

impl AutomationLoop {
    /// Spawns the automation actor.
    #[instrument(skip_all)]
    pub async fn spawn(args: AutomationArgs) -> HeraldResult<Self> {
        let (actor, join) = Actor::spawn(None, AutomationActor, args).await.map_err(|e| {
            error!(error = %e, "Failed to spawn automation actor");
            unavailable(e)
        })?;
        info!("Automation loop ready");
        Ok(Self { actor, join })
    }

    /// Stores `request` and runs it once.
    pub fn submit(&self, request: AutomationRequest) -> HeraldResult<()> {
        self.actor
            .send_message(AutomationMessage::Submit(request))
            .map_err(unavailable)?;
        Ok(())
    }

    /// Starts the loop.
    ///
    /// # Errors
    ///
    /// `ConfigurationMissing` when nothing was submitted or cached.
    pub async fn start(&self) -> HeraldResult<()> {
        call!(self.actor, AutomationMessage::Start).map_err(unavailable)??;
        Ok(())
    }

    /// Stops the loop.
    pub fn stop(&self) -> HeraldResult<()> {
        self.actor
            .send_message(AutomationMessage::Stop)
            .map_err(unavailable)?;
        Ok(())
    }

    /// Replaces the stored configuration; the next cycle uses it.
    pub fn reconfigure(&self, request: AutomationRequest) -> HeraldResult<()> {
        self.actor
            .send_message(AutomationMessage::Reconfigure(request))
            .map_err(unavailable)?;
        Ok(())
    }

    /// Current status.
    pub async fn status(&self) -> HeraldResult<LoopStatus> {
        Ok(call!(self.actor, AutomationMessage::Status).map_err(unavailable)?)
    }

    /// Rolling log, oldest first.
    pub async fn log(&self) -> HeraldResult<Vec<LogEntry>> {
        Ok(call!(self.actor, AutomationMessage::Log).map_err(unavailable)?)
    }

    /// Stops the actor and waits for it to exit.
    pub async fn shutdown(self) -> HeraldResult<()> {
        self.actor.stop(None);
        self.join.await.map_err(unavailable)?;
        Ok(())
    }
}
