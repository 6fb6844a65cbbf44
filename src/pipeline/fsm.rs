use crate::{Error, Result};
use tracing::{debug, warn};

// Request lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Received,
    Validated,
    Rejected,
    Failed,
    Succeeded,
}

// Request lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    ValidationPassed,
    ValidationFailed,
    PipelineFailed,
    PdfRendered,
}

/// Tracks one render request from receipt to its terminal outcome.
#[derive(Debug)]
pub struct RequestStateMachine {
    state: RequestState,
    last_error: Option<String>,
}

impl RequestStateMachine {
    pub fn new() -> Self {
        Self {
            state: RequestState::Received,
            last_error: None,
        }
    }

    pub fn current_state(&self) -> RequestState {
        self.state
    }

    pub fn transition(&mut self, event: RequestEvent) -> Result<()> {
        let new_state = match (self.state, event) {
            (RequestState::Received, RequestEvent::ValidationPassed) => RequestState::Validated,
            (RequestState::Received, RequestEvent::ValidationFailed) => RequestState::Rejected,
            (RequestState::Validated, RequestEvent::PipelineFailed) => RequestState::Failed,
            (RequestState::Validated, RequestEvent::PdfRendered) => RequestState::Succeeded,
            _ => {
                warn!(
                    "Invalid request transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    requested: format!("{:?}", event),
                });
            }
        };

        debug!(
            "Request state transition: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    /// Moves to a failure state and remembers why.
    pub fn fail(&mut self, event: RequestEvent, reason: impl Into<String>) -> Result<()> {
        self.transition(event)?;
        self.last_error = Some(reason.into());
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            RequestState::Rejected | RequestState::Failed | RequestState::Succeeded
        )
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl Default for RequestStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
