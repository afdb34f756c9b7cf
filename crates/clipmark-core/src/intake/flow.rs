//! Intake state machine.
//!
//! ```text
//! Idle --check--> CheckingSource --ok--> Valid --load--> FetchingPreview --ok--> PreviewReady
//!                        |                                     |                     |
//!                        +--err--> Invalid                     +--err--> Failed    confirm
//!                                                                                    v
//!                                          Failed <--err-- Submitting --ok--> Submitted
//! any --cancel--> Idle
//! ```
//!
//! Every attempt gets a fresh [`AttemptId`]. Completion events carry the id of
//! the attempt that started the work; a completion whose id no longer matches
//! (the user cancelled or started over) is discarded.

use std::fmt;
use thiserror::Error;

use crate::metadata::{Bookmark, Preview};
use crate::pipeline::PipelineError;
use crate::url_model::{self, ValidUrl};

/// Reason used when the source string could not be read at all.
pub const SOURCE_UNREADABLE: &str = "source-unreadable";

/// Monotonically increasing identifier of one capture attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl AttemptId {
    fn next(self) -> Self {
        AttemptId(self.0 + 1)
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The source (clipboard, text field) could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("source unreadable: {0}")]
pub struct SourceError(pub String);

/// The persistence collaborator rejected the bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not save bookmark: {0}")]
pub struct PersistError(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IntakeState {
    #[default]
    Idle,
    CheckingSource,
    Valid(ValidUrl),
    Invalid(String),
    FetchingPreview(ValidUrl),
    PreviewReady(Preview),
    Submitting(Bookmark),
    Submitted(Bookmark),
    Failed(String),
}

impl IntakeState {
    /// Short lowercase name for logs and status lines.
    pub fn name(&self) -> &'static str {
        match self {
            IntakeState::Idle => "idle",
            IntakeState::CheckingSource => "checking-source",
            IntakeState::Valid(_) => "valid",
            IntakeState::Invalid(_) => "invalid",
            IntakeState::FetchingPreview(_) => "fetching-preview",
            IntakeState::PreviewReady(_) => "preview-ready",
            IntakeState::Submitting(_) => "submitting",
            IntakeState::Submitted(_) => "submitted",
            IntakeState::Failed(_) => "failed",
        }
    }

    /// An attempt ended here; only cancel (back to Idle) leads anywhere.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            IntakeState::Invalid(_) | IntakeState::Submitted(_) | IntakeState::Failed(_)
        )
    }

    /// Work is in flight on behalf of the current attempt.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            IntakeState::CheckingSource
                | IntakeState::FetchingPreview(_)
                | IntakeState::Submitting(_)
        )
    }
}

/// Inputs to the state machine: user triggers and tagged completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeEvent {
    CheckSource,
    SourceRead {
        attempt: AttemptId,
        result: Result<String, SourceError>,
    },
    LoadPreview,
    PreviewLoaded {
        attempt: AttemptId,
        result: Result<Preview, PipelineError>,
    },
    Confirm,
    Persisted {
        attempt: AttemptId,
        result: Result<(), PersistError>,
    },
    Cancel,
}

/// Work requested by a transition. The caller performs it and reports back
/// with the matching completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ReadSource { attempt: AttemptId },
    LoadPreview { attempt: AttemptId, url: ValidUrl },
    Persist { attempt: AttemptId, bookmark: Bookmark },
    /// Stop whatever is in flight; its result will be ignored anyway.
    AbortInFlight,
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub flow: IntakeFlow,
    pub effect: Option<Effect>,
}

/// One capture session's state. Owned by a single caller; never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeFlow {
    state: IntakeState,
    attempt: AttemptId,
}

impl IntakeFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &IntakeState {
        &self.state
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    /// Applies `event` and returns the new flow plus any effect to run.
    ///
    /// Events that make no sense in the current state leave it unchanged.
    pub fn step(self, event: IntakeEvent) -> Step {
        let IntakeFlow { state, attempt } = self;

        match (state, event) {
            (state, IntakeEvent::Cancel) => {
                let effect = state.is_busy().then_some(Effect::AbortInFlight);
                let attempt = attempt.next();
                tracing::debug!("intake cancelled in {}; now attempt {}", state.name(), attempt);
                Step {
                    flow: IntakeFlow {
                        state: IntakeState::Idle,
                        attempt,
                    },
                    effect,
                }
            }

            (IntakeState::Idle, IntakeEvent::CheckSource) => {
                let attempt = attempt.next();
                tracing::debug!("intake attempt {} checking source", attempt);
                Step {
                    flow: IntakeFlow {
                        state: IntakeState::CheckingSource,
                        attempt,
                    },
                    effect: Some(Effect::ReadSource { attempt }),
                }
            }

            (IntakeState::CheckingSource, IntakeEvent::SourceRead { attempt: a, result })
                if a == attempt =>
            {
                let state = match result {
                    Ok(raw) => match url_model::validate(&raw) {
                        Ok(url) => IntakeState::Valid(url),
                        Err(e) => IntakeState::Invalid(e.reason.to_string()),
                    },
                    Err(e) => {
                        tracing::warn!("intake attempt {}: {}", attempt, e);
                        IntakeState::Invalid(SOURCE_UNREADABLE.to_string())
                    }
                };
                settle(state, attempt)
            }

            (IntakeState::Valid(url), IntakeEvent::LoadPreview) => Step {
                flow: IntakeFlow {
                    state: IntakeState::FetchingPreview(url.clone()),
                    attempt,
                },
                effect: Some(Effect::LoadPreview { attempt, url }),
            },

            (IntakeState::FetchingPreview(_), IntakeEvent::PreviewLoaded { attempt: a, result })
                if a == attempt =>
            {
                let state = match result {
                    Ok(preview) => IntakeState::PreviewReady(preview),
                    Err(e) => {
                        tracing::warn!("intake attempt {}: {}", attempt, e);
                        IntakeState::Failed(e.to_string())
                    }
                };
                settle(state, attempt)
            }

            (IntakeState::PreviewReady(preview), IntakeEvent::Confirm) => Step {
                flow: IntakeFlow {
                    state: IntakeState::Submitting(preview.clone()),
                    attempt,
                },
                effect: Some(Effect::Persist {
                    attempt,
                    bookmark: preview,
                }),
            },

            (IntakeState::Submitting(bookmark), IntakeEvent::Persisted { attempt: a, result })
                if a == attempt =>
            {
                let state = match result {
                    Ok(()) => {
                        tracing::info!("bookmark submitted: {}", bookmark.url);
                        IntakeState::Submitted(bookmark)
                    }
                    Err(e) => {
                        tracing::warn!("intake attempt {}: {}", attempt, e);
                        IntakeState::Failed(e.to_string())
                    }
                };
                settle(state, attempt)
            }

            (state, event) => {
                match completion_attempt(&event) {
                    Some(a) if a != attempt => tracing::warn!(
                        "discarding result of attempt {} (current {}, {})",
                        a,
                        attempt,
                        state.name()
                    ),
                    _ => tracing::debug!("ignoring {} in {}", event_name(&event), state.name()),
                }
                settle(state, attempt)
            }
        }
    }
}

fn settle(state: IntakeState, attempt: AttemptId) -> Step {
    Step {
        flow: IntakeFlow { state, attempt },
        effect: None,
    }
}

fn completion_attempt(event: &IntakeEvent) -> Option<AttemptId> {
    match event {
        IntakeEvent::SourceRead { attempt, .. }
        | IntakeEvent::PreviewLoaded { attempt, .. }
        | IntakeEvent::Persisted { attempt, .. } => Some(*attempt),
        _ => None,
    }
}

fn event_name(event: &IntakeEvent) -> &'static str {
    match event {
        IntakeEvent::CheckSource => "check-source",
        IntakeEvent::SourceRead { .. } => "source-read",
        IntakeEvent::LoadPreview => "load-preview",
        IntakeEvent::PreviewLoaded { .. } => "preview-loaded",
        IntakeEvent::Confirm => "confirm",
        IntakeEvent::Persisted { .. } => "persisted",
        IntakeEvent::Cancel => "cancel",
    }
}
