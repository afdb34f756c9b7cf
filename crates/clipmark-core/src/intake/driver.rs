//! Runs an [`IntakeFlow`] on the tokio runtime.
//!
//! User triggers arrive through an [`IntakeHandle`]; effect completions come
//! back on a private channel tagged with their attempt id, so a result that
//! lands after a cancel is dropped by the state machine. The latest state is
//! published on a `watch` channel for the UI.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::flow::{Effect, IntakeEvent, IntakeFlow, IntakeState, PersistError, SourceError};
use crate::config::ClipmarkConfig;
use crate::fetch_page::PageFetcher;
use crate::metadata::Bookmark;
use crate::pipeline::MetadataPipeline;

/// Supplies the raw string for an attempt (clipboard, text field, stdin).
/// May block; it runs on the blocking pool.
pub trait SourceReader: Send + Sync + 'static {
    fn read(&self) -> Result<String, SourceError>;
}

/// Receives confirmed bookmarks. May block; it runs on the blocking pool.
pub trait BookmarkSink: Send + Sync + 'static {
    fn persist(&self, bookmark: &Bookmark) -> Result<(), PersistError>;
}

/// A fixed string is a valid source.
impl SourceReader for String {
    fn read(&self) -> Result<String, SourceError> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeOptions {
    /// Issue "load preview" as soon as the source validates.
    pub auto_preview: bool,
}

impl Default for IntakeOptions {
    fn default() -> Self {
        Self { auto_preview: true }
    }
}

impl From<&ClipmarkConfig> for IntakeOptions {
    fn from(cfg: &ClipmarkConfig) -> Self {
        Self {
            auto_preview: cfg.auto_preview,
        }
    }
}

/// User-side controls of a running intake flow.
#[derive(Debug, Clone)]
pub struct IntakeHandle {
    events: mpsc::Sender<IntakeEvent>,
    state: watch::Receiver<IntakeState>,
}

/// The driver task has exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("intake driver stopped")]
pub struct DriverStopped;

impl IntakeHandle {
    pub async fn check_source(&self) -> Result<(), DriverStopped> {
        self.send(IntakeEvent::CheckSource).await
    }

    pub async fn load_preview(&self) -> Result<(), DriverStopped> {
        self.send(IntakeEvent::LoadPreview).await
    }

    pub async fn confirm(&self) -> Result<(), DriverStopped> {
        self.send(IntakeEvent::Confirm).await
    }

    pub async fn cancel(&self) -> Result<(), DriverStopped> {
        self.send(IntakeEvent::Cancel).await
    }

    async fn send(&self, event: IntakeEvent) -> Result<(), DriverStopped> {
        self.events.send(event).await.map_err(|_| DriverStopped)
    }

    /// Latest published state.
    pub fn state(&self) -> IntakeState {
        self.state.borrow().clone()
    }

    /// Waits until the published state satisfies `pred` and returns it.
    pub async fn wait_for(
        &mut self,
        pred: impl FnMut(&IntakeState) -> bool,
    ) -> Result<IntakeState, DriverStopped> {
        let state = self.state.wait_for(pred).await.map_err(|_| DriverStopped)?;
        Ok(state.clone())
    }
}

struct Driver<R, F, B> {
    flow: IntakeFlow,
    opts: IntakeOptions,
    source: Arc<R>,
    pipeline: MetadataPipeline<F>,
    sink: Arc<B>,
    events: mpsc::Receiver<IntakeEvent>,
    done_tx: mpsc::UnboundedSender<IntakeEvent>,
    done_rx: mpsc::UnboundedReceiver<IntakeEvent>,
    state_tx: watch::Sender<IntakeState>,
    in_flight: Option<JoinHandle<()>>,
}

/// Starts a driver for a fresh flow. It runs until every handle is dropped
/// and then returns the final flow.
pub fn spawn_intake<R, F, B>(
    source: R,
    pipeline: MetadataPipeline<F>,
    sink: B,
    opts: IntakeOptions,
) -> (IntakeHandle, JoinHandle<IntakeFlow>)
where
    R: SourceReader,
    F: PageFetcher,
    B: BookmarkSink,
{
    let (events_tx, events) = mpsc::channel(16);
    let (done_tx, done_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(IntakeState::Idle);

    let driver = Driver {
        flow: IntakeFlow::new(),
        opts,
        source: Arc::new(source),
        pipeline,
        sink: Arc::new(sink),
        events,
        done_tx,
        done_rx,
        state_tx,
        in_flight: None,
    };
    let task = tokio::spawn(driver.run());

    (
        IntakeHandle {
            events: events_tx,
            state: state_rx,
        },
        task,
    )
}

impl<R, F, B> Driver<R, F, B>
where
    R: SourceReader,
    F: PageFetcher,
    B: BookmarkSink,
{
    async fn run(mut self) -> IntakeFlow {
        loop {
            let event = tokio::select! {
                ev = self.events.recv() => match ev {
                    Some(ev) => ev,
                    None => break,
                },
                Some(done) = self.done_rx.recv() => done,
            };
            self.apply(event);
        }
        self.abort_in_flight();
        tracing::debug!("intake driver exiting in {}", self.flow.state().name());
        self.flow
    }

    fn apply(&mut self, event: IntakeEvent) {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            let from = self.flow.state().name();
            let step = std::mem::take(&mut self.flow).step(event);
            self.flow = step.flow;
            tracing::debug!(
                "intake {} -> {} (attempt {})",
                from,
                self.flow.state().name(),
                self.flow.attempt()
            );
            self.state_tx.send_replace(self.flow.state().clone());

            if let Some(effect) = step.effect {
                self.execute(effect);
            }
            if self.opts.auto_preview && matches!(self.flow.state(), IntakeState::Valid(_)) {
                next = Some(IntakeEvent::LoadPreview);
            }
        }
    }

    fn execute(&mut self, effect: Effect) {
        let done = self.done_tx.clone();
        let handle = match effect {
            Effect::AbortInFlight => {
                self.abort_in_flight();
                return;
            }
            Effect::ReadSource { attempt } => {
                let source = Arc::clone(&self.source);
                tokio::spawn(async move {
                    let result = tokio::task::spawn_blocking(move || source.read())
                        .await
                        .unwrap_or_else(|e| Err(SourceError(format!("read task join: {}", e))));
                    let _ = done.send(IntakeEvent::SourceRead { attempt, result });
                })
            }
            Effect::LoadPreview { attempt, url } => {
                let pipeline = self.pipeline.clone();
                tokio::spawn(async move {
                    let result = pipeline.preview(&url).await;
                    let _ = done.send(IntakeEvent::PreviewLoaded { attempt, result });
                })
            }
            Effect::Persist { attempt, bookmark } => {
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    let result = tokio::task::spawn_blocking(move || sink.persist(&bookmark))
                        .await
                        .unwrap_or_else(|e| Err(PersistError(format!("persist task join: {}", e))));
                    let _ = done.send(IntakeEvent::Persisted { attempt, result });
                })
            }
        };
        self.in_flight = Some(handle);
    }

    /// Best effort: a blocking transfer already running keeps going, but its
    /// completion is never delivered.
    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
