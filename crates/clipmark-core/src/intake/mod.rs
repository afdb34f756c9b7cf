//! Capture flow: from a raw source string to a confirmed bookmark.
//!
//! [`flow`] holds the state machine as an owned value with a pure transition
//! function. [`driver`] runs one flow on the tokio runtime, executing the
//! effects each transition asks for and feeding their results back in.

pub mod driver;
pub mod flow;

pub use driver::{
    spawn_intake, BookmarkSink, DriverStopped, IntakeHandle, IntakeOptions, SourceReader,
};
pub use flow::{
    AttemptId, Effect, IntakeEvent, IntakeFlow, IntakeState, PersistError, SourceError, Step,
    SOURCE_UNREADABLE,
};
