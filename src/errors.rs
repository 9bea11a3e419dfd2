//! Errors that can happen when using `bevy_scribe`.

use thiserror::Error;

/// Errors when driving a [`Writer`](crate::prelude::Writer).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriterError {
    /// Input was sent to a writer that is not writing anything.
    #[error("the writer has no active session")]
    NoActiveSession,
    /// Input was sent while the writer was not waiting for it
    /// (and instant complete is off).
    #[error("the writer is not waiting for input")]
    NotWaitingForInput,
}
