//! Error types for list rendering and stream consumption.

use std::any::Any;
use std::io;

use thiserror::Error;

/// Error raised by an item source while producing an element.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while configuring, consuming or rendering a list.
#[derive(Error, Debug)]
pub enum ListError {
    /// Both an ascending and a descending sort key are configured.
    #[error("both ascending and descending ordering are configured; use only one")]
    ConflictingOrder,

    /// A wrapper or container tag is not a valid element name.
    #[error("invalid element tag: {tag:?}")]
    InvalidElement {
        /// The offending tag.
        tag: String,
    },

    /// The item source failed while producing an element.
    #[error("item source failed: {0}")]
    Source(#[source] SourceError),

    /// The render thread is gone; no further renders can be applied.
    #[error("render context closed")]
    RenderContextClosed,

    /// A lifecycle operation was requested from a state that does not allow it.
    #[error("cannot {action} a list in state {from:?}")]
    InvalidTransition {
        /// State the list was in.
        from: crate::widget::LifecycleState,
        /// The rejected operation.
        action: &'static str,
    },

    /// No tokio runtime is available to run the consumption task.
    #[error("no tokio runtime available")]
    NoRuntime,

    /// A component or the render thread panicked while rendering.
    #[error("render panicked: {0}")]
    RenderPanicked(String),

    /// The consumption task panicked.
    #[error("consumption task panicked: {0}")]
    TaskPanicked(String),

    /// The consumption task was aborted before finishing.
    #[error("consumption task aborted")]
    TaskAborted,

    /// I/O failure in the render thread or a surface.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for list operations.
pub type ListResult<T> = Result<T, ListError>;

/// Text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
