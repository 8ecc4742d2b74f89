//! Message types for actor communication.
//!
//! These types define the protocol between component tasks and the render
//! thread.

use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::widget::Component;

/// Identifies a component mounted on the render thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Create an id from a raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a render request was resolved by the render thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The component rendered and the tree was painted.
    Painted,
    /// The render or the paint failed; the fault was surfaced.
    Faulted,
    /// The component was no longer mounted.
    Unmounted,
}

/// Commands sent to the render thread.
pub enum RenderCommand {
    /// Register a component under an id.
    Mount {
        /// Id assigned by the sender.
        id: ComponentId,
        /// The component to render.
        component: Arc<dyn Component>,
    },

    /// Render one component and paint the result.
    Render {
        /// Component to render.
        id: ComponentId,
        /// Completion signal, if the sender waits for the render.
        ack: Option<oneshot::Sender<RenderOutcome>>,
    },

    /// Remove a component from the render thread.
    Unmount {
        /// Component to remove.
        id: ComponentId,
    },

    /// Shutdown the render thread.
    Shutdown,
}

impl fmt::Debug for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mount { id, .. } => f.debug_struct("Mount").field("id", id).finish_non_exhaustive(),
            Self::Render { id, ack } => f
                .debug_struct("Render")
                .field("id", id)
                .field("awaited", &ack.is_some())
                .finish(),
            Self::Unmount { id } => f.debug_struct("Unmount").field("id", id).finish(),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}
