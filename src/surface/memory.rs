//! Memory surface: Records every frame instead of displaying it.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use super::Surface;
use crate::actor::ComponentId;
use crate::error::ListError;
use crate::markup::Node;

/// One event recorded by a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A tree was painted.
    Painted {
        /// Component that rendered.
        id: ComponentId,
        /// The rendered tree.
        tree: Node,
    },
    /// A render failed.
    Faulted {
        /// Component that failed.
        id: ComponentId,
        /// Error message.
        message: String,
    },
    /// A component was unmounted.
    Removed {
        /// Component that was removed.
        id: ComponentId,
    },
}

impl Frame {
    /// Component the frame belongs to.
    pub const fn id(&self) -> ComponentId {
        match self {
            Self::Painted { id, .. } | Self::Faulted { id, .. } | Self::Removed { id } => *id,
        }
    }
}

/// Render-thread side of a paint gate.
#[derive(Debug, Clone)]
struct GateLatch {
    entered: Sender<ComponentId>,
    release: Receiver<()>,
}

/// Holds paints on a gated [`MemorySurface`] until released.
///
/// Every paint announces itself and then blocks the render thread until
/// [`PaintGate::release`] is called once for it. Dropping the gate lets all
/// paints through.
#[derive(Debug)]
pub struct PaintGate {
    entered: Receiver<ComponentId>,
    release: Sender<()>,
}

impl PaintGate {
    /// Wait until a paint is blocked on the gate.
    pub fn wait_entered(&self, timeout: Duration) -> Option<ComponentId> {
        self.entered.recv_timeout(timeout).ok()
    }

    /// Let one blocked paint complete.
    pub fn release(&self) {
        let _ = self.release.send(());
    }
}

/// A surface that keeps a log of frames.
///
/// Clones share the same log, so a test can hand one clone to the engine
/// and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    frames: Arc<Mutex<Vec<Frame>>>,
    gate: Option<GateLatch>,
}

impl MemorySurface {
    /// Create an ungated surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface whose paints wait on the returned gate.
    pub fn gated() -> (Self, PaintGate) {
        let (entered_tx, entered_rx) = unbounded();
        let (release_tx, release_rx) = unbounded();
        let surface = Self {
            frames: Arc::default(),
            gate: Some(GateLatch {
                entered: entered_tx,
                release: release_rx,
            }),
        };
        let gate = PaintGate {
            entered: entered_rx,
            release: release_tx,
        };
        (surface, gate)
    }

    /// All recorded frames in order.
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().clone()
    }

    /// Trees painted for a component, oldest first.
    pub fn painted(&self, id: ComponentId) -> Vec<Node> {
        self.frames
            .lock()
            .iter()
            .filter_map(|frame| match frame {
                Frame::Painted { id: painted, tree } if *painted == id => Some(tree.clone()),
                _ => None,
            })
            .collect()
    }

    /// The most recent tree painted for a component.
    pub fn last_painted(&self, id: ComponentId) -> Option<Node> {
        self.frames.lock().iter().rev().find_map(|frame| match frame {
            Frame::Painted { id: painted, tree } if *painted == id => Some(tree.clone()),
            _ => None,
        })
    }

    /// Number of paints for a component.
    pub fn paint_count(&self, id: ComponentId) -> usize {
        self.count(id, |frame| matches!(frame, Frame::Painted { .. }))
    }

    /// Number of faults for a component.
    pub fn fault_count(&self, id: ComponentId) -> usize {
        self.count(id, |frame| matches!(frame, Frame::Faulted { .. }))
    }

    fn count(&self, id: ComponentId, pred: impl Fn(&Frame) -> bool) -> usize {
        self.frames
            .lock()
            .iter()
            .filter(|frame| frame.id() == id && pred(frame))
            .count()
    }

    fn record(&self, frame: Frame) {
        self.frames.lock().push(frame);
    }
}

impl Surface for MemorySurface {
    fn paint(&mut self, id: ComponentId, tree: &Node) -> io::Result<()> {
        if let Some(gate) = &self.gate {
            if gate.entered.send(id).is_ok() {
                // Fails only once the gate is dropped
                let _ = gate.release.recv();
            }
        }
        self.record(Frame::Painted {
            id,
            tree: tree.clone(),
        });
        Ok(())
    }

    fn fault(&mut self, id: ComponentId, error: &ListError) -> io::Result<()> {
        self.record(Frame::Faulted {
            id,
            message: error.to_string(),
        });
        Ok(())
    }

    fn remove(&mut self, id: ComponentId) -> io::Result<()> {
        self.record(Frame::Removed { id });
        Ok(())
    }
}
