//! Surfaces: Paint targets for rendered trees.
//!
//! A surface is owned by the render thread and receives every rendered
//! tree. How a tree becomes pixels or characters is up to the surface;
//! components only produce [`Node`]s.
//!
//! - [`MemorySurface`]: Records frames in memory, used by tests and headless hosts
//! - [`TerminalSurface`]: Prints one line per list item through crossterm

mod memory;
mod terminal;

use std::io;

use crate::actor::ComponentId;
use crate::error::ListError;
use crate::markup::Node;

pub use memory::{Frame, MemorySurface, PaintGate};
pub use terminal::{TerminalConfig, TerminalSurface};

/// A paint target driven by the render thread.
pub trait Surface: Send {
    /// Display a freshly rendered tree for a component.
    fn paint(&mut self, id: ComponentId, tree: &Node) -> io::Result<()>;

    /// Display a render failure for a component.
    fn fault(&mut self, id: ComponentId, error: &ListError) -> io::Result<()>;

    /// Forget a component that was unmounted.
    fn remove(&mut self, _id: ComponentId) -> io::Result<()> {
        Ok(())
    }
}
