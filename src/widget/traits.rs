//! Component trait.
//!
//! This module defines the `Component` trait that everything mounted on the
//! render thread implements.

use crate::error::ListResult;
use crate::markup::Node;

/// A UI component that the render thread can render.
///
/// Rendering is a pure projection of the component's current state into a
/// [`Node`] tree. It runs on the render thread, so implementations must be
/// shareable with it.
pub trait Component: Send + Sync {
    /// Render the current state.
    ///
    /// An error means the view could not be computed; the render thread
    /// surfaces it in place of a frame.
    fn render(&self) -> ListResult<Node>;
}
