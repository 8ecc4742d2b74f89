//! Actor Model: Message-passing between component tasks and the render thread.
//!
//! This module implements the render side of the crate using crossbeam
//! channels:
//! - **Render Actor**: Owns the surface and mounted components, runs renders
//! - **Render Handle**: Cloneable sender used by components and their tasks
//! - **Engine**: Owns the render actor and its lifetime
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   RenderCommand    ┌──────────────┐   paint   ┌─────────┐
//! │ Consumer task│ ─────────────────▶ │Render Thread │ ────────▶ │ Surface │
//! │  (tokio)     │ ◀───────────────── │              │           └─────────┘
//! └──────────────┘   RenderOutcome    └──────────────┘
//! ```
//!
//! A consumer that awaits [`RenderHandle::request_render`] does not move on
//! until the render thread has applied that render.

mod messages;
mod renderer;
mod engine;

pub use messages::{ComponentId, RenderCommand, RenderOutcome};
pub use renderer::{RenderStats, RendererActor};
pub use engine::{Engine, EngineConfig, RenderHandle};
