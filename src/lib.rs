//! # Flywheel Async List
//!
//! Lists that render incrementally while an asynchronous source is still
//! producing items.
//!
//! An [`AsyncList`] drains an [`ItemSource`] on a tokio task. After each item
//! it asks the render thread to re-render and waits for that render before
//! pulling again, so every item is shown as it arrives and no intermediate
//! state is skipped.
//!
//! ## Core Concepts
//!
//! - **One render per item**: Appends and renders alternate strictly
//! - **Render thread**: All renders run on a single dedicated thread that owns the surface
//! - **View-time ordering**: Sorting is applied when rendering, never to the accumulated items
//! - **Cooperative cancellation**: An external token and disposal both stop the pull loop
//!
//! ## Example
//!
//! ```rust,ignore
//! use flywheel_list::{AsyncList, AsyncListProps, Engine, ItemSource, MemorySurface};
//!
//! let surface = MemorySurface::new();
//! let engine = Engine::new(surface.clone())?;
//!
//! let props = AsyncListProps::new(ItemSource::from_stream(ticks)).order_by(|t: &u64| *t);
//! let mut list = AsyncList::new(props);
//! list.initialize(&engine.handle())?;
//!
//! // ... later
//! list.dispose();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod cancel;
pub mod error;
pub mod markup;
pub mod ordering;
pub mod surface;
pub mod widget;

// Re-exports for convenience
pub use actor::{ComponentId, Engine, EngineConfig, RenderHandle, RenderOutcome, RenderStats};
pub use cancel::CompositeCancellation;
pub use tokio_util::sync::CancellationToken;
pub use error::{ListError, ListResult, SourceError};
pub use markup::Node;
pub use ordering::{OrderMode, OrderingPolicy, SortKey};
pub use surface::{Frame, MemorySurface, Surface, TerminalConfig, TerminalSurface};
pub use widget::{
    AsyncList, AsyncListProps, Component, ConsumeExit, ConsumeReport, ConsumptionTask, ItemSource,
    LifecycleState,
};
