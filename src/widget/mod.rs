//! Async list widget: Incremental rendering of an asynchronous item source.
//!
//! This module implements the list component and its pieces:
//!
//! 1. **Props**: The configuration surface (items, template, cancellation,
//!    tags, ordering). Nothing is validated until the list renders.
//!
//! 2. **Consumer**: The pull loop that appends each item and waits for its
//!    render before pulling the next one.
//!
//! 3. **View**: The accumulated items, rendered through the ordering policy
//!    and the item template on the render thread.
//!
//! 4. **Lifecycle**: Initialization, cancellation and disposal.
//!
//! # Example
//!
//! ```rust,ignore
//! use flywheel_list::{AsyncList, AsyncListProps, ItemSource};
//!
//! let props = AsyncListProps::new(ItemSource::from_stream(prices))
//!     .element("li")
//!     .order_by_descending(|quote: &Quote| quote.bid);
//! let mut list = AsyncList::new(props);
//! list.initialize(&engine.handle())?;
//! ```

mod async_list;
mod consumer;
mod props;
mod traits;
mod view;

pub use async_list::{AsyncList, LifecycleState};
pub use consumer::{ConsumeExit, ConsumeReport, ConsumptionTask};
pub use props::{display_template, AsyncListProps, ItemSource, ItemTemplate, ListConfig};
pub use traits::Component;
pub use view::ListView;
