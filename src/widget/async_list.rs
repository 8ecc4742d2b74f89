//! Async List: A list component fed by an asynchronous item source.
//!
//! The list drains its source on a tokio task and asks the render thread
//! to re-render after every item, so the display grows one item at a time
//! while the source is still producing.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──initialize──▶ Initializing ──▶ Consuming ──dispose──▶ Disposed
//!       │                                                                  ▲
//!       └──────────────────────────────dispose─────────────────────────────┘
//! ```
//!
//! A disposed list cannot be restarted. Initialization returns as soon as
//! the consumption task is spawned; it never waits for an item. The task
//! renders the empty list before its first pull.
//!
//! # Disposal and in-flight renders
//!
//! Disposal cancels the consumption and unmounts the view, but renders that
//! were already requested still run first. An item appended just before
//! disposal therefore stays in the accumulated state and is painted; the
//! consumer stops pulling once that render completes.
//!
//! # Example
//!
//! ```rust,ignore
//! use flywheel_list::{AsyncList, AsyncListProps, Engine, ItemSource, MemorySurface};
//!
//! let engine = Engine::new(MemorySurface::new())?;
//! let props = AsyncListProps::new(ItemSource::iter(vec![3, 1, 2])).order_by(|n| *n);
//! let mut list = AsyncList::new(props);
//! list.initialize(&engine.handle())?;
//! ```

use std::sync::Arc;

use super::consumer::ConsumptionTask;
use super::props::AsyncListProps;
use super::view::ListView;
use crate::actor::{ComponentId, RenderHandle};
use crate::cancel::CompositeCancellation;
use crate::error::{ListError, ListResult};
use crate::ordering::OrderingPolicy;

/// Lifecycle state of an [`AsyncList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, not yet initialized.
    Uninitialized,
    /// Setting up cancellation, template and view.
    Initializing,
    /// The consumption task has been launched.
    Consuming,
    /// Disposed. Terminal.
    Disposed,
}

/// A list component that renders items as an async source yields them.
pub struct AsyncList<T> {
    state: LifecycleState,
    props: Option<AsyncListProps<T>>,
    view: Option<Arc<ListView<T>>>,
    cancellation: Option<CompositeCancellation>,
    task: Option<ConsumptionTask>,
    mounted: Option<(RenderHandle, ComponentId)>,
}

impl<T> AsyncList<T> {
    /// Create an uninitialized list.
    pub const fn new(props: AsyncListProps<T>) -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            props: Some(props),
            view: None,
            cancellation: None,
            task: None,
            mounted: None,
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Id on the render thread, once initialized.
    pub fn id(&self) -> Option<ComponentId> {
        self.mounted.as_ref().map(|(_, id)| *id)
    }

    /// The mounted view, once initialized.
    pub const fn view(&self) -> Option<&Arc<ListView<T>>> {
        self.view.as_ref()
    }

    /// Number of items accumulated so far.
    pub fn len(&self) -> usize {
        self.view.as_ref().map_or(0, |view| view.len())
    }

    /// Whether no items have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the consumption has been cancelled, internally or externally.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CompositeCancellation::is_cancelled)
    }

    /// Take the consumption task to observe how it ends.
    ///
    /// Returns `None` before initialization or if already taken or released.
    pub fn take_task(&mut self) -> Option<ConsumptionTask> {
        self.task.take()
    }

    fn transition(&mut self, next: LifecycleState) {
        tracing::info!(from = ?self.state, to = ?next, component = ?self.id(), "list lifecycle");
        self.state = next;
    }

    /// Cancel consumption, release the task and unmount the view.
    ///
    /// Never fails. Calling it again, or after the source was exhausted,
    /// does nothing more.
    pub fn dispose(&mut self) {
        if self.state == LifecycleState::Disposed {
            return;
        }

        if let Some(cancellation) = &self.cancellation {
            cancellation.cancel();
        }

        // Released, not aborted: the task stops at its next cancellation check.
        if let Some(task) = self.task.take() {
            tracing::debug!(finished = task.is_finished(), "releasing consumption task");
        }

        if let Some((renderer, id)) = &self.mounted {
            // Queued behind any render already requested
            if renderer.unmount(*id).is_err() {
                tracing::debug!(component = %id, "render context already closed");
            }
        }

        self.props = None;
        self.transition(LifecycleState::Disposed);
    }
}

impl<T: Clone> AsyncList<T> {
    /// Copy of the accumulated items in arrival order.
    pub fn items(&self) -> Vec<T> {
        self.view.as_ref().map(|view| view.snapshot()).unwrap_or_default()
    }
}

impl<T: Send + Sync + 'static> AsyncList<T> {
    /// Mount the list and start draining its source.
    ///
    /// Must be called within a tokio runtime. Returns once the consumption
    /// task is spawned.
    pub fn initialize(&mut self, renderer: &RenderHandle) -> ListResult<ComponentId> {
        if self.state != LifecycleState::Uninitialized {
            return Err(ListError::InvalidTransition {
                from: self.state,
                action: "initialize",
            });
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ListError::NoRuntime)?;
        let Some(props) = self.props.take() else {
            return Err(ListError::InvalidTransition {
                from: self.state,
                action: "initialize",
            });
        };

        self.transition(LifecycleState::Initializing);

        let AsyncListProps {
            items,
            item_template,
            fallback_template,
            cancellation_token,
            config,
            order_by,
            order_by_descending,
        } = props;

        let cancellation = CompositeCancellation::new(cancellation_token);
        let template = item_template.unwrap_or(fallback_template);
        let ordering = OrderingPolicy::new(order_by, order_by_descending);
        let view = Arc::new(ListView::new(template, ordering, config));

        let id = match renderer.mount(view.clone()) {
            Ok(id) => id,
            Err(err) => {
                // The source has been handed over; there is nothing to retry with.
                self.transition(LifecycleState::Disposed);
                return Err(err);
            }
        };
        self.mounted = Some((renderer.clone(), id));
        self.view = Some(view.clone());
        self.cancellation = Some(cancellation.clone());

        self.task = Some(ConsumptionTask::spawn(
            &runtime,
            items,
            view,
            renderer.clone(),
            id,
            cancellation,
        ));
        self.transition(LifecycleState::Consuming);
        Ok(id)
    }
}

impl<T> Drop for AsyncList<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}
