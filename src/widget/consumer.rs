//! Stream consumer: Drains an item source into a list view.
//!
//! The pull loop appends each item and then waits for the render thread to
//! apply a render of the view before pulling again. Every item therefore
//! gets exactly one render, in arrival order, and production can run at
//! most one item ahead of the display.

use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::Instrument;

use super::props::ItemSource;
use super::view::ListView;
use crate::actor::{ComponentId, RenderHandle, RenderOutcome};
use crate::cancel::CompositeCancellation;
use crate::error::{panic_message, ListError, ListResult, SourceError};

/// Why a consumption pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsumeExit {
    /// The source ran out of items.
    #[default]
    Exhausted,
    /// Cancellation was observed.
    Cancelled,
}

/// Summary of a finished consumption pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsumeReport {
    /// Items appended to the view.
    pub items: usize,
    /// Renders requested and completed.
    pub renders: usize,
    /// Renders the render thread reported as faulted.
    pub faulted_renders: usize,
    /// How the pass ended.
    pub exit: ConsumeExit,
}

/// Handle to a running consumption pass.
///
/// Dropping it detaches the task. [`ConsumptionTask::join`] is the fault
/// channel: a failing source or a panic surfaces there.
#[derive(Debug)]
pub struct ConsumptionTask {
    handle: JoinHandle<ListResult<ConsumeReport>>,
}

impl ConsumptionTask {
    pub(crate) fn spawn<T>(
        runtime: &tokio::runtime::Handle,
        source: ItemSource<T>,
        view: Arc<ListView<T>>,
        renderer: RenderHandle,
        id: ComponentId,
        cancellation: CompositeCancellation,
    ) -> Self
    where
        T: Send + Sync + 'static,
    {
        let span = tracing::debug_span!("consume", component = %id);
        let handle = runtime.spawn(drain(source, view, renderer, id, cancellation).instrument(span));
        Self { handle }
    }

    /// Whether the pass has ended.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the task at its next suspension point.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the pass to end.
    pub async fn join(self) -> ListResult<ConsumeReport> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => {
                let payload = err.into_panic();
                Err(ListError::TaskPanicked(panic_message(payload.as_ref())))
            }
            Err(_) => Err(ListError::TaskAborted),
        }
    }
}

enum Pull<T> {
    Cancelled,
    Next(Option<Result<T, SourceError>>),
}

/// Run one consumption pass.
pub(crate) async fn drain<T>(
    mut source: ItemSource<T>,
    view: Arc<ListView<T>>,
    renderer: RenderHandle,
    id: ComponentId,
    cancellation: CompositeCancellation,
) -> ListResult<ConsumeReport>
where
    T: Send + Sync + 'static,
{
    view.reset();
    let mut report = ConsumeReport::default();

    // Empty frame first; not counted in the report
    renderer.request_render(id).await?;

    loop {
        // An already cancelled signal wins over a ready item
        let pull = tokio::select! {
            biased;
            () = cancellation.cancelled() => Pull::Cancelled,
            next = source.next() => Pull::Next(next),
        };

        let item = match pull {
            Pull::Cancelled => {
                report.exit = ConsumeExit::Cancelled;
                break;
            }
            Pull::Next(None) => {
                report.exit = ConsumeExit::Exhausted;
                break;
            }
            Pull::Next(Some(Err(err))) => {
                tracing::warn!(error = %err, items = report.items, "item source failed");
                return Err(ListError::Source(err));
            }
            Pull::Next(Some(Ok(item))) => item,
        };

        let len = view.append(item);
        report.items += 1;
        tracing::debug!(len, "item appended");

        // Not raced with cancellation: a render already requested is
        // allowed to finish.
        match renderer.request_render(id).await? {
            RenderOutcome::Faulted => report.faulted_renders += 1,
            RenderOutcome::Painted | RenderOutcome::Unmounted => {}
        }
        report.renders += 1;
    }

    tracing::debug!(items = report.items, exit = ?report.exit, "consumption ended");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Engine;
    use crate::markup::Node;
    use crate::ordering::OrderingPolicy;
    use crate::surface::MemorySurface;
    use crate::widget::props::{display_template, ListConfig};
    use futures::stream;
    use std::time::Duration;

    fn list_view() -> Arc<ListView<i32>> {
        Arc::new(ListView::new(
            Arc::new(display_template::<i32>),
            OrderingPolicy::arrival(),
            ListConfig::default(),
        ))
    }

    fn texts(tree: &Node) -> Vec<String> {
        tree.children().iter().map(Node::text_content).collect()
    }

    #[tokio::test]
    async fn test_drain_renders_once_per_item() {
        let surface = MemorySurface::new();
        let engine = Engine::new(surface.clone()).unwrap();
        let renderer = engine.handle();
        let view = list_view();
        let id = renderer.mount(view.clone()).unwrap();

        let report = drain(
            ItemSource::iter(vec![3, 1, 2]),
            view.clone(),
            renderer,
            id,
            CompositeCancellation::new(None),
        )
        .await
        .unwrap();

        assert_eq!(report.items, 3);
        assert_eq!(report.renders, 3);
        assert_eq!(report.exit, ConsumeExit::Exhausted);

        // Empty frame, then each frame shows exactly one more item
        let frames: Vec<Vec<String>> = surface.painted(id).iter().map(texts).collect();
        let expected: Vec<Vec<&str>> = vec![vec![], vec!["3"], vec!["3", "1"], vec!["3", "1", "2"]];
        assert_eq!(frames, expected);
    }

    #[tokio::test]
    async fn test_drain_resets_state() {
        let engine = Engine::new(MemorySurface::new()).unwrap();
        let renderer = engine.handle();
        let view = list_view();
        view.append(99);
        let id = renderer.mount(view.clone()).unwrap();

        drain(ItemSource::iter(vec![1]), view.clone(), renderer, id, CompositeCancellation::new(None))
            .await
            .unwrap();
        assert_eq!(view.snapshot(), vec![1]);
    }

    #[tokio::test]
    async fn test_drain_source_error_propagates() {
        let engine = Engine::new(MemorySurface::new()).unwrap();
        let renderer = engine.handle();
        let view = list_view();
        let id = renderer.mount(view.clone()).unwrap();

        let source = ItemSource::from_try_stream(stream::iter(vec![
            Ok(1),
            Err(std::io::Error::other("feed dropped")),
            Ok(2),
        ]));
        let result = drain(source, view.clone(), renderer, id, CompositeCancellation::new(None)).await;

        assert!(matches!(result, Err(ListError::Source(_))));
        assert_eq!(view.snapshot(), vec![1]);
    }

    #[tokio::test]
    async fn test_drain_cancelled_before_start() {
        let engine = Engine::new(MemorySurface::new()).unwrap();
        let renderer = engine.handle();
        let view = list_view();
        let id = renderer.mount(view.clone()).unwrap();
        let cancellation = CompositeCancellation::new(None);
        cancellation.cancel();

        let report = drain(ItemSource::iter(vec![1, 2]), view.clone(), renderer, id, cancellation)
            .await
            .unwrap();
        assert_eq!(report.exit, ConsumeExit::Cancelled);
        assert_eq!(report.items, 0);
        assert!(view.is_empty());
    }

    #[tokio::test]
    async fn test_drain_cancel_interrupts_pending_pull() {
        let engine = Engine::new(MemorySurface::new()).unwrap();
        let renderer = engine.handle();
        let view = list_view();
        let id = renderer.mount(view.clone()).unwrap();
        let cancellation = CompositeCancellation::new(None);

        // One item, then a source that never yields again
        let source = ItemSource::from_stream(stream::iter(vec![7]).chain(stream::pending()));
        let task = tokio::spawn(drain(source, view.clone(), renderer, id, cancellation.clone()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(view.snapshot(), vec![7]);
        cancellation.cancel();

        let report = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("pull loop should stop")
            .unwrap()
            .unwrap();
        assert_eq!(report.exit, ConsumeExit::Cancelled);
        assert_eq!(report.items, 1);
    }

    #[tokio::test]
    async fn test_drain_counts_faulted_renders() {
        let surface = MemorySurface::new();
        let engine = Engine::new(surface.clone()).unwrap();
        let renderer = engine.handle();
        let view = Arc::new(ListView::new(
            Arc::new(display_template::<i32>),
            OrderingPolicy::new(
                Some(crate::ordering::SortKey::new(|v: &i32| *v)),
                Some(crate::ordering::SortKey::new(|v: &i32| *v)),
            ),
            ListConfig::default(),
        ));
        let id = renderer.mount(view.clone()).unwrap();

        let report = drain(ItemSource::iter(vec![1, 2]), view.clone(), renderer, id, CompositeCancellation::new(None))
            .await
            .unwrap();

        // Faulted renders do not stop consumption
        assert_eq!(report.items, 2);
        assert_eq!(report.faulted_renders, 2);
        // The initial render faults as well
        assert_eq!(surface.fault_count(id), 3);
        assert_eq!(view.snapshot(), vec![1, 2]);
    }

    async fn explode() -> ListResult<ConsumeReport> {
        panic!("source exploded")
    }

    #[tokio::test]
    async fn test_join_reports_panic() {
        let task = ConsumptionTask {
            handle: tokio::spawn(explode()),
        };
        match task.join().await {
            Err(ListError::TaskPanicked(message)) => assert_eq!(message, "source exploded"),
            other => panic!("expected panic error, got {other:?}"),
        }
    }
}
