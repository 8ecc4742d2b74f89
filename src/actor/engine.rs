//! Engine: Main coordinator that owns the render thread.
//!
//! The Engine is the host side of the crate. It spawns the renderer actor
//! on top of a [`Surface`] and hands out [`RenderHandle`]s, which are the
//! only way for components and their tasks to reach the render thread.

use super::messages::{ComponentId, RenderCommand, RenderOutcome};
use super::renderer::{RenderStats, RendererActor};
use crate::error::{ListError, ListResult};
use crate::surface::Surface;
use crate::widget::Component;
use crossbeam_channel::{unbounded, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Name of the render thread.
    pub thread_name: String,
    /// How often the idle render thread checks for shutdown.
    pub poll_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thread_name: "flywheel-render".to_string(),
            poll_interval: Duration::from_millis(16),
        }
    }
}

/// Cloneable access to the render thread.
///
/// Safe to use from any thread or tokio task. Commands are applied in the
/// order they are sent.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    /// Render command sender.
    tx: Sender<RenderCommand>,
    /// Source of component ids.
    next_id: Arc<AtomicU64>,
}

impl RenderHandle {
    fn send(&self, command: RenderCommand) -> ListResult<()> {
        self.tx
            .send(command)
            .map_err(|_| ListError::RenderContextClosed)
    }

    /// Mount a component and return its id.
    pub fn mount(&self, component: Arc<dyn Component>) -> ListResult<ComponentId> {
        let id = ComponentId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.send(RenderCommand::Mount { id, component })?;
        Ok(id)
    }

    /// Unmount a component. Renders already queued for it still run.
    pub fn unmount(&self, id: ComponentId) -> ListResult<()> {
        self.send(RenderCommand::Unmount { id })
    }

    /// Queue a render without waiting for it.
    pub fn invalidate(&self, id: ComponentId) -> ListResult<()> {
        self.send(RenderCommand::Render { id, ack: None })
    }

    /// Queue a render and wait until the render thread has applied it.
    pub async fn request_render(&self, id: ComponentId) -> ListResult<RenderOutcome> {
        let (ack, done) = oneshot::channel();
        self.send(RenderCommand::Render { id, ack: Some(ack) })?;
        done.await.map_err(|_| ListError::RenderContextClosed)
    }
}

/// The render host.
///
/// Dropping the engine stops the render thread after the commands already
/// queued ahead of the shutdown have been processed.
pub struct Engine {
    /// Configuration.
    config: EngineConfig,
    /// Handle shared with components.
    handle: RenderHandle,
    /// Renderer actor handle.
    renderer_actor: Option<RendererActor>,
    /// Render statistics.
    stats: Arc<Mutex<RenderStats>>,
}

impl Engine {
    /// Create a new engine with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the render thread cannot be spawned.
    pub fn new(surface: impl Surface + 'static) -> ListResult<Self> {
        Self::with_config(surface, EngineConfig::default())
    }

    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the render thread cannot be spawned.
    pub fn with_config(surface: impl Surface + 'static, config: EngineConfig) -> ListResult<Self> {
        // Each awaited render keeps at most one command per component in
        // flight, so the queue stays short without a bound.
        let (render_tx, render_rx) = unbounded::<RenderCommand>();
        let stats = Arc::new(Mutex::new(RenderStats::default()));

        let renderer_actor = RendererActor::spawn(
            render_rx,
            Box::new(surface),
            stats.clone(),
            config.thread_name.clone(),
            config.poll_interval,
        )?;
        tracing::debug!(thread = %config.thread_name, "render thread started");

        Ok(Self {
            config,
            handle: RenderHandle {
                tx: render_tx,
                next_id: Arc::new(AtomicU64::new(1)),
            },
            renderer_actor: Some(renderer_actor),
            stats,
        })
    }

    /// Get a handle to the render thread.
    pub fn handle(&self) -> RenderHandle {
        self.handle.clone()
    }

    /// Get the engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot of the render statistics.
    pub fn stats(&self) -> RenderStats {
        self.stats.lock().clone()
    }

    /// Stop the render thread and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(actor) = self.renderer_actor.take() {
            let _ = self.handle.tx.send(RenderCommand::Shutdown);
            // Already logged by the actor
            let _ = actor.join();
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}
