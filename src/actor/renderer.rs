//! Renderer Actor: Dedicated thread for rendering components.
//!
//! This actor owns the paint surface and the registry of mounted
//! components. Every render runs here, one at a time, in the order the
//! commands were sent. Tasks on other threads only ever ask for a render;
//! they never touch the surface.

use super::messages::{ComponentId, RenderCommand, RenderOutcome};
use crate::error::{panic_message, ListError, ListResult};
use crate::surface::Surface;
use crate::widget::Component;
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Renderer actor that owns the render thread.
pub struct RendererActor {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

/// Render statistics for debugging/profiling.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Renders that were painted.
    pub frames: u64,
    /// Renders that failed in the component or the surface.
    pub faults: u64,
    /// Render requests for components that were not mounted.
    pub skipped: u64,
    /// Average render time in microseconds.
    pub avg_render_us: u64,
    /// Last render time in microseconds.
    pub last_render_us: u64,
}

/// Internal renderer state.
struct Renderer {
    /// Mounted components.
    components: HashMap<ComponentId, Arc<dyn Component>>,
    /// Paint target.
    surface: Box<dyn Surface>,
    /// Render statistics, shared with the engine.
    stats: Arc<Mutex<RenderStats>>,
}

impl Renderer {
    fn new(surface: Box<dyn Surface>, stats: Arc<Mutex<RenderStats>>) -> Self {
        Self {
            components: HashMap::new(),
            surface,
            stats,
        }
    }

    fn mount(&mut self, id: ComponentId, component: Arc<dyn Component>) {
        tracing::trace!(component = %id, "mount");
        self.components.insert(id, component);
    }

    fn unmount(&mut self, id: ComponentId) {
        if self.components.remove(&id).is_some() {
            tracing::trace!(component = %id, "unmount");
            if let Err(err) = self.surface.remove(id) {
                tracing::error!(component = %id, error = %err, "surface failed to remove component");
            }
        }
    }

    /// Perform one render cycle for a component.
    fn render(&mut self, id: ComponentId) -> RenderOutcome {
        let Some(component) = self.components.get(&id) else {
            tracing::trace!(component = %id, "render skipped, not mounted");
            self.stats.lock().skipped += 1;
            return RenderOutcome::Unmounted;
        };

        let start = Instant::now();
        // A panicking template faults this component only
        let rendered = panic::catch_unwind(AssertUnwindSafe(|| component.render()))
            .unwrap_or_else(|payload| Err(ListError::RenderPanicked(panic_message(payload.as_ref()))));
        let outcome = match rendered {
            Ok(tree) => match self.surface.paint(id, &tree) {
                Ok(()) => RenderOutcome::Painted,
                Err(err) => {
                    tracing::error!(component = %id, error = %err, "paint failed");
                    RenderOutcome::Faulted
                }
            },
            Err(err) => {
                // The view could not be computed; surface it instead of
                // leaving a stale frame on display.
                tracing::error!(component = %id, error = %err, "render failed");
                if let Err(io_err) = self.surface.fault(id, &err) {
                    tracing::error!(component = %id, error = %io_err, "surface failed to show fault");
                }
                RenderOutcome::Faulted
            }
        };

        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        let mut stats = self.stats.lock();
        if outcome == RenderOutcome::Painted {
            stats.frames += 1;
        } else {
            stats.faults += 1;
        }
        stats.last_render_us = elapsed;

        // Smoothed average
        if stats.avg_render_us == 0 {
            stats.avg_render_us = elapsed;
        } else {
            stats.avg_render_us = (stats.avg_render_us * 15 + elapsed) / 16;
        }

        outcome
    }
}

impl RendererActor {
    /// Spawn the renderer actor thread.
    ///
    /// # Arguments
    ///
    /// * `receiver` - Channel to receive render commands from.
    /// * `surface` - Paint target owned by the render thread.
    /// * `stats` - Statistics shared with the caller.
    /// * `thread_name` - Name of the render thread.
    /// * `poll_interval` - How long to wait for a command before checking
    ///   the shutdown flag.
    pub fn spawn(
        receiver: Receiver<RenderCommand>,
        surface: Box<dyn Surface>,
        stats: Arc<Mutex<RenderStats>>,
        thread_name: String,
        poll_interval: Duration,
    ) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new().name(thread_name).spawn(move || {
            let mut renderer = Renderer::new(surface, stats);
            Self::run_loop(&receiver, &shutdown_clone, &mut renderer, poll_interval);
            tracing::debug!("render thread stopped");
        })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the render thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the render thread to finish.
    ///
    /// A panic that escaped the render loop is logged and returned as
    /// [`ListError::RenderPanicked`].
    pub fn join(mut self) -> ListResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.join().map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::error!(panic = %message, "render thread panicked");
            ListError::RenderPanicked(message)
        })
    }

    /// Main render loop.
    fn run_loop(
        receiver: &Receiver<RenderCommand>,
        shutdown: &Arc<AtomicBool>,
        renderer: &mut Renderer,
        poll_interval: Duration,
    ) {
        loop {
            // Check for shutdown
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            match receiver.recv_timeout(poll_interval) {
                Ok(command) => match command {
                    RenderCommand::Mount { id, component } => renderer.mount(id, component),
                    RenderCommand::Render { id, ack } => {
                        let outcome = renderer.render(id);
                        if let Some(ack) = ack {
                            // The requester may have stopped waiting
                            let _ = ack.send(outcome);
                        }
                    }
                    RenderCommand::Unmount { id } => renderer.unmount(id),
                    RenderCommand::Shutdown => break,
                },
                Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
                Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}
