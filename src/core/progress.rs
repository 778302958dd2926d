//! Transient progress line shown while tasks run

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::config::{PROGRESS_ICON, PROGRESS_MAX_DOTS, PROGRESS_TICK_INTERVAL};

const PROGRESS_TEMPLATE: &str = "{msg}";

/// Text of one progress frame, e.g. `⚡️ 3/10 ..`
pub fn render_frame(completed: usize, total: usize, tick: usize) -> String {
    let dots = ".".repeat(tick % PROGRESS_MAX_DOTS + 1);
    format!("{PROGRESS_ICON} {completed}/{total} {dots}")
}

/// Creates a progress style configuration
fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar().template(PROGRESS_TEMPLATE)?)
}

/// Periodically redraws `completed/total` from a shared counter
///
/// The counter is read without synchronizing with the tasks that bump it,
/// so a frame may lag behind by a task or two.
pub struct ProgressReporter {
    completed: Arc<AtomicUsize>,
    total: usize,
    interval: Duration,
    draw_target: ProgressDrawTarget,
}

impl ProgressReporter {
    /// Reporter drawing to stderr; indicatif hides it when stderr is not a terminal
    pub fn new(completed: Arc<AtomicUsize>, total: usize) -> Self {
        Self {
            completed,
            total,
            interval: PROGRESS_TICK_INTERVAL,
            draw_target: ProgressDrawTarget::stderr(),
        }
    }

    /// Reporter that never draws
    pub fn hidden(completed: Arc<AtomicUsize>, total: usize) -> Self {
        Self {
            draw_target: ProgressDrawTarget::hidden(),
            ..Self::new(completed, total)
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Spawns the ticking task; must be called from within a tokio runtime
    pub fn start(self) -> Result<ProgressHandle> {
        let bar = ProgressBar::with_draw_target(Some(self.total as u64), self.draw_target);
        bar.set_style(create_progress_style()?);

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let ticking_bar = bar.clone();
        let completed = self.completed;
        let total = self.total;
        let period = self.interval;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            let mut tick = 0usize;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let done = completed.load(Ordering::Relaxed);
                        ticking_bar.set_position(done as u64);
                        ticking_bar.set_message(render_frame(done, total, tick));
                        tick = tick.wrapping_add(1);
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        Ok(ProgressHandle {
            bar,
            stop_tx,
            handle: Some(handle),
        })
    }
}

/// Running progress line; the line is cleared on [`ProgressHandle::stop`] or drop
pub struct ProgressHandle {
    bar: ProgressBar,
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressHandle {
    /// Stops ticking and waits for the last frame before clearing the line
    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.bar.finish_and_clear();
    }
}
