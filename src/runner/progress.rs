//! @ai:module:intent Periodic single-line progress display for a model run
//! @ai:module:layer presentation
//! @ai:module:public_api ProgressReporter, ProgressHandle, render_line
//! @ai:module:stateless false

use crate::metrics::{RunStatus, StatusSnapshot};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// @ai:intent Format one overwriting status line
/// @ai:effects pure
pub fn render_line(snapshot: &StatusSnapshot, total: usize, elapsed: Duration) -> String {
    format!(
        "\r  {}/{} | New: {} | Cached: {} | Acc: {}/{} ({:.1}%) | {:.0}s   ",
        snapshot.processed(),
        total,
        snapshot.new,
        snapshot.cached,
        snapshot.correct,
        snapshot.new,
        snapshot.new_accuracy(),
        elapsed.as_secs_f64()
    )
}

/// @ai:intent Spawns the background task that renders progress
pub struct ProgressReporter;

/// @ai:intent Running reporter; finish() stops it after a final render
pub struct ProgressHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ProgressReporter {
    /// @ai:intent Render status to sink every interval until finished
    /// @ai:effects io, time
    pub fn spawn<W>(
        status: Arc<RunStatus>,
        total: usize,
        interval: Duration,
        mut sink: W,
    ) -> ProgressHandle
    where
        W: Write + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval_at(started + interval, interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let line = render_line(&status.snapshot(), total, started.elapsed());
                        write!(sink, "{}", line).ok();
                        sink.flush().ok();
                    }
                    _ = &mut stop_rx => break,
                }
            }

            let line = render_line(&status.snapshot(), total, started.elapsed());
            writeln!(sink, "{}", line).ok();
            sink.flush().ok();
        });

        ProgressHandle {
            stop: Some(stop_tx),
            task,
        }
    }
}

impl ProgressHandle {
    /// @ai:intent Stop rendering and wait for the final line to be written
    /// @ai:effects io
    pub async fn finish(mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).ok();
        }

        if let Err(e) = self.task.await {
            tracing::warn!("Progress reporter ended abnormally: {}", e);
        }
    }
}
