use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::FramePacing;

/// A cancellable, self-rescheduling per-frame task.
///
/// The first frame runs synchronously inside `start`; later frames run on the
/// current tokio runtime at the configured pacing. The running flag is checked
/// at the top of every scheduled frame, so a frame that was already queued
/// when `stop` ran does nothing.
#[derive(Debug)]
pub struct FrameLoop {
    pacing: FramePacing,
    running: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl FrameLoop {
    pub fn new(pacing: FramePacing) -> Self {
        Self {
            pacing,
            running: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Starts calling `frame` once per period. No-op when already running.
    ///
    /// Fails when called outside a tokio runtime.
    pub fn start<F>(&mut self, mut frame: F) -> Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        if self.is_running() {
            return Ok(());
        }

        let handle = Handle::try_current().context("frame loop needs a tokio runtime")?;
        let period = self.pacing.period();

        // A loop aborted by `stop` keeps its own flag, so a restart never revives it.
        self.running = Arc::new(AtomicBool::new(true));
        frame();

        let running = Arc::clone(&self.running);
        self.task = Some(handle.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticks.tick().await;
                if !running.load(Ordering::Acquire) {
                    break;
                }
                frame();
            }
        }));

        Ok(())
    }

    /// Clears the running flag and cancels the pending frame. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let tick = Arc::clone(&count);
        (count, move || {
            tick.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn first_frame_is_synchronous_then_paced() {
        let (count, frame) = counter();
        let mut frames = FrameLoop::new(FramePacing::new(10));

        frames.start(frame).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_frames() {
        let (count, frame) = counter();
        let mut frames = FrameLoop::new(FramePacing::new(10));

        frames.start(frame).unwrap();
        frames.stop();
        frames.stop();
        assert!(!frames.is_running());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_is_a_no_op() {
        let (count, frame) = counter();
        let (other_count, other) = counter();
        let mut frames = FrameLoop::new(FramePacing::new(10));

        frames.start(frame).unwrap();
        frames.start(other).unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(other_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_after_stop_runs_only_the_new_frame() {
        let (count, frame) = counter();
        let (other_count, other) = counter();
        let mut frames = FrameLoop::new(FramePacing::new(10));

        frames.start(frame).unwrap();
        let first_flag = Arc::clone(&frames.running);
        frames.stop();
        frames.start(other).unwrap();

        assert!(frames.is_running());
        assert!(!first_flag.load(Ordering::Acquire));
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(other_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn start_outside_runtime_fails() {
        let (count, frame) = counter();
        let mut frames = FrameLoop::new(FramePacing::default());

        assert!(frames.start(frame).is_err());
        assert!(!frames.is_running());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
