// ── Progress animator ──
//
// Async driver for one `Progression`. A single tokio task owns the state
// machine; targets arrive through a watch channel, frames leave through
// another. The step interval only runs while the progression advances.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::DisplayConfig;
use crate::progress::{Phase, Progression, StartFrom};

/// One observable state of the animated percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub displayed: u8,
    pub target: u8,
    pub phase: Phase,
}

impl From<&Progression> for Frame {
    fn from(p: &Progression) -> Self {
        Self {
            displayed: p.displayed(),
            target: p.target(),
            phase: p.phase(),
        }
    }
}

/// Handle to a running animation task.
///
/// Dropping the handle stops the task. At most one progression is in
/// flight per animator: every new target supersedes the previous one.
pub struct ProgressAnimator {
    /// `Some(pct)` retargets, `None` cancels the progression.
    target_tx: watch::Sender<Option<u8>>,
    frame_rx: watch::Receiver<Frame>,
    cancel: CancellationToken,
}

impl ProgressAnimator {
    /// Spawn the animation task on the current tokio runtime.
    pub fn spawn(config: DisplayConfig) -> Self {
        Self::spawn_with_token(config, &CancellationToken::new())
    }

    /// Spawn a task that also stops when `parent` is cancelled.
    pub fn spawn_with_token(config: DisplayConfig, parent: &CancellationToken) -> Self {
        let progression = Progression::new(config.step);
        let (target_tx, target_rx) = watch::channel(None);
        let (frame_tx, frame_rx) = watch::channel(Frame::from(&progression));
        let cancel = parent.child_token();

        tokio::spawn(animate(
            progression,
            config,
            target_rx,
            frame_tx,
            cancel.clone(),
        ));

        Self {
            target_tx,
            frame_rx,
            cancel,
        }
    }

    /// Start a new progression toward `percentage`.
    pub fn set_target(&self, percentage: u8) {
        self.target_tx.send_replace(Some(percentage));
    }

    /// Abandon the in-flight progression; the displayed value freezes.
    pub fn cancel(&self) {
        self.target_tx.send_replace(None);
    }

    /// Stop the task. Later targets are ignored.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn frame(&self) -> Frame {
        *self.frame_rx.borrow()
    }

    pub fn displayed(&self) -> u8 {
        self.frame_rx.borrow().displayed
    }

    /// Receiver notified on every published frame.
    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.frame_rx.clone()
    }
}

impl Drop for ProgressAnimator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn animate(
    mut progression: Progression,
    config: DisplayConfig,
    mut targets: watch::Receiver<Option<u8>>,
    frames: watch::Sender<Frame>,
    cancel: CancellationToken,
) {
    // tokio::time::interval panics on a zero period.
    let period = config.step_interval.max(Duration::from_millis(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let start_from: StartFrom = config.start_from;

    loop {
        let advancing = progression.phase() == Phase::Advancing;

        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = targets.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = *targets.borrow_and_update();
                match next {
                    Some(target) => {
                        let phase = progression.retarget(target, start_from);
                        interval.reset();
                        debug!(target, from = progression.origin(), %phase, "progression retargeted");
                    }
                    None => {
                        progression.cancel();
                        debug!(displayed = progression.displayed(), "progression cancelled");
                    }
                }
                frames.send_replace(Frame::from(&progression));
            }
            _ = interval.tick(), if advancing => {
                if let Some(displayed) = progression.tick() {
                    trace!(displayed, "progression step");
                }
                frames.send_replace(Frame::from(&progression));
            }
        }
    }

    debug!("animator stopped");
}
