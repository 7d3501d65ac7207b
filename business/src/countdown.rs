//! Verification-code countdown.
//!
//! Two pieces:
//! - [`Countdown`]: the per-flow value, decremented one second per tick.
//! - [`Ticker`]: a clock source that delivers one tick per second over a
//!   `flume` channel until it is cancelled or dropped.
//!
//! The presentation layer drains pending ticks into the owning flow before it
//! handles the next user event, so ticks and handlers never interleave mid-way.

use std::time::Duration;

use flume::{Receiver, TryRecvError};
use log::debug;
use tokio_util::sync::CancellationToken;

/// Lifetime of an emailed code, in seconds.
pub const CODE_TTL_SECS: u32 = 300;

/// Interval between two ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Result of applying one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was armed; the tick had no effect.
    Idle,
    /// Still counting; carries the seconds left.
    Running(u32),
    /// This tick brought the countdown to zero.
    Expired,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    time_left: u32,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the countdown at `seconds`.
    pub fn arm(&mut self, seconds: u32) {
        self.time_left = seconds;
    }

    /// Stops the countdown without reporting expiry.
    pub fn disarm(&mut self) {
        self.time_left = 0;
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.time_left > 0
    }

    /// Applies one elapsed second. `Expired` is returned exactly once, on the
    /// transition from 1 to 0.
    pub fn tick(&mut self) -> TickOutcome {
        match self.time_left {
            0 => TickOutcome::Idle,
            1 => {
                self.time_left = 0;
                TickOutcome::Expired
            }
            left => {
                self.time_left = left - 1;
                TickOutcome::Running(self.time_left)
            }
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted(&self) -> String {
        format_time(self.time_left)
    }
}

/// Formats seconds as zero-padded `MM:SS`. Minutes are not capped at 59.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// A one-per-second clock running on the tokio runtime.
///
/// The task stops when [`Ticker::cancel`] is called or the ticker is dropped.
#[derive(Debug)]
pub struct Ticker {
    ticks: Receiver<()>,
    cancel_token: CancellationToken,
}

impl Ticker {
    /// Spawns a ticker with the default one-second interval.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn() -> Self {
        Self::with_interval(TICK_INTERVAL)
    }

    pub fn with_interval(period: Duration) -> Self {
        let (tx, rx) = flume::unbounded();
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(()).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Ticker stopped");
        });

        Self {
            ticks: rx,
            cancel_token,
        }
    }

    /// Number of ticks delivered since the last call, without waiting.
    pub fn drain(&self) -> u32 {
        let mut count = 0;
        loop {
            match self.ticks.try_recv() {
                Ok(()) => count += 1,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return count,
            }
        }
    }

    /// Waits for the next tick. Returns `false` once the ticker has stopped.
    pub async fn next(&self) -> bool {
        self.ticks.recv_async().await.is_ok()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
