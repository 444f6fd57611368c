//! Scheduler emitting one tick per elapsed second.
//!
//! The clock is polled every 500 ms and a [`Tick`] is broadcast each time
//! the whole number of seconds since [`Timer::start`] grows. If polling is
//! delayed, the missed seconds are still delivered one by one. A [`Ticks`]
//! listener that falls behind the broadcast buffer gets the seconds it lost
//! filled back in, so listeners never skip a second.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default polling period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(500);

const CHANNEL_CAPACITY: usize = 64;

/// Whole seconds elapsed since the timer started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tick {
    pub seconds: u64,
}

/// Per-second scheduler with an explicit start/stop lifecycle.
pub struct Timer {
    period: Duration,
    sender: broadcast::Sender<Tick>,
    running: Option<(CancellationToken, JoinHandle<()>)>,
}

impl Timer {
    pub fn new() -> Self {
        Self::with_period(DEFAULT_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            period,
            sender,
            running: None,
        }
    }

    /// Listen for ticks. Subscribe before [`Timer::start`] to see every
    /// second from the first one.
    pub fn subscribe(&self) -> Ticks {
        let last_second = if self.is_running() { None } else { Some(0) };
        Ticks::new(self.sender.subscribe(), last_second)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start ticking. Does nothing if already running.
    pub fn start(&mut self) {
        if self.running.is_some() {
            return;
        }
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(self.period, self.sender.clone(), cancel.clone()));
        self.running = Some((cancel, handle));
        info!(period_ms = self.period.as_millis() as u64, "Timer started");
    }

    /// Stop ticking and wait for the polling task to finish.
    pub async fn stop(&mut self) {
        if let Some((cancel, handle)) = self.running.take() {
            cancel.cancel();
            if let Err(e) = handle.await {
                debug!(error = %e, "Timer task ended abnormally");
            }
            info!("Timer stopped");
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some((cancel, _)) = self.running.take() {
            cancel.cancel();
        }
    }
}

/// Receiving end of a [`Timer`].
#[derive(Debug)]
pub struct Ticks {
    receiver: broadcast::Receiver<Tick>,
    /// Last second handed out, `None` until the first tick when subscribed
    /// to a running timer.
    last_second: Option<u64>,
    /// Tick received after a gap, handed out once the gap is filled.
    pending: Option<Tick>,
}

impl Ticks {
    pub fn new(receiver: broadcast::Receiver<Tick>, last_second: Option<u64>) -> Self {
        Self {
            receiver,
            last_second,
            pending: None,
        }
    }

    /// Next second, or `None` once the timer is gone. Cancel safe.
    pub async fn recv(&mut self) -> Option<Tick> {
        loop {
            if let Some(tick) = self.next_buffered() {
                return Some(tick);
            }
            match self.receiver.recv().await {
                Ok(tick) => self.pending = Some(tick),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Tick listener fell behind, replaying missed seconds");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    fn next_buffered(&mut self) -> Option<Tick> {
        let pending = self.pending?;
        let seconds = match self.last_second {
            // A restarted timer counts from 1 again.
            Some(last) if last + 1 < pending.seconds => last + 1,
            _ => {
                self.pending = None;
                pending.seconds
            }
        };
        self.last_second = Some(seconds);
        Some(Tick { seconds })
    }
}

async fn run(period: Duration, sender: broadcast::Sender<Tick>, cancel: CancellationToken) {
    let start = Instant::now();
    let mut last_second = 0u64;
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let elapsed = start.elapsed().as_secs();
                while last_second < elapsed {
                    last_second += 1;
                    // Fails only when nobody is subscribed.
                    let _ = sender.send(Tick { seconds: last_second });
                }
            }
        }
    }
}
