//! Periodic tick scheduling.
//!
//! The scheduler is a two-state machine (Stopped / Running). While running
//! it owns one tokio task that emits a [`TickPulse`] every `1000 / rate`
//! milliseconds. It never touches the configuration: the foreground loop
//! receives pulses, checks them with [`CeremonyScheduler::accepts`] and
//! runs the engine itself, so ticks and user edits never interleave.

use std::mem;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// One tick signal.
///
/// `epoch` identifies the Running period that produced it; every start
/// bumps the epoch so pulses from a cancelled timer can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPulse {
    pub epoch: u64,
    pub seq: u64,
}

#[derive(Debug)]
enum SchedulerState {
    Stopped,
    Running { rate: u32, timer: JoinHandle<()> },
}

/// Drives ceremony ticks at a configurable rate.
///
/// Must be started from inside a tokio runtime. Dropping the scheduler
/// cancels its timer.
#[derive(Debug)]
pub struct CeremonyScheduler {
    pulses: UnboundedSender<TickPulse>,
    state: SchedulerState,
    epoch: u64,
}

impl CeremonyScheduler {
    /// Create a stopped scheduler that delivers pulses to `pulses`.
    pub fn new(pulses: UnboundedSender<TickPulse>) -> Self {
        Self {
            pulses,
            state: SchedulerState::Stopped,
            epoch: 0,
        }
    }

    /// Create a stopped scheduler together with its pulse receiver.
    pub fn channel() -> (Self, UnboundedReceiver<TickPulse>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Tick period for a rate in ticks per second. A zero rate is treated as 1.
    pub fn period(rate: u32) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(rate.max(1)))
    }

    /// Stopped -> Running. Returns false (and does nothing) when already
    /// running, so a second timer is never installed.
    pub fn start(&mut self, rate: u32) -> bool {
        if self.is_running() {
            debug!("Scheduler already running; start ignored");
            return false;
        }

        self.epoch += 1;
        let epoch = self.epoch;
        let period = Self::period(rate);
        let pulses = self.pulses.clone();

        let timer = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut seq = 0u64;
            loop {
                ticker.tick().await;
                seq += 1;
                if pulses.send(TickPulse { epoch, seq }).is_err() {
                    // Receiver gone: nobody left to tick for.
                    break;
                }
            }
        });

        info!("Ceremony started at {} ticks/s (epoch {})", rate, epoch);
        self.state = SchedulerState::Running { rate, timer };
        true
    }

    /// Running -> Stopped. Cancels the timer task; no-op when stopped.
    pub fn stop(&mut self) {
        if let SchedulerState::Running { timer, .. } =
            mem::replace(&mut self.state, SchedulerState::Stopped)
        {
            timer.abort();
            info!("Ceremony paused (epoch {})", self.epoch);
        }
    }

    /// Apply a new rate. When running, the old timer is cancelled before
    /// the new one is installed; when stopped this does nothing.
    pub fn reconfigure_rate(&mut self, rate: u32) {
        if self.is_running() {
            self.stop();
            self.start(rate);
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    /// Current rate while running.
    pub fn rate(&self) -> Option<u32> {
        match self.state {
            SchedulerState::Running { rate, .. } => Some(rate),
            SchedulerState::Stopped => None,
        }
    }

    /// Whether a received pulse should still be acted on.
    ///
    /// Pulses queued before a stop or restart are rejected.
    pub fn accepts(&self, pulse: &TickPulse) -> bool {
        self.is_running() && pulse.epoch == self.epoch
    }
}

impl Drop for CeremonyScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn drain(rx: &mut UnboundedReceiver<TickPulse>) -> Vec<TickPulse> {
        let mut pulses = Vec::new();
        while let Ok(pulse) = rx.try_recv() {
            pulses.push(pulse);
        }
        pulses
    }

    #[test]
    fn test_period() {
        assert_eq!(CeremonyScheduler::period(1), Duration::from_secs(1));
        assert_eq!(CeremonyScheduler::period(4), Duration::from_millis(250));
        assert_eq!(CeremonyScheduler::period(0), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_rate() {
        let (mut scheduler, mut rx) = CeremonyScheduler::channel();
        assert!(scheduler.start(10));

        sleep(Duration::from_millis(1_050)).await;
        scheduler.stop();

        let pulses = drain(&mut rx);
        assert_eq!(pulses.len(), 10);
        assert!(pulses.windows(2).all(|w| w[1].seq == w[0].seq + 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_one_timer() {
        let (mut scheduler, mut rx) = CeremonyScheduler::channel();
        assert!(scheduler.start(10));
        assert!(!scheduler.start(10));

        sleep(Duration::from_millis(1_050)).await;
        scheduler.stop();

        assert_eq!(drain(&mut rx).len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_silences_timer() {
        let (mut scheduler, mut rx) = CeremonyScheduler::channel();
        scheduler.start(20);
        sleep(Duration::from_millis(120)).await;
        scheduler.stop();
        scheduler.stop();
        drain(&mut rx);

        sleep(Duration::from_secs(2)).await;
        assert!(drain(&mut rx).is_empty());
        assert!(!scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_replaces_timer() {
        let (mut scheduler, mut rx) = CeremonyScheduler::channel();
        scheduler.start(2);
        scheduler.reconfigure_rate(10);
        assert_eq!(scheduler.rate(), Some(10));

        sleep(Duration::from_millis(1_050)).await;
        scheduler.stop();

        let pulses = drain(&mut rx);
        assert_eq!(pulses.len(), 10);
        assert!(pulses.iter().all(|p| p.epoch == 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_while_stopped_is_noop() {
        let (mut scheduler, _rx) = CeremonyScheduler::channel();
        scheduler.reconfigure_rate(10);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.rate(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_pulses_rejected() {
        let (mut scheduler, mut rx) = CeremonyScheduler::channel();
        scheduler.start(10);
        sleep(Duration::from_millis(150)).await;
        let pulse = rx.recv().await.unwrap();
        assert!(scheduler.accepts(&pulse));

        scheduler.reconfigure_rate(5);
        assert!(!scheduler.accepts(&pulse));

        scheduler.stop();
        let current = TickPulse { epoch: 2, seq: 1 };
        assert!(!scheduler.accepts(&current));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (mut scheduler, mut rx) = CeremonyScheduler::channel();
        scheduler.start(10);
        drop(scheduler);

        sleep(Duration::from_secs(1)).await;
        assert!(drain(&mut rx).is_empty());
    }
}
