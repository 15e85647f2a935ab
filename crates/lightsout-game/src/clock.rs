//! The gameplay clock.

use std::time::Duration;

/// Handle identifying one ticking stream of a [`Clock`].
///
/// [`Clock::start`] hands out a fresh source and invalidates every earlier
/// one, so a timer driver that keeps delivering ticks from a cancelled
/// stream can never advance the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSource {
    epoch: u64,
}

/// Elapsed-time clock advanced by an external periodic driver.
///
/// The clock itself holds no thread and no timer: the embedding owns the
/// periodic source (one tick per [`interval`](Self::interval)) and forwards
/// each tick together with the [`TickSource`] obtained from
/// [`start`](Self::start). Cancellation is immediate — after
/// [`stop`](Self::stop) returns, no handle can produce a counted tick.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use lightsout_game::Clock;
///
/// let mut clock = Clock::new(Duration::from_secs(1));
/// let source = clock.start();
/// assert!(clock.tick(source));
/// assert_eq!(clock.elapsed(), 1);
///
/// clock.stop();
/// assert!(!clock.tick(source)); // cancelled stream
/// assert_eq!(clock.elapsed(), 1); // value is retained
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    elapsed: u32,
    running: bool,
    epoch: u64,
    interval: Duration,
}

impl Clock {
    /// Creates a stopped clock at zero with the given tick interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            elapsed: 0,
            running: false,
            epoch: 0,
            interval,
        }
    }

    /// Begins a new ticking stream and returns its source handle.
    ///
    /// Starting while already running cancels the prior stream first, so a
    /// re-entrant start never produces duplicate ticks.
    pub fn start(&mut self) -> TickSource {
        self.epoch += 1;
        self.running = true;
        TickSource { epoch: self.epoch }
    }

    /// Cancels the current ticking stream; the elapsed value is retained.
    pub fn stop(&mut self) {
        self.epoch += 1;
        self.running = false;
    }

    /// Resets the elapsed value to zero.
    ///
    /// Does not stop the clock: a running clock keeps counting from zero.
    pub fn clear(&mut self) {
        self.elapsed = 0;
    }

    /// Counts one tick of the given stream.
    ///
    /// Returns whether the tick was counted; ticks from cancelled streams
    /// and ticks arriving while stopped are ignored.
    pub fn tick(&mut self, source: TickSource) -> bool {
        if !self.running || source.epoch != self.epoch {
            return false;
        }
        self.elapsed += 1;
        true
    }

    /// Returns the elapsed time in ticks.
    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Returns whether a ticking stream is currently active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the fixed interval the external driver should tick at.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
