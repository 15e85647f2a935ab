//! The press counter.

/// Monotonic counter for qualifying player presses.
///
/// The counter itself enforces no preconditions: the session only increments
/// it while a game is running, and the counter does not re-check that.
///
/// # Examples
///
/// ```
/// use lightsout_game::Counter;
///
/// let mut counter = Counter::new();
/// counter.add_value();
/// counter.add_value();
/// assert_eq!(counter.value(), 2);
///
/// counter.clear();
/// assert_eq!(counter.value(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    value: u32,
}

impl Counter {
    /// Creates a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter by one.
    pub fn add_value(&mut self) {
        self.value += 1;
    }

    /// Resets the counter to zero.
    pub fn clear(&mut self) {
        self.value = 0;
    }

    /// Returns the current count.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }
}
