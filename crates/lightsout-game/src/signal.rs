//! Synchronous publish/subscribe signals.
//!
//! The reactive subjects of the game boundary are modeled as plain observer
//! registration with deterministic, synchronous dispatch: [`Signal::emit`]
//! invokes every subscriber in subscription order before it returns, with no
//! hidden queuing. Subscriptions are released either explicitly through
//! [`Signal::unsubscribe`] or wholesale when the owning component drops its
//! signal, so a torn-down listener can never be notified again.

use std::fmt;

/// Handle identifying one subscription on a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber<T> {
    id: SubscriptionId,
    callback: Box<dyn FnMut(&T)>,
}

/// A single-threaded signal with synchronous subscriber dispatch.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use lightsout_game::Signal;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let mut signal = Signal::new();
/// let id = signal.subscribe(move |value: &u32| sink.borrow_mut().push(*value));
///
/// signal.emit(&7);
/// assert_eq!(*seen.borrow(), vec![7]);
///
/// assert!(signal.unsubscribe(id));
/// signal.emit(&8);
/// assert_eq!(*seen.borrow(), vec![7]);
/// ```
pub struct Signal<T> {
    next_id: u64,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Signal<T> {
    /// Creates a signal with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Registers `callback` and returns the handle that releases it.
    ///
    /// Subscribers are dispatched in subscription order.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Releases the subscription behind `id`.
    ///
    /// Returns whether a subscription was actually removed; releasing twice
    /// is a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        self.subscribers.len() != before
    }

    /// Invokes every subscriber with `value`, in subscription order.
    ///
    /// Dispatch is fully synchronous: all subscribers have run by the time
    /// this returns.
    pub fn emit(&mut self, value: &T) {
        for subscriber in &mut self.subscribers {
            (subscriber.callback)(value);
        }
    }

    /// Returns how many subscriptions are currently registered.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
