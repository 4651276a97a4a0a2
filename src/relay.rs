//! Replay-latest observable values.
//!
//! A [`Relay`] holds a single current value. Subscribers receive that value
//! as soon as they subscribe and every subsequent value, synchronously and in
//! publication order. A [`Subscription`] revokes its callback when it
//! is dropped or explicitly unsubscribed.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

type Callback<T> = Box<dyn FnMut(&T) + Send>;

struct Subscriber<T> {
    id: u64,
    active: AtomicBool,
    callback: Mutex<Callback<T>>,
}

impl<T> Subscriber<T> {
    fn call(&self, value: &T) {
        let mut callback = lock(&self.callback);
        if self.active.load(Ordering::Acquire) {
            (*callback)(value);
        }
    }
}

struct Shared<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<Arc<Subscriber<T>>>>,
    pending: Mutex<VecDeque<T>>,
    delivering: AtomicBool,
    next_id: AtomicU64,
}

impl<T> Shared<T> {
    fn detach(&self, id: u64) {
        lock(&self.subscribers).retain(|subscriber| {
            if subscriber.id != id {
                return true;
            }
            subscriber.active.store(false, Ordering::Release);
            false
        });
    }
}

fn lock<V: ?Sized>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the delivering flag even when a callback unwinds.
struct Delivery<'a>(&'a AtomicBool);

impl Drop for Delivery<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Observable value that replays its latest state to new subscribers.
///
/// Clones share the same value and subscriber list. No relay lock is held
/// while a callback runs, so a callback may publish on, subscribe to or
/// unsubscribe from any relay, including the one notifying it. A value
/// published from inside a callback is queued and delivered, in order, once
/// the current delivery has reached every subscriber.
pub struct Relay<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Relay<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Relay<T> {
    /// Creates a relay holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(initial),
                subscribers: Mutex::new(Vec::new()),
                pending: Mutex::new(VecDeque::new()),
                delivering: AtomicBool::new(false),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Returns a snapshot of the current value.
    #[must_use]
    pub fn value(&self) -> T {
        self.shared
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reads the current value without cloning it.
    pub fn with_value<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        let value = self
            .shared
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        read(&value)
    }

    /// Replaces the current value and notifies every subscriber.
    pub fn accept(&self, value: T) {
        {
            let mut current = self
                .shared
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            current.clone_from(&value);
        }
        self.notify(value);
    }

    /// Applies `mutate` to the current value, then notifies subscribers when
    /// it returns `true`. Returns what `mutate` returned.
    pub fn update(&self, mutate: impl FnOnce(&mut T) -> bool) -> bool {
        let snapshot = {
            let mut current = self
                .shared
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if !mutate(&mut current) {
                return false;
            }
            current.clone()
        };
        self.notify(snapshot);
        true
    }

    /// Registers `callback`, immediately calling it with the current value.
    #[must_use = "dropping the subscription unsubscribes the callback"]
    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        let subscriber = self.subscriber(Box::new(callback));
        let current = {
            let mut subscribers = lock(&self.shared.subscribers);
            subscribers.push(Arc::clone(&subscriber));
            self.value()
        };
        if self.begin_delivery() {
            {
                let _delivery = Delivery(&self.shared.delivering);
                subscriber.call(&current);
            }
            self.drain();
        } else {
            subscriber.call(&current);
        }
        self.subscription(subscriber.id)
    }

    /// Registers `callback` for future values only.
    #[must_use = "dropping the subscription unsubscribes the callback"]
    pub fn subscribe_changes(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        let subscriber = self.subscriber(Box::new(callback));
        let id = subscriber.id;
        lock(&self.shared.subscribers).push(subscriber);
        self.subscription(id)
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared.subscribers).len()
    }

    fn subscriber(&self, callback: Callback<T>) -> Arc<Subscriber<T>> {
        Arc::new(Subscriber {
            id: self.shared.next_id.fetch_add(1, Ordering::Relaxed),
            active: AtomicBool::new(true),
            callback: Mutex::new(callback),
        })
    }

    fn subscription(&self, id: u64) -> Subscription {
        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(live) = weak.upgrade() {
                    live.detach(id);
                }
            })),
        }
    }

    fn notify(&self, value: T) {
        lock(&self.shared.pending).push_back(value);
        self.drain();
    }

    /// Delivers queued values unless another call is already delivering, in
    /// which case that call picks them up.
    fn drain(&self) {
        while self.begin_delivery() {
            {
                let _delivery = Delivery(&self.shared.delivering);
                while let Some(next) = self.next_pending() {
                    self.deliver(&next);
                }
            }
            if lock(&self.shared.pending).is_empty() {
                break;
            }
        }
    }

    fn begin_delivery(&self) -> bool {
        self.shared
            .delivering
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn next_pending(&self) -> Option<T> {
        lock(&self.shared.pending).pop_front()
    }

    fn deliver(&self, value: &T) {
        let subscribers = lock(&self.shared.subscribers).clone();
        for subscriber in &subscribers {
            subscriber.call(value);
        }
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for Relay<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Relay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self
            .shared
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Relay").field("value", &*value).finish()
    }
}

/// Handle that keeps a relay callback registered.
///
/// Dropping the handle, or calling [`Subscription::unsubscribe`], removes the
/// callback; no value is delivered to it afterwards.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Removes the callback from its relay.
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}
