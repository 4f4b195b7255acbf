use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// An observable cell holding one piece of session state.
///
/// Cloning a Store yields another handle to the same cell. Writes replace the whole value and
/// notify every subscriber synchronously, in subscription order, before returning. A write made
/// by a subscriber is queued behind the deliveries already pending, so every subscriber's last
/// delivery is the value the store ends up holding.
pub struct Store<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Subscriber<T>>>>,
    pending: Rc<RefCell<VecDeque<(Subscriber<T>, T)>>>,
    draining: Rc<Cell<bool>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            subscribers: Rc::clone(&self.subscribers),
            pending: Rc::clone(&self.pending),
            draining: Rc::clone(&self.draining),
        }
    }
}

impl<T: Clone + 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(initial)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            pending: Rc::new(RefCell::new(VecDeque::new())),
            draining: Rc::new(Cell::new(false)),
        }
    }

    /// Get a copy of the current value.
    pub fn get(&self) -> T { self.value.borrow().clone() }

    /// Borrow the current value without copying it.
    /// The store must not be written from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R { f(&self.value.borrow()) }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.notify();
    }

    /// Replace the value with one computed from the current value, then notify subscribers.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = self.with(f);
        self.set(next);
    }

    /// Register a subscriber. It is called right away with the current value, then after every
    /// write until the returned Subscription is dropped.
    pub fn subscribe(&self, subscriber: impl Fn(&T) + 'static) -> Subscription {
        let subscriber: Subscriber<T> = Rc::new(subscriber);
        self.subscribers.borrow_mut().push(Rc::clone(&subscriber));
        log::trace!("[state::store] subscribed ({} total)", self.subscriber_count());

        let current = self.get();
        subscriber(&current);

        let subscribers: Weak<RefCell<Vec<Subscriber<T>>>> = Rc::downgrade(&self.subscribers);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(subscribers) = subscribers.upgrade() {
                    subscribers.borrow_mut().retain(|item| !Rc::ptr_eq(item, &subscriber));
                }
            })),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize { self.subscribers.borrow().len() }

    fn notify(&self) {
        let value = self.get();
        {
            let subscribers = self.subscribers.borrow();
            log::trace!("[state::store] notifying {} subscribers", subscribers.len());
            let mut pending = self.pending.borrow_mut();
            pending.extend(subscribers.iter().map(|s| (Rc::clone(s), value.clone())));
        }

        // A write from inside a subscriber only queues; the outermost write delivers.
        if self.draining.replace(true) { return }
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((subscriber, value)) = next else { break };
            (subscriber)(&value);
        }
        self.draining.set(false);
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

/// Handle for a registered subscriber. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {}

    /// Keep the subscriber registered for as long as the store lives.
    pub fn detach(mut self) { self.unsubscribe = None; }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.unsubscribe.is_some()).finish()
    }
}
