use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Store::subscribe`], used to unsubscribe later.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

struct StoreInner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    next_subscription: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
}

/// Observable single-threaded state container.
///
/// Cloning a `Store` yields another handle to the same value. The owner of a
/// slice of state keeps the `Store`; everybody else gets a [`StoreReader`]
/// which can read and subscribe but not write.
///
/// Listeners run synchronously after every write, in subscription order, with
/// a snapshot of the new value. They may write to any store (including this
/// one) because no borrow is held while they run.
pub struct Store<T> {
    inner: Rc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

impl<T: Clone + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                value: RefCell::new(value),
                version: Cell::new(0),
                next_subscription: Cell::new(1),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Read-only view sharing the same value.
    pub fn reader(&self) -> StoreReader<T> {
        StoreReader {
            store: self.clone(),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Number of writes so far.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Replaces the value and notifies listeners.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Mutates the value in place and notifies listeners.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.inner.value.borrow_mut());
        self.notify();
        out
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Returns `true` if the listener was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self) {
        self.inner.version.set(self.inner.version.get() + 1);
        let snapshot = self.get();
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl<T: Clone + Default + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Read/subscribe half of a [`Store`].
pub struct StoreReader<T> {
    store: Store<T>,
}

impl<T> Clone for StoreReader<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StoreReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.store.fmt(f)
    }
}

impl<T: Clone + 'static> StoreReader<T> {
    pub fn get(&self) -> T {
        self.store.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.store.with(f)
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn set_replaces_value_and_bumps_version() {
        let store = Store::new(1u32);
        store.set(5);
        assert_eq!(store.get(), 5);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn listeners_see_every_write_in_order() {
        let store = Store::new(0u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |v| sink.borrow_mut().push(*v));

        store.set(1);
        store.update(|v| *v += 10);
        assert_eq!(*seen.borrow(), vec![1, 11]);
    }

    #[test]
    fn reader_observes_writer() {
        let store = Store::new(String::from("a"));
        let reader = store.reader();
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        reader.subscribe(move |v: &String| *sink.borrow_mut() = v.clone());

        store.set("b".to_string());
        assert_eq!(reader.get(), "b");
        assert_eq!(*seen.borrow(), "b");
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = Store::new(false);
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.set(true);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set(false);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn listener_may_write_back_into_another_store() {
        let source = Store::new(0i32);
        let mirror = Store::new(0i32);
        let m = mirror.clone();
        source.subscribe(move |v| m.set(*v * 2));

        source.set(21);
        assert_eq!(mirror.get(), 42);
    }

    #[test]
    fn listener_may_read_its_own_store() {
        let store = Store::new(3u8);
        let handle = store.clone();
        let seen = Rc::new(RefCell::new(0u8));
        let sink = Rc::clone(&seen);
        store.subscribe(move |_| *sink.borrow_mut() = handle.get());

        store.set(9);
        assert_eq!(*seen.borrow(), 9);
    }
}
