use std::sync::Arc;
use tokio::sync::watch;

/// Observable configuration value.
///
/// Clones share the same value. Readers take a snapshot with [`Property::get`];
/// observers call [`Property::subscribe`] and await `changed()` instead of
/// registering callbacks.
#[derive(Debug)]
pub struct Property<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T: Clone + PartialEq> Property<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Store a new value, notifying subscribers only if it differs
    pub fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}
