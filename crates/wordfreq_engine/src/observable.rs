use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// A last-known-value holder with subscriber notification.
///
/// New subscribers immediately receive the current value, then every
/// subsequently published value in order. Read-only outside the engine:
/// only the owning control flow publishes.
#[derive(Debug)]
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

#[derive(Debug)]
struct Inner<T> {
    value: T,
    subscribers: Vec<Sender<T>>,
}

impl<T: Clone> Observable<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Returns the current value.
    pub fn get(&self) -> T {
        self.inner.lock().expect("observable lock").value.clone()
    }

    /// Registers a subscriber; the current value is replayed first.
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.inner.lock().expect("observable lock");
        let _ = tx.send(inner.value.clone());
        inner.subscribers.push(tx);
        rx
    }

    pub(crate) fn publish(&self, value: T) {
        let mut inner = self.inner.lock().expect("observable lock");
        inner.value = value.clone();
        // Dropped receivers are pruned as soon as a send fails.
        inner.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
