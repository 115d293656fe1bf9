use std::fmt::{self, Debug, Formatter};

use generational_box::{BorrowError, GenerationalBox, Owner};
use slab::Slab;
use tracing::{debug, trace};

type Observer<S> = Box<dyn FnMut(&S)>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(usize);

pub(crate) struct StoreData<S> {
    snapshot: S,
    version: u64,
    // `None` while the observer is being called.
    observers: Slab<Option<Observer<S>>>,
    notifying: bool,
    pending: bool,
}

/// Holds the current snapshot of one application and tells subscribers
/// whenever a new one is set.
pub struct Store<S> {
    inner: GenerationalBox<StoreData<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Store<S> {}

impl<S> Store<S>
where
    S: Clone + 'static,
{
    pub fn new_in(owner: &Owner, initial: S) -> Self {
        let inner = owner.insert(StoreData {
            snapshot: initial,
            version: 0,
            observers: Slab::new(),
            notifying: false,
            pending: false,
        });
        Self { inner }
    }

    /// # Panics
    ///
    /// Panics if the owner has been dropped. See [`Store::try_get`].
    pub fn get(&self) -> S {
        self.inner.read().snapshot.clone()
    }

    /// The current snapshot, or `None` once the store is detached.
    pub fn try_get(&self) -> Option<S> {
        self.inner.try_read().ok().map(|data| data.snapshot.clone())
    }

    /// Number of snapshots set since creation, zero once detached.
    pub fn version(&self) -> u64 {
        self.inner.try_read().map(|data| data.version).unwrap_or(0)
    }

    pub fn is_detached(&self) -> bool {
        matches!(self.inner.try_read(), Err(BorrowError::Dropped(_)))
    }

    pub fn set(&self, snapshot: S) {
        let Ok(mut data) = self.inner.try_write() else {
            debug!("store detached, snapshot dropped");
            return;
        };
        data.snapshot = snapshot;
        data.version += 1;
        trace!(version = data.version, "snapshot set");
        data.pending = true;
        if data.notifying {
            return;
        }
        data.notifying = true;
        drop(data);
        self.flush();
    }

    /// Computes the next snapshot from the current one and sets it.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&S) -> S,
    {
        let Some(current) = self.try_get() else {
            debug!("store detached, update dropped");
            return;
        };
        self.set(f(&current));
    }

    /// Registers `observer`. Returns `None` when the store is detached, in
    /// which case the observer is dropped without being called.
    pub fn subscribe<F>(&self, observer: F) -> Option<SubscriptionId>
    where
        F: FnMut(&S) + 'static,
    {
        let Ok(mut data) = self.inner.try_write() else {
            debug!("store detached, observer dropped");
            return None;
        };
        let key = data.observers.insert(Some(Box::new(observer)));
        Some(SubscriptionId(key))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Ok(mut data) = self.inner.try_write() else {
            return false;
        };
        if data.observers.contains(id.0) {
            data.observers.remove(id.0);
            true
        } else {
            false
        }
    }

    /// Delivers the current snapshot to every observer again.
    pub fn notify(&self) {
        let Ok(mut data) = self.inner.try_write() else {
            debug!("store detached, notify dropped");
            return;
        };
        data.pending = true;
        if data.notifying {
            return;
        }
        data.notifying = true;
        drop(data);
        self.flush();
    }

    fn flush(&self) {
        loop {
            let (snapshot, keys) = {
                // An observer may drop the owner mid-pass.
                let Ok(mut data) = self.inner.try_write() else {
                    return;
                };
                if !data.pending {
                    data.notifying = false;
                    return;
                }
                data.pending = false;
                let keys = data.observers.iter().map(|(k, _)| k).collect::<Vec<_>>();
                (data.snapshot.clone(), keys)
            };
            for key in keys {
                let observer = match self.inner.try_write() {
                    Ok(mut data) => data.observers.get_mut(key).and_then(Option::take),
                    Err(_) => return,
                };
                if let Some(mut observer) = observer {
                    observer(&snapshot);
                    let Ok(mut data) = self.inner.try_write() else {
                        return;
                    };
                    // The observer may have unsubscribed itself meanwhile.
                    if let Some(slot) = data.observers.get_mut(key) {
                        if slot.is_none() {
                            *slot = Some(observer);
                        }
                    }
                }
            }
        }
    }
}

impl<S> Debug for Store<S>
where
    S: Debug + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Ok(data) = self.inner.try_read() else {
            return f.write_str("Store(detached)");
        };
        f.debug_struct("Store")
            .field("snapshot", &data.snapshot)
            .field("version", &data.version)
            .field("observers", &data.observers.len())
            .finish()
    }
}
