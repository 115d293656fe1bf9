use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use generational_box::{GenerationalBox, Owner};
use tracing::{debug, trace};

use crate::tree::{Callback, EventData};

type Handler<E> = Rc<dyn Fn(E)>;

pub(crate) struct Dispatch<E> {
    queue: VecDeque<E>,
    busy: bool,
    handler: Handler<E>,
}

/// Queues events and runs them through the handler one at a time. An event
/// emitted while another is being handled waits for that cycle to finish.
pub struct Emitter<E> {
    inner: GenerationalBox<Dispatch<E>>,
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Emitter<E> {}

impl<E> Emitter<E>
where
    E: 'static,
{
    pub fn new_in<F>(owner: &Owner, handler: F) -> Self
    where
        F: Fn(E) + 'static,
    {
        let inner = owner.insert(Dispatch {
            queue: VecDeque::new(),
            busy: false,
            handler: Rc::new(handler),
        });
        Self { inner }
    }

    pub fn emit(&self, event: E) {
        let handler = {
            let Ok(mut d) = self.inner.try_write() else {
                debug!("emitter detached, event dropped");
                return;
            };
            d.queue.push_back(event);
            if d.busy {
                trace!(queued = d.queue.len(), "event queued behind running cycle");
                return;
            }
            d.busy = true;
            d.handler.clone()
        };
        let _idle = Idle(self.inner);
        loop {
            let next = {
                let Ok(mut d) = self.inner.try_write() else {
                    return;
                };
                match d.queue.pop_front() {
                    Some(event) => event,
                    None => break,
                }
            };
            handler(next);
        }
    }

    /// Wraps `f` into a tree listener that emits the event it builds.
    pub fn callback<F>(&self, f: F) -> Callback
    where
        F: Fn(EventData) -> E + 'static,
    {
        let emitter = *self;
        Rc::new(move |data| emitter.emit(f(data)))
    }

    pub fn is_busy(&self) -> bool {
        self.inner.try_read().map(|d| d.busy).unwrap_or(false)
    }
}

/// Clears the busy flag when the drain loop ends, including by unwinding
/// out of a panicking handler.
struct Idle<E: 'static>(GenerationalBox<Dispatch<E>>);

impl<E: 'static> Drop for Idle<E> {
    fn drop(&mut self) {
        if let Ok(mut d) = self.0.try_write() {
            d.busy = false;
        }
    }
}

impl<E> Debug for Emitter<E>
where
    E: 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("busy", &self.is_busy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};

    use generational_box::{AnyStorage, UnsyncStorage};

    use super::*;

    #[test]
    fn events_emitted_while_busy_run_after_the_current_one() {
        let owner = UnsyncStorage::owner();
        let log = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<Emitter<u32>>>> = Rc::new(RefCell::new(None));
        let sink = log.clone();
        let this = slot.clone();
        let emitter = Emitter::new_in(&owner, move |e: u32| {
            sink.borrow_mut().push(format!("start {}", e));
            if e == 1 {
                if let Some(emitter) = *this.borrow() {
                    emitter.emit(2);
                }
            }
            sink.borrow_mut().push(format!("end {}", e));
        });
        *slot.borrow_mut() = Some(emitter);
        emitter.emit(1);
        assert_eq!(
            *log.borrow(),
            vec!["start 1", "end 1", "start 2", "end 2"]
        );
        assert!(!emitter.is_busy());
    }

    #[test]
    fn detached_emitter_ignores_events() {
        let owner = UnsyncStorage::owner();
        let emitter = Emitter::new_in(&owner, |_: u32| panic!("handler ran"));
        drop(owner);
        emitter.emit(1);
    }

    #[test]
    fn panicking_handler_leaves_emitter_usable() {
        let owner = UnsyncStorage::owner();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let emitter = Emitter::new_in(&owner, move |e: u32| {
            if e == 0 {
                panic!("handler failed");
            }
            sink.borrow_mut().push(e);
        });
        let result = panic::catch_unwind(AssertUnwindSafe(|| emitter.emit(0)));
        assert!(result.is_err());
        assert!(!emitter.is_busy());
        emitter.emit(1);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn callback_maps_event_data() {
        let owner = UnsyncStorage::owner();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let emitter = Emitter::new_in(&owner, move |e: String| sink.borrow_mut().push(e));
        let callback = emitter.callback(|data| data.value());
        callback(EventData::Input("hi".into()));
        assert_eq!(*log.borrow(), vec!["hi".to_string()]);
    }
}
