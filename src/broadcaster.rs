use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::callback::{Callback, Function, FunctionBinding, Method, MethodBinding};

type Callbacks<E, P> = Vec<Callback<E, P>>;

/// Synchronous publish/subscribe dispatcher.
///
/// `E` is the event key, `P` the parameter value handed to every subscriber
/// (use a tuple for several parameters, `()` for none). Subscribers are
/// invoked in the order they subscribed, on the calling thread, before
/// [`Broadcaster::dispatch`] returns.
///
/// ```
/// use broadcaster::Broadcaster;
///
/// fn update(event: &'static str, arg: i32) {
///     println!("{}({})", event, arg);
/// }
///
/// let mut broadcaster: Broadcaster<&'static str, i32> = Broadcaster::new();
/// broadcaster.subscribe("click", update);
/// broadcaster.dispatch("click", 5); // click(5)
/// ```
///
/// Re-entrant use is not supported: a subscriber cannot subscribe,
/// unsubscribe or dispatch on the broadcaster that is currently calling it.
pub struct Broadcaster<E, P> {
    events: HashMap<E, Callbacks<E, P>>,
}

impl<E, P> Broadcaster<E, P>
where
    E: Eq + Hash + Clone + Debug,
    P: Clone,
{
    pub fn new() -> Broadcaster<E, P> {
        Broadcaster {
            events: HashMap::new(),
        }
    }

    /// Subscribes a free function to `event`.
    ///
    /// A previous subscription of the same function to the same event is
    /// replaced, so the function ends up last in the dispatch order.
    pub fn subscribe(&mut self, event: E, callback: Function<E, P>) {
        let binding = FunctionBinding::new(callback);
        log::debug!("subscribe {:?} -> function {:#x}", event, binding.address());
        let (callbacks, created) = self.callbacks_or_create(event);
        if !created {
            remove_first(callbacks, |cb| cb.matches_function(callback));
        }
        callbacks.push(Callback::from(binding));
    }

    /// Subscribes `method` of `object` to `event`.
    ///
    /// The broadcaster keeps only a weak reference to `object`; once the
    /// last strong reference is dropped the binding stops firing.
    ///
    /// Identity is the method alone, not the object. Subscribing the same
    /// method of a second object to the same event replaces the first
    /// object's binding.
    pub fn subscribe_method<T>(&mut self, event: E, object: &Rc<RefCell<T>>, method: Method<T, E, P>)
    where
        T: 'static,
        E: 'static,
        P: 'static,
    {
        let binding = MethodBinding::new(object, method);
        log::debug!(
            "subscribe {:?} -> {}::{:#x} on {:#x}",
            event,
            binding.owner_name(),
            binding.address(),
            binding.object_address()
        );
        let (callbacks, created) = self.callbacks_or_create(event);
        if !created {
            remove_first(callbacks, |cb| cb.matches_method(method));
        }
        callbacks.push(Callback::from(binding));
    }

    /// Removes the subscription of `callback` to `event`, if there is one.
    pub fn unsubscribe(&mut self, event: &E, callback: Function<E, P>) {
        if let Some(callbacks) = self.events.get_mut(event) {
            if remove_first(callbacks, |cb| cb.matches_function(callback)) {
                log::debug!("unsubscribe {:?} -> function {:#x}", event, callback as usize);
            }
        }
    }

    /// Removes the subscription of `method` to `event`, if there is one.
    ///
    /// `object` is not consulted: whichever binding of `method` exists for the
    /// event is removed, even if it was made on another object.
    pub fn unsubscribe_method<T: 'static>(&mut self, event: &E, object: &Rc<RefCell<T>>, method: Method<T, E, P>) {
        if let Some(callbacks) = self.events.get_mut(event) {
            if remove_first(callbacks, |cb| cb.matches_method(method)) {
                log::debug!(
                    "unsubscribe {:?} -> method {:#x} (requested on {:#x})",
                    event,
                    method as usize,
                    Rc::as_ptr(object) as *const () as usize
                );
            }
        }
    }

    /// Invokes every subscriber of `event`, in subscription order.
    ///
    /// Does nothing if `event` was never subscribed to. A panic in a
    /// subscriber propagates to the caller and the remaining subscribers of
    /// this round are not called.
    pub fn dispatch(&self, event: E, params: P) {
        let callbacks = match self.events.get(&event) {
            Some(callbacks) => callbacks,
            None => return,
        };
        log::trace!("dispatch {:?} to {} subscriber(s)", event, callbacks.len());
        for callback in callbacks {
            log::trace!("invoke {:?} -> {:?}", event, callback);
            callback.invoke(event.clone(), params.clone());
        }
    }

    /// Releases every subscription of every event. Safe to call repeatedly.
    pub fn clear(&mut self) {
        if self.events.is_empty() {
            return;
        }
        log::debug!("clear {} event(s)", self.events.len());
        self.events.clear();
    }

    fn callbacks_or_create(&mut self, event: E) -> (&mut Callbacks<E, P>, bool) {
        let created = !self.events.contains_key(&event);
        (self.events.entry(event).or_default(), created)
    }

    #[cfg(test)]
    fn callbacks(&self, event: &E) -> Option<&Callbacks<E, P>> {
        self.events.get(event)
    }
}

impl<E, P> Default for Broadcaster<E, P>
where
    E: Eq + Hash + Clone + Debug,
    P: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> Drop for Broadcaster<E, P> {
    fn drop(&mut self) {
        self.events.clear();
    }
}

fn remove_first<E, P, F>(callbacks: &mut Callbacks<E, P>, matches: F) -> bool
where
    F: Fn(&Callback<E, P>) -> bool,
{
    match callbacks.iter().position(matches) {
        Some(index) => {
            callbacks.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(event: u8, _params: ()) {
        std::hint::black_box(event);
    }

    fn other(event: u8, _params: ()) {
        std::hint::black_box(u32::from(event) + 1);
    }

    #[test]
    fn unknown_event_has_no_entry() {
        let broadcaster: Broadcaster<u8, ()> = Broadcaster::new();
        broadcaster.dispatch(1, ());
        assert!(broadcaster.callbacks(&1).is_none());
    }

    #[test]
    fn emptied_event_keeps_its_entry() {
        let mut broadcaster: Broadcaster<u8, ()> = Broadcaster::new();
        broadcaster.subscribe(1, noop);
        broadcaster.unsubscribe(&1, noop);
        assert_eq!(broadcaster.callbacks(&1).map(Vec::len), Some(0));
    }

    #[test]
    fn unsubscribe_unknown_event_creates_nothing() {
        let mut broadcaster: Broadcaster<u8, ()> = Broadcaster::new();
        broadcaster.unsubscribe(&2, noop);
        assert!(broadcaster.callbacks(&2).is_none());
    }

    #[test]
    fn resubscribe_moves_binding_to_the_end() {
        let mut broadcaster: Broadcaster<u8, ()> = Broadcaster::new();
        broadcaster.subscribe(1, noop);
        broadcaster.subscribe(1, other);
        broadcaster.subscribe(1, noop);
        let callbacks = broadcaster.callbacks(&1).unwrap();
        assert_eq!(callbacks.len(), 2);
        assert!(callbacks[0].matches_function(other));
        assert!(callbacks[1].matches_function(noop));
    }

    #[test]
    fn clear_drops_every_event() {
        let mut broadcaster: Broadcaster<u8, ()> = Broadcaster::new();
        broadcaster.subscribe(1, noop);
        broadcaster.subscribe(2, noop);
        broadcaster.clear();
        broadcaster.clear();
        assert!(broadcaster.callbacks(&1).is_none());
        assert!(broadcaster.callbacks(&2).is_none());
    }
}
