//! In-process, synchronous publish/subscribe.
//!
//! A [`Broadcaster`] maps event keys to ordered lists of subscribers. A
//! subscriber is either a free function or a method bound to a shared object;
//! both are stored as a [`Callback`] and called the same way on
//! [`Broadcaster::dispatch`].
//!
//! Everything runs on the caller's thread. The broadcaster is neither `Send`
//! nor `Sync`; wrap it in your own synchronisation if you need to, and keep
//! subscribers from calling back into the broadcaster that is dispatching.

mod broadcaster;
pub mod callback;

pub use broadcaster::Broadcaster;
pub use callback::{Callback, Function, Identity, Method};
