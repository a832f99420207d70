//! Events fired by the guard actions.
//!
//! Every decision dispatches a [`GuardEvent`]. Without registered listeners
//! dispatch is a no-op.
//!
//! ```rust,ignore
//! use carelock::register_event_listeners;
//! use carelock::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::GuardEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners, EventRegistry};
