use std::sync::OnceLock;

use super::{GuardEvent, Listener};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Listeners, in registration order.
#[derive(Default)]
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns how many listeners handled the event.
    async fn notify(&self, event: &GuardEvent) -> usize {
        let mut handled = 0;
        for listener in self.listeners.iter().filter(|l| l.accepts(event)) {
            listener.handle(event).await;
            handled += 1;
        }
        handled
    }
}

/// Installs the process-wide listeners. Without this call events are dropped.
///
/// ```rust,ignore
/// use carelock::register_event_listeners;
/// use carelock::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::rejections_only());
/// });
/// ```
///
/// The first call wins; later calls are ignored with a warning.
pub fn register_event_listeners<F>(configure: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::default();
    configure(&mut registry);

    let count = registry.len();
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "carelock",
            "msg=\"event listeners already registered, ignoring\""
        );
        return;
    }
    log::debug!(target: "carelock", "msg=\"event listeners registered\", count={count}");
}

pub async fn dispatch(event: GuardEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.notify(&event).await;
    }
}
