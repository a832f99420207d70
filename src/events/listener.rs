use async_trait::async_trait;

use super::GuardEvent;

/// Receives guard events after the decision has been made.
///
/// Listeners cannot change a decision, and dispatch waits for each one in
/// turn, so slow work belongs on a spawned task.
///
/// ```rust,ignore
/// use carelock::events::{GuardEvent, Listener};
/// use async_trait::async_trait;
///
/// struct PagerListener;
///
/// #[async_trait]
/// impl Listener for PagerListener {
///     fn accepts(&self, event: &GuardEvent) -> bool {
///         matches!(event, GuardEvent::LoginLockedOut { .. })
///     }
///
///     async fn handle(&self, event: &GuardEvent) {
///         // page the security on-call
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Events this listener wants. Defaults to all of them.
    fn accepts(&self, _event: &GuardEvent) -> bool {
        true
    }

    async fn handle(&self, event: &GuardEvent);
}
