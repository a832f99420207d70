use async_trait::async_trait;

use crate::events::{GuardEvent, Listener};

/// Emits guard events as `tracing` events. Requires the `tracing` feature.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &GuardEvent) {
        match event {
            GuardEvent::LoginLockedOut {
                identifier,
                lockout_until,
                ..
            } => tracing::warn!(
                target: "carelock::events",
                event_name = event.name(),
                identifier = %identifier,
                lockout_until = %lockout_until,
                "identifier locked out"
            ),
            GuardEvent::PasswordReuseRejected { user_id, .. } => tracing::warn!(
                target: "carelock::events",
                event_name = event.name(),
                user_id = %user_id,
                "password reuse rejected"
            ),
            _ => tracing::info!(
                target: "carelock::events",
                event_name = event.name(),
                ?event,
                "guard event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_tracing_listener_handle() {
        let now = Utc::now();
        let event = GuardEvent::LoginLockedOut {
            identifier: "a@b.com".to_owned(),
            failed_attempts: 5,
            lockout_until: now,
            at: now,
        };

        // should not panic
        TracingListener.handle(&event).await;
    }
}
