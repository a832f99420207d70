use async_trait::async_trait;

use crate::events::{GuardEvent, Listener};

/// Writes guard events to the `log` facade under `carelock::events`.
///
/// Rejections (lockouts, reused passwords) are logged at `Warn`, everything
/// else at the configured level.
pub struct LoggingListener {
    level: log::Level,
    rejections_only: bool,
}

impl LoggingListener {
    pub fn new() -> Self {
        Self::with_level(log::Level::Info)
    }

    pub fn with_level(level: log::Level) -> Self {
        Self {
            level,
            rejections_only: false,
        }
    }

    /// Skips recorded attempts and appended history.
    pub fn rejections_only() -> Self {
        Self {
            level: log::Level::Warn,
            rejections_only: true,
        }
    }

    fn level_for(&self, event: &GuardEvent) -> log::Level {
        if event.is_rejection() {
            log::Level::Warn
        } else {
            self.level
        }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    fn accepts(&self, event: &GuardEvent) -> bool {
        !self.rejections_only || event.is_rejection()
    }

    async fn handle(&self, event: &GuardEvent) {
        log::log!(
            target: "carelock::events",
            self.level_for(event),
            "event={} at=\"{}\" {:?}",
            event.name(),
            event.timestamp(),
            event
        );
    }
}
