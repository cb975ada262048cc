use std::time::{Duration, Instant};

/// General errors disappear after this long.
pub const ERROR_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// A message shown to the user, optionally expiring.
#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    raised_at: Instant,
    ttl: Option<Duration>,
}

impl Notice {
    /// Stays visible until replaced.
    pub fn persistent(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            raised_at: Instant::now(),
            ttl: None,
        }
    }

    /// Visible for [`ERROR_DISMISS_AFTER`].
    pub fn transient(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            raised_at: Instant::now(),
            ttl: Some(ERROR_DISMISS_AFTER),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_duration_since(self.raised_at) < ttl,
            None => true,
        }
    }
}
