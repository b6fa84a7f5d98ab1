//! User-facing notifications.
//!
//! The import/export services report outcomes through a [`Notifier`]: the
//! aggregate result of a run goes to the user as a toast, while itemized
//! per-record failures go to the diagnostic log stream only.

use std::fmt;
use std::sync::Mutex;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    /// The operation completed without failures.
    Success,
    /// The operation completed with partial failures.
    Warning,
    /// The operation failed outright.
    Error,
}

impl ToastLevel {
    /// Returns the level as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Parses a level from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sink for user-facing toast notifications.
pub trait Notifier: Send + Sync {
    /// Delivers one toast message at the given level.
    fn add_toast(&self, message: &str, level: ToastLevel);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn add_toast(&self, message: &str, level: ToastLevel) {
        (**self).add_toast(message, level);
    }
}

/// [`Notifier`] that forwards toasts to the tracing subscriber.
///
/// Success maps to `info`, warning to `warn`, error to `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates a new tracing notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn add_toast(&self, message: &str, level: ToastLevel) {
        match level {
            ToastLevel::Success => tracing::info!(toast = level.as_str(), "{message}"),
            ToastLevel::Warning => tracing::warn!(toast = level.as_str(), "{message}"),
            ToastLevel::Error => tracing::error!(toast = level.as_str(), "{message}"),
        }
    }
}

/// [`Notifier`] that records every toast for later inspection.
///
/// Useful in tests and in embedding applications that render toasts
/// themselves.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<(String, ToastLevel)>>,
}

impl RecordingNotifier {
    /// Creates a new recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the toasts delivered so far, in order.
    #[must_use]
    pub fn toasts(&self) -> Vec<(String, ToastLevel)> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn add_toast(&self, message: &str, level: ToastLevel) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push((message.to_string(), level));
        }
    }
}
