//! User-visible notifications (toasts)

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Toast shown when the account list cannot be loaded
pub const ACCOUNTS_FAILURE_TITLE: &str = "Failed to get accounts from Up";
/// Toast shown when a transaction list cannot be loaded
pub const TRANSACTIONS_FAILURE_TITLE: &str = "Failed to get transactions from Up";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastStyle {
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub style: ToastStyle,
}

impl Toast {
    pub fn failure(title: &str) -> Self {
        Self {
            title: title.to_string(),
            style: ToastStyle::Failure,
        }
    }
}

/// Sink for toasts; the presentation layer decides how to show them
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

pub type NotifierRef = Arc<dyn Notifier>;

/// In-memory queue of toasts waiting to be shown
#[derive(Debug, Default)]
pub struct NotificationCenter {
    pending: Mutex<Vec<Toast>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending toast
    pub fn drain(&self) -> Vec<Toast> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, toast: Toast) {
        log::info!("toast ({:?}): {}", toast.style, toast.title);
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let center = NotificationCenter::new();
        center.notify(Toast::failure(ACCOUNTS_FAILURE_TITLE));
        center.notify(Toast::failure(TRANSACTIONS_FAILURE_TITLE));
        assert_eq!(center.pending_count(), 2);

        let drained = center.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].title, ACCOUNTS_FAILURE_TITLE);
        assert_eq!(drained[1].style, ToastStyle::Failure);
        assert!(center.drain().is_empty());
    }
}
