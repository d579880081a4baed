use std::cell::RefCell;
use tracing::debug;
use crate::events::{ChangeNotifier, SyncEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Info,
    Success,
    Error,
}

impl Tone {
    pub const fn as_str(self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    pub text: String,
    pub tone: Tone,
    pub visible: bool,
}

/// The page's single status line. Showing replaces whatever was there; there
/// is no queue and nothing hides a message except `clear`.
pub struct Notifications {
    slot: RefCell<Notification>,
    notifier: ChangeNotifier,
}

impl Notifications {
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self { slot: RefCell::new(Notification::default()), notifier }
    }

    pub fn show(&self, text: impl Into<String>, tone: Tone) {
        let text = text.into();
        debug!(tone = tone.as_str(), %text, "notification shown");
        *self.slot.borrow_mut() = Notification { text, tone, visible: true };
        self.notifier.notify(SyncEvent::NotificationChanged);
    }

    pub fn clear(&self) {
        let was_visible = std::mem::replace(&mut self.slot.borrow_mut().visible, false);
        if was_visible {
            self.notifier.notify(SyncEvent::NotificationChanged);
        }
    }

    pub fn visible(&self) -> Option<Notification> {
        let slot = self.slot.borrow();
        slot.visible.then(|| slot.clone())
    }
}

impl Notifications {
    /// Every error class is reported the same way: tone `error`, the error's
    /// own message as text.
    pub fn report(&self, error: &crate::error::ClientError) {
        self.show(error.to_string(), Tone::Error);
    }
}
