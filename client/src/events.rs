use std::cell::RefCell;
use std::rc::Rc;
use shared::CategoryId;

/// State changes a page view may want to re-render for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    PollStarted { seq: u64 },
    CacheReplaced { version: u64 },
    PollDiscarded { seq: u64 },
    PollFailed { seq: u64 },
    NotificationChanged,
    FormChanged(CategoryId),
    UploadChanged,
}

type Listener = Rc<dyn Fn(SyncEvent)>;

/// One listener slot shared by every part of a session. The listener is
/// cloned out before it runs, so it may freely call back into the session.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    listener: Rc<RefCell<Option<Listener>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&self, listener: impl Fn(SyncEvent) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn unlisten(&self) {
        self.listener.borrow_mut().take();
    }

    pub fn notify(&self, event: SyncEvent) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(event);
        }
    }
}
