use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use shared::{validate_vote_selection, CastVoteRequest, CategoryId, PhotoId, ValidationError, VoteReceipt};
use tracing::{info, warn};
use crate::error::Result;
use crate::events::{ChangeNotifier, SyncEvent};
use crate::feeds::PhotoFeed;
use crate::gateway::{Gateway, Transport};
use crate::notification::{Notifications, Tone};
use crate::scheduler::PollScheduler;

pub const SUBMIT_LABEL: &str = "Submit Vote";
pub const BUSY_LABEL: &str = "Submitting…";
pub const VOTE_RECORDED: &str = "Vote recorded! Keep the spooky spirit alive.";

/// The vote captured when the user pressed submit. Lives until the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVote {
    pub category: CategoryId,
    pub photo_id: PhotoId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteForm {
    pub selection: Option<PhotoId>,
    pub pending: Option<PendingVote>,
}

impl VoteForm {
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() { BUSY_LABEL } else { SUBMIT_LABEL }
    }
}

type Forms = RefCell<BTreeMap<CategoryId, VoteForm>>;

pub struct VoteController<T: Transport + 'static> {
    gateway: Rc<Gateway<T>>,
    scheduler: Rc<PollScheduler<PhotoFeed<T>>>,
    notifications: Rc<Notifications>,
    forms: Forms,
    notifier: ChangeNotifier,
}

impl<T: Transport + 'static> VoteController<T> {
    pub fn new(
        gateway: Rc<Gateway<T>>,
        scheduler: Rc<PollScheduler<PhotoFeed<T>>>,
        notifications: Rc<Notifications>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self {
            gateway,
            scheduler,
            notifications,
            forms: RefCell::new(BTreeMap::new()),
            notifier,
        }
    }

    pub fn form(&self, category: &CategoryId) -> VoteForm {
        self.forms.borrow().get(category).cloned().unwrap_or_default()
    }

    /// Selection is frozen while the form's vote is in flight.
    pub fn select(&self, category: &CategoryId, photo_id: PhotoId) {
        if self.form(category).is_submitting() {
            return;
        }
        update_form(&self.forms, &self.notifier, category, |form| form.selection = Some(photo_id));
    }

    pub async fn submit(&self, category: &CategoryId) -> Result<VoteReceipt> {
        let form = self.form(category);
        if form.is_submitting() {
            return Err(ValidationError::SubmissionInFlight.into());
        }
        self.notifications.clear();

        let photo_id = match validate_vote_selection(form.selection) {
            Ok(photo_id) => photo_id,
            Err(error) => {
                self.notifications.show(error.to_string(), Tone::Error);
                return Err(error.into());
            }
        };

        let pending = PendingVote { category: category.clone(), photo_id };
        let _busy = Busy::engage(&self.forms, &self.notifier, pending);

        let request = CastVoteRequest { category: category.clone(), photo_id };
        match self.gateway.cast_vote(&request).await {
            Ok(receipt) => {
                info!(%category, photo_id, "vote recorded");
                self.notifications.show(VOTE_RECORDED, Tone::Success);
                let outcome = self.scheduler.refresh().await;
                if let Some(error) = outcome.error() {
                    self.notifications.report(error);
                }
                Ok(receipt)
            }
            Err(error) => {
                warn!(%category, photo_id, %error, "vote not recorded");
                self.notifications.report(&error);
                Err(error)
            }
        }
    }
}

fn update_form(
    forms: &Forms,
    notifier: &ChangeNotifier,
    category: &CategoryId,
    change: impl FnOnce(&mut VoteForm),
) {
    change(forms.borrow_mut().entry(category.clone()).or_default());
    notifier.notify(SyncEvent::FormChanged(category.clone()));
}

/// Holds a form in the submitting state; dropping it always returns the form
/// to ready, whichever way the submission ended.
struct Busy<'a> {
    forms: &'a Forms,
    notifier: &'a ChangeNotifier,
    category: CategoryId,
}

impl<'a> Busy<'a> {
    fn engage(forms: &'a Forms, notifier: &'a ChangeNotifier, pending: PendingVote) -> Self {
        let category = pending.category.clone();
        update_form(forms, notifier, &category, |form| form.pending = Some(pending));
        Self { forms, notifier, category }
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        update_form(self.forms, self.notifier, &self.category, |form| form.pending = None);
    }
}
