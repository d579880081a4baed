use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use shared::{validate_upload, CategoryId, PhotoFileInfo, UploadReceipt, ValidationError};
use tracing::{info, warn};
use crate::error::Result;
use crate::events::{ChangeNotifier, SyncEvent};
use crate::gateway::{Attachment, Gateway, MultipartForm, Transport};
use crate::notification::{Notifications, Tone};

pub const UPLOAD_SUCCESS: &str = "Photo submitted! Start hyping the votes.";
pub const UPLOAD_LABEL: &str = "Share Photo";
pub const UPLOAD_BUSY_LABEL: &str = "Uploading…";

#[derive(Debug, Clone, PartialEq)]
pub struct UploadDraft<A> {
    pub uploader_name: String,
    pub email: String,
    pub caption: String,
    pub categories: BTreeSet<CategoryId>,
    pub photo: Option<A>,
}

impl<A> Default for UploadDraft<A> {
    fn default() -> Self {
        Self {
            uploader_name: String::new(),
            email: String::new(),
            caption: String::new(),
            categories: BTreeSet::new(),
            photo: None,
        }
    }
}

impl<A: Attachment> UploadDraft<A> {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let photo = self.photo.as_ref().map(|photo| (photo.file_name(), photo.size()));
        validate_upload(
            &self.uploader_name,
            &self.categories,
            photo.as_ref().map(|(name, size)| PhotoFileInfo { name, size: *size }),
        )
    }

    fn to_form(&self, contest: &str) -> MultipartForm<A> {
        let mut form = MultipartForm::new()
            .field("contest", contest)
            .field("uploader_name", self.uploader_name.trim())
            .field("email", self.email.trim())
            .field("caption", self.caption.trim());
        for category in &self.categories {
            form = form.field("categories", category.as_str());
        }
        match &self.photo {
            Some(photo) => form.file("photo", photo.clone()),
            None => form,
        }
    }
}

pub struct UploadController<T: Transport> {
    gateway: Rc<Gateway<T>>,
    contest: String,
    draft: RefCell<UploadDraft<T::Attachment>>,
    submitting: Cell<bool>,
    notifications: Rc<Notifications>,
    notifier: ChangeNotifier,
}

impl<T: Transport> UploadController<T> {
    pub fn new(
        gateway: Rc<Gateway<T>>,
        contest: impl Into<String>,
        notifications: Rc<Notifications>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self {
            gateway,
            contest: contest.into(),
            draft: RefCell::new(UploadDraft::default()),
            submitting: Cell::new(false),
            notifications,
            notifier,
        }
    }

    pub fn contest(&self) -> &str {
        &self.contest
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn draft(&self) -> UploadDraft<T::Attachment> {
        self.draft.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() { UPLOAD_BUSY_LABEL } else { UPLOAD_LABEL }
    }

    pub fn edit(&self, change: impl FnOnce(&mut UploadDraft<T::Attachment>)) {
        change(&mut *self.draft.borrow_mut());
        self.notifier.notify(SyncEvent::UploadChanged);
    }

    pub fn toggle_category(&self, category: &CategoryId) {
        self.edit(|draft| {
            if !draft.categories.remove(category) {
                draft.categories.insert(category.clone());
            }
        });
    }

    pub async fn submit(&self) -> Result<UploadReceipt> {
        if self.is_submitting() {
            return Err(ValidationError::SubmissionInFlight.into());
        }
        self.notifications.clear();

        let draft = self.draft();
        if let Err(error) = draft.validate() {
            self.notifications.show(error.to_string(), Tone::Error);
            return Err(error.into());
        }

        let _busy = Submitting::engage(&self.submitting, &self.notifier);
        match self.gateway.upload_photo(draft.to_form(&self.contest)).await {
            Ok(receipt) => {
                info!(contest = %self.contest, id = ?receipt.id, "photo uploaded");
                self.edit(|draft| *draft = UploadDraft::default());
                let message = receipt
                    .message
                    .clone()
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| UPLOAD_SUCCESS.into());
                self.notifications.show(message, Tone::Success);
                Ok(receipt)
            }
            Err(error) => {
                warn!(contest = %self.contest, %error, "upload failed");
                self.notifications.report(&error);
                Err(error)
            }
        }
    }
}

struct Submitting<'a> {
    flag: &'a Cell<bool>,
    notifier: &'a ChangeNotifier,
}

impl<'a> Submitting<'a> {
    fn engage(flag: &'a Cell<bool>, notifier: &'a ChangeNotifier) -> Self {
        flag.set(true);
        notifier.notify(SyncEvent::UploadChanged);
        Self { flag, notifier }
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
        self.notifier.notify(SyncEvent::UploadChanged);
    }
}
