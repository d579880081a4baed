use std::rc::Rc;
use shared::ValidationError;
use crate::error::ClientError;
use crate::events::ChangeNotifier;
use crate::gateway::{Method, RequestBody};
use crate::notification::{Notifications, Tone};
use crate::upload::{UploadController, UploadDraft, UPLOAD_BUSY_LABEL, UPLOAD_LABEL, UPLOAD_SUCCESS};
use super::fakes::{finished, FakeFile, FakeTransport, Harness};

fn controller(h: &Harness) -> Rc<UploadController<FakeTransport>> {
    let notifier = ChangeNotifier::new();
    let notifications = Rc::new(Notifications::new(notifier.clone()));
    Rc::new(UploadController::new(h.gateway(), "costumes", notifications, notifier))
}

fn fill(controller: &UploadController<FakeTransport>, photo: FakeFile) {
    controller.edit(|draft| {
        draft.uploader_name = "  Ann  ".into();
        draft.caption = "Gourd vibes".into();
        draft.photo = Some(photo);
    });
    controller.toggle_category(&"spooky".into());
    controller.toggle_category(&"pumpkin".into());
}

fn submit(h: &Harness, controller: &Rc<UploadController<FakeTransport>>) -> futures::future::RemoteHandle<crate::Result<shared::UploadReceipt>> {
    let controller = Rc::clone(controller);
    h.spawn(async move { controller.submit().await })
}

#[test]
fn test_upload_requires_categories() {
    let mut h = Harness::new();
    let controller = controller(&h);
    controller.edit(|draft| {
        draft.uploader_name = "Ann".into();
        draft.photo = Some(FakeFile::new("pumpkin.jpg", 1024));
    });

    let result = submit(&h, &controller);
    h.run();

    assert_eq!(finished(result), Err(ClientError::Validation(ValidationError::NoCategories)));
    assert_eq!(h.transport.request_count(), 0);
    let notification = controller.notifications().visible().unwrap();
    assert_eq!(notification.text, "Pick at least one superlative before sharing your masterpiece.");
    assert_eq!(notification.tone, Tone::Error);
}

#[test]
fn test_upload_file_checks() {
    let mut h = Harness::new();
    let controller = controller(&h);

    fill(&controller, FakeFile::new("notes.txt", 10));
    let result = submit(&h, &controller);
    h.run();
    assert_eq!(finished(result), Err(ClientError::Validation(ValidationError::UnsupportedFileType)));

    controller.edit(|draft| draft.photo = Some(FakeFile::new("huge.PNG", 6 * 1024 * 1024)));
    let result = submit(&h, &controller);
    h.run();
    assert_eq!(finished(result), Err(ClientError::Validation(ValidationError::FileTooLarge)));
    assert_eq!(h.transport.request_count(), 0);
}

#[test]
fn test_toggle_category() {
    let h = Harness::new();
    let controller = controller(&h);
    controller.toggle_category(&"spooky".into());
    controller.toggle_category(&"spooky".into());
    assert!(controller.draft().categories.is_empty());
}

#[test]
fn test_successful_upload_resets_draft() {
    let mut h = Harness::new();
    let controller = controller(&h);
    fill(&controller, FakeFile::new("pumpkin.jpg", 2048));
    let held = h.transport.hold();

    let result = submit(&h, &controller);
    h.run();
    assert!(controller.is_submitting());
    assert_eq!(controller.submit_label(), UPLOAD_BUSY_LABEL);

    held.complete(201, r#"{"id":42}"#);
    h.run();
    assert_eq!(finished(result).unwrap().id, Some(42));
    assert!(!controller.is_submitting());
    assert_eq!(controller.submit_label(), UPLOAD_LABEL);
    assert_eq!(controller.draft(), UploadDraft::default());

    let notification = controller.notifications().visible().unwrap();
    assert_eq!(notification.text, UPLOAD_SUCCESS);
    assert_eq!(notification.tone, Tone::Success);

    let request = &h.transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/api/photos");
    let RequestBody::Multipart(form) = &request.body else {
        panic!("expected multipart body, got {:?}", request.body);
    };
    assert_eq!(form.values("contest").collect::<Vec<_>>(), ["costumes"]);
    assert_eq!(form.values("uploader_name").collect::<Vec<_>>(), ["Ann"]);
    assert_eq!(form.values("categories").collect::<Vec<_>>(), ["pumpkin", "spooky"]);
    assert_eq!(form.file, Some(("photo".to_string(), FakeFile::new("pumpkin.jpg", 2048))));
}

#[test]
fn test_failed_upload_keeps_draft() {
    let mut h = Harness::new();
    let controller = controller(&h);
    fill(&controller, FakeFile::new("pumpkin.gif", 2048));
    let before = controller.draft();
    h.transport.reply(413, r#"{"error":"That photo is too big for the cauldron."}"#);

    let result = submit(&h, &controller);
    h.run();

    assert!(matches!(finished(result), Err(ClientError::Api { status: 413, .. })));
    assert_eq!(controller.draft(), before);
    assert!(!controller.is_submitting());
    let notification = controller.notifications().visible().unwrap();
    assert_eq!(notification.text, "That photo is too big for the cauldron.");
}

#[test]
fn test_upload_message_from_server() {
    let mut h = Harness::new();
    let controller = controller(&h);

    fill(&controller, FakeFile::new("pumpkin.jpg", 2048));
    h.transport.reply(201, r#"{"id":7,"message":"Your gourd is in the gallery!"}"#);
    let result = submit(&h, &controller);
    h.run();
    assert!(finished(result).is_ok());
    assert_eq!(controller.notifications().visible().unwrap().text, "Your gourd is in the gallery!");

    fill(&controller, FakeFile::new("pumpkin.jpg", 2048));
    h.transport.reply(201, r#"{"id":8,"message":"  "}"#);
    let result = submit(&h, &controller);
    h.run();
    assert!(finished(result).is_ok());
    assert_eq!(controller.notifications().visible().unwrap().text, UPLOAD_SUCCESS);
}
