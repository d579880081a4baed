use std::rc::Rc;
use std::time::Duration;
use shared::{Category, CategoryId, ValidationError};
use crate::config::{Config, CONFIG};
use crate::error::{ClientError, TransportError};
use crate::gateway::Method;
use crate::notification::Tone;
use crate::render::CategoryRenderer;
use crate::scheduler::OverlapPolicy;
use crate::session::VotingSession;
use crate::vote::{BUSY_LABEL, SUBMIT_LABEL, VOTE_RECORDED};
use super::fakes::{entry, finished, photos, FakeTransport, Harness};

fn pumpkin() -> CategoryId {
    CategoryId::from("pumpkin")
}

pub(super) fn voting_session(h: &Harness) -> Rc<VotingSession<FakeTransport>> {
    voting_session_with(h, &CONFIG)
}

fn voting_session_with(h: &Harness, config: &Config) -> Rc<VotingSession<FakeTransport>> {
    let categories = vec![Category { id: pumpkin(), label: "Best Pumpkin".into() }];
    VotingSession::new(
        h.gateway(),
        "costumes",
        categories,
        h.runtime.clone(),
        config,
        CategoryRenderer::default(),
    )
}

fn submit(h: &Harness, session: &Rc<VotingSession<FakeTransport>>) -> futures::future::RemoteHandle<crate::Result<shared::VoteReceipt>> {
    let session = Rc::clone(session);
    h.spawn(async move { session.submit_vote(&pumpkin()).await })
}

#[test]
fn test_submit_without_selection() {
    let mut h = Harness::new();
    let session = voting_session(&h);

    let result = submit(&h, &session);
    h.run();

    assert_eq!(finished(result), Err(ClientError::Validation(ValidationError::NoSelection)));
    assert_eq!(h.transport.request_count(), 0);
    let notification = session.notification().unwrap();
    assert_eq!(notification.text, "Pick a favorite before you submit your vote.");
    assert_eq!(notification.tone, Tone::Error);
}

#[test]
fn test_vote_then_refresh() {
    let mut h = Harness::new();
    let session = voting_session(&h);
    h.transport.reply(200, photos(vec![entry(1, "Ann", &[("pumpkin", 2)])]));
    session.start();
    h.run();
    assert_eq!(session.render(&pumpkin()).items()[0].vote_label, "2 votes");

    session.select(&pumpkin(), 1);
    h.transport.reply(200, r#"{"message":"Vote recorded","category":"pumpkin","photo_id":1}"#);
    h.transport.reply(200, photos(vec![entry(1, "Ann", &[("pumpkin", 3)])]));
    let result = submit(&h, &session);
    h.run();

    let receipt = finished(result).unwrap();
    assert_eq!(receipt.photo_id, Some(1));

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].method, Method::Post);
    assert_eq!(requests[1].url, "/api/votes");
    assert_eq!(requests[2].url, "/api/photos?contest=costumes");

    let notification = session.notification().unwrap();
    assert_eq!(notification.text, VOTE_RECORDED);
    assert_eq!(notification.tone, Tone::Success);

    let form = session.form(&pumpkin());
    assert!(!form.is_submitting());
    assert_eq!(form.submit_label(), SUBMIT_LABEL);

    let cards = session.render(&pumpkin());
    assert_eq!(cards.items().len(), 1);
    assert_eq!(cards.items()[0].vote_label, "3 votes");
    assert!(cards.items()[0].selected);
}

#[test]
fn test_form_busy_while_vote_in_flight() {
    let mut h = Harness::new();
    let session = voting_session(&h);
    session.select(&pumpkin(), 1);
    let held = h.transport.hold();

    let first = submit(&h, &session);
    h.run();
    let form = session.form(&pumpkin());
    assert!(form.is_submitting());
    assert_eq!(form.submit_label(), BUSY_LABEL);

    session.select(&pumpkin(), 2);
    assert_eq!(session.form(&pumpkin()).selection, Some(1));

    let second = submit(&h, &session);
    h.run();
    assert_eq!(finished(second), Err(ClientError::Validation(ValidationError::SubmissionInFlight)));
    assert_eq!(h.transport.request_count(), 1);

    held.complete(403, r#"{"error":"Voting is closed."}"#);
    h.run();
    assert_eq!(
        finished(first),
        Err(ClientError::Api { status: 403, message: "Voting is closed.".into() })
    );

    let form = session.form(&pumpkin());
    assert!(!form.is_submitting());
    assert_eq!(form.selection, Some(1));
    let notification = session.notification().unwrap();
    assert_eq!(notification.text, "Voting is closed.");
    assert_eq!(notification.tone, Tone::Error);
    assert_eq!(h.transport.request_count(), 1);
}

#[test]
fn test_timeout_releases_form() {
    let mut h = Harness::new();
    let session = voting_session(&h);
    session.select(&pumpkin(), 1);
    let held = h.transport.hold();

    let result = submit(&h, &session);
    h.run();
    assert!(session.form(&pumpkin()).is_submitting());

    h.clock.advance(CONFIG.request_timeout.unwrap_or(Duration::from_secs(15)));
    h.run();
    assert_eq!(finished(result), Err(ClientError::Transport(TransportError::Timeout)));
    assert!(!session.form(&pumpkin()).is_submitting());
    assert_eq!(session.notification().unwrap().text, "The server took too long to respond.");
    drop(held);
}

#[test]
fn test_refresh_failure_after_vote_is_reported() {
    let mut h = Harness::new();
    let session = voting_session(&h);
    session.select(&pumpkin(), 1);
    h.transport.reply(200, "{}");
    h.transport.reply(502, "Bad Gateway");

    let result = submit(&h, &session);
    h.run();

    assert!(finished(result).is_ok());
    let notification = session.notification().unwrap();
    assert_eq!(notification.text, "Unable to load photos right now.");
    assert_eq!(notification.tone, Tone::Error);
}

fn vote_during_background_poll(policy: OverlapPolicy) {
    let mut h = Harness::new();
    let config = Config { overlap_policy: policy, ..Config::new() };
    let session = voting_session_with(&h, &config);
    h.transport.reply(200, photos(vec![entry(1, "Ann", &[("pumpkin", 1)])]));
    session.start();
    h.run();

    let held = h.transport.hold();
    let refresh = {
        let session = Rc::clone(&session);
        h.spawn(async move { session.refresh().await })
    };
    h.run();

    session.select(&pumpkin(), 1);
    h.transport.reply(200, r#"{"message":"Vote recorded"}"#);
    h.transport.reply(200, photos(vec![entry(1, "Ann", &[("pumpkin", 3)])]));
    let result = submit(&h, &session);
    h.run();

    held.complete(200, photos(vec![entry(1, "Ann", &[("pumpkin", 2)])]));
    h.run();

    assert!(finished(result).is_ok());
    let _ = finished(refresh);
    assert_eq!(h.transport.request_count(), 4);
    assert_eq!(session.render(&pumpkin()).items()[0].vote_label, "3 votes");
    assert_eq!(session.notification().unwrap().text, VOTE_RECORDED);
}

#[test]
fn test_vote_during_background_poll_deferred() {
    vote_during_background_poll(OverlapPolicy::Defer);
}

#[test]
fn test_vote_during_background_poll_overlapping() {
    vote_during_background_poll(OverlapPolicy::Overlap);
}
