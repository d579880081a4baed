//! Per-page synchronizers. Each page builds exactly one session; it owns the
//! scheduler (and with it the cache), the notification slot and the forms.
//!
//! The two polling views differ in how a failed poll is reported: the voting
//! page shows it on the notification line, the results page only logs it and
//! keeps showing the last good tallies.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use futures::task::{LocalSpawn, LocalSpawnExt};
use shared::{Category, CategoryId, PhotoId, VoteReceipt};
use tracing::warn;
use crate::cache::{PhotoSnapshot, ResultsSnapshot};
use crate::clock::{AutoRefresh, Clock};
use crate::config::Config;
use crate::error::Result;
use crate::events::{ChangeNotifier, SyncEvent};
use crate::feeds::{PhotoFeed, ResultsFeed};
use crate::gateway::{Gateway, Transport};
use crate::notification::{Notification, Notifications};
use crate::render::{CategoryRenderer, CategoryView, EntryCard, ResultRow};
use crate::scheduler::{PollOutcome, PollScheduler};
use crate::vote::{VoteController, VoteForm};

/// Platform services a session needs: somewhere to run background tasks and
/// a source of timers.
#[derive(Clone)]
pub struct Runtime {
    pub spawner: Rc<dyn LocalSpawn>,
    pub clock: Rc<dyn Clock>,
}

impl Runtime {
    pub fn new(spawner: Rc<dyn LocalSpawn>, clock: Rc<dyn Clock>) -> Self {
        Self { spawner, clock }
    }

    pub fn gateway<T: Transport>(&self, transport: T, config: &Config) -> Rc<Gateway<T>> {
        let gateway = Gateway::new(transport, config.api_base_url);
        Rc::new(match config.request_timeout {
            Some(timeout) => gateway.with_timeout(Rc::clone(&self.clock), timeout),
            None => gateway,
        })
    }

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        if let Err(error) = self.spawner.spawn_local(task) {
            warn!(%error, "could not spawn background task");
        }
    }
}

pub struct VotingSession<T: Transport + 'static> {
    contest: String,
    categories: Vec<Category>,
    scheduler: Rc<PollScheduler<PhotoFeed<T>>>,
    votes: VoteController<T>,
    notifications: Rc<Notifications>,
    renderer: CategoryRenderer,
    runtime: Runtime,
    notifier: ChangeNotifier,
}

impl<T: Transport + 'static> VotingSession<T> {
    pub fn new(
        gateway: Rc<Gateway<T>>,
        contest: impl Into<String>,
        categories: Vec<Category>,
        runtime: Runtime,
        config: &Config,
        renderer: CategoryRenderer,
    ) -> Rc<Self> {
        let contest = contest.into();
        let notifier = ChangeNotifier::new();
        let notifications = Rc::new(Notifications::new(notifier.clone()));
        let scheduler = PollScheduler::new(
            PhotoFeed::new(Rc::clone(&gateway), contest.clone()),
            config.overlap_policy,
            Rc::clone(&runtime.spawner),
            notifier.clone(),
        );
        let votes = VoteController::new(
            gateway,
            Rc::clone(&scheduler),
            Rc::clone(&notifications),
            notifier.clone(),
        );

        Rc::new(Self {
            contest,
            categories,
            scheduler,
            votes,
            notifications,
            renderer,
            runtime,
            notifier,
        })
    }

    pub fn listen(&self, listener: impl Fn(SyncEvent) + 'static) {
        self.notifier.listen(listener);
    }

    /// Kicks off the initial load in the background.
    pub fn start(self: &Rc<Self>) {
        let session = Rc::clone(self);
        self.runtime.spawn(async move {
            session.load().await;
        });
    }

    pub fn close(&self) {
        self.notifier.unlisten();
    }

    pub async fn load(&self) -> PollOutcome {
        let outcome = self.scheduler.refresh().await;
        if let Some(error) = outcome.error() {
            self.notifications.report(error);
        }
        outcome
    }

    /// User-initiated refresh: the previous message goes away first.
    pub async fn refresh(&self) -> PollOutcome {
        self.notifications.clear();
        self.load().await
    }

    pub fn select(&self, category: &CategoryId, photo_id: PhotoId) {
        self.votes.select(category, photo_id);
    }

    pub fn form(&self, category: &CategoryId) -> VoteForm {
        self.votes.form(category)
    }

    pub async fn submit_vote(&self, category: &CategoryId) -> Result<VoteReceipt> {
        self.votes.submit(category).await
    }

    pub fn contest(&self) -> &str {
        &self.contest
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifications.visible()
    }

    pub fn snapshot(&self) -> Rc<PhotoSnapshot> {
        self.scheduler.snapshot()
    }

    pub fn scheduler(&self) -> &Rc<PollScheduler<PhotoFeed<T>>> {
        &self.scheduler
    }

    pub fn render(&self, category: &CategoryId) -> CategoryView<EntryCard> {
        self.renderer.voting(
            &self.scheduler.snapshot(),
            category,
            self.votes.form(category).selection,
            self.scheduler.is_polling(),
        )
    }

    pub fn render_all(&self) -> Vec<(&Category, CategoryView<EntryCard>)> {
        self.categories.iter()
            .map(|category| (category, self.render(&category.id)))
            .collect()
    }
}

pub struct ResultsSession<T: Transport + 'static> {
    contest: String,
    categories: Vec<Category>,
    scheduler: Rc<PollScheduler<ResultsFeed<T>>>,
    renderer: CategoryRenderer,
    runtime: Runtime,
    auto_refresh: AutoRefresh,
    period: Duration,
    notifier: ChangeNotifier,
}

impl<T: Transport + 'static> ResultsSession<T> {
    pub fn new(
        gateway: Rc<Gateway<T>>,
        contest: impl Into<String>,
        categories: Vec<Category>,
        runtime: Runtime,
        config: &Config,
        renderer: CategoryRenderer,
    ) -> Rc<Self> {
        let contest = contest.into();
        let notifier = ChangeNotifier::new();
        let scheduler = PollScheduler::new(
            ResultsFeed::new(gateway, contest.clone()),
            config.overlap_policy,
            Rc::clone(&runtime.spawner),
            notifier.clone(),
        );

        Rc::new(Self {
            contest,
            categories,
            scheduler,
            renderer,
            runtime,
            auto_refresh: AutoRefresh::new(),
            period: config.results_poll_interval,
            notifier,
        })
    }

    pub fn listen(&self, listener: impl Fn(SyncEvent) + 'static) {
        self.notifier.listen(listener);
    }

    /// Initial load plus a poll every `results_poll_interval` until `stop`.
    pub fn start(self: &Rc<Self>) {
        self.spawn_load();

        let session = Rc::downgrade(self);
        let tick: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(session) = session.upgrade() {
                session.spawn_load();
            }
        });
        self.auto_refresh.start(self.runtime.clock.as_ref(), self.period, tick);
    }

    pub fn stop(&self) {
        self.auto_refresh.stop();
        self.notifier.unlisten();
    }

    pub fn is_running(&self) -> bool {
        self.auto_refresh.is_running()
    }

    pub async fn load(&self) -> PollOutcome {
        let outcome = self.scheduler.refresh().await;
        if let Some(error) = outcome.error() {
            warn!(contest = %self.contest, %error, "results refresh failed; keeping previous tallies");
        }
        outcome
    }

    fn spawn_load(self: &Rc<Self>) {
        let session = Rc::clone(self);
        self.runtime.spawn(async move {
            session.load().await;
        });
    }

    pub fn contest(&self) -> &str {
        &self.contest
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn snapshot(&self) -> Rc<ResultsSnapshot> {
        self.scheduler.snapshot()
    }

    pub fn scheduler(&self) -> &Rc<PollScheduler<ResultsFeed<T>>> {
        &self.scheduler
    }

    pub fn render(&self, category: &CategoryId) -> CategoryView<ResultRow> {
        self.renderer.results(&self.scheduler.snapshot(), category)
    }

    pub fn render_all(&self) -> Vec<(&Category, CategoryView<ResultRow>)> {
        self.categories.iter()
            .map(|category| (category, self.render(&category.id)))
            .collect()
    }
}
