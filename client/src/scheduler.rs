//! Poll scheduler: owns the cache and decides which poll results reach it.
//!
//! Every poll gets a sequence number when it is issued. A completed poll is
//! applied only if its number is newer than the one the cache already holds,
//! so whichever of two polls was issued last wins no matter which response
//! arrives first. Failures never touch the cache.
//!
//! Under [`OverlapPolicy::Defer`] a single driver task runs polls one after
//! another. Requests that arrive while a poll is in flight are parked and all
//! of them are answered by one follow-up poll issued after the current one
//! completes, so a caller always sees data fetched after its request.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::task::{LocalSpawn, LocalSpawnExt};
use tracing::{debug, warn};
use crate::cache::Cache;
use crate::error::{ClientError, Result};
use crate::events::{ChangeNotifier, SyncEvent};

pub trait PollSource {
    type Snapshot: Default + 'static;

    fn fetch(&self) -> LocalBoxFuture<'static, Result<Self::Snapshot>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// One poll in flight; requests made meanwhile share one follow-up poll.
    #[default]
    Defer,
    /// Polls run concurrently; only sequence numbers order their effect.
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Applied { seq: u64 },
    /// A newer poll had already been applied; the result was dropped.
    Superseded { seq: u64 },
    Failed { seq: u64, error: ClientError },
}

impl PollOutcome {
    pub fn seq(&self) -> u64 {
        match self {
            PollOutcome::Applied { seq }
            | PollOutcome::Superseded { seq }
            | PollOutcome::Failed { seq, .. } => *seq,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            PollOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    fn cancelled() -> Self {
        PollOutcome::Failed { seq: 0, error: ClientError::Cancelled }
    }
}

type Waiter = oneshot::Sender<PollOutcome>;

struct State<S> {
    cache: Cache<S>,
    issued: u64,
    in_flight: usize,
    driving: bool,
    deferred: Vec<Waiter>,
}

pub struct PollScheduler<P: PollSource> {
    source: P,
    policy: OverlapPolicy,
    spawner: Rc<dyn LocalSpawn>,
    state: RefCell<State<P::Snapshot>>,
    notifier: ChangeNotifier,
}

impl<P: PollSource + 'static> PollScheduler<P> {
    pub fn new(
        source: P,
        policy: OverlapPolicy,
        spawner: Rc<dyn LocalSpawn>,
        notifier: ChangeNotifier,
    ) -> Rc<Self> {
        Rc::new(Self {
            source,
            policy,
            spawner,
            state: RefCell::new(State {
                cache: Cache::default(),
                issued: 0,
                in_flight: 0,
                driving: false,
                deferred: Vec::new(),
            }),
            notifier,
        })
    }

    pub fn snapshot(&self) -> Rc<P::Snapshot> {
        self.state.borrow().cache.snapshot()
    }

    pub fn version(&self) -> u64 {
        self.state.borrow().cache.version()
    }

    pub fn issued(&self) -> u64 {
        self.state.borrow().issued
    }

    pub fn is_polling(&self) -> bool {
        let state = self.state.borrow();
        state.in_flight > 0 || state.driving
    }

    /// Requests a poll and resolves once a poll issued no earlier than this
    /// call has completed.
    pub async fn refresh(self: &Rc<Self>) -> PollOutcome {
        match self.policy {
            OverlapPolicy::Overlap => self.poll_once().await,
            OverlapPolicy::Defer => self.refresh_deferred().await,
        }
    }

    async fn refresh_deferred(self: &Rc<Self>) -> PollOutcome {
        let (waiter, outcome) = oneshot::channel();
        let lead = {
            let mut state = self.state.borrow_mut();
            if state.driving {
                state.deferred.push(waiter);
                None
            } else {
                state.driving = true;
                Some(waiter)
            }
        };

        match lead {
            Some(waiter) => {
                let driver = Rc::clone(self).drive(vec![waiter]);
                if let Err(error) = self.spawner.spawn_local(driver) {
                    warn!(%error, "could not spawn poll driver");
                    self.state.borrow_mut().driving = false;
                }
            }
            None => debug!("poll requested while one is in flight; deferred"),
        }

        outcome.await.unwrap_or_else(|_| PollOutcome::cancelled())
    }

    async fn drive(self: Rc<Self>, mut waiters: Vec<Waiter>) {
        loop {
            let outcome = self.poll_once().await;
            for waiter in waiters.drain(..) {
                let _ = waiter.send(outcome.clone());
            }

            let next = {
                let mut state = self.state.borrow_mut();
                state.deferred.retain(|waiter| !waiter.is_canceled());
                if state.deferred.is_empty() {
                    state.driving = false;
                    None
                } else {
                    Some(mem::take(&mut state.deferred))
                }
            };

            match next {
                Some(next) => {
                    debug!(coalesced = next.len(), "issuing follow-up poll");
                    waiters = next;
                }
                None => break,
            }
        }
    }

    async fn poll_once(&self) -> PollOutcome {
        let seq = {
            let mut state = self.state.borrow_mut();
            state.issued += 1;
            state.in_flight += 1;
            state.issued
        };
        debug!(seq, "poll issued");
        self.notifier.notify(SyncEvent::PollStarted { seq });

        let in_flight = InFlight(&self.state);
        let result = self.source.fetch().await;
        drop(in_flight);

        let outcome = self.apply(seq, result);
        self.notifier.notify(match &outcome {
            PollOutcome::Applied { seq } => SyncEvent::CacheReplaced { version: *seq },
            PollOutcome::Superseded { seq } => SyncEvent::PollDiscarded { seq: *seq },
            PollOutcome::Failed { seq, .. } => SyncEvent::PollFailed { seq: *seq },
        });
        outcome
    }

    fn apply(&self, seq: u64, result: Result<P::Snapshot>) -> PollOutcome {
        let mut state = self.state.borrow_mut();
        let current = state.cache.version();
        if seq <= current {
            debug!(seq, current, "stale poll result discarded");
            return PollOutcome::Superseded { seq };
        }
        match result {
            Ok(snapshot) => {
                state.cache.replace(seq, snapshot);
                debug!(seq, "cache replaced");
                PollOutcome::Applied { seq }
            }
            Err(error) => PollOutcome::Failed { seq, error },
        }
    }
}

struct InFlight<'a, S>(&'a RefCell<State<S>>);

impl<S> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        self.0.borrow_mut().in_flight -= 1;
    }
}
