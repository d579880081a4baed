use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::future::{self, FutureExt, LocalBoxFuture, RemoteHandle};
use futures::task::LocalSpawnExt;
use serde_json::{json, Value};
use crate::clock::{Clock, TimerHandle};
use crate::config::CONFIG;
use crate::error::TransportError;
use crate::gateway::{ApiRequest, Attachment, Gateway, RawResponse, Transport};
use crate::session::Runtime;

type Reply = Result<RawResponse, TransportError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeFile {
    pub name: String,
    pub size: u64,
}

impl FakeFile {
    pub fn new(name: &str, size: u64) -> Self {
        Self { name: name.into(), size }
    }
}

impl Attachment for FakeFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }
}

enum Scripted {
    Ready(Reply),
    Held(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct TransportState {
    replies: VecDeque<Scripted>,
    requests: Vec<ApiRequest<FakeFile>>,
}

/// Answers requests in order from a script. A request with nothing scripted
/// fails as a network error.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Rc<RefCell<TransportState>>,
}

/// A reply that stays pending until the test completes it.
pub struct Held(oneshot::Sender<Reply>);

impl Held {
    pub fn complete(self, status: u16, body: impl Into<String>) {
        let _ = self.0.send(Ok(RawResponse::new(status, body)));
    }
}

impl FakeTransport {
    pub fn reply(&self, status: u16, body: impl Into<String>) {
        self.push(Scripted::Ready(Ok(RawResponse::new(status, body))));
    }

    pub fn fail(&self, error: TransportError) {
        self.push(Scripted::Ready(Err(error)));
    }

    pub fn hold(&self) -> Held {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Held(rx));
        Held(tx)
    }

    pub fn requests(&self) -> Vec<ApiRequest<FakeFile>> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    fn push(&self, reply: Scripted) {
        self.state.borrow_mut().replies.push_back(reply);
    }
}

impl Transport for FakeTransport {
    type Attachment = FakeFile;

    fn send(&self, request: ApiRequest<FakeFile>) -> LocalBoxFuture<'static, Reply> {
        let scripted = {
            let mut state = self.state.borrow_mut();
            state.requests.push(request);
            state.replies.pop_front()
        };
        match scripted {
            Some(Scripted::Ready(reply)) => future::ready(reply).boxed_local(),
            Some(Scripted::Held(rx)) => async move {
                rx.await.unwrap_or_else(|_| Err(TransportError::Network("reply dropped".into())))
            }
            .boxed_local(),
            None => future::ready(Err(TransportError::Network("nothing scripted".into()))).boxed_local(),
        }
    }
}

struct Interval {
    id: u64,
    period: Duration,
    next: Duration,
    tick: Rc<dyn Fn()>,
}

struct Sleeper {
    deadline: Duration,
    wake: oneshot::Sender<()>,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    intervals: Vec<Interval>,
    sleepers: Vec<Sleeper>,
}

/// Time only moves when the test calls `advance`.
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn active_timers(&self) -> usize {
        self.state.borrow().intervals.len()
    }

    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let (woken, ticks) = {
                let mut state = self.state.borrow_mut();
                let due = state.intervals.iter().map(|i| i.next)
                    .chain(state.sleepers.iter().map(|s| s.deadline))
                    .filter(|at| *at <= target)
                    .min();
                let Some(at) = due else { break };
                state.now = at;

                let (woken, waiting) = std::mem::take(&mut state.sleepers)
                    .into_iter()
                    .partition::<Vec<_>, _>(|sleeper| sleeper.deadline <= at);
                state.sleepers = waiting;

                let mut ticks = Vec::new();
                for interval in state.intervals.iter_mut().filter(|i| i.next <= at) {
                    interval.next += interval.period;
                    ticks.push(Rc::clone(&interval.tick));
                }
                (woken, ticks)
            };

            for sleeper in woken {
                let _ = sleeper.wake.send(());
            }
            for tick in ticks {
                tick();
            }
        }
        self.state.borrow_mut().now = target;
    }
}

impl Clock for ManualClock {
    fn every(&self, period: Duration, tick: Rc<dyn Fn()>) -> TimerHandle {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            let next = state.now + period;
            state.intervals.push(Interval { id, period, next, tick });
            id
        };
        let state = Rc::downgrade(&self.state);
        TimerHandle::new(move || {
            if let Some(state) = state.upgrade() {
                state.borrow_mut().intervals.retain(|interval| interval.id != id);
            }
        })
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (wake, woken) = oneshot::channel();
        {
            let mut state = self.state.borrow_mut();
            let deadline = state.now + duration;
            state.sleepers.push(Sleeper { deadline, wake });
        }
        async move {
            if woken.await.is_err() {
                future::pending::<()>().await;
            }
        }
        .boxed_local()
    }
}

pub struct Harness {
    pub pool: LocalPool,
    pub transport: FakeTransport,
    pub clock: ManualClock,
    pub runtime: Runtime,
}

impl Harness {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let clock = ManualClock::default();
        let runtime = Runtime::new(Rc::new(pool.spawner()), Rc::new(clock.clone()));
        Self { pool, transport: FakeTransport::default(), clock, runtime }
    }

    pub fn gateway(&self) -> Rc<Gateway<FakeTransport>> {
        self.runtime.gateway(self.transport.clone(), &CONFIG)
    }

    pub fn spawn<F>(&self, task: F) -> RemoteHandle<F::Output>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        self.pool.spawner().spawn_local_with_handle(task).expect("spawn test task")
    }

    pub fn run(&mut self) {
        self.pool.run_until_stalled();
    }
}

pub fn finished<T: 'static>(handle: RemoteHandle<T>) -> T {
    handle.now_or_never().expect("task should have finished")
}

pub fn entry(id: i64, name: &str, votes: &[(&str, u64)]) -> Value {
    let categories: Vec<&str> = votes.iter().map(|(category, _)| *category).collect();
    let votes: serde_json::Map<String, Value> = votes
        .iter()
        .map(|(category, count)| (category.to_string(), json!(count)))
        .collect();
    json!({
        "id": id,
        "uploader_name": name,
        "caption": null,
        "image_url": format!("/uploads/{}.jpg", id),
        "categories": categories,
        "votes": votes,
        "created_at": "2024-10-31T19:05:09Z",
    })
}

pub fn photos(entries: Vec<Value>) -> String {
    json!({ "photos": entries }).to_string()
}

pub fn results(category: &str, rows: &[(i64, &str, u64)]) -> String {
    let rows: Vec<Value> = rows
        .iter()
        .map(|(id, name, votes)| json!({
            "photo_id": id,
            "uploader_name": name,
            "caption": "",
            "image_url": format!("/uploads/{}.jpg", id),
            "votes": votes,
        }))
        .collect();
    let mut results = serde_json::Map::new();
    results.insert(category.to_string(), Value::Array(rows));
    json!({ "results": results }).to_string()
}
