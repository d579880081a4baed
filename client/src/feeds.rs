use std::rc::Rc;
use futures::future::{FutureExt, LocalBoxFuture};
use crate::cache::{PhotoSnapshot, ResultsSnapshot};
use crate::error::Result;
use crate::gateway::{Gateway, Transport};
use crate::scheduler::PollSource;

/// Entries with per-category counts, for the voting view.
pub struct PhotoFeed<T: Transport> {
    gateway: Rc<Gateway<T>>,
    contest: String,
}

impl<T: Transport> PhotoFeed<T> {
    pub fn new(gateway: Rc<Gateway<T>>, contest: impl Into<String>) -> Self {
        Self { gateway, contest: contest.into() }
    }
}

impl<T: Transport + 'static> PollSource for PhotoFeed<T> {
    type Snapshot = PhotoSnapshot;

    fn fetch(&self) -> LocalBoxFuture<'static, Result<PhotoSnapshot>> {
        let gateway = Rc::clone(&self.gateway);
        let contest = self.contest.clone();
        async move {
            gateway.list_photos(&contest).await.map(PhotoSnapshot::from)
        }
        .boxed_local()
    }
}

/// Ranked rows per category, for the results view.
pub struct ResultsFeed<T: Transport> {
    gateway: Rc<Gateway<T>>,
    contest: String,
}

impl<T: Transport> ResultsFeed<T> {
    pub fn new(gateway: Rc<Gateway<T>>, contest: impl Into<String>) -> Self {
        Self { gateway, contest: contest.into() }
    }
}

impl<T: Transport + 'static> PollSource for ResultsFeed<T> {
    type Snapshot = ResultsSnapshot;

    fn fetch(&self) -> LocalBoxFuture<'static, Result<ResultsSnapshot>> {
        let gateway = Rc::clone(&self.gateway);
        let contest = self.contest.clone();
        async move {
            gateway.list_results(&contest).await.map(ResultsSnapshot::from)
        }
        .boxed_local()
    }
}
