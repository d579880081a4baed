use std::collections::BTreeMap;
use std::rc::Rc;
use shared::{CategoryId, Entry, PhotosResponse, ResultEntry, ResultsResponse};

/// The last applied poll result. It is only ever replaced wholesale, so a
/// reader holding the `Rc` sees one consistent snapshot.
#[derive(Debug)]
pub struct Cache<S> {
    snapshot: Rc<S>,
    version: u64,
}

impl<S: Default> Default for Cache<S> {
    fn default() -> Self {
        Self { snapshot: Rc::new(S::default()), version: 0 }
    }
}

impl<S> Cache<S> {
    pub fn snapshot(&self) -> Rc<S> {
        Rc::clone(&self.snapshot)
    }

    /// Sequence number of the poll the snapshot came from; 0 before the
    /// first successful poll.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn replace(&mut self, version: u64, snapshot: S) {
        self.snapshot = Rc::new(snapshot);
        self.version = version;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoSnapshot {
    pub entries: Vec<Entry>,
}

impl PhotoSnapshot {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn in_category<'a>(&'a self, category: &'a CategoryId) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |entry| entry.competes_in(category))
    }
}

impl From<PhotosResponse> for PhotoSnapshot {
    fn from(response: PhotosResponse) -> Self {
        Self::new(response.photos)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsSnapshot {
    pub results: BTreeMap<CategoryId, Vec<ResultEntry>>,
}

impl ResultsSnapshot {
    pub fn category(&self, category: &CategoryId) -> &[ResultEntry] {
        self.results.get(category).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl From<ResultsResponse> for ResultsSnapshot {
    fn from(response: ResultsResponse) -> Self {
        Self { results: response.results }
    }
}
