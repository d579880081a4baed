//! Client-side synchronizer for the contest pages: talks to the API, keeps
//! the latest poll in a cache and turns it into view models. Nothing in this
//! crate touches the browser; the frontend plugs in transport, timers and a
//! task spawner.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod feeds;
pub mod gateway;
pub mod notification;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod upload;
pub mod vote;

pub use cache::{PhotoSnapshot, ResultsSnapshot};
pub use clock::{AutoRefresh, Clock, TimerHandle};
pub use config::{Config, CONFIG};
pub use error::{ClientError, Result, TransportError};
pub use events::{ChangeNotifier, SyncEvent};
pub use gateway::{ApiRequest, Attachment, Gateway, Method, MultipartForm, RawResponse, RequestBody, Transport};
pub use notification::{Notification, Notifications, Tone};
pub use render::{CategoryRenderer, CategoryView, EntryCard, ResultRow};
pub use scheduler::{OverlapPolicy, PollOutcome, PollScheduler};
pub use session::{ResultsSession, Runtime, VotingSession};
pub use upload::{UploadController, UploadDraft};
pub use vote::{VoteController, VoteForm};

#[cfg(test)]
mod tests;
