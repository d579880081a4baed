//! Messaging gateway: the only code that talks to the contest API.
//!
//! A [`Transport`] moves bytes; the [`Gateway`] builds URLs, applies the
//! request timeout and turns responses into typed results. A non-2xx status
//! is always a failure, whatever the body says. Nothing here retries.

use std::rc::Rc;
use std::time::Duration;
use futures::future::{self, Either, LocalBoxFuture};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    CastVoteRequest, Category, ErrorResponse, PhotosResponse, ResultsResponse, UploadReceipt,
    VoteReceipt,
};
use tracing::{debug, warn};
use crate::clock::Clock;
use crate::error::{ClientError, Result, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Categories,
    Photos,
    Results,
    Votes,
    Upload,
}

impl Endpoint {
    pub const fn method(self) -> Method {
        match self {
            Endpoint::Categories | Endpoint::Photos | Endpoint::Results => Method::Get,
            Endpoint::Votes | Endpoint::Upload => Method::Post,
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Categories => "/categories",
            Endpoint::Photos | Endpoint::Upload => "/photos",
            Endpoint::Results => "/results",
            Endpoint::Votes => "/votes",
        }
    }

    /// Shown when a failed response carries no usable `error` text.
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Endpoint::Categories => "Could not load categories.",
            Endpoint::Photos => "Unable to load photos right now.",
            Endpoint::Results => "Could not load results.",
            Endpoint::Votes => "Vote not counted. Please try again.",
            Endpoint::Upload => "Upload failed. Please try again.",
        }
    }
}

/// A file handle the transport knows how to put into a multipart body.
pub trait Attachment: Clone + 'static {
    fn file_name(&self) -> String;
    fn size(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipartForm<A> {
    pub fields: Vec<(String, String)>,
    pub file: Option<(String, A)>,
}

impl<A> MultipartForm<A> {
    pub fn new() -> Self {
        Self { fields: Vec::new(), file: None }
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, file: A) -> Self {
        self.file = Some((name.to_string(), file));
        self
    }

    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.iter()
            .filter(move |(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl<A> Default for MultipartForm<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<A> {
    Empty,
    Json(Value),
    Multipart(MultipartForm<A>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest<A> {
    pub method: Method,
    pub url: String,
    pub body: RequestBody<A>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    type Attachment: Attachment;

    fn send(
        &self,
        request: ApiRequest<Self::Attachment>,
    ) -> LocalBoxFuture<'static, std::result::Result<RawResponse, TransportError>>;
}

pub struct Gateway<T: Transport> {
    transport: T,
    base_url: String,
    timeout: Option<(Rc<dyn Clock>, Duration)>,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, clock: Rc<dyn Clock>, timeout: Duration) -> Self {
        self.timeout = Some((clock, timeout));
        self
    }

    pub fn url(&self, endpoint: Endpoint, contest: Option<&str>) -> String {
        match contest {
            Some(contest) => format!(
                "{}{}?contest={}",
                self.base_url,
                endpoint.path(),
                urlencoding::encode(contest)
            ),
            None => format!("{}{}", self.base_url, endpoint.path()),
        }
    }

    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        contest: Option<&str>,
        body: RequestBody<T::Attachment>,
    ) -> Result<R> {
        let request = ApiRequest {
            method: endpoint.method(),
            url: self.url(endpoint, contest),
            body,
        };
        debug!(method = ?request.method, url = %request.url, "api request");

        let sent = self.transport.send(request);
        let raw = match &self.timeout {
            None => sent.await,
            Some((clock, limit)) => match future::select(sent, clock.sleep(*limit)).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(TransportError::Timeout),
            },
        };

        let result = raw.map_err(ClientError::from).and_then(|raw| decode(endpoint, raw));
        if let Err(error) = &result {
            warn!(?endpoint, %error, "api request failed");
        }
        result
    }

    pub async fn list_categories(&self, contest: &str) -> Result<Vec<Category>> {
        self.request(Endpoint::Categories, Some(contest), RequestBody::Empty).await
    }

    pub async fn list_photos(&self, contest: &str) -> Result<PhotosResponse> {
        self.request(Endpoint::Photos, Some(contest), RequestBody::Empty).await
    }

    pub async fn list_results(&self, contest: &str) -> Result<ResultsResponse> {
        self.request(Endpoint::Results, Some(contest), RequestBody::Empty).await
    }

    pub async fn cast_vote(&self, vote: &CastVoteRequest) -> Result<VoteReceipt> {
        let body = serde_json::to_value(vote)
            .map_err(|e| TransportError::InvalidBody(e.to_string()))?;
        self.request(Endpoint::Votes, None, RequestBody::Json(body)).await
    }

    pub async fn upload_photo(&self, form: MultipartForm<T::Attachment>) -> Result<UploadReceipt> {
        self.request(Endpoint::Upload, None, RequestBody::Multipart(form)).await
    }
}

fn decode<R: DeserializeOwned>(endpoint: Endpoint, raw: RawResponse) -> Result<R> {
    if !raw.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&raw.body)
            .map(|err| err.error)
            .ok()
            .filter(|error| !error.trim().is_empty())
            .unwrap_or_else(|| endpoint.fallback_message().into());
        return Err(ClientError::Api { status: raw.status, message });
    }

    // Some success responses carry no body at all.
    let body = if raw.body.trim().is_empty() { "{}" } else { raw.body.as_str() };
    serde_json::from_str(body)
        .map_err(|e| TransportError::InvalidBody(e.to_string()).into())
}
