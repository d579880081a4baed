//! Browser implementations of the client's platform seams.

use std::rc::Rc;
use std::time::Duration;
use client::{
    ApiRequest, Attachment, CategoryRenderer, Clock, Gateway, Method, MultipartForm, RawResponse, RequestBody,
    Runtime, TimerHandle, Transport, TransportError,
};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};
use gloo_net::http::Request;
use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use time::{OffsetDateTime, UtcOffset};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};
use crate::config::CONFIG;

pub fn runtime() -> Runtime {
    Runtime::new(Rc::new(BrowserSpawner), Rc::new(BrowserClock))
}

pub fn gateway(runtime: &Runtime) -> Rc<Gateway<BrowserTransport>> {
    runtime.gateway(BrowserTransport, &CONFIG)
}

/// The viewer's UTC offset at `at`. `getTimezoneOffset` counts minutes
/// behind UTC, hence the sign flip.
pub fn local_offset_at(at: OffsetDateTime) -> UtcOffset {
    let millis = (at.unix_timestamp_nanos() / 1_000_000) as f64;
    let minutes_behind = js_sys::Date::new(&JsValue::from_f64(millis)).get_timezone_offset() as i32;
    UtcOffset::from_whole_seconds(-minutes_behind * 60).unwrap_or(UtcOffset::UTC)
}

pub fn renderer() -> CategoryRenderer {
    CategoryRenderer::with_offsets(local_offset_at)
}

#[derive(Clone, PartialEq)]
pub struct BrowserFile(pub File);

impl Attachment for BrowserFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

#[derive(Clone, Copy, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    type Attachment = BrowserFile;

    fn send(
        &self,
        request: ApiRequest<BrowserFile>,
    ) -> LocalBoxFuture<'static, Result<RawResponse, TransportError>> {
        send(request).boxed_local()
    }
}

async fn send(request: ApiRequest<BrowserFile>) -> Result<RawResponse, TransportError> {
    let builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
    };
    let builder = match &request.body {
        RequestBody::Empty => builder,
        RequestBody::Json(value) => builder.json(value).map_err(|e| TransportError::Network(e.to_string()))?,
        RequestBody::Multipart(form) => builder.body(form_data(form)?),
    };

    let response = builder.send().await.map_err(|e| TransportError::Network(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| TransportError::InvalidBody(e.to_string()))?;
    Ok(RawResponse::new(status, body))
}

fn form_data(form: &MultipartForm<BrowserFile>) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(js_error)?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value).map_err(js_error)?;
    }
    if let Some((name, file)) = &form.file {
        data.append_with_blob_and_filename(name, &file.0, &file.0.name()).map_err(js_error)?;
    }
    Ok(data)
}

fn js_error(error: JsValue) -> TransportError {
    TransportError::Network(format!("{:?}", error))
}

#[derive(Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn every(&self, period: Duration, tick: Rc<dyn Fn()>) -> TimerHandle {
        let interval = Interval::new(millis(period), move || tick());
        TimerHandle::new(move || drop(interval))
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(millis(duration)).boxed_local()
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[derive(Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}
