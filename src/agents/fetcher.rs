use crate::objects::{
    api::{self, DeleteRequest, DownloadRequest, DownloadResponse, InfoRequest, InfoResponse},
    AppConfig, JsError, LibraryEntry, MediaInfo, StatusResponse,
};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use yew_agent::{Agent, AgentLink, Context, HandlerId};

#[derive(Debug)]
pub enum Request {
    Info(String),
    Download(DownloadRequest),
    /// Job id and the sequence number of this poll.
    Status(String, u64),
    Files,
    Delete(LibraryEntry),
}

#[derive(Debug)]
pub enum Response {
    Info(Result<MediaInfo, JsError>),
    Download(DownloadRequest, Result<String, JsError>),
    Status(String, u64, Result<StatusResponse, JsError>),
    Files(Result<Vec<LibraryEntry>, JsError>),
    Delete(LibraryEntry, Result<(), JsError>),
}

pub enum Message {
    Received(HandlerId, Response),
}

/// Talks to the backend. Every request is answered to the handler that
/// sent it; requests run concurrently and answers arrive in completion order.
pub struct Fetcher {
    link: AgentLink<Self>,
    api_base: String,
}

enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl Agent for Fetcher {
    type Reach = Context<Self>;
    type Message = Message;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        Self {
            link,
            api_base: AppConfig::load().api_base,
        }
    }

    fn update(&mut self, msg: Self::Message) {
        match msg {
            Message::Received(handler_id, response) => {
                if handler_id.is_respondable() {
                    self.link.respond(handler_id, response)
                }
            }
        }
    }

    fn handle_input(&mut self, msg: Self::Input, id: HandlerId) {
        let base = self.api_base.clone();

        match msg {
            Request::Info(url) => self.link.send_future(async move {
                let res = fetch_json::<InfoResponse, _>(
                    &format!("{}/info", base),
                    HttpMethod::Post,
                    Some(&InfoRequest { url }),
                )
                .await
                .map(InfoResponse::into_media_info);

                Message::Received(id, Response::Info(res))
            }),
            Request::Download(request) => self.link.send_future(async move {
                let res = fetch_json::<DownloadResponse, _>(
                    &format!("{}/download", base),
                    HttpMethod::Post,
                    Some(&request),
                )
                .await
                .map(|res| res.download_id);

                Message::Received(id, Response::Download(request, res))
            }),
            Request::Status(job_id, seq) => self.link.send_future(async move {
                let res = fetch_json::<StatusResponse, ()>(
                    &format!("{}/status/{}", base, job_id),
                    HttpMethod::Get,
                    None,
                )
                .await;

                Message::Received(id, Response::Status(job_id, seq, res))
            }),
            Request::Files => self.link.send_future(async move {
                let res =
                    fetch_json::<Vec<LibraryEntry>, ()>(&format!("{}/files", base), HttpMethod::Get, None)
                        .await;

                Message::Received(id, Response::Files(res))
            }),
            Request::Delete(entry) => self.link.send_future(async move {
                let res = fetch_json::<serde_json::Value, _>(
                    &format!("{}/delete", base),
                    HttpMethod::Delete,
                    Some(&DeleteRequest {
                        path: entry.path.clone(),
                    }),
                )
                .await
                .map(|_| ());

                Message::Received(id, Response::Delete(entry, res))
            }),
        }
    }
}

async fn fetch(
    url: &str,
    method: HttpMethod,
    body: Option<String>,
) -> Result<web_sys::Response, JsError> {
    let opts = web_sys::RequestInit::new();

    opts.set_method(method.as_str());

    if let Some(val) = body {
        let headers = web_sys::Headers::new()?;

        headers.append("Content-Type", "application/json")?;
        opts.set_headers(&headers);
        opts.set_body(&JsValue::from_str(&val));
    }

    let request = web_sys::Request::new_with_str_and_init(url, &opts)?;
    let window = web_sys::window().ok_or("error getting window")?;
    let resp: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    Ok(resp)
}

fn status_error(resp: &web_sys::Response) -> JsError {
    format!("fetcher error: {}: {}", resp.status(), resp.status_text()).into()
}

/// A JSON body with a non-empty `error` member is a failure whatever the
/// status code; otherwise a non-2xx status is.
async fn fetch_json<T: DeserializeOwned, B: Serialize>(
    url: &str,
    method: HttpMethod,
    body: Option<&B>,
) -> Result<T, JsError> {
    let body = match body {
        Some(body) => Some(serde_json::to_string(body)?),
        None => None,
    };
    let resp = fetch(url, method, body).await?;
    let text = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .ok_or("error casting fetched value to string")?;
    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            return Err(match resp.ok() {
                true => e.into(),
                false => status_error(&resp),
            })
        }
    };

    api::check_error(&value)?;

    if !resp.ok() {
        return Err(status_error(&resp));
    }

    Ok(serde_json::from_value(value)?)
}
