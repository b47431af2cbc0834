use super::{
    fetcher::{self, Fetcher},
    library::{self, Library},
    notifier::{self, Notification, Notifier},
};
use crate::objects::{
    api::DownloadRequest,
    job_registry::{Effect, JobRegistry, PollOutcome},
    AppConfig, DownloadJob,
};
use futures::future::{AbortHandle, Abortable};
use gloo_timers::future::TimeoutFuture;
use std::collections::{HashMap, HashSet};
use yew::Callback;
use yew_agent::{Agent, AgentLink, Bridge, Bridged, Context, Dispatched, Dispatcher, HandlerId};

#[derive(Debug)]
pub enum Request {
    /// Ask the backend to download something, then track the new job.
    Enqueue(DownloadRequest),
}

#[derive(Debug, Clone)]
pub enum Response {
    Snapshot(Vec<DownloadJob>),
    Updated(DownloadJob),
    Removed(String),
}

pub enum Message {
    Tick(String),
    FetcherMessage(fetcher::Response),
    Retire(String),
}

/// Tracks running download jobs. Every job gets its own poll loop which
/// ticks at a fixed interval until the job reaches a terminal state.
pub struct Downloads {
    link: AgentLink<Self>,
    subscribers: HashSet<HandlerId>,
    registry: JobRegistry,
    pollers: HashMap<String, AbortHandle>,
    fetcher: Box<dyn Bridge<Fetcher>>,
    library: Dispatcher<Library>,
    notifier: Dispatcher<Notifier>,
    tick: Callback<String>,
    config: AppConfig,
}

impl Downloads {
    fn send_response(&self, response: Response) {
        for handler_id in &self.subscribers {
            if handler_id.is_respondable() {
                self.link.respond(*handler_id, response.clone())
            }
        }
    }

    fn start(&mut self, id: String, title: String) {
        let job = match self.registry.start(&id, &title) {
            Some(job) => job,
            None => return,
        };
        let (handle, registration) = AbortHandle::new_pair();
        let poller = Abortable::new(
            poll_loop(self.tick.clone(), id.clone(), self.config.poll_interval_ms),
            registration,
        );

        log::debug!("tracking download {} ({})", id, title);
        wasm_bindgen_futures::spawn_local(async move {
            let _ = poller.await;
        });
        self.pollers.insert(id, handle);
        self.send_response(Response::Updated(job));
    }

    fn stop(&mut self, id: &str) {
        if let Some(handle) = self.pollers.remove(id) {
            handle.abort();
        }
    }

    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render(job) => self.send_response(Response::Updated(job)),
                Effect::NotifySuccess { id, title } => {
                    log::info!("download {} completed", id);
                    self.notifier.send(notifier::Request::Notify(Notification::success(
                        format!("Finished: {}", title),
                    )));
                    self.notifier.send(notifier::Request::System {
                        title: "Download Complete".into(),
                        body: title,
                    });
                }
                Effect::RefreshLibrary => self.library.send(library::Request::Refresh),
                Effect::ScheduleRemoval(id) => {
                    let delay = self.config.completed_retention_ms;

                    self.link.send_future(async move {
                        TimeoutFuture::new(delay).await;
                        Message::Retire(id)
                    });
                }
                Effect::StopPolling(id) => self.stop(&id),
            }
        }
    }
}

impl Agent for Downloads {
    type Reach = Context<Self>;
    type Message = Message;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        let config = AppConfig::load();

        Self {
            fetcher: Fetcher::bridge(link.callback(Message::FetcherMessage)),
            tick: link.callback(Message::Tick),
            link,
            subscribers: HashSet::new(),
            registry: JobRegistry::new(config.clamp_progress),
            pollers: HashMap::new(),
            library: Library::dispatcher(),
            notifier: Notifier::dispatcher(),
            config,
        }
    }

    fn update(&mut self, msg: Self::Message) {
        match msg {
            Message::Tick(id) => match self.registry.issue_poll(&id) {
                Some(seq) => self.fetcher.send(fetcher::Request::Status(id, seq)),
                None => self.stop(&id),
            },
            Message::FetcherMessage(response) => match response {
                fetcher::Response::Status(id, seq, res) => {
                    let outcome = match res {
                        Ok(status) => PollOutcome::Status(status),
                        Err(e) => PollOutcome::Unreachable(e.description),
                    };
                    let effects = self.registry.apply(&id, seq, outcome);

                    self.run(effects);
                }
                fetcher::Response::Download(request, Ok(id)) => {
                    self.notifier
                        .send(notifier::Request::Notify(Notification::success("Download started!")));
                    self.start(id, request.title);
                }
                fetcher::Response::Download(request, Err(e)) => {
                    log::error!("failed to start download of {}: {}", request.url, e);
                    self.notifier.send(notifier::Request::Notify(Notification::error(
                        "Failed to start download",
                    )));
                }
                _ => {}
            },
            Message::Retire(id) => {
                if self.registry.purge(&id).is_some() {
                    self.send_response(Response::Removed(id));
                }
            }
        }
    }

    fn handle_input(&mut self, msg: Self::Input, _id: HandlerId) {
        match msg {
            Request::Enqueue(request) => self.fetcher.send(fetcher::Request::Download(request)),
        }
    }

    fn connected(&mut self, id: HandlerId) {
        self.subscribers.insert(id);

        if id.is_respondable() {
            self.link.respond(id, Response::Snapshot(self.registry.jobs()));
        }
    }

    fn disconnected(&mut self, id: HandlerId) {
        self.subscribers.remove(&id);
    }

    fn destroy(&mut self) {
        for (_, handle) in self.pollers.drain() {
            handle.abort();
        }
    }
}

async fn poll_loop(tick: Callback<String>, id: String, interval_ms: u32) {
    loop {
        TimeoutFuture::new(interval_ms).await;
        tick.emit(id.clone());
    }
}
