use super::{
    fetcher::{self, Fetcher},
    notifier::{self, Notification, Notifier},
};
use crate::objects::LibraryEntry;
use std::collections::HashSet;
use yew_agent::{Agent, AgentLink, Bridge, Bridged, Context, Dispatched, Dispatcher, HandlerId};

#[derive(Debug)]
pub enum Request {
    Refresh,
    Delete(LibraryEntry),
}

#[derive(Debug, Clone)]
pub enum Response {
    /// The complete library; replaces whatever the subscriber had before.
    Entries(Vec<LibraryEntry>),
    /// The file list could not be fetched; the previous set still stands.
    RefreshFailed,
    DeleteFailed(String),
}

pub enum Message {
    FetcherMessage(fetcher::Response),
}

/// Keeps the list of stored media files and hands it to every subscriber.
pub struct Library {
    link: AgentLink<Self>,
    subscribers: HashSet<HandlerId>,
    fetcher: Box<dyn Bridge<Fetcher>>,
    notifier: Dispatcher<Notifier>,
    entries: Option<Vec<LibraryEntry>>,
}

impl Library {
    fn send_response(&self, response: Response) {
        for handler_id in &self.subscribers {
            if handler_id.is_respondable() {
                self.link.respond(*handler_id, response.clone())
            }
        }
    }
}

impl Agent for Library {
    type Reach = Context<Self>;
    type Message = Message;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        let mut fetcher = Fetcher::bridge(link.callback(Message::FetcherMessage));

        fetcher.send(fetcher::Request::Files);

        Self {
            link,
            subscribers: HashSet::new(),
            fetcher,
            notifier: Notifier::dispatcher(),
            entries: None,
        }
    }

    fn update(&mut self, msg: Self::Message) {
        match msg {
            Message::FetcherMessage(response) => match response {
                fetcher::Response::Files(Ok(entries)) => {
                    log::debug!("library holds {} files", entries.len());
                    self.entries = Some(entries.clone());
                    self.send_response(Response::Entries(entries));
                }
                fetcher::Response::Files(Err(e)) => {
                    log::error!("failed to fetch files: {}", e);
                    self.send_response(Response::RefreshFailed);
                }
                fetcher::Response::Delete(_entry, Ok(())) => {
                    self.notifier
                        .send(notifier::Request::Notify(Notification::success("File deleted")));
                    self.fetcher.send(fetcher::Request::Files);
                }
                fetcher::Response::Delete(entry, Err(e)) => {
                    log::error!("failed to delete {}: {}", entry.path, e);
                    self.notifier
                        .send(notifier::Request::Notify(Notification::error("Delete failed")));
                    self.send_response(Response::DeleteFailed(entry.path));
                }
                _ => {}
            },
        }
    }

    fn handle_input(&mut self, msg: Self::Input, _id: HandlerId) {
        match msg {
            Request::Refresh => self.fetcher.send(fetcher::Request::Files),
            Request::Delete(entry) => self.fetcher.send(fetcher::Request::Delete(entry)),
        }
    }

    fn connected(&mut self, id: HandlerId) {
        self.subscribers.insert(id);

        if let Some(entries) = &self.entries {
            if id.is_respondable() {
                self.link.respond(id, Response::Entries(entries.clone()));
            }
        }
    }

    fn disconnected(&mut self, id: HandlerId) {
        self.subscribers.remove(&id);
    }
}
