use gloo_timers::future::TimeoutFuture;
use std::collections::HashSet;
use uuid::Uuid;
use web_sys::{NotificationOptions, NotificationPermission};
use yew_agent::{Agent, AgentLink, Context, HandlerId};

use crate::objects::{AppConfig, JsError};

pub struct Notifier {
    subscribers: HashSet<HandlerId>,
    link: AgentLink<Self>,
    notifications: Vec<Notification>,
    toast_duration_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationSeverity {
    Error,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub text: String,
    pub severity: NotificationSeverity,
}

impl Notification {
    fn new(text: impl Into<String>, severity: NotificationSeverity) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            severity,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, NotificationSeverity::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, NotificationSeverity::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, NotificationSeverity::Error)
    }
}

#[derive(Debug)]
pub enum Request {
    Notify(Notification),
    NotifyError(JsError),
    Dismiss(Uuid),
    /// Operating system notification, shown only if permission was granted.
    System { title: String, body: String },
}

#[derive(Debug, Clone)]
pub enum Response {
    Notifications(Vec<Notification>),
}

pub enum Message {
    Expired(Uuid),
}

impl Notifier {
    fn notify_subscribed(&self) {
        for subscriber in &self.subscribers {
            if subscriber.is_respondable() {
                self.link.respond(
                    *subscriber,
                    Response::Notifications(self.notifications.clone()),
                );
            }
        }
    }

    fn push(&mut self, notification: Notification) {
        match notification.severity {
            NotificationSeverity::Error => log::error!("{}", notification.text),
            NotificationSeverity::Info | NotificationSeverity::Success => {
                log::info!("{}", notification.text)
            }
        }

        let id = notification.id;
        let duration = self.toast_duration_ms;

        self.notifications.push(notification);
        self.link.send_future(async move {
            TimeoutFuture::new(duration).await;
            Message::Expired(id)
        });
    }

    fn dismiss(&mut self, id: Uuid) {
        self.notifications.retain(|n| n.id != id);
    }
}

impl Agent for Notifier {
    type Reach = Context<Self>;
    type Message = Message;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        Self {
            link,
            subscribers: HashSet::new(),
            notifications: Vec::new(),
            toast_duration_ms: AppConfig::load().toast_duration_ms,
        }
    }

    fn update(&mut self, msg: Self::Message) {
        match msg {
            Message::Expired(id) => self.dismiss(id),
        }
        self.notify_subscribed();
    }

    fn handle_input(&mut self, msg: Self::Input, _id: HandlerId) {
        match msg {
            Request::Notify(notification) => self.push(notification),
            Request::NotifyError(err) => self.push(Notification::error(err.description)),
            Request::Dismiss(id) => self.dismiss(id),
            Request::System { title, body } => {
                if let Err(e) = show_system_notification(&title, &body) {
                    log::warn!("could not show system notification: {}", e);
                }
            }
        }
        self.notify_subscribed();
    }

    fn connected(&mut self, id: HandlerId) {
        self.subscribers.insert(id);
        self.notify_subscribed();
    }

    fn disconnected(&mut self, id: HandlerId) {
        self.subscribers.remove(&id);
    }
}

/// Asks for notification permission once; the answer is not awaited.
pub fn request_permission() {
    if web_sys::Notification::permission() == NotificationPermission::Default {
        if let Err(e) = web_sys::Notification::request_permission() {
            log::warn!("notification permission request failed: {}", JsError::from(e));
        }
    }
}

fn show_system_notification(title: &str, body: &str) -> Result<(), JsError> {
    if web_sys::Notification::permission() != NotificationPermission::Granted {
        return Ok(());
    }

    let options = NotificationOptions::new();

    options.set_body(body);
    options.set_icon("/static/img/logo.svg");
    web_sys::Notification::new_with_options(title, &options)?;

    Ok(())
}
