use crate::agents::notifier::{self, Notifier};
use yew::prelude::*;
use yew_agent::{Bridge, Bridged};

/// Toast stack. Toasts leave on their own after a few seconds or on click.
pub struct Notification {
    notifier: Box<dyn Bridge<Notifier>>,
    notifications: Vec<notifier::Notification>,
}

pub enum Message {
    NotifierResponse(notifier::Response),
    CloseNotification(uuid::Uuid),
}

impl Component for Notification {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            notifier: Notifier::bridge(ctx.link().callback(Message::NotifierResponse)),
            notifications: Vec::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Message::NotifierResponse(resp) => match resp {
                notifier::Response::Notifications(notifications) => {
                    self.notifications = notifications;
                    true
                }
            },
            Message::CloseNotification(id) => {
                self.notifier.send(notifier::Request::Dismiss(id));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="toast-container">
                { self.notifications.iter().map(|notification| {
                    let color = match notification.severity {
                        notifier::NotificationSeverity::Error => "is-danger",
                        notifier::NotificationSeverity::Info => "is-info",
                        notifier::NotificationSeverity::Success => "is-success",
                    };
                    let id = notification.id;

                    html! {
                        <div key={id.to_string()} class={classes!("notification", "toast", color)} onclick={ctx.link().callback(move |_| Message::CloseNotification(id))}>
                            {notification.text.clone()}
                        </div>
                    }
                }).collect::<Html>() }
            </div>
        }
    }
}
