use super::{media_card::MediaCard, playlist_card::PlaylistCard, Icon};
use crate::{
    agents::{
        fetcher::{self, Fetcher},
        notifier::{self, Notification, Notifier},
    },
    objects::{JsError, MediaInfo},
};
use yew::prelude::*;
use yew_agent::{Bridge, Bridged, Dispatched, Dispatcher};

/// URL input plus whatever the backend resolved it to.
pub struct UrlForm {
    fetcher: Box<dyn Bridge<Fetcher>>,
    notifier: Dispatcher<Notifier>,
    input_ref: NodeRef,
    analyzing: bool,
    result: Option<MediaInfo>,
}

pub enum Message {
    FetcherMessage(fetcher::Response),
    KeyPress(String),
    Submit,
}

impl UrlForm {
    fn process_update(&mut self, msg: Message) -> Result<bool, JsError> {
        match msg {
            Message::KeyPress(key) => match key.as_str() {
                "Enter" => self.process_update(Message::Submit),
                _ => Ok(false),
            },
            Message::Submit => {
                let url = self
                    .input_ref
                    .cast::<web_sys::HtmlInputElement>()
                    .ok_or("could not get input element")?
                    .value()
                    .trim()
                    .to_string();

                if url.is_empty() {
                    self.notifier.send(notifier::Request::Notify(Notification::error(
                        "Please paste a URL",
                    )));
                    return Ok(false);
                }

                self.result = None;
                self.analyzing = true;
                self.fetcher.send(fetcher::Request::Info(url));
                Ok(true)
            }
            Message::FetcherMessage(fetcher::Response::Info(res)) => {
                self.analyzing = false;
                match res {
                    Ok(info) => self.result = Some(info),
                    Err(e) => self.notifier.send(notifier::Request::NotifyError(e)),
                }
                Ok(true)
            }
            Message::FetcherMessage(_) => Ok(false),
        }
    }

    fn view_result(&self) -> Html {
        match &self.result {
            Some(MediaInfo::Single(info)) => html! {<MediaCard info={info.clone()}/>},
            Some(MediaInfo::Playlist(info)) => html! {<PlaylistCard info={info.clone()}/>},
            None if self.analyzing => html! {
                <div class="box skeleton-block"></div>
            },
            None => html! {},
        }
    }
}

impl Component for UrlForm {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            fetcher: Fetcher::bridge(ctx.link().callback(Message::FetcherMessage)),
            notifier: Notifier::dispatcher(),
            input_ref: NodeRef::default(),
            analyzing: false,
            result: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match self.process_update(msg) {
            Ok(res) => res,
            Err(e) => {
                self.notifier.send(notifier::Request::NotifyError(e));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <section class="section">
                <div class="field has-addons">
                    <div class="control is-expanded">
                        <input class="input" ref={self.input_ref.clone()} type="url" placeholder="paste a video or playlist URL"
                            onkeypress={ctx.link().callback(|e: KeyboardEvent| Message::KeyPress(e.key()))}/>
                    </div>
                    <div class="control">
                        <button class="button is-primary" disabled={self.analyzing} onclick={ctx.link().callback(|_| Message::Submit)}>
                            {match self.analyzing {
                                true => html! {<><Icon name="spinner" spin={true}/><span>{"Analyzing..."}</span></>},
                                false => html! {<><Icon name="search"/><span>{"Analyze"}</span></>},
                            }}
                        </button>
                    </div>
                </div>
                { self.view_result() }
            </section>
        }
    }
}
