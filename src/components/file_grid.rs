use super::{Icon, IconStyle};
use crate::{
    agents::{
        library::{self, Library},
        notifier::{self, Notifier},
        player::{self, Player},
    },
    objects::{library_view::LibraryView, AppConfig, JsError, LibraryEntry, MediaKind},
};
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_agent::{Bridge, Bridged, Dispatched, Dispatcher};

/// The stored files. Clicking plays, a long press offers to delete.
pub struct FileGrid {
    library: Box<dyn Bridge<Library>>,
    player: Dispatcher<Player>,
    notifier: Dispatcher<Notifier>,
    view: LibraryView,
    press_timer: Option<Timeout>,
    suppress_click: bool,
    long_press_ms: u32,
}

/// Cards are addressed by file path.
pub enum Message {
    LibraryMessage(library::Response),
    Refresh,
    PressStart(String),
    PressEnd,
    LongPress(String),
    Click(String),
}

impl FileGrid {
    fn entry(&self, path: &str) -> Result<(usize, LibraryEntry), JsError> {
        self.view
            .find(path)
            .map(|(index, entry)| (index, entry.clone()))
            .ok_or_else(|| JsError::from(format!("\"{}\" is no longer in the library", path)))
    }

    fn process_update(&mut self, ctx: &Context<Self>, msg: Message) -> Result<bool, JsError> {
        match msg {
            Message::LibraryMessage(library::Response::Entries(entries)) => {
                self.view.replace(entries);
                Ok(true)
            }
            Message::LibraryMessage(library::Response::RefreshFailed) => {
                self.view.refresh_failed();
                Ok(true)
            }
            Message::LibraryMessage(library::Response::DeleteFailed(path)) => {
                Ok(self.view.delete_failed(&path))
            }
            Message::Refresh => {
                if !self.view.begin_refresh() {
                    return Ok(false);
                }

                self.library.send(library::Request::Refresh);
                Ok(true)
            }
            Message::PressStart(path) => {
                let link = ctx.link().clone();

                self.suppress_click = false;
                self.press_timer = Some(Timeout::new(self.long_press_ms, move || {
                    link.send_message(Message::LongPress(path))
                }));
                Ok(false)
            }
            Message::PressEnd => {
                if let Some(timer) = self.press_timer.take() {
                    timer.cancel();
                }
                Ok(false)
            }
            Message::LongPress(path) => {
                self.press_timer = None;
                self.suppress_click = true;

                let (_, entry) = self.entry(&path)?;
                let window = web_sys::window().ok_or("error getting window")?;
                let confirmed = window
                    .confirm_with_message(&format!("Permanently delete \"{}\"?", entry.name))?;

                if !confirmed {
                    return Ok(false);
                }

                self.view.mark_deleting(&entry.path);
                self.library.send(library::Request::Delete(entry));
                Ok(true)
            }
            Message::Click(path) => {
                if self.suppress_click {
                    self.suppress_click = false;
                    return Ok(false);
                }

                let (index, entry) = self.entry(&path)?;

                match entry.kind() {
                    MediaKind::Audio => self.player.send(player::Request::Select(index)),
                    MediaKind::Video => self.player.send(player::Request::OpenVideo(entry)),
                }
                Ok(false)
            }
        }
    }

    fn view_header(&self, ctx: &Context<Self>) -> Html {
        let refreshing = self.view.is_refreshing();

        html! {
            <div class="level is-mobile">
                <div class="level-left"><h1 class="title is-4 level-item">{"Library"}</h1></div>
                <div class="level-right">
                    <button class="button is-white level-item" title="Refresh" disabled={refreshing}
                        onclick={ctx.link().callback(|_| Message::Refresh)}>
                        <Icon name="sync-alt" spin={refreshing}/>
                    </button>
                </div>
            </div>
        }
    }

    fn view_entry(&self, ctx: &Context<Self>, entry: &LibraryEntry) -> Html {
        let icon = match entry.kind() {
            MediaKind::Audio => "music",
            MediaKind::Video => "film",
        };
        let deleting = self.view.is_deleting(&entry.path);
        let path = entry.path.clone();
        let on_touch = {
            let path = path.clone();
            ctx.link().callback(move |_| Message::PressStart(path.clone()))
        };
        let on_mouse = {
            let path = path.clone();
            ctx.link().callback(move |_| Message::PressStart(path.clone()))
        };

        html! {
            <div class="column is-one-quarter-desktop is-half-tablet">
                <div class={classes!("box", "file-card", deleting.then(|| "is-deleting"))}
                    onmousedown={on_mouse}
                    ontouchstart={on_touch}
                    onmouseup={ctx.link().callback(|_| Message::PressEnd)}
                    onmouseleave={ctx.link().callback(|_| Message::PressEnd)}
                    ontouchend={ctx.link().callback(|_| Message::PressEnd)}
                    onclick={ctx.link().callback(move |_| Message::Click(path.clone()))}>
                    <Icon name={icon}/>
                    <p class="has-text-weight-semibold">{&entry.name}</p>
                    <p class="is-size-7">{&entry.size}</p>
                </div>
            </div>
        }
    }

    fn view_entries(&self, ctx: &Context<Self>) -> Html {
        match self.view.entries() {
            Some([]) => html! {
                <div class="has-text-centered">
                    <Icon name="folder-open" style={IconStyle::Regular}/>
                    <p>{"No downloads yet."}</p>
                </div>
            },
            Some(entries) => html! {
                <div class="columns is-multiline">
                    { for entries.iter().map(|entry| self.view_entry(ctx, entry)) }
                </div>
            },
            None => html! {
                <div class="has-text-centered">
                    <Icon name="spinner" spin={true}/>
                </div>
            },
        }
    }
}

impl Component for FileGrid {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            library: Library::bridge(ctx.link().callback(Message::LibraryMessage)),
            player: Player::dispatcher(),
            notifier: Notifier::dispatcher(),
            view: LibraryView::default(),
            press_timer: None,
            suppress_click: false,
            long_press_ms: AppConfig::load().long_press_ms,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match self.process_update(ctx, msg) {
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
                { self.view_header(ctx) }
                { self.view_entries(ctx) }
            </section>
        }
    }
}
