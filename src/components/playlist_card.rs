use super::{
    media_card::{selected_value, view_format_select, FORMATS},
    Icon,
};
use crate::{
    agents::{
        downloads::{self, Downloads},
        notifier::{self, Notification, Notifier},
        player::{self, Player},
    },
    objects::{api::DownloadRequest, api::PlaylistInfo, JsError},
};
use yew::prelude::*;
use yew_agent::{Dispatched, Dispatcher};

/// Entries of a playlist; each one can be previewed or downloaded on its own.
pub struct PlaylistCard {
    downloads: Dispatcher<Downloads>,
    player: Dispatcher<Player>,
    notifier: Dispatcher<Notifier>,
    format_ref: NodeRef,
}

#[derive(Clone, PartialEq, Properties)]
pub struct Props {
    pub info: PlaylistInfo,
}

pub enum Message {
    Preview(usize),
    Download(usize),
}

impl PlaylistCard {
    fn process_update(&mut self, ctx: &Context<Self>, msg: Message) -> Result<bool, JsError> {
        let entries = &ctx.props().info.entries;

        match msg {
            Message::Preview(index) => {
                let entry = entries.get(index).ok_or("playlist entry not found")?;

                match entry.preview_url() {
                    Some(url) => self.player.send(player::Request::OpenEmbed {
                        url,
                        title: entry.title.clone(),
                    }),
                    None => self.notifier.send(notifier::Request::Notify(Notification::error(
                        "Streaming not supported for this source",
                    ))),
                }
                Ok(false)
            }
            Message::Download(index) => {
                let entry = entries.get(index).ok_or("playlist entry not found")?;
                let format = selected_value(&self.format_ref, FORMATS[0])?;

                self.downloads.send(downloads::Request::Enqueue(DownloadRequest::new(
                    &entry.url,
                    &entry.title,
                    &format,
                    "best",
                )));
                Ok(false)
            }
        }
    }
}

impl Component for PlaylistCard {
    type Message = Message;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            downloads: Downloads::dispatcher(),
            player: Player::dispatcher(),
            notifier: Notifier::dispatcher(),
            format_ref: NodeRef::default(),
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
        let info = &ctx.props().info;

        html! {
            <div class="card">
                <header class="card-header">
                    <p class="card-header-title">{&info.title}</p>
                    <p class="card-header-icon">{format!("{} Videos", info.count)}</p>
                </header>
                <div class="card-content">
                    <div class="field">{ view_format_select(&self.format_ref) }</div>
                    <ul>
                        { for info.entries.iter().enumerate().map(|(index, entry)| html! {
                            <li class="level is-mobile">
                                <div class="level-left"><span class="level-item">{&entry.title}</span></div>
                                <div class="level-right">
                                    <button class="button is-small level-item" onclick={ctx.link().callback(move |_| Message::Preview(index))}>
                                        <Icon name="play"/>
                                    </button>
                                    <button class="button is-small is-primary level-item" onclick={ctx.link().callback(move |_| Message::Download(index))}>
                                        <Icon name="download"/>
                                    </button>
                                </div>
                            </li>
                        })}
                    </ul>
                </div>
            </div>
        }
    }
}
