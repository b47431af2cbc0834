use crate::{
    agents::player::{self, Player, VideoSource},
    components::Icon,
};
use yew::prelude::*;
use yew_agent::{Bridge, Bridged};

/// Overlay playing either a stored video file or an embedded preview.
pub struct VideoModal {
    player: Box<dyn Bridge<Player>>,
    video: Option<VideoSource>,
}

pub enum Message {
    PlayerMessage(player::Response),
    Close,
    Share,
}

impl Component for VideoModal {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            player: Player::bridge(ctx.link().callback(Message::PlayerMessage)),
            video: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Message::PlayerMessage(player::Response::Status(status)) => {
                let changed = self.video != status.video;

                self.video = status.video;
                changed
            }
            Message::Close => {
                self.player.send(player::Request::CloseVideo);
                false
            }
            Message::Share => {
                self.player.send(player::Request::Share);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let video = match &self.video {
            Some(video) => video,
            None => return html! {},
        };
        let content = match video {
            VideoSource::File { url, .. } => html! {
                <video src={url.clone()} autoplay={true} controls={true} style="width: 100%"></video>
            },
            VideoSource::Embed { url, .. } => html! {
                <iframe src={url.clone()} allowfullscreen={true} allow="autoplay; encrypted-media" style="width: 100%; aspect-ratio: 16 / 9; border: 0"></iframe>
            },
        };
        let share = match video.share_target() {
            Some(_) => html! {
                <button class="button is-small" title="Share" onclick={ctx.link().callback(|_| Message::Share)}>
                    <Icon name="share-alt"/>
                </button>
            },
            None => html! {},
        };

        html! {
            <div class="modal is-active">
                <div class="modal-background" onclick={ctx.link().callback(|_| Message::Close)}></div>
                <div class="modal-card">
                    <header class="modal-card-head">
                        <p class="modal-card-title">{video.title()}</p>
                        {share}
                        <button class="delete" aria-label="close" onclick={ctx.link().callback(|_| Message::Close)}></button>
                    </header>
                    <section class="modal-card-body">{content}</section>
                </div>
            </div>
        }
    }
}
