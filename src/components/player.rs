use crate::{
    agents::{
        notifier::{self, Notifier},
        player::{self, Player, PlayerStatus},
    },
    components::{volume_slider::VolumeSlider, Icon},
    objects::{transport, JsError},
};
use yew::prelude::*;
use yew_agent::{Bridge, Bridged, Dispatched, Dispatcher};

/// Player bar at the bottom of every page.
pub struct MusicPlayer {
    player: Box<dyn Bridge<Player>>,
    notifier: Dispatcher<Notifier>,
    status: Option<PlayerStatus>,
    seek_ref: NodeRef,
}

pub enum Message {
    PlayerMessage(player::Response),
    Send(player::Request),
    SeekClick(MouseEvent),
}

impl MusicPlayer {
    fn process_update(&mut self, msg: Message) -> Result<bool, JsError> {
        match msg {
            Message::PlayerMessage(player::Response::Status(status)) => {
                let changed = self.status.as_ref() != Some(&status);

                self.status = Some(status);
                Ok(changed)
            }
            Message::Send(request) => {
                self.player.send(request);
                Ok(false)
            }
            Message::SeekClick(event) => {
                let bar = self
                    .seek_ref
                    .cast::<web_sys::Element>()
                    .ok_or("could not get seek bar")?;
                let rect = bar.get_bounding_client_rect();
                let fraction =
                    transport::seek_fraction(event.client_x() as f64 - rect.left(), rect.width());

                self.player.send(player::Request::Seek(fraction));
                Ok(false)
            }
        }
    }

    fn view_button(
        ctx: &Context<Self>,
        icon: &'static str,
        active: bool,
        request: fn() -> player::Request,
    ) -> Html {
        html! {
            <button class={classes!("button", "is-white", active.then(|| "is-active"))}
                onclick={ctx.link().callback(move |_| Message::Send(request()))}>
                <Icon name={icon}/>
            </button>
        }
    }
}

impl Component for MusicPlayer {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            player: Player::bridge(ctx.link().callback(Message::PlayerMessage)),
            notifier: Notifier::dispatcher(),
            status: None,
            seek_ref: NodeRef::default(),
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
        let status = match &self.status {
            Some(status) if status.visible => status,
            _ => return html! {},
        };
        let title = status
            .loaded
            .as_ref()
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| String::from("..."));
        let play_icon = match status.playing {
            true => "pause",
            false => "play",
        };

        html! {
            <footer class="music-player box">
                <p class="has-text-weight-semibold">{title}</p>
                <div class="seek-bar" ref={self.seek_ref.clone()} onclick={ctx.link().callback(Message::SeekClick)}>
                    <div class="seek-bar-fill" style={format!("width: {:.1}%", status.percent)}></div>
                </div>
                <div class="level is-mobile">
                    <span class="level-left">{transport::format_time(status.current_time)}</span>
                    <span class="level-right">{transport::format_time(status.duration)}</span>
                </div>
                <div class="buttons is-centered">
                    { Self::view_button(ctx, "shuffle", status.shuffle_enabled, || player::Request::ToggleShuffle) }
                    { Self::view_button(ctx, "step-backward", false, || player::Request::Previous) }
                    { Self::view_button(ctx, play_icon, false, || player::Request::TogglePlay) }
                    { Self::view_button(ctx, "step-forward", false, || player::Request::Next) }
                    { Self::view_button(ctx, "redo", status.loop_enabled, || player::Request::ToggleLoop) }
                    { Self::view_button(ctx, "times", false, || player::Request::Close) }
                </div>
                <VolumeSlider volume={status.volume}
                    onvolume={ctx.link().callback(|volume| Message::Send(player::Request::SetVolume(volume)))}/>
            </footer>
        }
    }
}
