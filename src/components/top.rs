use super::{
    nav_bar::NavBar,
    notification::Notification,
    player::MusicPlayer,
    router::{switch, AppRoute},
    video_modal::VideoModal,
};
use crate::agents::{downloads, library, player};
use yew::{prelude::*, Component};
use yew_agent::{Bridge, Bridged};
use yew_router::prelude::*;

/// Root component. Holding the bridges keeps the agents (and with them the
/// running pollers and the audio element) alive across page changes.
pub struct Top {
    _downloads: Box<dyn Bridge<downloads::Downloads>>,
    _library: Box<dyn Bridge<library::Library>>,
    _player: Box<dyn Bridge<player::Player>>,
}
pub enum Message {
    DownloadsMessage(downloads::Response),
    LibraryMessage(library::Response),
    PlayerMessage(player::Response),
}

impl Component for Top {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let downloads_cb = ctx.link().callback(Message::DownloadsMessage);
        let library_cb = ctx.link().callback(Message::LibraryMessage);
        let player_cb = ctx.link().callback(Message::PlayerMessage);

        Self {
            _downloads: downloads::Downloads::bridge(downloads_cb),
            _library: library::Library::bridge(library_cb),
            _player: player::Player::bridge(player_cb),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Message::DownloadsMessage(_resp) => false,
            Message::LibraryMessage(_resp) => false,
            Message::PlayerMessage(_resp) => false,
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <BrowserRouter>
                <NavBar/>
                <Notification/>
                <main>
                    <Switch<AppRoute> render={Switch::render(switch)}/>
                </main>
                <MusicPlayer/>
                <VideoModal/>
            </BrowserRouter>
        }
    }
}
