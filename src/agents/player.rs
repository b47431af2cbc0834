use super::{
    library::{self, Library},
    notifier::{self, Notification, Notifier},
};
use crate::objects::{
    transport, Advance, AppConfig, JsError, LibraryEntry, PlaylistController,
};
use js_sys::{Array, Function, Object, Promise, Reflect};
use std::collections::HashSet;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, FilePropertyBag, HtmlAudioElement};
use yew_agent::{Agent, AgentLink, Bridge, Bridged, Context, Dispatched, Dispatcher, HandlerId};

#[derive(Debug, Clone)]
pub enum Request {
    Select(usize),
    Next,
    Previous,
    TogglePlay,
    /// Stop the audio and hide the player bar.
    Close,
    /// Fraction of the track, `0.0..=1.0`.
    Seek(f64),
    SetVolume(f64),
    ToggleLoop,
    ToggleShuffle,
    OpenVideo(LibraryEntry),
    OpenEmbed { url: String, title: String },
    CloseVideo,
    /// Hand the open stored file to the system share sheet.
    Share,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VideoSource {
    File { url: String, title: String },
    Embed { url: String, title: String },
}

impl VideoSource {
    pub fn title(&self) -> &str {
        match self {
            VideoSource::File { title, .. } | VideoSource::Embed { title, .. } => title,
        }
    }

    /// URL and title of a stored file; embedded previews cannot be shared.
    pub fn share_target(&self) -> Option<(&str, &str)> {
        match self {
            VideoSource::File { url, title } => Some((url, title)),
            VideoSource::Embed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Unsupported,
}

fn share_toast(outcome: &Result<ShareOutcome, JsError>) -> Option<&'static str> {
    match outcome {
        Ok(ShareOutcome::Shared) => None,
        Ok(ShareOutcome::Unsupported) => Some("Share not supported on this browser"),
        Err(_) => Some("Sharing failed"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatus {
    /// The file loaded into the audio element.
    pub loaded: Option<LibraryEntry>,
    pub index: Option<usize>,
    pub visible: bool,
    pub playing: bool,
    pub loop_enabled: bool,
    pub shuffle_enabled: bool,
    pub current_time: f64,
    pub duration: f64,
    pub percent: f64,
    pub volume: f64,
    pub video: Option<VideoSource>,
}

#[derive(Debug, Clone)]
pub enum Response {
    Status(PlayerStatus),
}

pub enum Message {
    LibraryMessage(library::Response),
    StartedPlaying(Result<JsValue, JsValue>),
    OnPlay,
    OnPause,
    OnTimeupdate,
    OnEnd,
    Shared(Result<ShareOutcome, JsError>),
}

/// Owns the one audio element and the playlist driving it.
///
/// Opening a video pauses the audio, and selecting a track closes the
/// video, so at most one source plays at any time.
pub struct Player {
    link: AgentLink<Self>,
    subscribers: HashSet<HandlerId>,
    _library: Box<dyn Bridge<Library>>,
    notifier: Dispatcher<Notifier>,
    audio_element: Option<HtmlAudioElement>,
    playlist: PlaylistController,
    loaded: Option<LibraryEntry>,
    video: Option<VideoSource>,
    visible: bool,
    playing: bool,
    api_base: String,
    _on_play_closure: Closure<dyn Fn(web_sys::Event)>,
    _on_pause_closure: Closure<dyn Fn(web_sys::Event)>,
    _on_end_closure: Closure<dyn Fn(web_sys::Event)>,
    _on_timeupdate_closure: Closure<dyn Fn(web_sys::Event)>,
}

impl Player {
    fn audio(&self) -> Result<&HtmlAudioElement, JsError> {
        self.audio_element
            .as_ref()
            .ok_or_else(|| JsError::from("audio element not available"))
    }

    fn status(&self) -> PlayerStatus {
        let (current_time, duration, volume) = match &self.audio_element {
            Some(audio) => (audio.current_time(), audio.duration(), audio.volume()),
            None => (0.0, f64::NAN, 1.0),
        };

        PlayerStatus {
            loaded: self.loaded.clone(),
            index: self.playlist.current_index(),
            visible: self.visible,
            playing: self.playing,
            loop_enabled: self.playlist.loop_enabled(),
            shuffle_enabled: self.playlist.shuffle_enabled(),
            current_time,
            duration,
            percent: transport::progress_percent(current_time, duration),
            volume,
            video: self.video.clone(),
        }
    }

    fn send_response(&self) {
        let status = self.status();

        for handler_id in &self.subscribers {
            if handler_id.is_respondable() {
                self.link.respond(*handler_id, Response::Status(status.clone()))
            }
        }
    }

    fn notify(&mut self, text: &str) {
        self.notifier
            .send(notifier::Request::Notify(Notification::info(text)));
    }

    fn play(&self) -> Result<(), JsError> {
        let promise: Promise = self.audio()?.play()?;

        self.link
            .send_future(async move { Message::StartedPlaying(JsFuture::from(promise).await) });
        Ok(())
    }

    /// Loads the playlist's current track and starts it.
    fn load_current(&mut self) -> Result<(), JsError> {
        let entry = self
            .playlist
            .current()
            .cloned()
            .ok_or("no track selected")?;
        let audio = self.audio()?;

        audio.set_src(&entry.serve_url(&self.api_base));
        self.video = None;
        self.loaded = Some(entry);
        self.visible = true;
        self.playing = true;
        self.play()
    }

    fn close_video(&mut self) {
        self.video = None;
    }

    fn open_video(&mut self, video: VideoSource) -> Result<(), JsError> {
        self.audio()?.pause()?;
        self.playing = false;
        self.video = Some(video);
        Ok(())
    }

    fn process_update(&mut self, msg: Message) -> Result<(), JsError> {
        match msg {
            Message::LibraryMessage(library::Response::Entries(entries)) => {
                self.playlist.replace_entries(entries);
            }
            Message::LibraryMessage(_) => {}
            Message::StartedPlaying(res) => {
                if let Err(e) = res {
                    self.playing = false;
                    return Err(e.into());
                }
            }
            Message::OnPlay => self.playing = true,
            Message::OnPause => self.playing = false,
            Message::OnTimeupdate => {}
            Message::Shared(outcome) => {
                if let Err(e) = &outcome {
                    log::error!("sharing failed: {}", e);
                }
                if let Some(text) = share_toast(&outcome) {
                    self.notifier
                        .send(notifier::Request::Notify(Notification::error(text)));
                }
            }
            Message::OnEnd => match self.playlist.advance(&mut rand::thread_rng()) {
                Ok(Advance::Replay(_)) => {
                    self.audio()?.set_current_time(0.0);
                    self.play()?;
                }
                Ok(Advance::Select(_)) => self.load_current()?,
                Err(e) => {
                    log::debug!("nothing to advance to: {}", e);
                    self.playing = false;
                }
            },
        }

        Ok(())
    }

    fn process_handle_input(&mut self, msg: Request) -> Result<(), JsError> {
        let mut rng = rand::thread_rng();

        match msg {
            Request::Select(index) => {
                self.playlist.select(index as isize)?;
                self.load_current()?;
            }
            Request::Next => {
                self.playlist.next(&mut rng)?;
                self.load_current()?;
            }
            Request::Previous => {
                self.playlist.previous(&mut rng)?;
                self.load_current()?;
            }
            Request::TogglePlay => {
                let paused = self.audio()?.paused();

                match paused {
                    true => {
                        self.playing = true;
                        self.play()?;
                    }
                    false => {
                        self.audio()?.pause()?;
                        self.playing = false;
                    }
                }
            }
            Request::Close => {
                self.audio()?.pause()?;
                self.playing = false;
                self.visible = false;
            }
            Request::Seek(fraction) => {
                let audio = self.audio()?;

                if let Some(position) = transport::seek_position(fraction, audio.duration()) {
                    audio.set_current_time(position);
                }
            }
            Request::SetVolume(volume) => {
                self.audio()?.set_volume(transport::clamp_volume(volume));
            }
            Request::ToggleLoop => {
                let text = match self.playlist.toggle_loop() {
                    true => "Loop Enabled",
                    false => "Loop Disabled",
                };
                self.notify(text);
            }
            Request::ToggleShuffle => {
                let text = match self.playlist.toggle_shuffle() {
                    true => "Shuffle Enabled",
                    false => "Shuffle Disabled",
                };
                self.notify(text);
            }
            Request::OpenVideo(entry) => {
                let url = entry.serve_url(&self.api_base);

                self.open_video(VideoSource::File {
                    url,
                    title: entry.name,
                })?;
            }
            Request::OpenEmbed { url, title } => {
                self.notify("Opening Preview...");
                self.open_video(VideoSource::Embed { url, title })?;
            }
            Request::CloseVideo => self.close_video(),
            Request::Share => {
                let (url, title) = self
                    .video
                    .as_ref()
                    .and_then(VideoSource::share_target)
                    .map(|(url, title)| (url.to_string(), title.to_string()))
                    .ok_or("only stored files can be shared")?;

                self.link
                    .send_future(async move { Message::Shared(share_file(&url, &title).await) });
            }
        }

        Ok(())
    }
}

fn listen(
    audio: &HtmlAudioElement,
    event: &str,
    closure: &Closure<dyn Fn(web_sys::Event)>,
) -> Result<(), JsError> {
    audio.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(())
}

/// Fetches the file and passes it to `navigator.share`, which is looked up
/// at runtime since not every browser has it.
async fn share_file(url: &str, title: &str) -> Result<ShareOutcome, JsError> {
    let window = web_sys::window().ok_or("error getting window")?;
    let navigator = window.navigator();
    let share = Reflect::get(&navigator, &JsValue::from_str("share"))?;
    let share = match share.dyn_into::<Function>() {
        Ok(share) => share,
        Err(_) => return Ok(ShareOutcome::Unsupported),
    };

    let resp: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;

    if !resp.ok() {
        return Err(format!("could not fetch {}: {}", url, resp.status()).into());
    }

    let blob: Blob = JsFuture::from(resp.blob()?).await?.dyn_into()?;
    let options = FilePropertyBag::new();

    options.set_type(&blob.type_());

    let file = File::new_with_blob_sequence_and_options(&Array::of1(&blob), title, &options)?;
    let data = Object::new();

    Reflect::set(&data, &JsValue::from_str("files"), &Array::of1(&file))?;
    Reflect::set(&data, &JsValue::from_str("title"), &JsValue::from_str(title))?;
    Reflect::set(
        &data,
        &JsValue::from_str("text"),
        &JsValue::from_str("Shared from MediaLoad"),
    )?;

    let promise: Promise = share.call1(&navigator, &data)?.dyn_into()?;

    JsFuture::from(promise).await?;
    Ok(ShareOutcome::Shared)
}

impl Agent for Player {
    type Reach = Context<Self>;
    type Message = Message;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        let on_play_callback = link.callback(|_: web_sys::Event| Message::OnPlay);
        let on_play_closure =
            Closure::wrap(
                Box::new(move |event: web_sys::Event| on_play_callback.emit(event))
                    as Box<dyn Fn(_)>,
            );
        let on_pause_callback = link.callback(|_: web_sys::Event| Message::OnPause);
        let on_pause_closure =
            Closure::wrap(
                Box::new(move |event: web_sys::Event| on_pause_callback.emit(event))
                    as Box<dyn Fn(_)>,
            );
        let on_end_callback = link.callback(|_: web_sys::Event| Message::OnEnd);
        let on_end_closure =
            Closure::wrap(
                Box::new(move |event: web_sys::Event| on_end_callback.emit(event))
                    as Box<dyn Fn(_)>,
            );
        let on_timeupdate_callback = link.callback(|_: web_sys::Event| Message::OnTimeupdate);
        let on_timeupdate_closure =
            Closure::wrap(
                Box::new(move |event: web_sys::Event| on_timeupdate_callback.emit(event))
                    as Box<dyn Fn(_)>,
            );

        let audio_element = match HtmlAudioElement::new() {
            Ok(audio) => {
                let listeners = listen(&audio, "play", &on_play_closure)
                    .and_then(|_| listen(&audio, "pause", &on_pause_closure))
                    .and_then(|_| listen(&audio, "ended", &on_end_closure))
                    .and_then(|_| listen(&audio, "timeupdate", &on_timeupdate_closure));

                if let Err(e) = listeners {
                    log::error!("could not attach audio listeners: {}", e);
                }
                Some(audio)
            }
            Err(e) => {
                log::error!("could not create audio element: {}", JsError::from(e));
                None
            }
        };

        Self {
            _library: Library::bridge(link.callback(Message::LibraryMessage)),
            link,
            subscribers: HashSet::new(),
            notifier: Notifier::dispatcher(),
            audio_element,
            playlist: PlaylistController::default(),
            loaded: None,
            video: None,
            visible: false,
            playing: false,
            api_base: AppConfig::load().api_base,
            _on_play_closure: on_play_closure,
            _on_pause_closure: on_pause_closure,
            _on_end_closure: on_end_closure,
            _on_timeupdate_closure: on_timeupdate_closure,
        }
    }

    fn update(&mut self, msg: Self::Message) {
        if let Err(e) = self.process_update(msg) {
            self.notifier.send(notifier::Request::NotifyError(e));
        }

        self.send_response();
    }

    fn handle_input(&mut self, msg: Self::Input, _handler_id: HandlerId) {
        if let Err(e) = self.process_handle_input(msg) {
            self.notifier.send(notifier::Request::NotifyError(e));
        }

        self.send_response();
    }

    fn connected(&mut self, id: HandlerId) {
        self.subscribers.insert(id);

        if id.is_respondable() {
            self.link.respond(id, Response::Status(self.status()));
        }
    }

    fn disconnected(&mut self, id: HandlerId) {
        self.subscribers.remove(&id);
    }

    fn destroy(&mut self) {
        if let Some(audio) = &self.audio_element {
            let _ = audio.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stored_files_can_be_shared() {
        let file = VideoSource::File {
            url: "/api/serve/videos/clip.mp4".into(),
            title: "clip.mp4".into(),
        };
        let embed = VideoSource::Embed {
            url: "https://www.youtube.com/embed/abc?autoplay=1".into(),
            title: "clip".into(),
        };

        assert_eq!(
            file.share_target(),
            Some(("/api/serve/videos/clip.mp4", "clip.mp4"))
        );
        assert_eq!(embed.share_target(), None);
    }

    #[test]
    fn share_toasts_follow_the_outcome() {
        assert_eq!(share_toast(&Ok(ShareOutcome::Shared)), None);
        assert_eq!(
            share_toast(&Ok(ShareOutcome::Unsupported)),
            Some("Share not supported on this browser")
        );
        assert_eq!(
            share_toast(&Err(JsError::from("AbortError"))),
            Some("Sharing failed")
        );
    }
}
