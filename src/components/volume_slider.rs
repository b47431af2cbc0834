use crate::{
    agents::notifier::{self, Notifier},
    components::Icon,
    objects::{transport, JsError},
};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_agent::{Dispatched, Dispatcher};

/// Volume control of the player bar. While the knob is held, volume
/// reports coming back from the audio element do not move it.
pub struct VolumeSlider {
    dragging: bool,
    notifier: Dispatcher<Notifier>,
}

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    /// Receives values in `0.0..=1.0`.
    pub onvolume: Callback<f64>,
    pub volume: f64,
}

pub enum Message {
    Grab,
    Release,
    Input(InputEvent),
}

fn icon_for(volume: f64) -> &'static str {
    match volume {
        v if v <= 0.0 => "volume-mute",
        v if v < 0.5 => "volume-down",
        _ => "volume-up",
    }
}

impl VolumeSlider {
    fn process_update(&mut self, ctx: &Context<Self>, msg: Message) -> Result<bool, JsError> {
        match msg {
            Message::Grab => {
                self.dragging = true;
                Ok(false)
            }
            Message::Release => {
                self.dragging = false;
                Ok(true)
            }
            Message::Input(event) => {
                let input = event
                    .target()
                    .ok_or("could not get target object")?
                    .dyn_into::<HtmlInputElement>()
                    .map_err(|_| JsError::from("error casting target to input element"))?;
                let volume = input
                    .value()
                    .parse::<f64>()
                    .map_err(|_| JsError::from("volume is not a number"))?;

                ctx.props().onvolume.emit(transport::clamp_volume(volume));
                Ok(false)
            }
        }
    }
}

impl Component for VolumeSlider {
    type Message = Message;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            dragging: false,
            notifier: Notifier::dispatcher(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match self.process_update(ctx, msg) {
            Ok(should_render) => should_render,
            Err(e) => {
                self.notifier.send(notifier::Request::NotifyError(e));
                false
            }
        }
    }

    fn changed(&mut self, _ctx: &Context<Self>) -> bool {
        !self.dragging
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let volume = ctx.props().volume;

        html! {
            <div class="volume-slider">
                <Icon name={icon_for(volume)}/>
                <input type="range" class="slider" min="0" max="1" step="0.05" value={format!("{:.2}", volume)}
                    onmousedown={ctx.link().callback(|_| Message::Grab)}
                    ontouchstart={ctx.link().callback(|_| Message::Grab)}
                    onmouseup={ctx.link().callback(|_| Message::Release)}
                    ontouchend={ctx.link().callback(|_| Message::Release)}
                    onblur={ctx.link().callback(|_| Message::Release)}
                    oninput={ctx.link().callback(Message::Input)}/>
            </div>
        }
    }
}
