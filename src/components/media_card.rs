use super::Icon;
use crate::{
    agents::{
        downloads::{self, Downloads},
        notifier::{self, Notifier},
    },
    objects::{api::DownloadRequest, api::VideoInfo, JsError},
};
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_agent::{Dispatched, Dispatcher};

pub const FORMATS: [&str; 4] = ["mp4", "mkv", "mp3", "m4a"];

/// Details of a single video with format and quality selection.
pub struct MediaCard {
    downloads: Dispatcher<Downloads>,
    notifier: Dispatcher<Notifier>,
    format_ref: NodeRef,
    quality_ref: NodeRef,
}

#[derive(Clone, PartialEq, Properties)]
pub struct Props {
    pub info: VideoInfo,
}

pub enum Message {
    Download,
}

pub(crate) fn selected_value(node: &NodeRef, fallback: &str) -> Result<String, JsError> {
    let select = node
        .cast::<HtmlSelectElement>()
        .ok_or("could not get select element")?;
    let value = select.value();

    Ok(match value.is_empty() {
        true => fallback.to_string(),
        false => value,
    })
}

pub(crate) fn view_format_select(node: &NodeRef) -> Html {
    html! {
        <div class="select">
            <select ref={node.clone()}>
                { for FORMATS.iter().map(|format| html! {
                    <option value={*format}>{format.to_uppercase()}</option>
                })}
            </select>
        </div>
    }
}

impl MediaCard {
    fn process_update(&mut self, ctx: &Context<Self>, msg: Message) -> Result<bool, JsError> {
        match msg {
            Message::Download => {
                let info = &ctx.props().info;
                let format = selected_value(&self.format_ref, FORMATS[0])?;
                let quality = selected_value(&self.quality_ref, "best")?;

                self.downloads.send(downloads::Request::Enqueue(DownloadRequest::new(
                    &info.url,
                    &info.title,
                    &format,
                    &quality,
                )));
                Ok(false)
            }
        }
    }
}

impl Component for MediaCard {
    type Message = Message;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            downloads: Downloads::dispatcher(),
            notifier: Notifier::dispatcher(),
            format_ref: NodeRef::default(),
            quality_ref: NodeRef::default(),
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
                {match &info.thumbnail {
                    Some(thumbnail) => html! {
                        <div class="card-image">
                            <figure class="image is-16by9"><img src={thumbnail.clone()} alt={info.title.clone()}/></figure>
                        </div>
                    },
                    None => html! {},
                }}
                <div class="card-content">
                    <p class="title is-5">{&info.title}</p>
                    <p class="subtitle is-6">{format!("{} • {}", info.uploader, info.duration_string)}</p>
                    <div class="field is-grouped">
                        <div class="control">{ view_format_select(&self.format_ref) }</div>
                        <div class="control">
                            <div class="select">
                                <select ref={self.quality_ref.clone()}>
                                    { for info.quality_options().into_iter().map(|option| html! {
                                        <option value={option.value}>{option.label}</option>
                                    })}
                                </select>
                            </div>
                        </div>
                        <div class="control">
                            <button class="button is-primary" onclick={ctx.link().callback(|_| Message::Download)}>
                                <Icon name="download"/><span>{"Download"}</span>
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        }
    }
}
