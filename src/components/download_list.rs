use crate::{
    agents::downloads::{self, Downloads},
    objects::job_view::{JobRow, JobViews},
};
use yew::prelude::*;
use yew_agent::{Bridge, Bridged};

/// Active downloads, one row per tracked job.
pub struct DownloadList {
    _downloads: Box<dyn Bridge<Downloads>>,
    views: JobViews,
}

pub enum Message {
    DownloadsMessage(downloads::Response),
}

fn view_row(row: &JobRow) -> Html {
    html! {
        <div class={classes!("box", "download-item", row.is_failure().then(|| "is-failed"))}>
            <p class="has-text-weight-semibold">{&row.title}</p>
            <progress class={classes!("progress", row.is_failure().then(|| "is-danger"))} value={format!("{:.0}", row.bar_width)} max="100">
                {&row.percent_label}
            </progress>
            <div class="level is-mobile">
                <span class="level-left">{&row.percent_label}</span>
                <span class="level-item">{&row.speed_label}</span>
                <span class="level-right">{&row.eta_label}</span>
            </div>
        </div>
    }
}

impl Component for DownloadList {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            _downloads: Downloads::bridge(ctx.link().callback(Message::DownloadsMessage)),
            views: JobViews::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Message::DownloadsMessage(response) => match response {
                downloads::Response::Snapshot(jobs) => self.views.replace_all(&jobs),
                downloads::Response::Updated(job) => self.views.upsert(&job),
                downloads::Response::Removed(id) => self.views.remove(&id),
            },
        }

        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        if self.views.is_empty() {
            return html! {};
        }

        html! {
            <section class="section">
                <h2 class="title is-5">{"Downloads"}</h2>
                { for self.views.rows().iter().map(view_row) }
            </section>
        }
    }
}
