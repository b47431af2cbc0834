use crate::components::{download_list::DownloadList, url_form::UrlForm};
use yew::prelude::*;

pub struct FetchPage;

impl Component for FetchPage {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <>
                <UrlForm/>
                <DownloadList/>
            </>
        }
    }
}
