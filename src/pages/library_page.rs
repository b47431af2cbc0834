use crate::components::file_grid::FileGrid;
use yew::prelude::*;

pub struct LibraryPage;

impl Component for LibraryPage {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {<FileGrid/>}
    }
}
