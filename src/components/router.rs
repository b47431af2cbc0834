use crate::pages::{fetch_page::FetchPage, library_page::LibraryPage};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum AppRoute {
    #[at("/")]
    Fetch,
    #[at("/library")]
    Library,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: &AppRoute) -> Html {
    match route {
        AppRoute::Fetch | AppRoute::NotFound => html! {<FetchPage/>},
        AppRoute::Library => html! {<LibraryPage/>},
    }
}
