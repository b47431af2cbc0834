use yew::prelude::*;

pub struct Icon;

#[derive(Debug, Clone, PartialEq)]
pub enum IconStyle {
    Solid,
    Regular,
}

#[derive(Clone, PartialEq, Properties)]
pub struct IconProperties {
    /// Font Awesome name without the `fa-` prefix.
    pub name: String,
    #[prop_or(IconStyle::Solid)]
    pub style: IconStyle,
    #[prop_or_default]
    pub spin: bool,
}

impl Component for Icon {
    type Message = ();
    type Properties = IconProperties;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let family = match props.style {
            IconStyle::Solid => "fas",
            IconStyle::Regular => "far",
        };
        let spin = props.spin.then(|| "fa-spin");

        html! {<span class="icon"><i class={classes!(family, format!("fa-{}", props.name), spin)}></i></span>}
    }
}
