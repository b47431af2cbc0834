use mediaload_pwa::{agents::notifier, components::Top};

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    notifier::request_permission();
    yew::start_app::<Top>();
}
