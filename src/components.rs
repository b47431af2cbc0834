pub mod download_list;
pub mod file_grid;
mod icon;
pub mod media_card;
pub mod nav_bar;
pub mod notification;
pub mod player;
pub mod playlist_card;
pub mod router;
mod top;
pub mod url_form;
pub mod video_modal;
pub mod volume_slider;

pub use icon::{Icon, IconStyle};
pub use top::Top;
