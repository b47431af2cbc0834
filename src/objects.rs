pub mod api;
mod app_config;
pub mod download_job;
pub mod job_registry;
pub mod job_view;
pub mod library_view;
mod js_error;
pub mod playlist;
pub mod transport;

pub use api::{LibraryEntry, MediaInfo, MediaKind, StatusResponse};
pub use app_config::*;
pub use download_job::{DownloadJob, JobState};
pub use js_error::*;
pub use playlist::{Advance, PlaylistController, PlaylistError};
