//! Request and response bodies exchanged with the MediaLoad backend.

use super::JsError;
use serde::{Deserialize, Deserializer, Serialize};

const AUDIO_SUFFIXES: [&str; 2] = [".mp3", ".m4a"];

/// Body of `POST /api/info`.
#[derive(Debug, Clone, Serialize)]
pub struct InfoRequest {
    pub url: String,
}

/// Raw body of a successful `POST /api/info` response.
///
/// The backend uses one shape for both single items and playlists; call
/// [`InfoResponse::into_media_info`] to get the routed variant.
#[derive(Debug, Clone, Deserialize)]
pub struct InfoResponse {
    #[serde(default)]
    pub is_playlist: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration_string: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
    #[serde(default)]
    pub entries: Vec<PlaylistEntry>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Format {
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaylistEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaInfo {
    Single(VideoInfo),
    Playlist(PlaylistInfo),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub title: String,
    pub uploader: String,
    pub duration_string: String,
    pub thumbnail: Option<String>,
    pub formats: Vec<Format>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistInfo {
    pub title: String,
    pub count: u64,
    pub entries: Vec<PlaylistEntry>,
}

/// A selectable quality: the value sent to the backend and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityOption {
    pub value: String,
    pub label: String,
}

impl InfoResponse {
    pub fn into_media_info(self) -> MediaInfo {
        match self.is_playlist {
            true => MediaInfo::Playlist(PlaylistInfo {
                title: self.title.unwrap_or_default(),
                count: self.count.unwrap_or(self.entries.len() as u64),
                entries: self.entries,
            }),
            false => MediaInfo::Single(VideoInfo {
                title: self.title.unwrap_or_default(),
                uploader: self.uploader.unwrap_or_default(),
                duration_string: self.duration_string.unwrap_or_default(),
                thumbnail: self.thumbnail,
                formats: self.formats,
                url: self.url.unwrap_or_default(),
            }),
        }
    }
}

impl VideoInfo {
    /// "best" first, followed by every format that reports a height.
    pub fn quality_options(&self) -> Vec<QualityOption> {
        let mut options = vec![QualityOption {
            value: "best".into(),
            label: "Best Available".into(),
        }];

        options.extend(self.formats.iter().filter_map(|f| {
            f.height.map(|height| QualityOption {
                value: height.to_string(),
                label: format!(
                    "{}p - {}",
                    height,
                    f.note.clone().unwrap_or_else(|| format!("{}p", height))
                ),
            })
        }));

        options
    }
}

impl PlaylistEntry {
    /// Embeddable preview URL, if a video id can be found for the entry.
    pub fn preview_url(&self) -> Option<String> {
        let video_id = match &self.id {
            Some(id) if !id.is_empty() => Some(id.clone()),
            _ => url::Url::parse(&self.url).ok().and_then(|url| {
                url.query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            }),
        };

        video_id
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.youtube.com/embed/{}?autoplay=1", id))
    }
}

/// Body of `POST /api/download`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub format: String,
    pub quality: String,
}

impl DownloadRequest {
    pub fn new(url: &str, title: &str, format: &str, quality: &str) -> Self {
        let media_type = match format {
            "mp3" | "m4a" => "audio",
            _ => "video",
        };

        Self {
            url: url.into(),
            title: title.into(),
            media_type: media_type.into(),
            format: format.into(),
            quality: quality.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadResponse {
    pub download_id: String,
}

/// Body of `GET /api/status/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: f64,
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

/// The backend reports progress as a string such as `"42.5"`; anything
/// that does not parse counts as zero.
fn deserialize_progress<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<NumberOrString>::deserialize(deserializer).unwrap_or(None) {
            Some(NumberOrString::Number(val)) => val,
            Some(NumberOrString::String(val)) => val.trim().trim_end_matches('%').parse().unwrap_or(0.0),
            None => 0.0,
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// A stored media file as listed by `GET /api/files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    pub path: String,
    pub size: String,
}

impl LibraryEntry {
    pub fn kind(&self) -> MediaKind {
        match AUDIO_SUFFIXES.iter().any(|suffix| self.name.ends_with(suffix)) {
            true => MediaKind::Audio,
            false => MediaKind::Video,
        }
    }

    /// `path` is appended verbatim.
    pub fn serve_url(&self, api_base: &str) -> String {
        format!("{}/serve/{}", api_base, self.path)
    }
}

/// Body of `DELETE /api/delete`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteRequest {
    pub path: String,
}

/// Fails on a non-empty `error` member, whatever the HTTP status was.
pub fn check_error(value: &serde_json::Value) -> Result<(), JsError> {
    match value.get("error") {
        Some(serde_json::Value::String(error)) if !error.is_empty() => Err(error.as_str().into()),
        Some(serde_json::Value::Null) | None => Ok(()),
        Some(serde_json::Value::String(_)) => Ok(()),
        Some(other) => Err(other.to_string().into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_with_playlist_flag_routes_to_playlist() {
        let res: InfoResponse = serde_json::from_value(json!({
            "is_playlist": true,
            "title": "Mix",
            "count": 2,
            "entries": [
                {"id": "a1", "title": "One", "url": "https://www.youtube.com/watch?v=a1"},
                {"id": null, "title": "Two", "url": "https://www.youtube.com/watch?v=b2"}
            ]
        }))
        .unwrap();

        match res.into_media_info() {
            MediaInfo::Playlist(playlist) => {
                assert_eq!(playlist.title, "Mix");
                assert_eq!(playlist.count, 2);
                assert_eq!(playlist.entries.len(), 2);
            }
            MediaInfo::Single(_) => panic!("expected playlist"),
        }
    }

    #[test]
    fn info_without_playlist_flag_routes_to_single_item() {
        let res: InfoResponse = serde_json::from_value(json!({
            "title": "Clip",
            "uploader": "someone",
            "duration_string": "00:03:10",
            "thumbnail": "https://img/1.jpg",
            "formats": [{"height": 1080, "note": "1080p60"}, {"height": null, "note": "audio"}],
            "url": "https://example.com/clip"
        }))
        .unwrap();

        match res.into_media_info() {
            MediaInfo::Single(info) => {
                assert_eq!(info.title, "Clip");
                let options = info.quality_options();
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].value, "best");
                assert_eq!(options[1].value, "1080");
                assert_eq!(options[1].label, "1080p - 1080p60");
            }
            MediaInfo::Playlist(_) => panic!("expected single item"),
        }
    }

    #[test]
    fn preview_url_falls_back_to_query_parameter() {
        let with_id = PlaylistEntry {
            id: Some("abc".into()),
            title: "t".into(),
            url: "https://www.youtube.com/watch?v=zzz".into(),
        };
        let from_query = PlaylistEntry {
            id: None,
            title: "t".into(),
            url: "https://www.youtube.com/watch?v=zzz&list=1".into(),
        };
        let unsupported = PlaylistEntry {
            id: None,
            title: "t".into(),
            url: "https://soundcloud.com/track".into(),
        };

        assert_eq!(
            with_id.preview_url().as_deref(),
            Some("https://www.youtube.com/embed/abc?autoplay=1")
        );
        assert_eq!(
            from_query.preview_url().as_deref(),
            Some("https://www.youtube.com/embed/zzz?autoplay=1")
        );
        assert_eq!(unsupported.preview_url(), None);
    }

    #[test]
    fn download_type_follows_format() {
        assert_eq!(DownloadRequest::new("u", "t", "mp3", "best").media_type, "audio");
        assert_eq!(DownloadRequest::new("u", "t", "m4a", "best").media_type, "audio");
        assert_eq!(DownloadRequest::new("u", "t", "mkv", "720").media_type, "video");

        let body = serde_json::to_value(DownloadRequest::new("u", "t", "mp4", "720")).unwrap();
        assert_eq!(body["type"], "video");
        assert_eq!(body["quality"], "720");
    }

    #[test]
    fn status_progress_accepts_strings_and_numbers() {
        let from_string: StatusResponse =
            serde_json::from_value(json!({"status": "downloading", "progress": " 42.5"})).unwrap();
        let from_number: StatusResponse =
            serde_json::from_value(json!({"status": "downloading", "progress": 10})).unwrap();
        let garbage: StatusResponse =
            serde_json::from_value(json!({"status": "starting", "progress": "n/a"})).unwrap();
        let missing: StatusResponse = serde_json::from_value(json!({"status": "not_found"})).unwrap();

        assert_eq!(from_string.progress, 42.5);
        assert_eq!(from_number.progress, 10.0);
        assert_eq!(garbage.progress, 0.0);
        assert_eq!(missing.progress, 0.0);
        assert_eq!(missing.title, None);
    }

    #[test]
    fn library_entry_kind_and_url() {
        let song = LibraryEntry {
            name: "song.m4a".into(),
            path: "audios/artist/song.m4a".into(),
            size: "3.10 MB".into(),
        };
        let clip = LibraryEntry {
            name: "clip.webm".into(),
            path: "videos/clip.webm".into(),
            size: "20.00 MB".into(),
        };

        assert_eq!(song.kind(), MediaKind::Audio);
        assert_eq!(clip.kind(), MediaKind::Video);
        assert_eq!(song.serve_url("/api"), "/api/serve/audios/artist/song.m4a");
    }

    #[test]
    fn error_member_is_a_failure() {
        assert!(check_error(&json!({"error": "No URL provided"})).is_err());
        assert!(check_error(&json!({"error": ""})).is_ok());
        assert!(check_error(&json!({"error": null})).is_ok());
        assert!(check_error(&json!([{"name": "a"}])).is_ok());
        assert_eq!(
            check_error(&json!({"error": "boom"})).unwrap_err().description,
            "boom"
        );
    }
}
