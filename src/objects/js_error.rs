use super::PlaylistError;
use std::{error::Error, fmt::Display};

/// Error crossing the JavaScript boundary (fetch, DOM, media element) or
/// produced while decoding backend responses. The description is what the
/// user sees in the error toast.
#[derive(Debug, Clone, PartialEq)]
pub struct JsError {
    pub description: String,
}

impl Error for JsError {}

impl Display for JsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl From<wasm_bindgen::JsValue> for JsError {
    fn from(val: wasm_bindgen::JsValue) -> Self {
        let description = val.as_string().unwrap_or_else(|| format!("{:?}", val));

        Self { description }
    }
}

impl From<serde_json::Error> for JsError {
    fn from(err: serde_json::Error) -> Self {
        format!("malformed response: {}", err).into()
    }
}

impl From<PlaylistError> for JsError {
    fn from(err: PlaylistError) -> Self {
        err.to_string().into()
    }
}

impl From<&str> for JsError {
    fn from(description: &str) -> Self {
        description.to_string().into()
    }
}

impl From<String> for JsError {
    fn from(description: String) -> Self {
        Self { description }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_errors_are_marked_as_malformed() {
        let err: JsError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();

        assert!(err.description.starts_with("malformed response: "));
    }

    #[test]
    fn playlist_errors_keep_their_message() {
        assert_eq!(
            JsError::from(PlaylistError::Empty).to_string(),
            "the playlist is empty"
        );
    }
}
