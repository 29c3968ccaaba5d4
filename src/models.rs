use serde::{Deserialize, Serialize};

/// Body of POST /advice.
#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub situation: String,
    pub age_range: String,
}

/// One advice response: the model's text plus the rendered video markup.
#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: String,
    pub videos_html: String,
}

/// One video search hit. Both fields are optional on the wire; items
/// without a video id are dropped during rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoItem {
    pub video_id: Option<String>,
    pub title: Option<String>,
}

/// The four displayed fields restored by the reset handler.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ResetState {
    pub situation: String,
    pub age_range: String,
    pub advice: String,
    pub videos_html: String,
}
