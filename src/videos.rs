use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::VideoItem;

/// Maximum number of video links rendered per request.
pub const MAX_VIDEO_RESULTS: usize = 2;

/// Search phrase used when the age range is not one of the known labels.
pub const FALLBACK_SEARCH_PHRASE: &str = "self-defense safety tips";

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Maps an age range label to its canned search phrase. Unknown labels take
/// the generic fallback phrase; this never fails.
pub fn search_phrase_for(age_range: &str) -> &'static str {
    match age_range {
        "0-6 (Toddler)" => "toddler safety self-defense techniques",
        "7-13 (Child)" => "self-defense for kids",
        "15-30 (Teenager to Young Adult)" => "basic self-defense techniques for teens",
        "30+ (Adult)" => "advanced self-defense techniques for adults",
        _ => FALLBACK_SEARCH_PHRASE,
    }
}

/// Escapes text for embedding in markup element or attribute content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Backend seam for the video search call.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<VideoItem>>;
}

/// YouTube Data API v3 search client.
pub struct YouTubeSearch {
    client: Client,
    api_key: String,
}

impl YouTubeSearch {
    pub fn new(api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: Option<SearchItemId>,
    snippet: Option<SearchItemSnippet>,
}

#[derive(Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct SearchItemSnippet {
    title: Option<String>,
}

#[async_trait]
impl VideoSearch for YouTubeSearch {
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<VideoItem>> {
        let search_url = format!(
            "{}?part=snippet&q={}&type=video&maxResults={}&key={}",
            YOUTUBE_SEARCH_URL,
            urlencoding::encode(query),
            max_results,
            self.api_key
        );

        let response = self
            .client
            .get(&search_url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("YouTube search request failed: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("YouTube search returned error status: {}", e))?;

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse search response: {}", e))?;

        Ok(data
            .items
            .into_iter()
            .map(|item| VideoItem {
                video_id: item.id.and_then(|id| id.video_id),
                title: item.snippet.and_then(|snippet| snippet.title),
            })
            .collect())
    }
}

/// Looks up instructional videos for an age range and renders them as
/// clickable markup. Every failure is converted to inline markup at this
/// boundary; `lookup` never returns an error to its caller.
pub struct VideoLookup {
    search: Arc<dyn VideoSearch>,
}

impl VideoLookup {
    pub fn new(search: Arc<dyn VideoSearch>) -> Self {
        Self { search }
    }

    pub async fn lookup(&self, age_range: &str) -> String {
        let query = search_phrase_for(age_range);
        info!("Searching videos with query: {}", query);

        match self.search.search(query, MAX_VIDEO_RESULTS).await {
            Ok(items) => render_video_markup(&items),
            Err(e) => {
                warn!("Video search failed: {}", e);
                format!(
                    "<p>⚠️ Error fetching videos: {}</p>",
                    escape_html(&e.to_string())
                )
            }
        }
    }
}

fn render_video_markup(items: &[VideoItem]) -> String {
    let mut links = String::new();
    let mut rendered = 0;

    for item in items {
        if rendered == MAX_VIDEO_RESULTS {
            break;
        }
        // Items without a resolvable video id are skipped.
        let Some(video_id) = item.video_id.as_deref() else {
            continue;
        };
        let title = item.title.as_deref().unwrap_or("Untitled");
        links.push_str(&format!(
            "<p><a href=\"https://www.youtube.com/watch?v={}\" target=\"_blank\">{}</a></p>",
            escape_html(video_id),
            escape_html(title)
        ));
        rendered += 1;
    }

    if rendered == 0 {
        return "<p>No relevant videos found.</p>".to_string();
    }

    format!("<h3>🎥 Recommended Videos:</h3>{}", links)
}
