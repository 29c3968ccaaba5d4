use tracing::info;

use crate::advice::AdviceGenerator;
use crate::error::Result;
use crate::models::ResetState;
use crate::videos::VideoLookup;

/// Warning returned when the situation text is empty or whitespace-only.
pub const EMPTY_INPUT_WARNING: &str = "⚠️ Please enter a situation to receive advice.";

/// Markup shown in the video region when no lookup was performed.
pub const EMPTY_VIDEO_MARKUP: &str = "<p></p>";

/// Age range preselected in a fresh or reset form.
pub const DEFAULT_AGE_RANGE: &str = "30+ (Adult)";

/// Entry point for one user action: validates the input, then runs advice
/// generation and video lookup sequentially.
pub struct AdvisorHandler {
    advice: AdviceGenerator,
    videos: VideoLookup,
}

impl AdvisorHandler {
    pub fn new(advice: AdviceGenerator, videos: VideoLookup) -> Self {
        Self { advice, videos }
    }

    /// Returns the advice text and the rendered video markup for one
    /// request. Empty input short-circuits with a fixed warning before any
    /// external call. The two calls are unrelated failure domains: a video
    /// lookup failure never blocks the advice text, while an advice failure
    /// aborts the request.
    pub async fn handle(&self, situation: &str, age_range: &str) -> Result<(String, String)> {
        if situation.trim().is_empty() {
            info!("Rejecting empty situation input");
            return Ok((
                EMPTY_INPUT_WARNING.to_string(),
                EMPTY_VIDEO_MARKUP.to_string(),
            ));
        }

        let advice = self.advice.generate(situation, age_range).await?;
        let videos_html = self.videos.lookup(age_range).await;

        Ok((advice, videos_html))
    }
}

/// Restores the four displayed fields to their initial values. Pure;
/// performs no external calls.
pub fn reset() -> ResetState {
    ResetState {
        situation: String::new(),
        age_range: DEFAULT_AGE_RANGE.to_string(),
        advice: String::new(),
        videos_html: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::AdviceModel;
    use crate::error::AdvisorError;
    use crate::models::VideoItem;
    use crate::videos::VideoSearch;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct RecordingModel {
        reply: std::result::Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AdviceModel for RecordingModel {
        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(message) => Err(anyhow::anyhow!("{}", message)),
            }
        }
    }

    struct RecordingSearch {
        items: Vec<VideoItem>,
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl RecordingSearch {
        fn with_items(items: Vec<VideoItem>) -> Self {
            Self {
                items,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VideoSearch for RecordingSearch {
        async fn search(
            &self,
            query: &str,
            max_results: usize,
        ) -> anyhow::Result<Vec<VideoItem>> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), max_results));
            Ok(self.items.clone())
        }
    }

    fn handler_with(
        model: Arc<RecordingModel>,
        search: Arc<RecordingSearch>,
    ) -> AdvisorHandler {
        AdvisorHandler::new(
            AdviceGenerator::new(model, Duration::from_secs(5)),
            VideoLookup::new(search),
        )
    }

    #[tokio::test]
    async fn empty_input_short_circuits_without_external_calls() {
        for situation in ["", "   ", "\n\t "] {
            let model = Arc::new(RecordingModel::replying("unused"));
            let search = Arc::new(RecordingSearch::with_items(Vec::new()));
            let handler = handler_with(model.clone(), search.clone());

            let (advice, videos_html) = handler.handle(situation, "30+ (Adult)").await.unwrap();

            assert_eq!(advice, EMPTY_INPUT_WARNING);
            assert_eq!(videos_html, EMPTY_VIDEO_MARKUP);
            assert!(model.prompts.lock().unwrap().is_empty());
            assert!(search.calls.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn adult_request_flows_through_both_backends() {
        let model = Arc::new(RecordingModel::replying("1. Stay aware of your surroundings."));
        let search = Arc::new(RecordingSearch::with_items(vec![VideoItem {
            video_id: Some("vid42".to_string()),
            title: Some("Basics".to_string()),
        }]));
        let handler = handler_with(model.clone(), search.clone());

        let (advice, videos_html) = handler
            .handle("I noticed someone suspicious near my house.", "30+ (Adult)")
            .await
            .unwrap();

        assert_eq!(advice, "1. Stay aware of your surroundings.");
        assert!(videos_html.contains("watch?v=vid42"));

        // The model received the template with both literals and the three
        // mandatory sections in order.
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.contains("I noticed someone suspicious near my house."));
        assert!(prompt.contains("30+ (Adult)"));
        let tips = prompt.find("Safety Tips").unwrap();
        let techniques = prompt.find("Self-Defense Techniques").unwrap();
        let resources = prompt.find("Resources").unwrap();
        assert!(tips < techniques && techniques < resources);

        let calls = search.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("advanced self-defense techniques for adults".to_string(), 2)]
        );
    }

    #[tokio::test]
    async fn advice_failure_aborts_the_request() {
        let model = Arc::new(RecordingModel::failing("provider unavailable"));
        let search = Arc::new(RecordingSearch::with_items(Vec::new()));
        let handler = handler_with(model, search.clone());

        let err = handler
            .handle("someone is following me", "7-13 (Child)")
            .await
            .unwrap_err();

        assert!(matches!(err, AdvisorError::AdviceGeneration(_)));
        assert!(err.to_string().contains("provider unavailable"));
        // Advice failure is fatal for the request; the video lookup is
        // never reached.
        assert!(search.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn reset_restores_the_fixed_defaults() {
        let state = reset();
        assert_eq!(state.situation, "");
        assert_eq!(state.age_range, "30+ (Adult)");
        assert_eq!(state.advice, "");
        assert_eq!(state.videos_html, "");
        // Pure: two calls agree.
        assert_eq!(reset(), state);
    }
}
