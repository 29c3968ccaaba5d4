use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rig::agent::Agent;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::groq;
use tracing::info;

use crate::error::{AdvisorError, Result};

/// Model used for advice generation.
pub const ADVICE_MODEL: &str = "llama-3.3-70b-versatile";

/// Backend seam for the hosted completion call.
#[async_trait]
pub trait AdviceModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Groq-backed completion model.
pub struct GroqModel {
    agent: Agent<groq::CompletionModel>,
}

impl GroqModel {
    pub fn new(api_key: &str) -> Self {
        let client = groq::Client::new(api_key);
        let agent = client.agent(ADVICE_MODEL).build();
        Self { agent }
    }
}

#[async_trait]
impl AdviceModel for GroqModel {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let response = self.agent.prompt(prompt).await?;
        Ok(response)
    }
}

/// Renders the fixed instruction template with both inputs substituted.
/// The three output sections must appear in this order: Safety Tips,
/// Self-Defense Techniques, Resources.
fn render_prompt(situation: &str, age_range: &str) -> String {
    format!(
        r#"**{situation}**

The user's selected age range is: **{age_range}**.

Use Chain-of-Thought (CoT) reasoning to analyze the situation in context with the age range, then provide clear, actionable safety advice structured as follows:

**### 🛡️Safety Tips 🛡️**
- Offer **practical** and **actionable** steps to stay safe, tailored to the selected age range.
- Ensure the advice is **easy to follow** and **relevant** to the situation described.

**### 🛡️Self-Defense Techniques 🛡️**
- Provide simple, **age-appropriate self-defense methods** that are easy to implement.
- Focus on **safe** and **effective** techniques that suit the user's age and physical abilities.

**### 🛡️Resources 🛡️**
- Recommend **relevant YouTube videos** for learning and practical demonstrations of safety measures."#
    )
}

/// Submits the rendered template as a single non-streaming completion and
/// returns the model's text verbatim. No retry, no validation of the
/// response structure; failures propagate to the caller.
pub struct AdviceGenerator {
    model: Arc<dyn AdviceModel>,
    timeout: Duration,
}

impl AdviceGenerator {
    pub fn new(model: Arc<dyn AdviceModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub async fn generate(&self, situation: &str, age_range: &str) -> Result<String> {
        let prompt = render_prompt(situation, age_range);
        info!("Requesting safety advice from {}", ADVICE_MODEL);

        let response = tokio::time::timeout(self.timeout, self.model.complete(&prompt))
            .await
            .map_err(|_| AdvisorError::AdviceTimeout(self.timeout.as_secs()))?
            .map_err(|e| AdvisorError::AdviceGeneration(e.to_string()))?;

        Ok(response)
    }
}
