//! Conversational risk-model auditor backed by a remote text-completion API
//! Location: src/auditor/mod.rs

use crate::error::AuditorError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};

/// System instruction sent with every completion request.
pub const SYSTEM_INSTRUCTION: &str = "You are the HakilixM Neural Intelligence Auditor. \
Your expertise spans Pediatric Cardiology, Spiking Neural Networks (SNN), and Deep Learning for clinical signal processing.\n\
\n\
CRITICAL FOCUS: Subgroup Performance Bias and Model Transparency (FDA SaMD Alignment).\n\
When analyzing inputs, you MUST provide:\n\
1. DEEP SUBGROUP ANALYSIS: Evaluate performance variance across pediatric age brackets (0-1y, 1-3y, 3-5y), PPG skin tone sensitivity (Fitzpatrick I-VI), and diverse motion profiles (Resting vs. High Activity).\n\
2. ARCHITECTURAL SUGGESTIONS: Propose specific SNN or RNN adjustments (e.g., adaptive gain controls, dilated temporal convolutions, or attention gating) to mitigate identified biases.\n\
3. TRAINING DATA STRATEGY: Suggest data augmentation techniques or specialized dataset sourcing (e.g., specific ethnic cohorts or neonatal datasets) to improve equity.\n\
4. REGULATORY ALIGNMENT: Reference ISO 13485, ISO 14971, and FDA AI/ML SaMD guidelines specifically.\n\
\n\
Provide high-fidelity, actionable engineering feedback. Use professional clinical and machine learning terminology. Be the most rigorous auditor possible to ensure pediatric safety.";

/// Text shown when the collaborator fails or is throttled.
pub const FALLBACK_MESSAGE: &str =
    "The Neural Auditor is currently initializing or throttled. Please check your system connection.";

/// Greeting seeded into a fresh transcript.
pub const GREETING: &str = "Neural Intelligence Auditor online. Analyzing pediatric cardiac markers, \
SNN optimization, and subgroup bias monitoring (Age/Skin Tone/Activity). How can I assist with your \
clinical transparency or regulatory analysis today?";

const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
const DEFAULT_TEMPERATURE: f64 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fixed multi-part prompt for the one-click equity audit.
pub fn equity_audit_prompt() -> String {
    [
        "Perform a comprehensive equity audit of the current risk model.",
        "1. Analyze potential performance biases across age groups (0-1y, 1-3y, 3-5y) and skin tones (Fitzpatrick I-VI).",
        "2. Evaluate robustness against various motion profiles (Resting, Feeding, Active, Crying).",
        "3. Suggest specific SNN architecture adjustments (e.g., adaptive temporal dilation) or training data enhancements (e.g., specific ethnic data sourcing) to improve performance equity.",
        "4. Ensure alignment with FDA SaMD guidelines for AI/ML monitoring.",
    ]
    .join("\n")
}

/// Remote text-completion collaborator. One free-text prompt in, one text
/// blob out; no retries, no streaming.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete `prompt` into a single response text.
    async fn complete(&self, prompt: &str) -> Result<String, AuditorError>;
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl GeminiClient {
    /// Create a client against the public Gemini endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(
            api_key,
            "https://generativelanguage.googleapis.com/v1beta".to_string(),
        )
    }

    /// Create a client against a custom endpoint, used by tests.
    pub fn with_base_url(api_key: impl Into<String>, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[async_trait]
impl TextCompletion for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AuditorError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "generationConfig": { "temperature": self.temperature },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuditorError::Status(status));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(AuditorError::EmptyResponse)?;
        if text.is_empty() {
            return Err(AuditorError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Transcript message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Operator input.
    User,
    /// Auditor output.
    Ai,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author.
    pub role: ChatRole,
    /// Verbatim message text.
    pub text: String,
}

/// Conversational auditor holding a transcript over a completion backend.
///
/// Backend failures never surface to the caller; the transcript records the
/// fallback apology text instead.
pub struct Auditor<C: TextCompletion> {
    backend: C,
    transcript: Vec<ChatMessage>,
}

impl<C: TextCompletion> Auditor<C> {
    /// Create an auditor with the greeting already in the transcript.
    pub fn new(backend: C) -> Self {
        Self {
            backend,
            transcript: vec![ChatMessage {
                role: ChatRole::Ai,
                text: GREETING.to_string(),
            }],
        }
    }

    /// Send a free-text prompt and record both sides in the transcript.
    /// Returns the response text, or the fallback text on any backend error.
    pub async fn send(&mut self, prompt: &str) -> &str {
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            text: prompt.to_string(),
        });
        info!(prompt_len = prompt.len(), "auditor prompt sent");

        let text = match self.backend.complete(prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!(%err, "completion backend failed");
                FALLBACK_MESSAGE.to_string()
            }
        };
        self.transcript.push(ChatMessage {
            role: ChatRole::Ai,
            text,
        });
        &self.transcript[self.transcript.len() - 1].text
    }

    /// Run the fixed equity audit prompt.
    pub async fn run_equity_audit(&mut self) -> &str {
        let prompt = equity_audit_prompt();
        self.send(&prompt).await
    }

    /// Full transcript, greeting first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBackend(String);

    #[async_trait]
    impl TextCompletion for FixedBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, AuditorError> {
            Ok(self.0.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl TextCompletion for FailingBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, AuditorError> {
            Err(AuditorError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn test_transcript_starts_with_greeting() {
        let auditor = Auditor::new(FixedBackend("ok".into()));
        let transcript = auditor.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, ChatRole::Ai);
        assert_eq!(transcript[0].text, GREETING);
    }

    #[tokio::test]
    async fn test_send_records_both_sides() {
        let mut auditor = Auditor::new(FixedBackend("subgroup variance nominal".into()));
        let reply = auditor.send("assess PPG bias").await.to_string();
        assert_eq!(reply, "subgroup variance nominal");
        let transcript = auditor.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, ChatRole::User);
        assert_eq!(transcript[1].text, "assess PPG bias");
        assert_eq!(transcript[2].role, ChatRole::Ai);
    }

    #[tokio::test]
    async fn test_backend_failure_yields_fallback_text() {
        let mut auditor = Auditor::new(FailingBackend);
        let reply = auditor.send("anything").await.to_string();
        assert_eq!(reply, FALLBACK_MESSAGE);
        // The failure is absorbed; the transcript still grows normally
        assert_eq!(auditor.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_equity_audit_uses_fixed_template() {
        let mut auditor = Auditor::new(FixedBackend("report".into()));
        auditor.run_equity_audit().await;
        let transcript = auditor.transcript();
        let prompt = &transcript[1].text;
        assert!(prompt.starts_with("Perform a comprehensive equity audit"));
        assert!(prompt.contains("Fitzpatrick I-VI"));
        assert!(prompt.contains("FDA SaMD guidelines"));
    }

    #[test]
    fn test_audit_prompt_has_four_numbered_parts() {
        let prompt = equity_audit_prompt();
        for n in 1..=4 {
            assert!(prompt.contains(&format!("{n}. ")));
        }
    }
}
