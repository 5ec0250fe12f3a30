//! Generative summary of a game for one subscriber.
//!
//! The provider talks to any OpenAI-compatible chat-completions endpoint and
//! asks for a JSON object with the three digest fields. Some models wrap the
//! object in an array or a fenced block; both are accepted and the first
//! object wins.

use crate::errors::{OutboundError, OutboundResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

pub const SYSTEM_PROMPT: &str = "You are a baseball content creator writing personalized \
digests for fans. Answer with a single JSON object holding the string fields \
`personalized_title`, `personalized_message_header` and `personalized_digest`, \
and nothing else.";

/// Everything the summary model is grounded on.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SummaryRequest {
    pub first_name: String,
    pub family_name: String,
    /// Output language, as a name or tag the model understands.
    pub language: String,
    pub persona: Option<String>,
    /// What the digest is about, e.g. "player 660271".
    pub subject_label: String,
    pub team_name: Option<String>,
    pub team_abbreviation: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub headline: Option<String>,
    pub body: Option<String>,
    /// One narrated line per notable event, in game order.
    pub notable_events: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DigestCopy {
    pub personalized_title: String,
    pub personalized_message_header: String,
    pub personalized_digest: String,
}

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> OutboundResult<DigestCopy>;
}

pub fn build_user_prompt(request: &SummaryRequest) -> String {
    let mut prompt = format!(
        "Create a fresh digest for {} {}",
        request.first_name, request.family_name
    );
    match (&request.team_name, &request.team_abbreviation) {
        (Some(name), Some(abbr)) => prompt.push_str(&format!(", a fan of {name} ({abbr})")),
        (Some(name), None) => prompt.push_str(&format!(", a fan of {name}")),
        _ => {}
    }
    prompt.push_str(&format!(". The digest follows {}.\n", request.subject_label));

    if let (Some(home), Some(away)) = (&request.home_team, &request.away_team) {
        prompt.push_str(&format!(
            "It covers their latest game, {away} at {home}.\n"
        ));
    }
    if let Some(persona) = &request.persona {
        prompt.push_str(&format!("Write in the voice of {persona}.\n"));
    }

    let context: Vec<&str> = [&request.headline, &request.body]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .collect();
    if !context.is_empty() {
        prompt.push_str(&format!("Context: {}\n", context.join(" ")));
    }

    if !request.notable_events.is_empty() {
        prompt.push_str("Notable moments:\n");
        for event in &request.notable_events {
            prompt.push_str("- ");
            prompt.push_str(event);
            prompt.push('\n');
        }
    }

    prompt.push_str(&format!(
        "Write all output in this language: {}",
        request.language
    ));
    prompt
}

/// Accepts a bare object, an array of objects, or either inside a fenced
/// code block.
pub fn parse_digest_copy(content: &str) -> OutboundResult<DigestCopy> {
    let payload = unfence(content);
    let value: JsonValue = serde_json::from_str(payload)
        .map_err(|err| OutboundError::malformed(format!("summary is not JSON: {err}")))?;

    let object = match value {
        JsonValue::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| OutboundError::malformed("summary array is empty"))?,
        other => other,
    };

    serde_json::from_value(object)
        .map_err(|err| OutboundError::malformed(format!("summary fields missing: {err}")))
}

fn unfence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.trim_start_matches(|c: char| c.is_alphanumeric() || c == '_');
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSummaryConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ChatSummaryConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

pub struct ChatSummaryProvider {
    client: Client,
    config: ChatSummaryConfig,
    api_key: String,
}

impl ChatSummaryProvider {
    pub fn new(config: ChatSummaryConfig) -> OutboundResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| OutboundError::invalid_config("missing API key for summary model"))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| {
                OutboundError::invalid_config(format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SummaryProvider for ChatSummaryProvider {
    async fn summarize(&self, request: &SummaryRequest) -> OutboundResult<DigestCopy> {
        let url = self.endpoint();
        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                r#type: "json_object".to_string(),
            },
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_user_prompt(request),
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| OutboundError::Network {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<response unavailable>".to_string());
            if status == 429 {
                warn!(
                    target: "digest_outbound",
                    detail = %rate_limit_message(&text),
                    "summary model rate limited"
                );
            }
            return Err(OutboundError::Status {
                url,
                status,
                body: text,
            });
        }

        let response: ChatCompletionResponse =
            response.json().await.map_err(|source| OutboundError::Network {
                url: url.clone(),
                source,
            })?;
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content_text())
            .ok_or_else(|| OutboundError::malformed("response missing content"))?;

        let copy = parse_digest_copy(&content)?;
        debug!(
            target: "digest_outbound",
            model = %self.config.model,
            title = %copy.personalized_title,
            "summary generated"
        );
        Ok(copy)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<ChatCompletionContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatCompletionContent {
    Text(String),
    Parts(Vec<ChatCompletionPart>),
}

impl ChatCompletionContent {
    fn as_text(&self) -> Option<String> {
        match self {
            ChatCompletionContent::Text(value) => Some(value.clone()),
            ChatCompletionContent::Parts(parts) => {
                let text = parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("\n");
                (!text.is_empty()).then_some(text)
            }
        }
    }
}

impl ChatCompletionMessage {
    fn content_text(&self) -> Option<String> {
        self.content.as_ref().and_then(ChatCompletionContent::as_text)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    #[serde(default)]
    message: Option<String>,
}

fn rate_limit_message(raw: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(raw)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .map(|message| format!("rate limit exceeded: {}", message.trim()))
        .unwrap_or_else(|| "rate limit exceeded".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SummaryRequest {
        SummaryRequest {
            first_name: "Ada".into(),
            family_name: "Lovelace".into(),
            language: "Spanish".into(),
            subject_label: "player 660271".into(),
            team_name: Some("Los Angeles Dodgers".into()),
            team_abbreviation: Some("LAD".into()),
            home_team: Some("Los Angeles Dodgers".into()),
            away_team: Some("San Diego Padres".into()),
            headline: Some("Ohtani homers twice".into()),
            notable_events: vec!["bottom 3; In play, run(s)".into()],
            ..SummaryRequest::default()
        }
    }

    #[test]
    fn prompt_carries_grounding_fields() {
        let prompt = build_user_prompt(&request());
        assert!(prompt.contains("Ada Lovelace"));
        assert!(prompt.contains("Los Angeles Dodgers (LAD)"));
        assert!(prompt.contains("San Diego Padres at Los Angeles Dodgers"));
        assert!(prompt.contains("Context: Ohtani homers twice"));
        assert!(prompt.contains("- bottom 3; In play, run(s)"));
        assert!(prompt.ends_with("language: Spanish"));
    }

    #[test]
    fn prompt_skips_missing_context() {
        let prompt = build_user_prompt(&SummaryRequest {
            first_name: "A".into(),
            family_name: "B".into(),
            language: "English".into(),
            subject_label: "team 133".into(),
            ..SummaryRequest::default()
        });
        assert!(!prompt.contains("Context:"));
        assert!(!prompt.contains("Notable moments"));
    }

    #[test]
    fn parses_object_array_and_fenced_payloads() {
        let object = r#"{"personalized_title":"T","personalized_message_header":"H","personalized_digest":"D"}"#;
        let expected = DigestCopy {
            personalized_title: "T".into(),
            personalized_message_header: "H".into(),
            personalized_digest: "D".into(),
        };
        assert_eq!(parse_digest_copy(object).unwrap(), expected);

        let array = format!("[{object}, {{\"personalized_title\":\"other\"}}]");
        assert_eq!(parse_digest_copy(&array).unwrap(), expected);

        let fenced = format!("```json\n{object}\n```");
        assert_eq!(parse_digest_copy(&fenced).unwrap(), expected);
    }

    #[test]
    fn rejects_empty_or_partial_payloads() {
        assert!(matches!(
            parse_digest_copy("[]"),
            Err(OutboundError::Malformed(_))
        ));
        assert!(matches!(
            parse_digest_copy(r#"{"personalized_title":"T"}"#),
            Err(OutboundError::Malformed(_))
        ));
        assert!(matches!(
            parse_digest_copy("not json"),
            Err(OutboundError::Malformed(_))
        ));
    }

    #[test]
    fn provider_requires_api_key() {
        assert!(matches!(
            ChatSummaryProvider::new(ChatSummaryConfig::default()),
            Err(OutboundError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rate_limit_message_prefers_upstream_text() {
        let raw = r#"{"error":{"message":"  slow down "}}"#;
        assert_eq!(rate_limit_message(raw), "rate limit exceeded: slow down");
        assert_eq!(rate_limit_message("<html>"), "rate limit exceeded");
    }
}
