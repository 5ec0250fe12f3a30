use crate::errors::{OutboundError, OutboundResult};
use crate::summary::DigestCopy;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use url::Url;

pub const DEFAULT_VIDEO_HOST: &str = "www.mlb.com";

/// Delivery payload handed to the mail service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRequest {
    pub sender: String,
    pub receiver: String,
    pub subject: String,
    pub first_name: String,
    pub last_name: String,
    pub body_header: String,
    pub body_content: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_url: Option<String>,
}

/// Recipient details the payload is addressed with.
#[derive(Debug, Clone, Default)]
pub struct Recipient<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub language: &'a str,
}

impl NotificationRequest {
    pub fn compose(sender: &str, recipient: &Recipient<'_>, copy: &DigestCopy) -> Self {
        Self {
            sender: sender.to_string(),
            receiver: recipient.email.to_string(),
            subject: copy.personalized_title.clone(),
            first_name: recipient.first_name.to_string(),
            last_name: recipient.last_name.to_string(),
            body_header: copy.personalized_message_header.clone(),
            body_content: copy.personalized_digest.clone(),
            language: recipient.language.to_string(),
            media_url: None,
            play_id: None,
            highlight_url: None,
        }
    }

    pub fn with_media_url(mut self, media_url: Option<String>) -> Self {
        self.media_url = media_url;
        self
    }

    /// Attaches the highlighted play and its video deep link.
    pub fn with_play(mut self, video_host: &str, play_id: Option<&str>) -> Self {
        self.highlight_url = play_id.map(|id| video_deep_link(video_host, id));
        self.play_id = play_id.map(str::to_string);
        self
    }
}

/// `https://<host>/video/search?q=playid="<id>"`, quotes included.
pub fn video_deep_link(host: &str, play_id: &str) -> String {
    let host = host
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!("https://{host}/video/search?q=playid=\"{play_id}\"")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, request: &NotificationRequest) -> OutboundResult<DeliveryReceipt>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Mail service endpoint that accepts the JSON payload.
    pub endpoint: Option<String>,
    pub sender: String,
    pub bearer_token: Option<String>,
    pub video_host: String,
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            sender: "digest@example.com".to_string(),
            bearer_token: None,
            video_host: DEFAULT_VIDEO_HOST.to_string(),
            timeout_secs: 30,
        }
    }
}

pub struct HttpNotifier {
    client: Client,
    endpoint: Url,
    bearer_token: Option<String>,
}

impl HttpNotifier {
    pub fn new(config: &NotifyConfig) -> OutboundResult<Self> {
        let raw = config
            .endpoint
            .as_deref()
            .ok_or_else(|| OutboundError::invalid_config("notify.endpoint is not set"))?;
        let endpoint = Url::parse(raw).map_err(|err| {
            OutboundError::invalid_config(format!("invalid notify endpoint {raw}: {err}"))
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| {
                OutboundError::invalid_config(format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self {
            client,
            endpoint,
            bearer_token: config.bearer_token.clone().filter(|t| !t.is_empty()),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn deliver(&self, request: &NotificationRequest) -> OutboundResult<DeliveryReceipt> {
        let url = self.endpoint.to_string();
        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| OutboundError::Network {
                url: url.clone(),
                source,
            })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| OutboundError::Network {
                url: url.clone(),
                source,
            })?;
        if !(200..300).contains(&status) {
            return Err(OutboundError::Status { url, status, body });
        }

        info!(
            target: "digest_outbound",
            receiver = %request.receiver,
            status,
            play_id = request.play_id.as_deref().unwrap_or(""),
            "digest delivered"
        );
        Ok(DeliveryReceipt { status, body })
    }
}
