use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use digest_outbound::{
    ChatSummaryProvider, DeliveryReceipt, HttpNotifier, NotificationRequest, Notifier,
    OutboundError, OutboundResult,
};
use game_timeline::{TimelinePolicyHandle, TimelineService};
use stats_api::StatsClient;
use tokio::sync::OnceCell;

use crate::config::AppConfig;
use crate::digest::DigestRunner;

pub struct CliContext {
    config: Arc<AppConfig>,
    config_path: PathBuf,
    timeline: OnceCell<Arc<TimelineService>>,
}

impl CliContext {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
            timeline: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Timeline service over the live statistics API, built on first use.
    pub async fn timeline(&self) -> Result<Arc<TimelineService>> {
        self.timeline
            .get_or_try_init(|| async {
                let client =
                    StatsClient::new(&self.config.stats).context("building stats client")?;
                let policy = TimelinePolicyHandle::new_with(self.config.timeline.clone());
                Ok::<_, anyhow::Error>(Arc::new(TimelineService::with_client(client, policy)))
            })
            .await
            .map(Arc::clone)
    }

    /// A dry run tolerates a missing notify endpoint since nothing is sent.
    pub async fn digest_runner(&self, dry_run: bool) -> Result<DigestRunner> {
        let timeline = self.timeline().await?;
        let summaries = ChatSummaryProvider::new(self.config.summary.clone())
            .context("building summary provider")?;
        let notifier: Arc<dyn Notifier> = if dry_run && self.config.notify.endpoint.is_none() {
            Arc::new(Undeliverable)
        } else {
            Arc::new(HttpNotifier::new(&self.config.notify).context("building notifier")?)
        };
        Ok(DigestRunner::new(
            timeline,
            Arc::new(summaries),
            notifier,
            self.config.notify.sender.clone(),
            self.config.notify.video_host.clone(),
        ))
    }
}

struct Undeliverable;

#[async_trait]
impl Notifier for Undeliverable {
    async fn deliver(&self, _request: &NotificationRequest) -> OutboundResult<DeliveryReceipt> {
        Err(OutboundError::invalid_config("notify.endpoint is not set"))
    }
}
