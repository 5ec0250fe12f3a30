//! One digest run: find the game, ground the summary, deliver it.

use std::sync::Arc;
use std::time::Instant;

use digest_outbound::{
    DeliveryReceipt, DigestCopy, NotificationRequest, Notifier, OutboundError, Recipient,
    SummaryProvider, SummaryRequest,
};
use game_timeline::{
    GameContext, GameReference, GameTimeline, NotablePlaySelection, Subject, TlError,
};
use serde::{Deserialize, Serialize};
use stats_api::assets;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DigestError {
    #[error(transparent)]
    Timeline(#[from] TlError),
    #[error(transparent)]
    Outbound(#[from] OutboundError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestRequest {
    pub email: String,
    pub first_name: String,
    pub family_name: String,
    pub language: String,
    pub subject: Subject,
    /// Team whose details ground a player digest.
    pub team_id: Option<u64>,
    pub season: Option<String>,
    pub persona: Option<String>,
    /// Overrides the recap image, headshot or logo as the attached media.
    pub media_url: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DigestOutcome {
    pub game: GameReference,
    pub selection: Option<NotablePlaySelection>,
    pub summary: SummaryRequest,
    pub copy: DigestCopy,
    pub notification: NotificationRequest,
    /// `None` on a dry run.
    pub receipt: Option<DeliveryReceipt>,
}

pub struct DigestRunner {
    timeline: Arc<dyn GameTimeline>,
    summaries: Arc<dyn SummaryProvider>,
    notifier: Arc<dyn Notifier>,
    sender: String,
    video_host: String,
}

impl DigestRunner {
    pub fn new(
        timeline: Arc<dyn GameTimeline>,
        summaries: Arc<dyn SummaryProvider>,
        notifier: Arc<dyn Notifier>,
        sender: impl Into<String>,
        video_host: impl Into<String>,
    ) -> Self {
        Self {
            timeline,
            summaries,
            notifier,
            sender: sender.into(),
            video_host: video_host.into(),
        }
    }

    pub async fn run(&self, request: DigestRequest) -> Result<DigestOutcome, DigestError> {
        let started = Instant::now();
        let result = self.run_inner(&request).await;
        match &result {
            Ok(outcome) => info!(
                subject = %request.subject,
                game_pk = outcome.game.game_pk,
                dry_run = request.dry_run,
                latency_ms = started.elapsed().as_millis() as u64,
                "digest run finished"
            ),
            Err(err) => warn!(
                subject = %request.subject,
                error = %err,
                latency_ms = started.elapsed().as_millis() as u64,
                "digest run failed"
            ),
        }
        result
    }

    async fn run_inner(&self, request: &DigestRequest) -> Result<DigestOutcome, DigestError> {
        let (game, notable_events, selection, team_id) = match request.subject {
            Subject::Player(player_id) => {
                let game = match &request.season {
                    Some(season) => Some(
                        self.timeline
                            .locate(request.subject, Some(season.as_str()))
                            .await?,
                    ),
                    None => None,
                };
                let report = self.timeline.highlights(player_id, game).await?;
                let narrated = report.notable_events.iter().map(|e| e.narrate()).collect();
                (report.game, narrated, Some(report.selection), request.team_id)
            }
            Subject::Team(team_id) => {
                let game = self
                    .timeline
                    .locate(request.subject, request.season.as_deref())
                    .await?;
                (game, Vec::new(), None, Some(team_id))
            }
        };

        let context = self.timeline.game_context(game.clone(), team_id).await?;
        let summary = summary_request(request, &context, notable_events);
        let copy = self.summaries.summarize(&summary).await?;

        let recipient = Recipient {
            email: &request.email,
            first_name: &request.first_name,
            last_name: &request.family_name,
            language: &request.language,
        };
        let play_id = selection.as_ref().and_then(NotablePlaySelection::play_id);
        let notification = NotificationRequest::compose(&self.sender, &recipient, &copy)
            .with_media_url(media_url(request, &context))
            .with_play(&self.video_host, play_id);

        let receipt = if request.dry_run {
            None
        } else {
            Some(self.notifier.deliver(&notification).await?)
        };

        Ok(DigestOutcome {
            game,
            selection,
            summary,
            copy,
            notification,
            receipt,
        })
    }
}

/// Explicit media, else the recap image, else the subject's headshot or logo.
fn media_url(request: &DigestRequest, context: &GameContext) -> Option<String> {
    request
        .media_url
        .clone()
        .or_else(|| context.recap.image_url.clone())
        .or_else(|| match request.subject {
            Subject::Player(player_id) => Some(assets::headshot_url(player_id)),
            Subject::Team(team_id) => assets::team_logo_url(team_id, "light").ok(),
        })
}

fn summary_request(
    request: &DigestRequest,
    context: &GameContext,
    notable_events: Vec<String>,
) -> SummaryRequest {
    let team = context.team.as_ref();
    SummaryRequest {
        first_name: request.first_name.clone(),
        family_name: request.family_name.clone(),
        language: request.language.clone(),
        persona: request.persona.clone(),
        subject_label: request.subject.to_string(),
        team_name: team.and_then(|t| t.name.clone()),
        team_abbreviation: team.and_then(|t| t.abbreviation.clone()),
        home_team: context.game.home_team.clone(),
        away_team: context.game.away_team.clone(),
        headline: context.recap.headline.clone(),
        body: context.recap.body.clone(),
        notable_events,
    }
}
