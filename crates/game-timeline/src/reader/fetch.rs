use super::plan::FetchPlan;
use crate::errors::{TlError, TlResult};
use crate::model::{Snapshot, Timecode};
use crate::policy::MissingSnapshotPolicy;
use crate::ports::StatsPort;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Fetches the timecode list for the planned game and then one snapshot per
/// timecode.
pub async fn fetch_snapshots(
    stats: Arc<dyn StatsPort>,
    plan: &FetchPlan,
) -> TlResult<Vec<Snapshot>> {
    let timecodes = stats.timecodes(plan.game_pk).await?;
    debug!(game_pk = plan.game_pk, timecodes = timecodes.len(), "timecodes listed");
    fetch_snapshots_at(stats, plan, timecodes).await
}

/// Fans out one live-feed request per timecode, at most `plan.max_in_flight`
/// at a time, and joins them all before returning. The result is in the
/// order of `timecodes` whatever order the requests complete in.
pub async fn fetch_snapshots_at(
    stats: Arc<dyn StatsPort>,
    plan: &FetchPlan,
    timecodes: Vec<Timecode>,
) -> TlResult<Vec<Snapshot>> {
    if timecodes.is_empty() {
        return Ok(Vec::new());
    }

    let limit = Arc::new(Semaphore::new(plan.max_in_flight.max(1)));
    let mut slots: Vec<Option<JsonValue>> = vec![None; timecodes.len()];
    let mut join_set = JoinSet::new();

    for (index, timecode) in timecodes.iter().cloned().enumerate() {
        let stats = Arc::clone(&stats);
        let limit = Arc::clone(&limit);
        let game_pk = plan.game_pk;
        join_set.spawn(async move {
            let _permit = match limit.acquire_owned().await {
                Ok(permit) => permit,
                Err(err) => {
                    return (index, Err(TlError::Internal(format!("snapshot pool closed: {err}"))))
                }
            };
            let result = stats.live_feed(game_pk, &timecode).await;
            (index, result)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        let (index, result) =
            joined.map_err(|err| TlError::Internal(format!("snapshot task failed: {err}")))?;
        match result {
            Ok(feed) => slots[index] = Some(feed),
            Err(err) => match plan.missing_snapshots {
                MissingSnapshotPolicy::FailFast => {
                    join_set.abort_all();
                    return Err(TlError::SnapshotFailed {
                        timecode: timecodes[index].to_string(),
                        reason: err.to_string(),
                    });
                }
                MissingSnapshotPolicy::Empty => {
                    warn!(
                        game_pk = plan.game_pk,
                        timecode = %timecodes[index],
                        error = %err,
                        "snapshot unavailable; recording empty event"
                    );
                    slots[index] = Some(JsonValue::Null);
                }
            },
        }
    }

    Ok(timecodes
        .into_iter()
        .zip(slots)
        .map(|(timecode, feed)| Snapshot {
            timecode,
            feed: feed.unwrap_or(JsonValue::Null),
        })
        .collect())
}
