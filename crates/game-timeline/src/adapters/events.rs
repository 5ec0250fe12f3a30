use crate::errors::TlError;
use crate::model::RunDigest;
use crate::ports::EventsPort;
use tracing::{info, warn};

#[derive(Default)]
pub struct NoopEventsPort;

impl EventsPort for NoopEventsPort {
    fn run_started(&self, _digest: &RunDigest) {}

    fn snapshots_fetched(&self, _game_pk: u64, _count: usize) {}

    fn run_finished(&self, _ok: bool, _latency_ms: u128, _err: Option<&TlError>) {}
}

/// Emits pipeline lifecycle as structured `tracing` events.
#[derive(Default)]
pub struct TracingEventsPort;

impl EventsPort for TracingEventsPort {
    fn run_started(&self, digest: &RunDigest) {
        info!(
            target: "game_timeline",
            operation = digest.operation,
            subject = ?digest.subject,
            game_pk = ?digest.game_pk,
            "pipeline run started"
        );
    }

    fn snapshots_fetched(&self, game_pk: u64, count: usize) {
        info!(target: "game_timeline", game_pk, count, "snapshots fetched");
    }

    fn run_finished(&self, ok: bool, latency_ms: u128, err: Option<&TlError>) {
        if ok {
            info!(target: "game_timeline", latency_ms = latency_ms as u64, "pipeline run finished");
        } else {
            let error = err.map(|e| e.to_string()).unwrap_or_default();
            warn!(
                target: "game_timeline",
                latency_ms = latency_ms as u64,
                error = %error,
                "pipeline run failed"
            );
        }
    }
}
