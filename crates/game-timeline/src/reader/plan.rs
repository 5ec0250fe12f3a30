use crate::errors::TlError;
use crate::policy::{MissingSnapshotPolicy, TimelinePolicyView};

#[derive(Debug, Clone)]
pub struct FetchPlan {
    pub game_pk: u64,
    pub max_in_flight: usize,
    pub missing_snapshots: MissingSnapshotPolicy,
}

pub fn build_plan(game_pk: u64, policy: &TimelinePolicyView) -> Result<FetchPlan, TlError> {
    if game_pk == 0 {
        return Err(TlError::InvalidArg("game_pk must be non-zero".into()));
    }

    Ok(FetchPlan {
        game_pk,
        max_in_flight: policy.resolved_max_in_flight(),
        missing_snapshots: policy.missing_snapshots,
    })
}
