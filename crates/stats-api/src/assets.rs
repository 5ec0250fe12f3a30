//! Static image locations for players and teams. These are pure URL
//! builders; the images are never fetched.

use crate::errors::{StatsApiError, StatsResult};

const HEADSHOT_BASE: &str = "https://img.mlbstatic.com/mlb-photos/image/upload/w_213,d_people:generic::headshot:silo:current.png,q_auto:best,f_auto/v1/people";
const LOGO_BASE: &str = "https://www.mlbstatic.com/team-logos";

pub fn headshot_url(person_id: u64) -> String {
    format!("{HEADSHOT_BASE}/{person_id}/headshot/67/current")
}

pub fn team_logo_url(team_id: u64, theme: &str) -> StatsResult<String> {
    match theme {
        "light" => Ok(format!("{LOGO_BASE}/{team_id}.svg")),
        "dark" => Ok(format!("{LOGO_BASE}/team-cap-on-dark/{team_id}.svg")),
        other => Err(StatsApiError::InvalidArg(format!(
            "unknown logo theme '{other}', expected light or dark"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_theme_is_validated() {
        assert!(team_logo_url(147, "light").unwrap().ends_with("/147.svg"));
        assert!(team_logo_url(147, "sepia").is_err());
    }

    #[test]
    fn headshot_embeds_person_id() {
        assert!(headshot_url(660271).contains("/people/660271/headshot/"));
    }
}
