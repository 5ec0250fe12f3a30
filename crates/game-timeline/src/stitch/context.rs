use crate::model::{GameContext, GameReference, Recap, TeamSummary};
use serde_json::Value as JsonValue;

/// Pulls the editorial recap out of a game-content document.
pub fn project_recap(content: &JsonValue) -> Recap {
    let recap = content
        .get("editorial")
        .and_then(|v| v.get("recap"))
        .and_then(|v| v.get("mlb"));

    let Some(recap) = recap else {
        return Recap::default();
    };

    Recap {
        headline: recap
            .get("headline")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        body: recap
            .get("body")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        image_url: recap
            .get("image")
            .and_then(|v| v.get("cuts"))
            .and_then(JsonValue::as_array)
            .and_then(|cuts| cuts.first())
            .and_then(|cut| cut.get("src"))
            .and_then(JsonValue::as_str)
            .map(str::to_string),
    }
}

pub fn build_context(game: GameReference, team: Option<TeamSummary>, content: &JsonValue) -> GameContext {
    GameContext {
        game,
        team,
        recap: project_recap(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recap_reads_headline_body_and_first_cut() {
        let content = json!({"editorial": {"recap": {"mlb": {
            "headline": "A's walk it off",
            "body": "Long story.",
            "image": {"cuts": [{"src": "https://img/1.jpg"}, {"src": "https://img/2.jpg"}]}
        }}}});
        let recap = project_recap(&content);
        assert_eq!(recap.headline.as_deref(), Some("A's walk it off"));
        assert_eq!(recap.body.as_deref(), Some("Long story."));
        assert_eq!(recap.image_url.as_deref(), Some("https://img/1.jpg"));
    }

    #[test]
    fn missing_recap_is_empty() {
        assert_eq!(project_recap(&json!({"editorial": {}})), Recap::default());
        assert_eq!(
            project_recap(&json!({"editorial": {"recap": {"mlb": {"image": {"cuts": []}}}}})),
            Recap::default()
        );
    }
}
