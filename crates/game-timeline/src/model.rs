use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

/// Who a digest is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Subject {
    Team(u64),
    Player(u64),
}

impl Subject {
    pub fn kind(&self) -> &'static str {
        match self {
            Subject::Team(_) => "team",
            Subject::Player(_) => "player",
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Subject::Team(id) | Subject::Player(id) => *id,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// One contest, as picked by the game locator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameReference {
    pub game_pk: u64,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub game_in_series: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Timecode(pub String);

impl Timecode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Timecode {
    fn from(value: &str) -> Self {
        Timecode(value.to_string())
    }
}

impl From<String> for Timecode {
    fn from(value: String) -> Self {
        Timecode(value)
    }
}

/// Raw live-feed document captured at one timecode. A `Null` feed stands in
/// for a snapshot that could not be fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub timecode: Timecode,
    pub feed: JsonValue,
}

/// Play identifier as found upstream. Each variant keeps the raw JSON it was
/// read from, so numeric ids serialize back as numbers.
///
/// Only strings and numbers are plain identifiers. Objects, arrays, booleans
/// and strings that decode to an object or array are `Structured`: they only
/// show up in malformed records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum PlayId {
    Scalar(String),
    Numeric(serde_json::Number),
    Structured(JsonValue),
}

impl PlayId {
    /// `None` for JSON null, which upstream uses for "no play".
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            other => Some(PlayId::from(other.clone())),
        }
    }

    /// Textual form of a plain identifier.
    pub fn as_scalar(&self) -> Option<Cow<'_, str>> {
        match self {
            PlayId::Scalar(id) => Some(Cow::Borrowed(id.as_str())),
            PlayId::Numeric(n) => Some(Cow::Owned(n.to_string())),
            PlayId::Structured(_) => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, PlayId::Structured(_))
    }
}

/// A string carrying an encoded object or array.
fn encodes_container(text: &str) -> bool {
    let trimmed = text.trim_start();
    (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<JsonValue>(trimmed)
            .is_ok_and(|decoded| decoded.is_object() || decoded.is_array())
}

impl From<JsonValue> for PlayId {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::String(id) if encodes_container(&id) => {
                PlayId::Structured(JsonValue::String(id))
            }
            JsonValue::String(id) => PlayId::Scalar(id),
            JsonValue::Number(n) => PlayId::Numeric(n),
            other => PlayId::Structured(other),
        }
    }
}

impl From<PlayId> for JsonValue {
    fn from(value: PlayId) -> Self {
        match value {
            PlayId::Scalar(id) => JsonValue::String(id),
            PlayId::Numeric(n) => JsonValue::Number(n),
            PlayId::Structured(raw) => raw,
        }
    }
}

/// Flattened game state at one timecode. Every field is best effort.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EventRecord {
    pub timecode: Option<Timecode>,
    pub inning: Option<i64>,
    pub half_inning: Option<String>,
    pub is_top_inning: Option<bool>,
    pub play_event: Option<String>,
    pub play_description: Option<String>,
    pub away_score: Option<i64>,
    pub home_score: Option<i64>,
    pub is_out: Option<bool>,
    pub balls: Option<i64>,
    pub strikes: Option<i64>,
    pub outs: Option<i64>,
    pub batter_id: Option<u64>,
    pub batter_name: Option<String>,
    pub batter_side: Option<String>,
    pub pitcher_id: Option<u64>,
    pub pitcher_name: Option<String>,
    pub pitcher_hand: Option<String>,
    pub pitch_type: Option<String>,
    pub pitch_speed: Option<f64>,
    pub pitch_call: Option<String>,
    pub pitch_code: Option<String>,
    pub play_id: Option<PlayId>,
}

impl EventRecord {
    pub fn involves(&self, player_id: u64) -> bool {
        self.batter_id == Some(player_id) || self.pitcher_id == Some(player_id)
    }

    /// One-line narrative used as grounding text for summaries.
    pub fn narrate(&self) -> String {
        let mut parts = Vec::new();
        if let (Some(half), Some(inning)) = (&self.half_inning, self.inning) {
            parts.push(format!("{half} {inning}"));
        }
        if let (Some(batter), Some(pitcher)) = (&self.batter_name, &self.pitcher_name) {
            parts.push(format!("{batter} vs {pitcher}"));
        }
        if let (Some(b), Some(s), Some(o)) = (self.balls, self.strikes, self.outs) {
            parts.push(format!("count {b}-{s}, {o} out"));
        }
        if let Some(pitch) = &self.pitch_type {
            match self.pitch_speed {
                Some(speed) => parts.push(format!("{pitch} at {speed} mph")),
                None => parts.push(pitch.clone()),
            }
        }
        if let Some(call) = &self.pitch_call {
            parts.push(call.clone());
        }
        if let Some(desc) = &self.play_description {
            parts.push(desc.clone());
        }
        parts.join("; ")
    }
}

/// Event records for one game in timecode order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Timeline {
    pub game_pk: u64,
    pub records: Vec<EventRecord>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "selection", content = "play_id", rename_all = "snake_case")]
pub enum NotablePlaySelection {
    Play(String),
    NoNotablePlay,
}

impl NotablePlaySelection {
    pub fn play_id(&self) -> Option<&str> {
        match self {
            NotablePlaySelection::Play(id) => Some(id.as_str()),
            NotablePlaySelection::NoNotablePlay => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighlightReport {
    pub game: GameReference,
    pub player_id: u64,
    pub total_records: usize,
    pub notable_events: Vec<EventRecord>,
    pub selection: NotablePlaySelection,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TeamSummary {
    pub id: u64,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub venue: Option<String>,
    pub manager: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Recap {
    pub headline: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
}

/// Narrative grounding for one game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameContext {
    pub game: GameReference,
    pub team: Option<TeamSummary>,
    pub recap: Recap,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunDigest {
    pub operation: &'static str,
    pub subject: Option<Subject>,
    pub game_pk: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportResult {
    pub path: Option<PathBuf>,
    pub lines: Option<Vec<String>>,
    pub total_records: usize,
    pub notable_records: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderLine {
    pub export_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub game_pk: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordLine {
    pub index: usize,
    pub notable: bool,
    pub record: EventRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterLine {
    pub total_records: usize,
    pub notable_records: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonlLine {
    Header(HeaderLine),
    Record(RecordLine),
    Footer(FooterLine),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn play_id_splits_scalars_from_blobs() {
        assert_eq!(
            PlayId::from_json(&json!("a1b2")),
            Some(PlayId::Scalar("a1b2".into()))
        );
        assert_eq!(
            PlayId::from_json(&json!(42)).and_then(|id| id.as_scalar().map(Cow::into_owned)),
            Some("42".to_string())
        );
        assert!(matches!(
            PlayId::from_json(&json!({})),
            Some(PlayId::Structured(_))
        ));
        assert!(matches!(
            PlayId::from_json(&json!([1])),
            Some(PlayId::Structured(_))
        ));
        assert_eq!(PlayId::from_json(&JsonValue::Null), None);
    }

    #[test]
    fn encoded_containers_and_booleans_are_not_plain_ids() {
        for raw in [
            json!("{\"playId\":null}"),
            json!("  [1, 2]"),
            json!(true),
            json!(false),
        ] {
            let id = PlayId::from_json(&raw).expect("present");
            assert!(!id.is_scalar(), "{raw} should not be a plain id");
            assert_eq!(id.as_scalar(), None);
        }
        for raw in [json!("{not json"), json!("[draft"), json!("0b9c2f7e-1111")] {
            let id = PlayId::from_json(&raw).expect("present");
            assert!(id.is_scalar(), "{raw} should be a plain id");
        }
    }

    #[test]
    fn play_ids_round_trip_their_raw_json() {
        for raw in [json!(42), json!("42"), json!("{\"playId\":null}"), json!({"a": 1})] {
            let record = EventRecord {
                play_id: PlayId::from_json(&raw),
                ..EventRecord::default()
            };
            let value = serde_json::to_value(&record).unwrap();
            assert_eq!(value["play_id"], raw);
            let back: EventRecord = serde_json::from_value(value).unwrap();
            assert_eq!(back.play_id, record.play_id);
        }
    }

    #[test]
    fn play_id_serializes_as_raw_json() {
        let record = EventRecord {
            play_id: Some(PlayId::Scalar("abc".into())),
            ..EventRecord::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["play_id"], json!("abc"));

        let back: EventRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back.play_id, Some(PlayId::Scalar("abc".into())));
    }

    #[test]
    fn subject_display_names_kind() {
        assert_eq!(Subject::Player(660271).to_string(), "player 660271");
    }
}
