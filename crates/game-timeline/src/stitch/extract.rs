//! Projects raw live-feed snapshots into flat event records.
//!
//! Extraction never fails: any missing or mistyped field becomes `None`. The
//! current play is the unit of extraction and the last entry of its
//! `playEvents` list is taken as the latest pitch.

use crate::model::{EventRecord, PlayId, Snapshot, Timeline};
use serde_json::Value as JsonValue;

pub fn extract_timeline(game_pk: u64, snapshots: &[Snapshot]) -> Timeline {
    Timeline {
        game_pk,
        records: snapshots.iter().map(extract_event).collect(),
    }
}

pub fn extract_event(snapshot: &Snapshot) -> EventRecord {
    let mut record = EventRecord {
        timecode: Some(snapshot.timecode.clone()),
        ..EventRecord::default()
    };

    let Some(play) = at(&snapshot.feed, &["liveData", "plays", "currentPlay"]) else {
        return record;
    };

    record.play_event = string_at(play, &["result", "event"]);
    record.play_description = string_at(play, &["result", "description"]);
    record.away_score = at(play, &["result", "awayScore"]).and_then(JsonValue::as_i64);
    record.home_score = at(play, &["result", "homeScore"]).and_then(JsonValue::as_i64);
    record.is_out = at(play, &["result", "isOut"]).and_then(JsonValue::as_bool);

    record.inning = at(play, &["about", "inning"]).and_then(JsonValue::as_i64);
    record.half_inning = string_at(play, &["about", "halfInning"]);
    record.is_top_inning = at(play, &["about", "isTopInning"]).and_then(JsonValue::as_bool);

    record.balls = at(play, &["count", "balls"]).and_then(JsonValue::as_i64);
    record.strikes = at(play, &["count", "strikes"]).and_then(JsonValue::as_i64);
    record.outs = at(play, &["count", "outs"]).and_then(JsonValue::as_i64);

    record.batter_id = at(play, &["matchup", "batter", "id"]).and_then(JsonValue::as_u64);
    record.batter_name = string_at(play, &["matchup", "batter", "fullName"]);
    record.batter_side = string_at(play, &["matchup", "batSide", "description"]);
    record.pitcher_id = at(play, &["matchup", "pitcher", "id"]).and_then(JsonValue::as_u64);
    record.pitcher_name = string_at(play, &["matchup", "pitcher", "fullName"]);
    record.pitcher_hand = string_at(play, &["matchup", "pitchHand", "description"]);

    let last_pitch = play
        .get("playEvents")
        .and_then(JsonValue::as_array)
        .and_then(|events| events.last());
    if let Some(pitch) = last_pitch {
        record.pitch_type = string_at(pitch, &["details", "type", "description"]);
        record.pitch_speed = at(pitch, &["pitchData", "startSpeed"]).and_then(JsonValue::as_f64);
        record.pitch_call = string_at(pitch, &["details", "call", "description"]);
        record.pitch_code = string_at(pitch, &["details", "call", "code"]);
        record.play_id = pitch.get("playId").and_then(PlayId::from_json);
    }

    record
}

fn at<'a>(value: &'a JsonValue, path: &[&str]) -> Option<&'a JsonValue> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

fn string_at(value: &JsonValue, path: &[&str]) -> Option<String> {
    at(value, path)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}
