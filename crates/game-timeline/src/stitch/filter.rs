//! Narrows a timeline to the events worth talking about for one player.

use crate::model::{EventRecord, NotablePlaySelection, PlayId, Timeline};
use std::cmp::Ordering;

/// Pitch and play outcome codes treated as highlights: run-scoring and
/// play-determining calls, hit-by-pitch and intentional walks, pickoff
/// attempts, and rule violations.
pub const NOTABLE_PITCH_CODES: [&str; 20] = [
    "E", "Z", "X", "D", "Y", "J", // run-scoring and play-determining
    "H", "I", "VB", // hit-by-pitch, intentional walks
    "1", "2", "3", "+1", "+2", "+3", // pickoff attempts
    "VP", "VC", "VS", "AC", "AB", // violations
];

pub fn is_notable_code(code: &str) -> bool {
    NOTABLE_PITCH_CODES.contains(&code)
}

/// Records where `player_id` bats or pitches, the last pitch carries a
/// notable call code, and the play identifier is a plain scalar. Timeline
/// order is preserved.
pub fn filter_significant(timeline: &Timeline, player_id: u64) -> Vec<EventRecord> {
    timeline
        .iter()
        .filter(|record| is_significant(record, player_id))
        .cloned()
        .collect()
}

pub fn is_significant(record: &EventRecord, player_id: u64) -> bool {
    record.involves(player_id)
        && record.pitch_code.as_deref().is_some_and(is_notable_code)
        && record.play_id.as_ref().is_some_and(PlayId::is_scalar)
}

/// Highest scalar play identifier among `records`, or the explicit
/// no-highlight sentinel.
pub fn select_notable_play(records: &[EventRecord]) -> NotablePlaySelection {
    records
        .iter()
        .filter_map(|record| record.play_id.as_ref().and_then(PlayId::as_scalar))
        .max_by(|a, b| compare_play_ids(a, b))
        .map(|id| NotablePlaySelection::Play(id.into_owned()))
        .unwrap_or(NotablePlaySelection::NoNotablePlay)
}

/// Total order over play identifiers. All-digit ids rank below any other id
/// and compare by numeric value; other ids compare lexicographically. Equal
/// values with different spellings (`"07"`, `"7"`) fall back to the text.
pub fn compare_play_ids(a: &str, b: &str) -> Ordering {
    match (digits(a), digits(b)) {
        (Some(x), Some(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| x.cmp(y))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Significant digits of an all-digit id, of any length.
fn digits(id: &str) -> Option<&str> {
    (!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())).then(|| id.trim_start_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PLAYER: u64 = 660271;

    fn record(batter: u64, pitcher: u64, code: &str, play_id: Option<PlayId>) -> EventRecord {
        EventRecord {
            batter_id: Some(batter),
            pitcher_id: Some(pitcher),
            pitch_code: Some(code.to_string()),
            play_id,
            ..EventRecord::default()
        }
    }

    fn scalar(id: &str) -> Option<PlayId> {
        Some(PlayId::Scalar(id.to_string()))
    }

    #[test]
    fn notable_code_set_is_exact() {
        let mut codes = NOTABLE_PITCH_CODES.to_vec();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 20);
        for code in ["E", "Z", "X", "D", "Y", "J", "H", "I", "VB", "1", "2", "3", "+1", "+2", "+3", "VP", "VC", "VS", "AC", "AB"] {
            assert!(is_notable_code(code), "{code} should be notable");
        }
        for code in ["B", "S", "C", "F", "T", "x", ""] {
            assert!(!is_notable_code(code), "{code} should not be notable");
        }
    }

    #[test]
    fn ball_is_excluded_and_in_play_is_included() {
        let timeline = Timeline {
            game_pk: 1,
            records: vec![
                record(PLAYER, 1, "B", scalar("p1")),
                record(PLAYER, 1, "X", scalar("p2")),
            ],
        };
        let kept = filter_significant(&timeline, PLAYER);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].play_id, scalar("p2"));
    }

    #[test]
    fn player_may_be_batter_or_pitcher() {
        let timeline = Timeline {
            game_pk: 1,
            records: vec![
                record(PLAYER, 2, "D", scalar("a")),
                record(3, PLAYER, "E", scalar("b")),
                record(3, 4, "E", scalar("c")),
            ],
        };
        let ids: Vec<_> = filter_significant(&timeline, PLAYER)
            .into_iter()
            .map(|r| r.play_id)
            .collect();
        assert_eq!(ids, vec![scalar("a"), scalar("b")]);
    }

    #[test]
    fn structured_or_missing_play_ids_are_dropped() {
        let timeline = Timeline {
            game_pk: 1,
            records: vec![
                record(PLAYER, 1, "X", Some(PlayId::Structured(json!({})))),
                record(PLAYER, 1, "X", Some(PlayId::Structured(json!(["x"])))),
                record(PLAYER, 1, "X", None),
                EventRecord {
                    batter_id: Some(PLAYER),
                    play_id: scalar("no-code"),
                    ..EventRecord::default()
                },
            ],
        };
        assert!(filter_significant(&timeline, PLAYER).is_empty());
    }

    #[test]
    fn output_is_an_ordered_subset() {
        let timeline = Timeline {
            game_pk: 1,
            records: vec![
                record(PLAYER, 1, "X", scalar("z")),
                record(PLAYER, 1, "S", scalar("y")),
                record(PLAYER, 1, "H", scalar("a")),
            ],
        };
        let kept = filter_significant(&timeline, PLAYER);
        assert_eq!(kept, vec![timeline.records[0].clone(), timeline.records[2].clone()]);
    }

    #[test]
    fn selection_takes_maximum_identifier() {
        let records = vec![
            record(PLAYER, 1, "X", scalar("3f1a")),
            record(PLAYER, 1, "X", scalar("b2c0")),
            record(PLAYER, 1, "X", scalar("a9ff")),
        ];
        assert_eq!(
            select_notable_play(&records),
            NotablePlaySelection::Play("b2c0".into())
        );
    }

    #[test]
    fn numeric_identifiers_compare_numerically() {
        let records = vec![
            record(PLAYER, 1, "X", scalar("9")),
            record(PLAYER, 1, "X", scalar("10")),
        ];
        assert_eq!(select_notable_play(&records).play_id(), Some("10"));
    }

    #[test]
    fn selection_ignores_input_order() {
        let ids = ["10", "9", "5a", "007", "7", "b", "18446744073709551616000"];
        let orders: [[usize; 7]; 4] = [
            [0, 1, 2, 3, 4, 5, 6],
            [6, 5, 4, 3, 2, 1, 0],
            [2, 0, 6, 1, 5, 3, 4],
            [4, 3, 5, 6, 0, 2, 1],
        ];
        for order in orders {
            let records: Vec<_> = order
                .iter()
                .map(|&i| record(PLAYER, 1, "X", scalar(ids[i])))
                .collect();
            assert_eq!(select_notable_play(&records).play_id(), Some("b"));
        }

        let numeric_only: Vec<_> = ["10", "9", "18446744073709551616000", "007"]
            .into_iter()
            .rev()
            .map(|id| record(PLAYER, 1, "X", scalar(id)))
            .collect();
        assert_eq!(
            select_notable_play(&numeric_only).play_id(),
            Some("18446744073709551616000")
        );
    }

    #[test]
    fn play_id_order_is_consistent() {
        let ids = ["10", "9", "5a", "007", "7", "", "b"];
        for a in ids {
            assert_eq!(compare_play_ids(a, a), Ordering::Equal);
            for b in ids {
                assert_eq!(compare_play_ids(a, b), compare_play_ids(b, a).reverse());
                for c in ids {
                    if compare_play_ids(a, b) == Ordering::Less
                        && compare_play_ids(b, c) == Ordering::Less
                    {
                        assert_eq!(compare_play_ids(a, c), Ordering::Less, "{a} < {b} < {c}");
                    }
                }
            }
        }
        assert_eq!(compare_play_ids("007", "7"), Ordering::Less);
        assert_eq!(compare_play_ids("99", "5a"), Ordering::Less);
    }

    #[test]
    fn encoded_blob_ids_never_win_selection() {
        let timeline = Timeline {
            game_pk: 1,
            records: vec![
                record(PLAYER, 1, "X", PlayId::from_json(&json!("0b9c2f7e-1111"))),
                record(PLAYER, 1, "E", PlayId::from_json(&json!("{\"playId\":null}"))),
                record(PLAYER, 1, "D", PlayId::from_json(&json!(true))),
            ],
        };
        let kept = filter_significant(&timeline, PLAYER);
        assert_eq!(kept.len(), 1);
        assert_eq!(
            select_notable_play(&kept),
            NotablePlaySelection::Play("0b9c2f7e-1111".into())
        );
    }

    #[test]
    fn numeric_play_ids_are_selectable() {
        let records = vec![
            record(PLAYER, 1, "X", PlayId::from_json(&json!(77))),
            record(PLAYER, 1, "X", PlayId::from_json(&json!(120))),
        ];
        assert_eq!(select_notable_play(&records).play_id(), Some("120"));
    }

    #[test]
    fn empty_selection_is_sentinel() {
        assert_eq!(select_notable_play(&[]), NotablePlaySelection::NoNotablePlay);
        assert_eq!(NotablePlaySelection::NoNotablePlay.play_id(), None);
    }
}
