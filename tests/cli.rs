use assert_cmd::prelude::*;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::fs;
use std::process::{Command, Output};
use tokio::net::TcpListener;

fn command(dir: &std::path::Path, config: &std::path::Path) -> Command {
    let bin = assert_cmd::cargo::cargo_bin!("diamond-digest");
    let mut cmd = Command::new(bin);
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("run binary"))
        .await
        .expect("join")
}

fn snapshot(batter: u64, code: &str, play_id: &str) -> Value {
    json!({"liveData": {"plays": {"currentPlay": {
        "about": {"inning": 1, "halfInning": "bottom"},
        "matchup": {"batter": {"id": batter, "fullName": "Lead Off"}, "pitcher": {"id": 5}},
        "playEvents": [{"details": {"call": {"code": code}}, "playId": play_id}]
    }}}})
}

async fn spawn_services() -> String {
    let app = Router::new()
        .route(
            "/api/v1/schedule",
            get(|| async {
                Json(json!({"dates": [
                    {"date": "2024-09-27", "games": [{"gamePk": 10}]},
                    {"date": "2024-09-28", "games": [{"gamePk": 11,
                        "teams": {"home": {"team": {"name": "Athletics"}},
                                  "away": {"team": {"name": "Yankees"}}}}]}
                ]}))
            }),
        )
        .route(
            "/api/v1.1/game/:pk/feed/live/timestamps",
            get(|| async { Json(json!(["t1", "t2", "t3"])) }),
        )
        .route(
            "/api/v1.1/game/:pk/feed/live",
            get(
                |axum::extract::Query(q): axum::extract::Query<std::collections::HashMap<String, String>>| async move {
                    let feed = match q.get("timecode").map(String::as_str) {
                        Some("t1") => snapshot(42, "B", "1"),
                        Some("t2") => snapshot(42, "E", "77"),
                        _ => snapshot(42, "X", "78"),
                    };
                    Json(feed)
                },
            ),
        )
        .route(
            "/api/v1/game/:pk/content",
            get(|Path(pk): Path<u64>| async move {
                Json(json!({"editorial": {"recap": {"mlb": {
                    "headline": format!("Recap of {pk}"), "body": "Body."
                }}}}))
            }),
        )
        .route(
            "/api/v1/teams/:id",
            get(|Path(id): Path<u64>| async move {
                Json(json!({"teams": [{"id": id, "name": "Athletics", "abbreviation": "OAK",
                    "venue": {"name": "Sutter Health Park"}}]}))
            }),
        )
        .route(
            "/api/v1/teams/:id/coaches",
            get(|| async {
                Json(json!({"roster": [{"person": {"fullName": "Mark Kotsay"}, "job": "Manager"}]}))
            }),
        )
        .route(
            "/llm/chat/completions",
            post(|| async {
                let content = r#"{"personalized_title":"Your A's digest","personalized_message_header":"Hi Ada","personalized_digest":"A walk-off win."}"#;
                Json(json!({"choices": [{"message": {"content": content}}]}))
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("stub server");
    });
    format!("http://{addr}")
}

fn write_config(dir: &std::path::Path, base: &str) -> std::path::PathBuf {
    let path = dir.join("config.yaml");
    fs::write(
        &path,
        format!(
            "stats:\n  base_url: {base}/api\ntimeline:\n  max_in_flight: 2\n  default_season: \"2024\"\nsummary:\n  api_base: {base}/llm\n  api_key: sk-test\n"
        ),
    )
    .expect("write config");
    path
}

#[test]
fn config_show_merges_file_and_environment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "http://stats.local");

    let assert = command(dir.path(), &config)
        .env("DIAMOND_DIGEST__NOTIFY__SENDER", "bot@example.com")
        .args(["--output", "json", "config", "show"])
        .assert()
        .success();

    let payload: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("json config");
    assert_eq!(payload["stats"]["base_url"], "http://stats.local/api");
    assert_eq!(payload["timeline"]["max_in_flight"], 2);
    assert_eq!(payload["notify"]["sender"], "bot@example.com");
    assert_eq!(payload["summary"]["api_key"], "<redacted>");
}

#[test]
fn config_validate_rejects_unknown_policy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    fs::write(&config, "timeline:\n  missing_snapshots: sometimes\n").expect("write");

    command(dir.path(), &config)
        .args(["config", "validate"])
        .assert()
        .failure();
}

#[test]
fn locate_requires_a_subject() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");

    command(dir.path(), &config)
        .args(["locate", "--team", "1", "--player", "2"])
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn locate_prints_latest_game() {
    let base = spawn_services().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), &base);

    let mut cmd = command(dir.path(), &config);
    cmd.args(["--output", "json", "locate", "--team", "133"]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{output:?}");

    let game: Value = serde_json::from_slice(&output.stdout).expect("json game");
    assert_eq!(game["game_pk"], 11);
    assert_eq!(game["date"], "2024-09-28");
    assert_eq!(game["home_team"], "Athletics");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn timeline_writes_jsonl_with_notable_marks() {
    let base = spawn_services().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), &base);
    let out = dir.path().join("timeline.jsonl");

    let mut cmd = command(dir.path(), &config);
    cmd.args(["timeline", "--game-pk", "11", "--player", "42", "--out"])
        .arg(&out);
    let output = run(cmd).await;
    assert!(output.status.success(), "{output:?}");

    let lines: Vec<Value> = fs::read_to_string(&out)
        .expect("jsonl")
        .lines()
        .map(|line| serde_json::from_str(line).expect("line"))
        .collect();
    assert_eq!(lines.len(), 5);
    let notable: Vec<bool> = lines[1..4]
        .iter()
        .map(|line| line["notable"].as_bool().unwrap_or_default())
        .collect();
    assert_eq!(notable, vec![false, true, true]);
    assert_eq!(lines[4]["notable_records"], 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dry_run_digest_emits_payload() {
    let base = spawn_services().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), &base);

    let mut cmd = command(dir.path(), &config);
    cmd.args([
        "--output",
        "json",
        "digest",
        "--team",
        "133",
        "--email",
        "ada@example.com",
        "--first-name",
        "Ada",
        "--family-name",
        "Lovelace",
        "--dry-run",
    ]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{output:?}");

    let outcome: Value = serde_json::from_slice(&output.stdout).expect("json outcome");
    assert_eq!(outcome["game"]["game_pk"], 11);
    assert_eq!(outcome["summary"]["team_abbreviation"], "OAK");
    assert_eq!(outcome["summary"]["headline"], "Recap of 11");
    assert_eq!(outcome["notification"]["subject"], "Your A's digest");
    assert_eq!(outcome["notification"]["receiver"], "ada@example.com");
    assert!(outcome["receipt"].is_null());
}
