//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

mod common;

use common::{run_cli_failure, run_cli_json, run_cli_success};
use tempfile::TempDir;

#[test]
fn test_status_fresh() {
    let dir = TempDir::new().unwrap();
    let status = run_cli_json(dir.path(), &["status"]);
    assert_eq!(status["completed"], 0);
    assert_eq!(status["total"], 19);
    assert_eq!(status["totalProgress"], 0);
    assert_eq!(status["currentStage"], 1);
    assert_eq!(status["currentQuest"]["id"], "1-1");
    assert_eq!(status["xp"], 0);
    assert_eq!(status["streak"], 0);
}

#[test]
fn test_status_text() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["status"]);
    assert!(out.contains("0/19"));
    assert!(out.contains("Set your departure date"));
}

#[test]
fn test_quest_done_persists() {
    let dir = TempDir::new().unwrap();
    let events = run_cli_json(dir.path(), &["quest", "done", "1-1"]);
    let events = events.as_array().unwrap();
    assert_eq!(events[0]["type"], "QuestCompleted");
    assert_eq!(events[0]["xp_gained"], 10);
    assert!(events
        .iter()
        .any(|e| e["type"] == "AchievementUnlocked" && e["achievement"] == "first_quest"));

    let status = run_cli_json(dir.path(), &["status"]);
    assert_eq!(status["completed"], 1);
    assert_eq!(status["xp"], 10);
    assert_eq!(status["totalProgress"], 5);
}

#[test]
fn test_quest_done_twice_is_noop() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["quest", "done", "1-1"]);
    let events = run_cli_json(dir.path(), &["quest", "done", "1-1"]);
    assert!(events.as_array().unwrap().is_empty());
    assert_eq!(run_cli_json(dir.path(), &["status"])["xp"], 10);
}

#[test]
fn test_quest_undo_and_toggle() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["quest", "toggle", "1-2"]);
    assert_eq!(run_cli_json(dir.path(), &["status"])["completed"], 1);

    run_cli_success(dir.path(), &["quest", "undo", "1-2"]);
    let status = run_cli_json(dir.path(), &["status"]);
    assert_eq!(status["completed"], 0);
    assert_eq!(status["xp"], 0);
}

#[test]
fn test_quest_unknown_fails() {
    let dir = TempDir::new().unwrap();
    let stderr = run_cli_failure(dir.path(), &["quest", "done", "9-9"]);
    assert!(stderr.contains("Unknown quest"));
}

#[test]
fn test_quest_in_locked_stage_fails() {
    let dir = TempDir::new().unwrap();
    let stderr = run_cli_failure(dir.path(), &["quest", "done", "2-1"]);
    assert!(stderr.contains("locked"));
    assert_eq!(run_cli_json(dir.path(), &["status"])["completed"], 0);
}

#[test]
fn test_stages_unlock_after_clearing_stage_one() {
    let dir = TempDir::new().unwrap();
    let stages = run_cli_json(dir.path(), &["stages"]);
    assert_eq!(stages.as_array().unwrap().len(), 4);
    assert_eq!(stages[0]["unlocked"], true);
    assert_eq!(stages[1]["unlocked"], false);

    for id in ["1-1", "1-2", "1-3", "1-4"] {
        run_cli_success(dir.path(), &["quest", "done", id]);
    }
    let stages = run_cli_json(dir.path(), &["stages"]);
    assert_eq!(stages[0]["cleared"], true);
    assert_eq!(stages[1]["unlocked"], true);
    assert_eq!(run_cli_json(dir.path(), &["status"])["currentStage"], 2);
}

#[test]
fn test_stage_show() {
    let dir = TempDir::new().unwrap();
    let stage = run_cli_json(dir.path(), &["stage", "2"]);
    assert_eq!(stage["id"], 2);
    assert_eq!(stage["quests"].as_array().unwrap().len(), 5);
    assert_eq!(stage["quests"][0]["completed"], false);
}

#[test]
fn test_stage_locked_hint() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["stage", "2"]);
    assert!(out.contains("Locked: complete stage 1 first."));
    let out = run_cli_success(dir.path(), &["stage", "1"]);
    assert!(!out.contains("Locked"));
}

#[test]
fn test_stage_unknown_fails() {
    let dir = TempDir::new().unwrap();
    let stderr = run_cli_failure(dir.path(), &["stage", "42"]);
    assert!(stderr.contains("Unknown stage"));
}

#[test]
fn test_achievements_and_ranks() {
    let dir = TempDir::new().unwrap();
    let achievements = run_cli_json(dir.path(), &["achievements"]);
    let achievements = achievements.as_array().unwrap();
    assert_eq!(achievements.len(), 6);
    assert!(achievements.iter().all(|a| a["unlocked"] == false));

    let ranks = run_cli_json(dir.path(), &["ranks"]);
    assert_eq!(ranks.as_array().unwrap().len(), 5);
    assert_eq!(ranks[0]["minXp"], 0);
}

#[test]
fn test_departure_set_show_clear() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["departure", "set", "2099-01-01"]);
    let out = run_cli_success(dir.path(), &["departure", "show"]);
    assert!(out.contains("2099-01-01"));
    assert!(out.contains("until departure"));

    run_cli_success(dir.path(), &["departure", "clear"]);
    let out = run_cli_success(dir.path(), &["departure", "show"]);
    assert!(out.contains("Set your departure date"));
}

#[test]
fn test_departure_invalid_date_fails() {
    let dir = TempDir::new().unwrap();
    let stderr = run_cli_failure(dir.path(), &["departure", "set", "next week"]);
    assert!(stderr.contains("Invalid date"));
}

#[test]
fn test_reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["quest", "done", "1-1"]);
    run_cli_failure(dir.path(), &["reset"]);
    assert_eq!(run_cli_json(dir.path(), &["status"])["completed"], 1);

    run_cli_success(dir.path(), &["departure", "set", "2099-01-01"]);
    run_cli_success(dir.path(), &["reset", "--yes"]);
    let status = run_cli_json(dir.path(), &["status"]);
    assert_eq!(status["completed"], 0);
    assert_eq!(status["xp"], 0);
    assert_eq!(status["departure"], "2099-01-01");
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["config", "get", "game.xp_per_quest"]);
    assert_eq!(out.trim(), "10");

    run_cli_success(dir.path(), &["config", "set", "game.xp_per_quest", "25"]);
    let out = run_cli_success(dir.path(), &["config", "get", "game.xp_per_quest"]);
    assert_eq!(out.trim(), "25");

    let events = run_cli_json(dir.path(), &["quest", "done", "1-1"]);
    assert_eq!(events[0]["xp_gained"], 25);

    run_cli_success(dir.path(), &["config", "reset"]);
    let out = run_cli_success(dir.path(), &["config", "get", "game.xp_per_quest"]);
    assert_eq!(out.trim(), "10");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    run_cli_failure(dir.path(), &["config", "get", "nope"]);
    run_cli_failure(dir.path(), &["config", "set", "nope", "1"]);
}

#[test]
fn test_config_list() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["config", "list"]);
    assert!(out.contains("[game]"));
    assert!(out.contains("xp_per_quest = 10"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(out.contains("whquest"));
}
