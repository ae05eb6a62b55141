use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn store_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join(".goalplan").join("goals.json")
}

fn goalplan(tmp: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_goalplan"))
        .current_dir(tmp.path())
        .env_remove("GOALPLAN_STORE")
        .env_remove("GOALPLAN_LOG")
        .arg("--store")
        .arg(store_path(tmp))
        .args(args)
        .output()
        .unwrap()
}

fn json_of(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn list(tmp: &TempDir) -> Vec<Value> {
    match json_of(&goalplan(tmp, &["list", "--json"])) {
        Value::Array(goals) => goals,
        other => panic!("expected array, got {}", other),
    }
}

fn titles(goals: &[Value]) -> Vec<String> {
    goals
        .iter()
        .map(|g| g["title"].as_str().unwrap().to_string())
        .collect()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_first_run_creates_goal_one() {
    let tmp = TempDir::new().unwrap();

    let goals = list(&tmp);

    assert_eq!(titles(&goals), vec!["Goal 1"]);
    assert!(store_path(&tmp).exists());
    let routines = goals[0]["system"]["dailyRoutines"].as_array().unwrap();
    assert_eq!(routines.len(), 1);
    assert_eq!(routines[0]["text"], "");
    assert_eq!(routines[0]["checked"], false);
}

#[test]
fn test_add_and_show() {
    let tmp = TempDir::new().unwrap();

    let output = goalplan(&tmp, &["add"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created Goal 2"));

    let output = goalplan(&tmp, &["show", "2"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Goal 2"));
    assert!(text.contains("Daily routines"));
    assert!(text.contains("Monthly reviews"));
}

#[test]
fn test_delete_renumbers() {
    let tmp = TempDir::new().unwrap();
    goalplan(&tmp, &["add"]);
    goalplan(&tmp, &["add"]);
    let before = list(&tmp);
    assert_eq!(titles(&before), vec!["Goal 1", "Goal 2", "Goal 3"]);

    let output = goalplan(&tmp, &["delete", "2", "--force"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let after = list(&tmp);
    assert_eq!(titles(&after), vec!["Goal 1", "Goal 2"]);
    assert_eq!(after[0]["id"], before[0]["id"]);
    assert_eq!(after[1]["id"], before[2]["id"]);
}

#[test]
fn test_goal_one_cannot_be_deleted() {
    let tmp = TempDir::new().unwrap();
    goalplan(&tmp, &["add"]);
    let before = list(&tmp);

    let output = goalplan(&tmp, &["delete", "1", "--force"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("can't be deleted"));
    assert_eq!(list(&tmp), before);
}

#[test]
fn test_delete_requires_force_when_not_interactive() {
    let tmp = TempDir::new().unwrap();
    goalplan(&tmp, &["add"]);

    let output = goalplan(&tmp, &["delete", "2"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Use --force"));
    assert_eq!(list(&tmp).len(), 2);
}

#[test]
fn test_toggle_touches_only_target_list() {
    let tmp = TempDir::new().unwrap();
    list(&tmp);

    let goal = json_of(&goalplan(
        &tmp,
        &["item", "toggle", "1", "system.dailyRoutines", "1", "--json"],
    ));

    assert_eq!(goal["system"]["dailyRoutines"][0]["checked"], true);
    assert_eq!(goal["system"]["behaviorRules"][0]["checked"], false);

    let stored = list(&tmp);
    assert_eq!(stored[0]["system"]["dailyRoutines"][0]["checked"], true);
}

#[test]
fn test_item_add_set_remove() {
    let tmp = TempDir::new().unwrap();
    list(&tmp);

    let goal = json_of(&goalplan(
        &tmp,
        &["item", "add", "1", "obstacles", "Phone in bedroom", "--json"],
    ));
    let obstacles = goal["environment"]["obstacles"].as_array().unwrap();
    assert_eq!(obstacles.len(), 2);
    assert_eq!(obstacles[1]["id"], 2);
    assert_eq!(obstacles[1]["text"], "Phone in bedroom");

    let goal = json_of(&goalplan(
        &tmp,
        &["item", "set", "1", "environment.obstacles", "1", "Late dinners", "--json"],
    ));
    assert_eq!(goal["environment"]["obstacles"][0]["text"], "Late dinners");

    let goal = json_of(&goalplan(
        &tmp,
        &["item", "remove", "1", "obstacles", "2", "--json"],
    ));
    let obstacles = goal["environment"]["obstacles"].as_array().unwrap();
    assert_eq!(obstacles.len(), 1);
    assert_eq!(obstacles[0]["text"], "Late dinners");
}

#[test]
fn test_item_messages() {
    let tmp = TempDir::new().unwrap();
    list(&tmp);

    let output = goalplan(&tmp, &["item", "add", "1", "rewards", "New book"]);
    assert!(stdout(&output).contains("Added motivation.rewards item 2 to Goal 1"));

    let output = goalplan(&tmp, &["item", "remove", "1", "rewards", "99"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No item 99 in motivation.rewards"));

    let output = goalplan(&tmp, &["item", "set", "1", "rewards", "99", "x"]);
    assert!(stdout(&output).contains("No item 99 in motivation.rewards"));

    let output = goalplan(&tmp, &["review", "remove", "1", "weekly", "5"]);
    assert!(stdout(&output).contains("No weekly review 5"));

    let output = goalplan(&tmp, &["item", "remove", "1", "rewards", "2"]);
    assert!(stdout(&output).contains("Removed motivation.rewards item 2 from Goal 1"));
}

#[test]
fn test_unknown_list_is_rejected() {
    let tmp = TempDir::new().unwrap();

    let output = goalplan(&tmp, &["item", "add", "1", "feelings"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown list"));
}

#[test]
fn test_reviews() {
    let tmp = TempDir::new().unwrap();
    list(&tmp);

    goalplan(&tmp, &["review", "add", "1", "weekly"]);
    goalplan(&tmp, &["review", "set", "1", "weekly", "1", "date", "2024-03-04"]);
    let goal = json_of(&goalplan(
        &tmp,
        &["review", "set", "1", "weekly", "1", "comment", "Solid week", "--json"],
    ));

    let weekly = goal["feedback"]["weeklyReviews"].as_array().unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0]["date"], "2024-03-04");
    assert_eq!(weekly[0]["comment"], "Solid week");
    assert!(goal["feedback"]["monthlyReviews"].as_array().unwrap().is_empty());
}

#[test]
fn test_dream_time_and_days() {
    let tmp = TempDir::new().unwrap();
    list(&tmp);

    goalplan(&tmp, &["dream", "1", "Run a marathon"]);
    goalplan(&tmp, &["time", "1", "7am"]);
    goalplan(&tmp, &["day", "1", "sat"]);
    goalplan(&tmp, &["day", "1", "tue"]);
    let goal = json_of(&goalplan(&tmp, &["show", "1", "--json"]));

    assert_eq!(goal["vision"]["dream"], "Run a marathon");
    assert_eq!(goal["environment"]["preferredTime"], "7am");
    assert_eq!(
        goal["environment"]["selectedDays"],
        serde_json::json!(["tue", "sat"])
    );

    goalplan(&tmp, &["day", "1", "sat"]);
    let goal = json_of(&goalplan(&tmp, &["show", "1", "--json"]));
    assert_eq!(goal["environment"]["selectedDays"], serde_json::json!(["tue"]));
}

fn exported_file(dir: &Path) -> PathBuf {
    let entries: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    entries[0].clone()
}

#[test]
fn test_export_and_import() {
    let tmp = TempDir::new().unwrap();
    goalplan(&tmp, &["add"]);
    goalplan(&tmp, &["dream", "2", "Learn the cello"]);
    let out = tmp.path().join("exports");

    let output = goalplan(&tmp, &["export", "2", "--out", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let file = exported_file(&out);
    let name = file.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("Goal 2-"));
    assert!(name.ends_with(".json"));
    let contents = std::fs::read_to_string(&file).unwrap();
    assert!(contents.starts_with("{\n  \""));

    let imported = json_of(&goalplan(&tmp, &["import", file.to_str().unwrap(), "--json"]));

    let goals = list(&tmp);
    assert_eq!(goals.len(), 3);
    assert_ne!(imported["id"], goals[1]["id"]);
    assert_eq!(goals[2]["id"], imported["id"]);
    assert_eq!(goals[2]["vision"]["dream"], "Learn the cello");
}

#[test]
fn test_reimporting_goal_one_does_not_duplicate_it() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("exports");

    let output = goalplan(&tmp, &["export", "1", "--out", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let file = exported_file(&out);

    let imported = json_of(&goalplan(&tmp, &["import", file.to_str().unwrap(), "--json"]));
    assert_eq!(imported["title"], "Goal 2");

    let output = goalplan(&tmp, &["delete", "2", "--force"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(titles(&list(&tmp)), vec!["Goal 1"]);
}

#[test]
fn test_export_to_stdout() {
    let tmp = TempDir::new().unwrap();

    let goal = json_of(&goalplan(&tmp, &["export", "1", "--stdout"]));

    assert_eq!(goal["title"], "Goal 1");
}

#[test]
fn test_failed_import_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let before = list(&tmp);
    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, "not json at all").unwrap();

    let output = goalplan(&tmp, &["import", bad.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Import failed"));
    assert_eq!(list(&tmp), before);
}

#[test]
fn test_corrupt_store_degrades_to_fresh_start() {
    let tmp = TempDir::new().unwrap();
    let path = store_path(&tmp);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{{{ definitely not a goal list").unwrap();

    let goals = list(&tmp);

    assert_eq!(titles(&goals), vec!["Goal 1"]);
}

#[test]
fn test_show_unknown_goal_fails() {
    let tmp = TempDir::new().unwrap();

    let output = goalplan(&tmp, &["show", "Goal 9"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Goal not found"));
}

#[test]
fn test_store_from_environment() {
    let tmp = TempDir::new().unwrap();
    let custom = tmp.path().join("custom.json");

    let output = Command::new(env!("CARGO_BIN_EXE_goalplan"))
        .current_dir(tmp.path())
        .env("GOALPLAN_STORE", &custom)
        .args(["add"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(custom.exists());
    assert!(!store_path(&tmp).exists());
}
