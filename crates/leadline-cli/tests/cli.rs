use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run_raw(home: &Path, args: &[&str]) -> Output {
    let db_path = home.join("leadline.sqlite3");
    cargo_bin_cmd!("leadline")
        .env("XDG_CONFIG_HOME", home.join("config"))
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(home: &Path, args: &[&str]) -> String {
    let output = run_raw(home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_raw(home, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn add_sample(home: &Path) -> String {
    let created = run_cmd_json(
        home,
        &[
            "add-lead",
            "--business",
            "Sunrise Bakery",
            "--owner",
            "Maria Lopez",
            "--phone",
            "(415) 555-1212",
            "--funding",
            "$50,000",
            "--state",
            "TX",
        ],
    );
    created["id"].as_str().expect("id").to_string()
}

#[test]
fn cli_add_list_stage_schedule_flow() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();

    let id = add_sample(home);

    let list = run_cmd_json(home, &["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["business_name"], "Sunrise Bakery");
    assert_eq!(items[0]["funding"], "$50K");

    run_cmd(home, &["stage", &id, "email-sent"]);
    let filtered = run_cmd_json(home, &["list", "--filter", "stage:email-sent"]);
    assert_eq!(filtered.as_array().expect("array").len(), 1);
    let none = run_cmd_json(home, &["list", "--filter", "stage:closed"]);
    assert!(none.as_array().expect("array").is_empty());

    run_cmd(
        home,
        &["schedule", &id, "--date", "2099-01-01", "--time", "14:30", "--priority", "high"],
    );

    let detail = run_cmd_json(home, &["show", &id]);
    assert_eq!(detail["next_followup"], "2099-01-01T14:30:00.000Z");
    assert_eq!(detail["client_timezone"], "America/Chicago");
    assert_eq!(detail["followup"]["date"], "01/01/2099");
    assert_eq!(detail["followup"]["time"], "2:30 PM");
    assert_eq!(detail["followup_priority"], "high");

    let upcoming = run_cmd_json(home, &["followups", "--view", "all"]);
    assert_eq!(upcoming.as_array().expect("array").len(), 1);

    run_cmd(home, &["complete-followup", &id]);
    let detail = run_cmd_json(home, &["show", &id]);
    assert!(detail["next_followup"].is_null());
    let notes = detail["internal_notes"].as_str().expect("notes");
    assert!(notes.contains("Stage updated to: Email Sent"));
    assert!(notes.contains("Follow-up completed."));
}

#[test]
fn cli_search_and_delete() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();
    let id = add_sample(home);

    let found = run_cmd_json(home, &["search", "sunrise"]);
    assert_eq!(found.as_array().expect("array").len(), 1);
    let missing = run_cmd_json(home, &["search", "harbor"]);
    assert!(missing.as_array().expect("array").is_empty());

    run_cmd(home, &["delete", &id]);
    let output = run_raw(home, &["show", &id]);
    assert_eq!(output.status.code(), Some(2));
    let output = run_raw(home, &["delete", &id]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_rejects_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();

    let output = run_raw(
        home,
        &["add-lead", "--business", "No Phone LLC", "--owner", "Ann Park"],
    );
    assert_eq!(output.status.code(), Some(3));

    let id = add_sample(home);
    let output = run_raw(home, &["schedule", &id, "--date", "2000-01-01"]);
    assert_eq!(output.status.code(), Some(3));

    let output = run_raw(home, &["list", "--filter", "stage:nowhere"]);
    assert_eq!(output.status.code(), Some(3));

    let output = run_raw(home, &["edit-lead", &id]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_draft_round_trip() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();

    run_cmd(
        home,
        &["draft", "save", "--business", "Harbor Auto", "--state", "CA"],
    );
    let draft = run_cmd_json(home, &["draft", "show"]);
    assert_eq!(draft["business_name"], "Harbor Auto");
    assert_eq!(draft["client_timezone"], "America/Los_Angeles");

    let created = run_cmd_json(
        home,
        &[
            "add-lead",
            "--from-draft",
            "--owner",
            "Ken Ito",
            "--phone",
            "310-555-0100",
        ],
    );
    assert_eq!(created["business_name"], "Harbor Auto");

    let output = run_raw(home, &["draft", "show"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_zones_and_backup() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();

    let state = run_cmd_json(home, &["zones", "--state", "az"]);
    assert_eq!(state["zone"], "America/Phoenix");

    add_sample(home);
    let backup_path = home.join("backup.sqlite3");
    let report = run_cmd_json(home, &["backup", backup_path.to_str().expect("path")]);
    assert!(report["bytes"].as_u64().expect("bytes") > 0);
    assert!(backup_path.exists());

    let stats = run_cmd_json(home, &["stats"]);
    assert_eq!(stats["total_leads"], 1);
    assert_eq!(stats["prospects"], 1);
}

#[test]
fn cli_clearing_followup_resets_priority_and_notes() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();
    let id = add_sample(home);

    run_cmd(
        home,
        &[
            "schedule",
            &id,
            "--date",
            "2099-01-01",
            "--priority",
            "urgent",
            "--notes",
            "bring offer",
        ],
    );
    run_cmd(home, &["edit-lead", &id, "--clear-followup"]);
    let detail = run_cmd_json(home, &["show", &id]);
    assert!(detail["next_followup"].is_null());
    assert_eq!(detail["followup_priority"], "medium");
    assert!(detail["followup_notes"].is_null());

    run_cmd(
        home,
        &["edit-lead", &id, "--followup-date", "2099-02-01", "--priority", "high"],
    );
    run_cmd(home, &["edit-lead", &id, "--followup-date", ""]);
    let detail = run_cmd_json(home, &["show", &id]);
    assert!(detail["next_followup"].is_null());
    assert_eq!(detail["followup_priority"], "medium");

    let output = run_raw(
        home,
        &[
            "add-lead",
            "--business",
            "Orphan Deli",
            "--owner",
            "Lee Chan",
            "--phone",
            "212-555-0199",
            "--priority",
            "urgent",
            "--followup-notes",
            "orphan",
        ],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_followup_time_alone_keeps_the_date() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();
    let id = add_sample(home);

    run_cmd(home, &["schedule", &id, "--date", "2099-01-01", "--time", "09:00"]);
    run_cmd(home, &["edit-lead", &id, "--followup-time", "16:45"]);
    let detail = run_cmd_json(home, &["show", &id]);
    assert_eq!(detail["next_followup"], "2099-01-01T16:45:00.000Z");
}

#[test]
fn cli_notes_are_stamped_and_never_overwritten() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();
    let id = add_sample(home);

    run_cmd(home, &["stage", &id, "email-sent"]);
    run_cmd(home, &["note", &id, "called back"]);
    run_cmd(home, &["edit-lead", &id, "--notes", "wants a callback"]);

    let detail = run_cmd_json(home, &["show", &id]);
    let notes = detail["internal_notes"].as_str().expect("notes");
    let entries: Vec<&str> = notes.split("\n\n").collect();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].ends_with("] Stage updated to: Email Sent"));
    assert!(entries[1].starts_with('['));
    assert!(entries[1].ends_with("] called back"));
    assert!(entries[2].starts_with('['));
    assert!(entries[2].ends_with("] wants a callback"));
}

#[test]
fn cli_rejects_amounts_past_the_cap() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();
    let id = add_sample(home);

    let output = run_raw(home, &["edit-lead", &id, "--funding", "9223372036854775807"]);
    assert_eq!(output.status.code(), Some(3));

    let stats = run_cmd_json(home, &["stats"]);
    assert_eq!(stats["total_funding_requested"], 50_000);
}
