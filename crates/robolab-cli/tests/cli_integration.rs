//! CLI integration tests. These run the actual robolab binary.
//! Marked `#[ignore]` to skip in normal `cargo test`.

use std::process::Command;

fn robolab() -> Command {
    Command::new(env!("CARGO_BIN_EXE_robolab"))
}

fn json_stdout(args: &[&str]) -> serde_json::Value {
    let output = robolab().args(args).output().expect("failed to execute");
    assert!(
        output.status.success(),
        "robolab {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("invalid JSON output")
}

#[test]
#[ignore]
fn test_cli_projects_json() {
    let projects = json_stdout(&["projects", "--json"]);
    let projects = projects.as_array().expect("expected an array");
    assert_eq!(projects.len(), 3);
    for project in projects {
        assert!(project["id"].is_u64());
        assert!(project["title"].is_string());
    }
}

#[test]
#[ignore]
fn test_cli_projects_filters() {
    let projects = json_stdout(&[
        "projects",
        "--category",
        "electronics",
        "--difficulty",
        "beginner",
        "--json",
    ]);
    let projects = projects.as_array().expect("expected an array");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["category"], "electronics");
    assert_eq!(projects[0]["difficulty"], "beginner");
}

#[test]
#[ignore]
fn test_cli_projects_search_no_match() {
    let projects = json_stdout(&["projects", "--search", "zzz-no-such-project", "--json"]);
    assert_eq!(projects.as_array().map(Vec::len), Some(0));
}

#[test]
#[ignore]
fn test_cli_projects_rejects_unknown_category() {
    let output = robolab()
        .args(["projects", "--category", "cooking"])
        .output()
        .expect("failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown category"), "stderr: {stderr}");
}

#[test]
#[ignore]
fn test_cli_stats_json() {
    let stats = json_stdout(&["stats", "--json"]);
    assert_eq!(stats["overview"]["total_projects"], 3);
    assert_eq!(stats["students"].as_array().map(Vec::len), Some(4));
    for student in stats["students"].as_array().unwrap() {
        let pct = student["progress"]["percentage"].as_u64().unwrap();
        assert!(pct <= 100);
    }
}

#[test]
#[ignore]
fn test_cli_config_prints_toml() {
    let tmp = std::env::temp_dir().join(format!("robolab-config-test-{}", std::process::id()));
    std::fs::create_dir_all(tmp.join(".robolab")).unwrap();
    std::fs::write(
        tmp.join(".robolab").join("config.toml"),
        "[latency]\nauth_ms = 20\n\n[ui]\ntick_ms = 5\n",
    )
    .unwrap();

    let output = robolab()
        .arg("config")
        .current_dir(&tmp)
        .output()
        .expect("failed to execute");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("auth_ms = 20"), "stdout: {stdout}");
    // clamped to the minimum tick, with a warning on stderr
    assert!(stdout.contains("tick_ms = 10"), "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tick_ms"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(&tmp);
}
