use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn minerva() -> Command {
    let mut cmd = Command::cargo_bin("minerva").unwrap();
    cmd.env_remove("MINERVA_FILE").env_remove("MINERVA_ACTOR");
    cmd
}

fn parse_json_output(output: &str) -> Value {
    serde_json::from_str(output).expect("Failed to parse JSON output")
}

fn run_ok(args: &[&str]) -> Value {
    let output = minerva()
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    parse_json_output(&String::from_utf8_lossy(&output))
}

const ADMIN: &str = "11111111-1111-1111-1111-111111111111";

fn grant_goal_permission(file: &str, profile: &str) {
    let json = run_ok(&["--file", file, "permission", "grant", "--profile", profile]);
    assert!(json["success"].as_bool().unwrap());
}

mod flow_tests {
    use super::*;

    #[test]
    fn test_goals_on_fresh_file_is_empty() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file = file.to_str().unwrap();

        let json = run_ok(&["--file", file, "flow", "goals"]);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["goals"], 0);
        assert_eq!(json["data"]["nodes"].as_array().unwrap().len(), 0);
        assert_eq!(json["data"]["edges"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_create_goal_requires_permission() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file = file.to_str().unwrap();

        minerva()
            .args([
                "--file", file, "--actor", ADMIN, "flow", "create", "--title", "Launch",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Permission denied"));
    }

    #[test]
    fn test_goals_land_left_to_right() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file = file.to_str().unwrap();
        grant_goal_permission(file, ADMIN);

        let first = run_ok(&[
            "--file", file, "--actor", ADMIN, "flow", "create", "--title", "Launch",
        ]);
        assert_eq!(first["data"]["task"]["title"], "Launch");
        assert_eq!(first["data"]["nodes"][0]["position"], json!({"x": 0.0, "y": 0.0}));

        let second = run_ok(&[
            "--file", file, "--actor", ADMIN, "flow", "create", "--title", "Expand",
        ]);
        let nodes = second["data"]["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1]["position"], json!({"x": 250.0, "y": 0.0}));
        assert_eq!(second["data"]["edges"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_create_prerequisite_adds_node_and_edge() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file = file.to_str().unwrap();
        grant_goal_permission(file, ADMIN);

        run_ok(&[
            "--file", file, "--actor", ADMIN, "flow", "create", "--title", "Launch",
        ]);

        // Prerequisite creation needs no flag and no actor.
        let json = run_ok(&[
            "--file", file, "flow", "create", "--title", "Design", "--unlocks", "1",
        ]);
        let nodes = json["data"]["nodes"].as_array().unwrap();
        let edges = json["data"]["edges"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1]["position"], json!({"x": 0.0, "y": 150.0}));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0]["id"], "2-1");
        assert_eq!(edges[0]["source"], "2");
        assert_eq!(edges[0]["target"], "1");
    }

    #[test]
    fn test_expand_is_deterministic() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file = file.to_str().unwrap();
        grant_goal_permission(file, ADMIN);

        run_ok(&[
            "--file", file, "--actor", ADMIN, "flow", "create", "--title", "Launch",
        ]);
        run_ok(&[
            "--file", file, "flow", "create", "--title", "Design", "--unlocks", "1",
        ]);
        run_ok(&[
            "--file", file, "flow", "create", "--title", "Build", "--unlocks", "1",
        ]);

        let expanded = run_ok(&["--file", file, "flow", "expand", "--id", "1"]);
        assert_eq!(expanded["data"]["added"], 2);
        let nodes = expanded["data"]["nodes"].as_array().unwrap();
        let edges = expanded["data"]["edges"].as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(edges.len(), 2);

        // The two prerequisites straddle the goal symmetrically.
        assert_eq!(nodes[1]["position"], json!({"x": -110.0, "y": 150.0}));
        assert_eq!(nodes[2]["position"], json!({"x": 110.0, "y": 150.0}));

        let again = run_ok(&["--file", file, "flow", "expand", "--id", "1"]);
        assert_eq!(again["data"]["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(again["data"]["edges"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_expand_unknown_task_is_silent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file = file.to_str().unwrap();

        let json = run_ok(&["--file", file, "flow", "expand", "--id", "999"]);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["added"], 0);
    }

    #[test]
    fn test_expand_deep_task_anchors_under_parent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file = file.to_str().unwrap();
        grant_goal_permission(file, ADMIN);

        run_ok(&[
            "--file", file, "--actor", ADMIN, "flow", "create", "--title", "Launch",
        ]);
        run_ok(&[
            "--file", file, "flow", "create", "--title", "Design", "--unlocks", "1",
        ]);
        run_ok(&[
            "--file", file, "flow", "create", "--title", "Research", "--unlocks", "2",
        ]);

        let json = run_ok(&["--file", file, "flow", "expand", "--id", "2"]);
        let nodes = json["data"]["nodes"].as_array().unwrap();
        // goal, design (from the ancestor walk), research (from the expand)
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2]["position"], json!({"x": 0.0, "y": 300.0}));
        assert_eq!(
            json["data"]["edges"]
                .as_array()
                .unwrap()
                .iter()
                .map(|e| e["id"].as_str().unwrap())
                .collect::<Vec<_>>(),
            vec!["2-1", "3-2"]
        );
    }
}

mod directory_tests {
    use super::*;

    fn fixture() -> Value {
        json!({
            "tasks": [],
            "teams": [
                {"id": 1, "name": "Platform"},
                {"id": 2, "name": "Design"}
            ],
            "profiles": [
                {
                    "id": ADMIN,
                    "username": null,
                    "full_name": "Admin",
                    "avatar_url": null,
                    "last_login": null
                }
            ],
            "permissions": [
                {"profile_id": ADMIN, "permission": 3}
            ],
            "task_participants": []
        })
    }

    fn import_fixture(dir: &std::path::Path, file: &str) {
        let fixture_path = dir.join("fixture.json");
        fs::write(&fixture_path, serde_json::to_vec_pretty(&fixture()).unwrap()).unwrap();

        let json = run_ok(&[
            "--file",
            file,
            "import",
            "--input",
            fixture_path.to_str().unwrap(),
        ]);
        assert_eq!(json["data"]["teams"], 2);
        assert_eq!(json["data"]["profiles"], 1);
    }

    #[test]
    fn test_import_then_list_teams_with_colors() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file_str = file.to_str().unwrap();
        import_fixture(dir.path(), file_str);

        let json = run_ok(&["--file", file_str, "team", "list"]);
        let items = json["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "Platform");
        assert_eq!(items[0]["color"], "#f87171");
        assert_eq!(items[1]["color"], "#60a5fa");
    }

    #[test]
    fn test_imported_permission_allows_goal_creation() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file_str = file.to_str().unwrap();
        import_fixture(dir.path(), file_str);

        let json = run_ok(&[
            "--file", file_str, "--actor", ADMIN, "flow", "create", "--title", "Launch",
        ]);
        assert!(json["success"].as_bool().unwrap());

        let tasks = run_ok(&["--file", file_str, "task", "list"]);
        assert_eq!(tasks["data"]["count"], 1);
        assert_eq!(tasks["data"]["items"][0]["created_by"], ADMIN);
    }

    #[test]
    fn test_task_get_not_found() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");

        minerva()
            .args(["--file", file.to_str().unwrap(), "task", "get", "--id", "7"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Task not found"));
    }

    #[test]
    fn test_profile_update_roundtrip() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file_str = file.to_str().unwrap();
        import_fixture(dir.path(), file_str);

        let json = run_ok(&[
            "--file",
            file_str,
            "profile",
            "update",
            "--id",
            ADMIN,
            "--username",
            "admin",
        ]);
        assert_eq!(json["data"]["username"], "admin");
        assert_eq!(json["data"]["full_name"], "Admin");

        let got = run_ok(&["--file", file_str, "profile", "get", "--id", ADMIN]);
        assert_eq!(got["data"]["username"], "admin");
    }

    #[test]
    fn test_export_matches_imported_data() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file_str = file.to_str().unwrap();
        import_fixture(dir.path(), file_str);

        let output = minerva()
            .args(["--file", file_str, "export"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let exported: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(exported["teams"].as_array().unwrap().len(), 2);
        assert_eq!(exported["profiles"][0]["full_name"], "Admin");
    }

    #[test]
    fn test_permission_grant_and_revoke() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        let file_str = file.to_str().unwrap();

        grant_goal_permission(file_str, ADMIN);
        let listed = run_ok(&["--file", file_str, "permission", "list"]);
        assert_eq!(listed["data"]["count"], 1);

        let json = run_ok(&[
            "--file", file_str, "permission", "revoke", "--profile", ADMIN,
        ]);
        assert!(json["success"].as_bool().unwrap());
        let listed = run_ok(&["--file", file_str, "permission", "list"]);
        assert_eq!(listed["data"]["count"], 0);
    }
}
