use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const HOST_ID: &str = "6f1c2e0a-5b7d-4c1e-9a3f-2d8b7e6c5a41";

/// Runs the binary with `home` as its home and config directory, so no
/// user config file is picked up.
fn usine(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("usine").unwrap();
    cmd.env_remove("USINE_FILE")
        .env_remove("USINE_DEBUG_LOG")
        .env_remove("USINE_CONFIG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_str(&String::from_utf8_lossy(output)).expect("Failed to parse JSON output")
}

fn sample_data() -> String {
    serde_json::json!({
        "employees": [
            {
                "id": HOST_ID,
                "firstName": "Awa",
                "lastName": "Diallo",
                "email": "awa.diallo@usine.fr",
                "department": "Logistique",
                "position": "Cariste",
                "hireDate": "2019-09-02",
                "status": "active"
            },
            {
                "id": "0b7e4f32-98c1-4d0a-8e55-31f4a2c9d610",
                "firstName": "Marc",
                "lastName": "Petit",
                "department": "Maintenance",
                "position": "Technicien"
            }
        ],
        "visits": [
            {
                "id": "c3a9d1e2-7f40-4b8a-b1c6-59e2d7a4f803",
                "visitorName": "Paul Girard",
                "company": "Bureau Veritas",
                "hostId": HOST_ID,
                "purpose": "Audit annuel",
                "status": "completed",
                "scheduledAt": "2024-03-01T09:30:00Z"
            }
        ],
        "incidents": [
            {
                "id": "9d2b6a71-3e5c-4f18-a0d7-84c1b5e9f262",
                "title": "Chute de plain-pied",
                "type": "accident",
                "severity": "low",
                "occurredAt": "2024-02-14T16:45:00Z",
                "reportedBy": HOST_ID
            },
            {
                "id": "1e8f3c5d-2a7b-4960-b4e1-6c0d9f8a7b35",
                "title": "Fuite d'huile",
                "severity": "high",
                "occurredAt": "2024-02-20T10:00:00Z"
            }
        ]
    })
    .to_string()
}

fn setup() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let file = dir.path().join("site.json");
    fs::write(&file, sample_data()).unwrap();
    (dir, file)
}

fn workbook_part(path: &Path, name: &str) -> String {
    let bytes = fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

mod export_tests {
    use super::*;

    #[test]
    fn test_export_pdf() {
        let (dir, file) = setup();
        let out = dir.path().join("rapports");

        let output = usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "export",
                "incidents",
                "--out-dir",
                out.to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["format"], "pdf");
        assert_eq!(json["data"]["mime"], "application/pdf");
        assert_eq!(json["data"]["records"], 2);

        let path = PathBuf::from(json["data"]["path"].as_str().unwrap());
        assert!(path.starts_with(&out));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("incidents-") && name.ends_with(".pdf"));

        let doc = lopdf::Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_export_xlsx() {
        let (dir, file) = setup();

        let output = usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "export",
                "employees",
                "--format",
                "xlsx",
                "--out-dir",
                dir.path().to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["format"], "xlsx");
        assert_eq!(
            json["data"]["mime"],
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(json["data"]["records"], 2);

        let path = PathBuf::from(json["data"]["path"].as_str().unwrap());
        let workbook = workbook_part(&path, "xl/workbook.xml");
        assert!(workbook.contains("Données"));
        assert!(workbook.contains("Métadonnées"));

        let strings = workbook_part(&path, "xl/sharedStrings.xml");
        assert!(strings.contains("Awa Diallo"));
        assert!(strings.contains("02/09/2019"));
        assert!(strings.contains("Liste des employés"));
    }

    #[test]
    fn test_export_with_title_and_landscape() {
        let (dir, file) = setup();

        let output = usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "export",
                "visits",
                "--format",
                "xlsx",
                "--title",
                "Visites de mars",
                "--subtitle",
                "Site de Lyon",
                "--landscape",
                "--out-dir",
                dir.path().to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let path = PathBuf::from(json["data"]["path"].as_str().unwrap());
        let strings = workbook_part(&path, "xl/sharedStrings.xml");
        assert!(strings.contains("Visites de mars"));
        assert!(strings.contains("Site de Lyon"));
        assert!(strings.contains("Awa Diallo"));
    }

    #[test]
    fn test_export_empty_domain() {
        let (dir, file) = setup();

        usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "export",
                "packages",
                "--out-dir",
                dir.path().to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"records\":0"));
    }

    #[test]
    fn test_file_from_env() {
        let (dir, file) = setup();

        usine(dir.path())
            .env("USINE_FILE", &file)
            .args(["export", "trainings", "--out-dir", dir.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("formations-"));
    }

    #[test]
    fn test_export_all() {
        let (dir, file) = setup();
        let out = dir.path().join("tout");

        let output = usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "export-all",
                "--format",
                "xlsx",
                "--out-dir",
                out.to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["count"], 6);
        let items = json["data"]["items"].as_array().unwrap();
        assert!(items.iter().all(|item| item["status"] == "completed"));
        assert_eq!(items[0]["configId"], "employes.xlsx");
        assert_eq!(items[2]["recordCount"], 2);

        assert_eq!(fs::read_dir(&out).unwrap().count(), 6);
    }
}

mod config_tests {
    use super::*;

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[test]
    fn test_user_config_read_from_home() {
        let (dir, file) = setup();
        let config_dir = dir.path().join(".config").join("usine");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[export]\nauthor = \"Direction HSE\"\n",
        )
        .unwrap();

        let output = usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "export",
                "incidents",
                "--format",
                "xlsx",
                "--out-dir",
                dir.path().to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let path = PathBuf::from(json["data"]["path"].as_str().unwrap());
        let strings = workbook_part(&path, "xl/sharedStrings.xml");
        assert!(strings.contains("Direction HSE"));
    }

    #[test]
    fn test_no_user_config_leaves_author_blank() {
        let (dir, file) = setup();

        let output = usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "export",
                "incidents",
                "--format",
                "xlsx",
                "--out-dir",
                dir.path().to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let path = PathBuf::from(json["data"]["path"].as_str().unwrap());
        let strings = workbook_part(&path, "xl/sharedStrings.xml");
        assert!(!strings.contains("Direction HSE"));
    }
}

mod summary_tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let (dir, file) = setup();

        let output = usine(dir.path())
            .args(["--file", file.to_str().unwrap(), "summary"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let items = json["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0]["slug"], "employes");
        assert_eq!(items[0]["records"], 2);
        assert_eq!(items[2]["title"], "Rapport des incidents HSE");
        assert_eq!(items[5]["records"], 0);
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_file_argument() {
        let dir = tempdir().unwrap();
        usine(dir.path())
            .args(["summary"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("--file"));
    }

    #[test]
    fn test_nonexistent_data_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("absent.json");

        usine(dir.path())
            .args(["--file", file.to_str().unwrap(), "summary"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn test_malformed_data_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("broken.json");
        fs::write(&file, "{ \"employees\": [ { \"id\": 12 } ] }").unwrap();

        usine(dir.path())
            .args(["--file", file.to_str().unwrap(), "summary"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid data file"));
    }

    #[test]
    fn test_unknown_domain() {
        let (dir, file) = setup();

        usine(dir.path())
            .args(["--file", file.to_str().unwrap(), "export", "boards"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn test_failed_export_all_keeps_stderr_json() {
        let (dir, file) = setup();
        let blocker = dir.path().join("occupe");
        fs::write(&blocker, "not a directory").unwrap();

        let assert = usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "export-all",
                "--out-dir",
                blocker.to_str().unwrap(),
            ])
            .assert()
            .failure();
        let output = assert.get_output();

        let listed = parse_json_output(&output.stdout);
        let items = listed["data"]["items"].as_array().unwrap();
        assert!(items.iter().all(|item| item["status"] == "error"));

        let envelope = parse_json_output(&output.stderr);
        assert_eq!(envelope["success"], false);
        assert!(envelope["error"]
            .as_str()
            .unwrap()
            .contains("6 of 6 exports failed"));
    }

    #[test]
    fn test_invalid_config_file() {
        let (dir, file) = setup();
        let config = dir.path().join("config.toml");
        fs::write(&config, "[export]\norientation = \"diagonal\"\n").unwrap();

        usine(dir.path())
            .args([
                "--file",
                file.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
                "summary",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid config"));
    }
}

mod completions_tests {
    use super::*;

    #[test]
    fn test_bash_completions() {
        let dir = tempdir().unwrap();
        usine(dir.path())
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("usine"));
    }
}
