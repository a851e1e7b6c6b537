mod common;

use std::fs;

use assert_cmd::Command;
use common::{CONTACTS_CSV, TestWorkspace};
use predicates::{prelude::*, str::contains};
use serde_json::Value;

fn bin() -> Command {
    Command::cargo_bin("csv-enrich").expect("binary exists")
}

#[test]
fn preview_prints_parsed_rows() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);

    bin()
        .args(["preview", "-i", input.to_str().unwrap(), "--rows", "2"])
        .assert()
        .success()
        .stdout(contains("First Name"))
        .stdout(contains("Engines, Ltd"))
        .stdout(contains("Linus").not());
}

#[test]
fn analyze_reports_completeness() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);

    bin()
        .args(["analyze", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("67%"))
        .stdout(contains("ada@analytical.io | linus@kernel.org"));
}

#[test]
fn map_prints_detected_fields_and_saves_profile() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);
    let profile = workspace.path().join("profile.yaml");

    bin()
        .args([
            "map",
            "-i",
            input.to_str().unwrap(),
            "--set",
            "zip=DO_NOT_IMPORT",
            "--save",
            profile.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("BUSINESS_EMAIL"))
        .stdout(contains("DO_NOT_IMPORT"));

    let saved = fs::read_to_string(&profile).expect("read profile");
    assert!(saved.contains("csvColumn: Work Email"));
    assert!(saved.contains("mappedField: DO_NOT_IMPORT"));
}

#[test]
fn map_rejects_unknown_override_field() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);

    bin()
        .args(["map", "-i", input.to_str().unwrap(), "--set", "zip=POSTCODE"])
        .assert()
        .failure()
        .stderr(contains("Unknown target field 'POSTCODE'"));
}

#[test]
fn submit_writes_payload_from_saved_profile() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);
    let profile = workspace.path().join("profile.yaml");
    let payload = workspace.path().join("payload.json");

    bin()
        .args([
            "map",
            "-i",
            input.to_str().unwrap(),
            "--skip-all",
            "--set",
            "Work Email=EMAIL",
            "--save",
            profile.to_str().unwrap(),
        ])
        .assert()
        .success();

    bin()
        .args([
            "submit",
            "-i",
            input.to_str().unwrap(),
            "--name",
            "Q4 Leads",
            "--operator",
            "and",
            "-m",
            profile.to_str().unwrap(),
            "-o",
            payload.to_str().unwrap(),
        ])
        .assert()
        .success();

    let body: Value =
        serde_json::from_str(&fs::read_to_string(&payload).expect("read payload")).expect("json");
    assert_eq!(body["name"], "Q4 Leads");
    assert_eq!(body["operator"], "AND");
    assert_eq!(body["columns"], serde_json::json!(["EMAIL"]));
    assert_eq!(body["records"][0], serde_json::json!({ "email": "ada@analytical.io" }));
    assert_eq!(body["records"][1], serde_json::json!({}));
    assert_eq!(body["records"].as_array().map(Vec::len), Some(3));
}

#[test]
fn submit_prints_payload_to_stdout_by_default() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);

    bin()
        .args(["submit", "-i", input.to_str().unwrap(), "--name", "Leads"])
        .assert()
        .success()
        .stdout(contains("\"operator\": \"OR\""))
        .stdout(contains("\"business_email\": \"linus@kernel.org\""));
}

#[test]
fn submit_blocks_when_nothing_is_mapped() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);

    bin()
        .args(["submit", "-i", input.to_str().unwrap(), "--name", "Leads", "--skip-all"])
        .assert()
        .failure()
        .stderr(contains("At least one field must be mapped"));
}

#[test]
fn submit_requires_a_name() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);

    bin()
        .args(["submit", "-i", input.to_str().unwrap(), "--name", " "])
        .assert()
        .failure()
        .stderr(contains("Enrichment name is required"));
}

#[test]
fn submit_names_job_after_input_file() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("q4_leads.csv", CONTACTS_CSV);

    bin()
        .args(["submit", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("\"name\": \"q4_leads\""));
}

#[test]
fn submit_from_stdin_needs_explicit_name() {
    bin()
        .args(["submit", "-i", "-"])
        .write_stdin(CONTACTS_CSV)
        .assert()
        .failure()
        .stderr(contains("Enrichment name is required"));

    bin()
        .args(["submit", "-i", "-", "--name", "Piped"])
        .write_stdin(CONTACTS_CSV)
        .assert()
        .success()
        .stdout(contains("\"name\": \"Piped\""));
}

#[test]
fn map_logs_each_detection_at_debug_level() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.csv", CONTACTS_CSV);

    bin()
        .env("RUST_LOG", "csv_enrich=debug")
        .args(["map", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(contains("Column 'Work Email' detected as BUSINESS_EMAIL (confidence 95)"))
        .stderr(contains("Column 'zip' detected as PERSONAL_ZIP (confidence 90)"));
}

#[test]
fn non_csv_uploads_are_rejected() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("contacts.txt", CONTACTS_CSV);

    bin()
        .args(["preview", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Please upload a CSV file"));
}

#[test]
fn empty_upload_reports_empty_csv() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("empty.csv", "  \n\n");

    bin()
        .args(["analyze", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("CSV file is empty"));
}

#[test]
fn stdin_input_skips_extension_check() {
    bin()
        .args(["analyze", "-i", "-"])
        .write_stdin("Email\nada@example.com\n")
        .assert()
        .success()
        .stdout(contains("100%"));
}

#[test]
fn export_writes_bom_prefixed_file() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "results.json",
        r#"[{"name":"John \"Johnny\" Doe","title":"CEO, Founder"},{"name":"Jane","title":null}]"#,
    );
    let output = workspace.path().join("results.csv");

    bin()
        .args([
            "export",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(
        workspace.read("results.csv"),
        "\u{feff}name,title\n\"John \"\"Johnny\"\" Doe\",\"CEO, Founder\"\nJane,"
    );
}

#[test]
fn export_to_stdout_has_no_bom() {
    bin()
        .args(["export", "-i", "-", "-o", "-"])
        .write_stdin(r#"[{"a":1,"b":"x"}]"#)
        .assert()
        .success()
        .stdout("a,b\n1,x\n");
}

#[test]
fn export_names_file_from_label() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("results.json", r#"[{"email":"ada@example.com"}]"#);

    bin()
        .current_dir(workspace.path())
        .args(["export", "-i", input.to_str().unwrap(), "--label", "Q4 Leads!"])
        .assert()
        .success();

    let exported = fs::read_dir(workspace.path())
        .expect("list workspace")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .find(|name| name.starts_with("enrichment_q4_leads__"))
        .expect("exported file present");
    assert!(exported.ends_with(".csv"));
    assert!(workspace.read(&exported).starts_with("\u{feff}email\n"));
}

#[test]
fn export_rejects_empty_record_list() {
    bin()
        .args(["export", "-i", "-", "-o", "-"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(contains("No records to export"));
}

#[test]
fn fields_lists_catalog() {
    bin()
        .arg("fields")
        .assert()
        .success()
        .stdout(contains("SHA256_PERSONAL_EMAIL"))
        .stdout(contains("Do Not Import"));
}
