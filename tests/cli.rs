mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{HEALTH_DATA, TestWorkspace, fixture_path};

fn bin() -> Command {
    Command::cargo_bin("insightbridge").expect("binary exists")
}

#[test]
fn select_prints_trend_table_and_insight() {
    let input = fixture_path(HEALTH_DATA);
    bin()
        .args([
            "select",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "diabetes_rate",
            "--sex",
            "Female",
            "--race",
            "Black",
        ])
        .assert()
        .success()
        .stdout(
            contains("Diabetes Rate - Black, Female")
                .and(contains("2021  15"))
                .and(contains("changed by 50.0%")),
        );
}

#[test]
fn select_json_reports_widened_scope() {
    let input = fixture_path(HEALTH_DATA);
    let output = bin()
        .args([
            "select",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "asthma_visits",
            "--sex",
            "Female",
            "--race",
            "Black",
            "--format",
            "json",
        ])
        .output()
        .expect("run select");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["result"]["kind"], "trend");
    assert_eq!(json["result"]["scope"], "widened");
    assert_eq!(json["result"]["dropped"]["race_ethnicity"], "Black");
    assert_eq!(json["result"]["series"].as_array().unwrap().len(), 2);
}

#[test]
fn select_exports_group_comparison_csv() {
    let workspace = TestWorkspace::new();
    let input = fixture_path(HEALTH_DATA);
    let export = workspace.path().join("export.csv");
    bin()
        .args([
            "select",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "lead_poisoning",
            "--export",
            export.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Only one year of data available (2021)"));
    let contents = std::fs::read_to_string(&export).expect("read export");
    assert_eq!(
        contents,
        "Group,metric_value\nMale|White,1\nMale|Black,3\nFemale|Black,5\nFemale|Hispanic,9\n"
    );
}

#[test]
fn select_csv_format_writes_to_stdout() {
    let input = fixture_path(HEALTH_DATA);
    bin()
        .args([
            "select",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "diabetes_rate",
            "--sex",
            "Male",
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout("year,metric_value\n2018,7\n2019,9\n");
}

#[test]
fn select_unknown_metric_reports_no_data() {
    let input = fixture_path(HEALTH_DATA);
    bin()
        .args(["select", "-i", input.to_str().unwrap(), "-m", "nope"])
        .assert()
        .success()
        .stdout(contains("No data available for this selection."));
}

#[test]
fn compare_ranks_groups_for_requested_year() {
    let input = fixture_path(HEALTH_DATA);
    bin()
        .args([
            "compare",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "diabetes_rate",
            "-y",
            "2019",
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout("Group,metric_value\nMale|White,9\nFemale|Black,12\n");
}

#[test]
fn compare_exports_ranked_groups() {
    let workspace = TestWorkspace::new();
    let input = fixture_path(HEALTH_DATA);
    let export = workspace.path().join("compare.csv");
    bin()
        .args([
            "compare",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "diabetes_rate",
            "-y",
            "2019",
            "--export",
            export.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Diabetes Rate - 2019").and(contains("Female|Black")));
    let contents = std::fs::read_to_string(&export).expect("read export");
    assert_eq!(contents, "Group,metric_value\nMale|White,9\nFemale|Black,12\n");
}

#[test]
fn compare_json_is_the_bare_comparison() {
    let input = fixture_path(HEALTH_DATA);
    let output = bin()
        .args([
            "compare",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "diabetes_rate",
            "-y",
            "2019",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(json["year"], 2019);
    assert!(json.get("kind").is_none());
    let groups = json["groups"].as_array().expect("groups array");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["group"], "Male|White");
}

#[test]
fn options_lists_selector_values() {
    let input = fixture_path(HEALTH_DATA);
    bin()
        .args(["options", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("metric          asthma_visits")
                .and(contains("race_ethnicity  Hispanic"))
                .and(contains("poverty_rate")),
        );
}

#[test]
fn schema_failure_exits_with_error() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("bad.csv", "alpha,beta\n1,2\n");
    bin()
        .args(["select", "-i", input.to_str().unwrap(), "-m", "m"])
        .assert()
        .failure()
        .stderr(contains("none of the expected columns"));
}

#[test]
fn missing_source_exits_with_error() {
    let workspace = TestWorkspace::new();
    let input = workspace.path().join("missing.csv");
    bin()
        .args(["options", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("is unavailable"));
}

#[test]
fn stdin_source_is_supported() {
    bin()
        .args(["select", "-i", "-", "-m", "m", "--format", "csv"])
        .write_stdin("year,metric_name,metric_value\n2019,m,2\n2020,m,3\n")
        .assert()
        .success()
        .stdout("year,metric_value\n2019,2\n2020,3\n");
}
