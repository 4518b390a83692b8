use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::{Command, Stdio};

fn loansim() -> Command {
    let mut cmd = Command::new(cargo_bin!("loansim"));
    cmd.stdin(Stdio::null());
    cmd
}

#[test]
fn test_sac_minimal_prints_first_installment() {
    loansim()
        .args([
            "sac",
            "--principal",
            "100000",
            "--monthly-rate",
            "0.01",
            "--term-months",
            "12",
            "--output",
            "minimal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("9333.33\n"));
}

#[test]
fn test_price_json_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let output = loansim()
        .args([
            "price",
            "--principal",
            "100000",
            "--monthly-rate",
            "0.01",
            "--term-months",
            "12",
        ])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["methodology"], "Price (French Fixed Installment)");
    assert_eq!(value["result"]["first_installment"], "8884.88");
    assert_eq!(value["result"]["schedule"].as_array().map(|r| r.len()), Some(12));
    Ok(())
}

#[test]
fn test_simulate_csv_writes_schedule_rows() {
    loansim()
        .args([
            "simulate",
            "--property-value",
            "112000",
            "--down-payment",
            "12000",
            "--term-years",
            "1",
            "--annual-rate",
            "12",
            "--method",
            "price",
            "--output",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("remaining_balance"))
        .stdout(predicate::str::contains("92115.12"))
        .stdout(predicate::str::contains("field,value").not());
}

#[test]
fn test_compare_table_shows_both_sides() {
    loansim()
        .args([
            "compare",
            "--property-value",
            "112000",
            "--down-payment",
            "12000",
            "--term-years",
            "1",
            "--annual-rate",
            "12",
            "--output",
            "table",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("sac.total_interest"))
        .stdout(predicate::str::contains("price.fixed_installment"))
        .stdout(predicate::str::contains("118.55"))
        .stdout(predicate::str::contains("Methodology: SAC vs Price Comparison"));
}

#[test]
fn test_simulate_rejects_down_payment_above_value() {
    loansim()
        .args([
            "simulate",
            "--property-value",
            "100000",
            "--down-payment",
            "100000",
            "--term-years",
            "10",
            "--annual-rate",
            "9",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("down_payment"));
}

#[test]
fn test_simulate_zero_rate_needs_flag() {
    let args = [
        "simulate",
        "--property-value",
        "12000",
        "--term-years",
        "1",
        "--annual-rate",
        "0",
        "--method",
        "price",
        "--output",
        "minimal",
    ];

    loansim()
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("annual_rate_pct"));

    loansim()
        .args(args)
        .arg("--allow-zero-rate")
        .assert()
        .success()
        .stdout(predicate::str::diff("1000.00\n"));
}

#[test]
fn test_simulate_reads_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("loansim_cli_input.json");
    std::fs::write(
        &path,
        r#"{"property_value": 112000, "down_payment": 12000, "term_years": 1, "annual_rate_pct": 12, "method": "SAC"}"#,
    )?;

    loansim()
        .args(["simulate", "--output", "minimal", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::diff("9333.33\n"));

    std::fs::remove_file(path).ok();
    Ok(())
}

#[test]
fn test_missing_flag_is_reported() {
    loansim()
        .args(["sac", "--principal", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--monthly-rate is required"));
}

#[test]
fn test_schedule_rejects_non_positive_principal() {
    loansim()
        .args([
            "price",
            "--principal",
            "-1000",
            "--monthly-rate",
            "0.01",
            "--term-months",
            "12",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("principal"));
}

#[test]
fn test_simulate_rejects_negative_term() {
    loansim()
        .args([
            "simulate",
            "--property-value",
            "100000",
            "--term-years",
            "-5",
            "--annual-rate",
            "9",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("term_years"));
}

#[test]
fn test_version() {
    loansim()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("loansim "));
}
