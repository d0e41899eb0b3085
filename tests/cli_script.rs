use std::path::Path;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("billdesk").unwrap();
    cmd.env("BILLDESK_SCRIPT", "1")
        .env("BILLDESK_HOME", home)
        .env("BILLDESK_APP_PASSWORD", "secret")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn script_mode_runs_billing_flow() {
    let home = TempDir::new().unwrap();
    let input = "login secret\nselect 1 2\nbill create \"Alice Smith\" --tax 10\nreport\nexit\n";

    script(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Logged in."))
        .stdout(contains("2 × Product A selected."))
        .stdout(contains("Bill saved: BILL-"))
        .stdout(contains("₹220.00"))
        .stdout(contains("Alice Smith"));

    let bills = std::fs::read_to_string(home.path().join("data").join("bills.json")).unwrap();
    assert!(bills.contains("\"customerName\": \"Alice Smith\""));
}

#[test]
fn admin_commands_need_login() {
    let home = TempDir::new().unwrap();
    script(home.path())
        .write_stdin("inventory list\nlogin wrong\nselect 1 1\n")
        .assert()
        .success()
        .stdout(contains("ERROR: Login required."))
        .stdout(contains("ERROR: Invalid password."))
        .stdout(contains("selected").not());
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = TempDir::new().unwrap();
    script(home.path())
        .write_stdin("invnetory\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `invnetory`"))
        .stdout(contains("Suggestion: `inventory`?"));
}

#[test]
fn missing_password_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    script(home.path())
        .env_remove("BILLDESK_APP_PASSWORD")
        .write_stdin("login secret\n")
        .assert()
        .success()
        .stdout(contains("Configuration error: BILLDESK_APP_PASSWORD is not set"));
}

#[test]
fn bill_lookup_as_json_reports_failures() {
    let home = TempDir::new().unwrap();
    script(home.path())
        .write_stdin("bill show BILL-404 --json\n")
        .assert()
        .success()
        .stdout(contains("\"success\": false"))
        .stdout(contains("BILL-404"));
}

#[test]
fn sync_writes_the_workbook() {
    let home = assert_fs::TempDir::new().unwrap();
    let workbook = home.child("workbook.json");
    let input = format!(
        "login secret\nconfig set workbook_path {}\nsync inventory\n",
        workbook.path().display()
    );

    script(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Inventory items"));

    workbook.assert(predicate::path::exists());
    workbook.assert(contains("Product Name").and(contains("Service Y")));
}
