//! End-to-end tests for the `almanac` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn almanac() -> Command {
    let mut cmd = Command::cargo_bin("almanac").unwrap();
    cmd.env_remove("ALMANAC_CONFIG").env_remove("ALMANAC_NOW");
    cmd
}

#[test]
fn us_holidays_minimal() {
    almanac()
        .args(["holidays", "2017", "--format", "minimal"])
        .assert()
        .success()
        .stdout(
            "2017-01-02\n2017-01-16\n2017-02-20\n2017-04-14\n2017-05-29\n\
             2017-07-04\n2017-09-04\n2017-11-23\n2017-12-25\n",
        );
}

#[test]
fn uk_holidays_json() {
    almanac()
        .args(["--market", "uk", "holidays", "2017", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2017-08-28\""))
        .stdout(predicate::str::contains("2017-12-26T00:00:00+00:00"))
        .stdout(predicate::str::contains("2017-07-04").not());
}

#[test]
fn holidays_table_has_title() {
    almanac()
        .args(["holidays", "2017"])
        .assert()
        .success()
        .stdout(predicate::str::contains("US Exchange holidays in 2017"));
}

#[test]
fn holidays_outside_window_fail() {
    almanac()
        .args(["holidays", "1900"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the configured window"));
}

#[test]
fn is_business_on_holiday() {
    almanac()
        .args(["is-business", "2017-07-04", "-f", "minimal"])
        .assert()
        .success()
        .stdout("false\n");
    almanac()
        .args(["is-business", "2017-07-05", "-f", "minimal"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn next_business_skips_memorial_day() {
    almanac()
        .args(["next-business", "2017-05-26", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2017-05-30T00:00:00-05:00\n");
    almanac()
        .args(["next-business", "2017-05-30", "--previous", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2017-05-26T00:00:00-05:00\n");
}

#[test]
fn add_clamps_to_month_end() {
    almanac()
        .args([
            "add",
            "2017-01-31T10:00:00+00:00",
            "--months",
            "1",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("2017-02-28T10:00:00+00:00\n");
}

#[test]
fn sub_leap_year() {
    almanac()
        .args(["sub", "2016-02-29T00:00:00+00:00", "--years", "1", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2015-02-28T00:00:00+00:00\n");
}

#[test]
fn add_requires_a_delta() {
    almanac()
        .args(["add", "2017-01-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing delta"));
}

#[test]
fn diff_json() {
    almanac()
        .args(["diff", "2017-01-30", "2017-02-28", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Delta\": \"P0Y1M0DT0H0M0S\""))
        .stdout(predicate::str::contains("\"Whole Days\": \"29\""));
}

#[test]
fn invalid_datetime_is_reported() {
    almanac()
        .args(["is-business", "2017-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid datetime"));
}

#[test]
fn now_with_fixed_instant() {
    almanac()
        .args(["now", "--at", "0", "-f", "minimal"])
        .assert()
        .success()
        .stdout("1970-01-01T00:00:00+00:00\n");
    almanac()
        .args(["now", "--at", "0", "--offset", "-300", "-f", "minimal"])
        .assert()
        .success()
        .stdout("1969-12-31T19:00:00-05:00\n");
}

#[test]
fn quarter_bounds() {
    almanac()
        .args(["quarter", "2016", "-q", "1", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Q1,2016-01-01T00:00:00+00:00,2016-03-31T23:59:59+00:00",
        ));
    almanac()
        .args([
            "quarter",
            "2016",
            "-q",
            "3",
            "--contains",
            "2016-08-15",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn config_file_selects_market() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "market = \"uk\"\ndisplay_offset_minutes = 60").unwrap();

    almanac()
        .args(["holidays", "2017", "-f", "minimal", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2017-08-28"));

    // Command-line market wins over the file.
    almanac()
        .args(["holidays", "2017", "-f", "minimal", "--market", "us", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2017-11-23"));
}

#[test]
fn invalid_config_file_fails() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{\"display_offset_minutes\": 5000}}").unwrap();

    almanac()
        .args(["holidays", "2017", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
