use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("commish_cli").unwrap();
    cmd.env("COMMISH_HOME", home).env("NO_COLOR", "1");
    cmd
}

#[test]
fn schedule_command_prints_clamped_dates() {
    let home = tempdir().unwrap();
    cli(home.path())
        .args(["schedule", "2025-01-31", "monthly", "3"])
        .assert()
        .success()
        .stdout(contains("28/02/2025"))
        .stdout(contains("Final: 31/03/2025"));
}

#[test]
fn script_mode_adds_and_lists_calendar() {
    let home = tempdir().unwrap();
    let input = "add vendor \"Ana Souza\" 1.000,00 2025-01-05 single 1 529.982.247-25\n\
                 add vendor Loja 250,50 2025-03-20 single 1 11222333000181\n\
                 calendar vendor month\n\
                 exit\n";
    cli(home.path())
        .env("COMMISH_CLI_SCRIPT", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Created 1 payment(s)"))
        .stdout(contains("fevereiro de 2025"))
        .stdout(contains("Open total: R$\u{a0}1.250,50"));

    assert!(home.path().join("events").join("vendor.json").exists());
}

#[test]
fn invalid_recurrence_fails_with_message() {
    let home = tempdir().unwrap();
    cli(home.path())
        .args(["schedule", "2025-01-01", "yearly", "2"])
        .assert()
        .failure()
        .stderr(contains("Unsupported recurrence `yearly`"));
}

#[test]
fn unknown_command_suggests_closest() {
    let home = tempdir().unwrap();
    cli(home.path())
        .args(["calender", "vendor"])
        .assert()
        .failure()
        .stderr(contains("did you mean `calendar`?"));
}

#[test]
fn script_failures_exit_nonzero_but_run_every_line() {
    let home = tempdir().unwrap();
    let input = "add vendor \"Ana 1,00 2025-01-05 single 1 529.982.247-25\n\
                 calender vendor\n\
                 schedule 2025-01-31 monthly 2\n";
    cli(home.path())
        .env("COMMISH_CLI_SCRIPT", "1")
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(contains("28/02/2025"))
        .stderr(contains("Could not split command line"))
        .stderr(contains("did you mean `calendar`?"))
        .stderr(contains("2 script command(s) failed"));
}
