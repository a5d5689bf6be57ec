use std::path::Path;

use assert_cmd::Command;
use tempfile::tempdir;

fn hangman(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hangman").unwrap();
    cmd.env("HANGMAN_DATA_DIR", data_dir)
        .arg("--config")
        .arg(data_dir.join("config.json"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn calc_prints_the_display() {
    let dir = tempdir().unwrap();
    let out = stdout_of(hangman(dir.path()).args(["calc", "12+3*2="]));
    assert_eq!(out.trim(), "30");

    let out = stdout_of(hangman(dir.path()).args(["calc", "7", "/", "0", "="]));
    assert_eq!(out.trim(), "Infinity");
}

#[test]
fn calc_rejects_unknown_keys() {
    let dir = tempdir().unwrap();
    hangman(dir.path()).args(["calc", "2^3"]).assert().failure();
}

#[test]
fn stats_lists_builtin_categories_with_zero_scores() {
    let dir = tempdir().unwrap();
    let out = stdout_of(hangman(dir.path()).arg("stats"));
    assert!(out.contains("Animals"));
    assert!(out.contains("Total score: 0"));
}

#[test]
fn stats_csv_reads_stored_scores() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("hangmanScores.json"),
        r#"{"Fruits":{"totalPoints":150,"gamesPlayed":2,"gamesWon":1,"averageScore":75}}"#,
    )
    .unwrap();

    let out = stdout_of(hangman(dir.path()).args(["stats", "--csv"]));
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("category,totalPoints,gamesPlayed,gamesWon,winRate,averageScore")
    );
    assert!(out.lines().any(|l| l == "Fruits,150,2,1,50,75"));
}

#[test]
fn reset_with_yes_removes_scores() {
    let dir = tempdir().unwrap();
    let scores = dir.path().join("hangmanScores.json");
    std::fs::write(&scores, r#"{"Colors":{"totalPoints":10,"gamesPlayed":1,"gamesWon":0,"averageScore":10}}"#)
        .unwrap();

    let out = stdout_of(hangman(dir.path()).args(["reset", "--yes"]));
    assert!(out.contains("All scores were reset"));
    assert!(!scores.exists());
}

#[test]
fn reset_declined_on_stdin_keeps_scores() {
    let dir = tempdir().unwrap();
    let scores = dir.path().join("hangmanScores.json");
    std::fs::write(&scores, r#"{"Colors":{"totalPoints":10,"gamesPlayed":1,"gamesWon":0,"averageScore":10}}"#)
        .unwrap();

    let out = stdout_of(hangman(dir.path()).arg("reset").write_stdin("n\n"));
    assert!(out.contains("Scores left untouched"));
    assert!(scores.exists());
}

#[test]
fn contact_submissions_are_trimmed_and_listed() {
    let dir = tempdir().unwrap();
    hangman(dir.path())
        .args([
            "contact",
            "--name",
            "  Ana ",
            "--email",
            "ana@example.com",
            "--message",
            " hola ",
        ])
        .assert()
        .success();

    let stored = std::fs::read_to_string(dir.path().join("contactanos.json")).unwrap();
    assert!(stored.contains("\"nombre\":\"Ana\""));

    let out = stdout_of(hangman(dir.path()).args(["submissions", "contact"]));
    assert!(out.contains("Ana <ana@example.com>"));
    assert!(out.contains(": hola"));
}

#[test]
fn register_then_list_hides_password() {
    let dir = tempdir().unwrap();
    hangman(dir.path())
        .args([
            "register",
            "--name",
            "Luis",
            "--email",
            "luis@example.com",
            "--password",
            "secreto",
        ])
        .assert()
        .success();

    let out = stdout_of(hangman(dir.path()).args(["submissions", "register"]));
    assert!(out.contains("Luis <luis@example.com>"));
    assert!(!out.contains("secreto"));
}

#[test]
fn submissions_empty_message() {
    let dir = tempdir().unwrap();
    let out = stdout_of(hangman(dir.path()).args(["submissions", "register"]));
    assert!(out.contains("No Register submissions yet."));
}

#[test]
fn play_requires_a_terminal() {
    let dir = tempdir().unwrap();
    hangman(dir.path()).arg("play").write_stdin("").assert().failure();
}
