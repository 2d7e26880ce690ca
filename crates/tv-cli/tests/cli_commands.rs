//! Integration tests for tv-cli commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tavern() -> Command {
    let mut cmd = Command::cargo_bin("tavern").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

fn sheet_arg(dir: &TempDir) -> String {
    dir.path().join("sheet.json").to_str().unwrap().to_string()
}

fn read_sheet(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn set_then_check_uses_saved_sheet() {
    let dir = TempDir::new().unwrap();
    let sheet = sheet_arg(&dir);

    tavern()
        .args(["--sheet", &sheet, "run", ".st 力量70 敏捷60"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("调查员 的属性已更新")
                .and(predicate::str::contains("力量：0 =70 → 70")),
        );

    let saved = read_sheet(Path::new(&sheet));
    assert_eq!(saved["skill"]["力量"], "70");
    assert_eq!(saved["skill"]["敏捷"], "60");

    tavern()
        .args(["--seed", "7", "--sheet", &sheet, "run", ".rc 力量"])
        .assert()
        .success()
        .stdout(predicate::str::contains("调查员 进行 力量 检定：D100=").and(predicate::str::contains("/70")));
}

#[test]
fn lines_run_in_order_within_one_table() {
    tavern()
        .args(["--name", "阿明", "run", ".st 侦查50", ".st 侦查+10", ".st show 侦查"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("侦查：50 +10 → 60")
                .and(predicate::str::contains("阿明 的角色卡\n侦查：60")),
        );
}

#[test]
fn seeded_runs_repeat() {
    let run = || {
        tavern()
            .args(["--seed", "42", "run", ".st 侦查50", ".rc 侦查", ".rcb 侦查", ".ti"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn derived_values_need_no_sheet_entry() {
    tavern()
        .args(["run", ".st 力量70 体型60", ".st show db 体格"])
        .assert()
        .success()
        .stdout(predicate::str::contains("伤害加值：1d4").and(predicate::str::contains("体格：1")));
}

#[test]
fn hidden_roll_is_marked_private() {
    tavern()
        .args(["--seed", "3", "run", ".rh 1d6 偷袭"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[私聊] 调查员 暗骰（偷袭）：1d6=")
                .and(predicate::str::contains("调查员 进行了一次暗骰")),
        );
}

#[test]
fn check_without_sheet_is_reported() {
    tavern()
        .args(["run", ".rc 力量"])
        .assert()
        .success()
        .stdout(predicate::str::contains("调查员 还没有角色卡"));
}

#[test]
fn too_many_bias_dice_are_rejected() {
    tavern()
        .args(["--max-bias", "2", "run", ".rcb 侦查 50 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("奖惩骰数量不能超过 2"));
}

#[test]
fn plain_text_is_not_a_command() {
    tavern()
        .args(["run", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("不是指令：hello"));
}

#[test]
fn help_lists_the_ruleset() {
    tavern()
        .args(["run", ".help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("克苏鲁的呼唤 第七版").and(predicate::str::contains(".rcb")));

    tavern()
        .args(["run", ".help sc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sc：理智检定").and(predicate::str::contains("示例：.sc 1/1d6")));
}

#[test]
fn invalid_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let sheet = sheet_arg(&dir);
    fs::write(&sheet, "not json").unwrap();

    tavern()
        .args(["--sheet", &sheet, "run", ".rc 力量"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sheet"));
}

#[test]
fn reads_do_not_create_a_sheet_file() {
    let dir = TempDir::new().unwrap();
    let sheet = sheet_arg(&dir);

    tavern()
        .args(["--sheet", &sheet, "run", ".rc 50"])
        .assert()
        .success();
    assert!(!Path::new(&sheet).exists());
}

#[test]
fn run_requires_a_line() {
    tavern().arg("run").assert().failure();
}

// ---------------------------------------------------------------------------
// repl
// ---------------------------------------------------------------------------

#[test]
fn repl_runs_until_quit() {
    tavern()
        .args(["--seed", "1", "repl"])
        .write_stdin(".st 聆听60\nhello\n.rc 聆听\nquit\n.st 聆听99\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("聆听：0 =60 → 60")
                .and(predicate::str::contains("不是指令"))
                .and(predicate::str::contains("/60"))
                .and(predicate::str::contains("→ 99").not()),
        );
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_every_command() {
    tavern()
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains(".rcb")
                .and(predicate::str::contains(".sc"))
                .and(predicate::str::contains(".li"))
                .and(predicate::str::contains("10 commands")),
        );
}
