use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn lab(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lab"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("DATA_PATH")
        .output()
        .expect("run lab")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn init_show_ls_clear_round() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let root = temp.path();

    let init = lab(root, &["init", "exp1", "--template"]);
    assert!(init.status.success(), "init failed: {:?}", init);
    assert!(root.join("exp1/data").is_dir());
    assert!(root.join("exp1/config_v1.yml").is_file());

    let again = lab(root, &["init", "exp1"]);
    assert!(again.status.success());
    assert!(stdout(&again).contains("already exists"));

    let show = lab(root, &["show", "exp1"]);
    assert!(show.status.success());
    assert!(stdout(&show).starts_with("notebook:\n  name: exp1\n  version: v1\n"));

    fs::write(root.join("exp1/data/v1_res.pkl"), b"x").expect("seed v1");
    fs::write(root.join("exp1/data/v2_res.pkl"), b"x").expect("seed v2");
    fs::write(root.join("exp1/figures/v1_plot.png"), b"x").expect("seed fig");

    let ls = lab(root, &["ls", "exp1", "--json"]);
    assert!(ls.status.success());
    let listing: serde_json::Value = serde_json::from_slice(&ls.stdout).expect("json");
    assert_eq!(listing[0]["kind"], "data");
    assert_eq!(listing[0]["files"], serde_json::json!(["v1_res.pkl"]));
    assert_eq!(listing[1]["files"], serde_json::json!(["v1_plot.png"]));

    let cleared = lab(root, &["clear", "exp1", "--no-figures", "--json"]);
    assert!(cleared.status.success());
    let report: serde_json::Value = serde_json::from_slice(&cleared.stdout).expect("json");
    assert_eq!(report["data_removed"], 1);
    assert_eq!(report["figures_removed"], 0);
    assert!(root.join("exp1/data/v2_res.pkl").exists());
    assert!(root.join("exp1/figures/v1_plot.png").exists());
}

#[test]
fn missing_root_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_lab"))
        .args(["init", "exp1"])
        .env_remove("DATA_PATH")
        .output()
        .expect("run lab");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("data root is not configured"), "stderr: {stderr}");
}

#[test]
fn show_missing_version_fails() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let init = lab(temp.path(), &["init", "exp1"]);
    assert!(init.status.success());
    let show = lab(temp.path(), &["show", "exp1", "--config-version", "v7"]);
    assert!(!show.status.success());
    assert!(String::from_utf8_lossy(&show.stderr).contains("lab_store.config_missing"));
}
