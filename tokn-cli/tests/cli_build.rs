use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tokn-babel")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn build_into(dir: &TempDir, tokens: &PathBuf) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("tokn");
    cmd.current_dir(dir.path())
        .arg("build")
        .arg("--tokens")
        .arg(tokens)
        .arg("--out")
        .arg(dir.path().join("build"));
    cmd.assert()
}

#[test]
fn build_writes_both_trees() {
    let dir = TempDir::new().unwrap();
    build_into(&dir, &fixture_path("tokens.json"))
        .success()
        .stdout(predicate::str::contains("Built 5 bundles (6 tokens)"))
        .stdout(predicate::str::contains("_all.scss"));

    let scss = dir.path().join("build").join("scss");
    let css = dir.path().join("build").join("css");
    assert!(scss.join("_index.scss").exists());
    assert!(scss.join("tokens-dark.scss").exists());
    let theme = fs::read_to_string(css.join("theme.css")).unwrap();
    assert!(theme.contains("--primary-base: #335CFF;"));
}

#[test]
fn failed_build_keeps_previous_output() {
    let dir = TempDir::new().unwrap();
    build_into(&dir, &fixture_path("tokens.json")).success();

    let broken = dir.path().join("broken.json");
    fs::write(
        &broken,
        r#"{"Theme":{"A":{"$value":"{Theme.B}"},"B":{"$value":"{Theme.A}"}}}"#,
    )
    .unwrap();
    build_into(&dir, &broken)
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Circular token reference detected for"));

    assert!(dir
        .path()
        .join("build")
        .join("scss")
        .join("_foundations.scss")
        .exists());
}

#[test]
fn build_refuses_unrelated_output_directory() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("build").join("notes.txt");
    fs::create_dir_all(notes.parent().unwrap()).unwrap();
    fs::write(&notes, "keep me").unwrap();

    build_into(&dir, &fixture_path("tokens.json"))
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not look like a previous build"));

    assert_eq!(fs::read_to_string(&notes).unwrap(), "keep me");
    assert!(!dir.path().join("build").join("scss").exists());
}

#[test]
fn build_reports_missing_document() {
    let dir = TempDir::new().unwrap();
    build_into(&dir, &dir.path().join("nope.json"))
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn project_config_sets_banner() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tokn.toml"), "banner = \"ACME\"\n").unwrap();
    build_into(&dir, &fixture_path("tokens.json")).success();

    let spacing = fs::read_to_string(dir.path().join("build/css/spacing.css")).unwrap();
    assert!(spacing.starts_with("/* ACME - Spacing (CSS) */\n"));
}

#[test]
fn inspect_prints_flattened_entries() {
    let mut cmd = cargo_bin_cmd!("tokn");
    cmd.arg("inspect")
        .arg(fixture_path("tokens.json"))
        .arg("--limit")
        .arg("1");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"Foundations\""))
        .stdout(predicate::str::contains("\"#335CFF\""))
        .stdout(predicate::str::contains("Gray").not());
}

#[test]
fn query_reads_built_concatenation() {
    let dir = TempDir::new().unwrap();
    build_into(&dir, &fixture_path("tokens.json")).success();
    let all = dir.path().join("build/scss/_all.scss");

    let mut cmd = cargo_bin_cmd!("tokn");
    cmd.current_dir(dir.path()).arg("query").arg(&all);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"Light Tokens\""));

    let mut cmd = cargo_bin_cmd!("tokn");
    cmd.current_dir(dir.path())
        .arg("query")
        .arg(&all)
        .arg("--variable")
        .arg("bgWeak");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"#FFFFFF\""))
        .stdout(predicate::str::contains("\"raw_value\": \"$gray0\""));

    let mut cmd = cargo_bin_cmd!("tokn");
    cmd.current_dir(dir.path())
        .arg("query")
        .arg(&all)
        .arg("--variable")
        .arg("missing");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Token not found: missing"));
}

#[test]
fn list_formats_shows_capabilities() {
    let mut cmd = cargo_bin_cmd!("tokn");
    cmd.arg("list-formats");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("css (.css) [serialize]"))
        .stdout(predicate::str::contains("scss (.scss) [parse, serialize]"));
}
