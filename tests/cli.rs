//! Command-line tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

fn confsplice() -> Command {
    let mut cmd = Command::cargo_bin("confsplice").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_inject_with_flags() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("next.config.js");

    confsplice()
        .arg("inject")
        .arg("--file")
        .arg(&target)
        .arg("--blank")
        .arg(fixture("blank/next.js"))
        .args(["--set", "basePath=/docs", "--set", "images.unoptimized=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Injected 2 properties"));

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("const nextConfig = { images: { unoptimized: true }, basePath: \"/docs\" }"));
}

#[test]
fn test_inject_with_config_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("svelte.config.js");
    std::fs::copy(fixture("sveltekit/default.js"), &target).unwrap();

    let engine = dir.path().join("engine.toml");
    std::fs::write(
        &engine,
        format!(
            "configuration_file = {:?}\nblank_configuration_file = {:?}\n\n[properties]\n\"kit.paths.base\" = \"/docs\"\n",
            target.display().to_string(),
            fixture("blank/sveltekit.js").display().to_string()
        ),
    )
    .unwrap();

    confsplice()
        .args(["inject", "--config"])
        .arg(&engine)
        .assert()
        .success()
        .stdout(predicate::str::contains("Injected 1 property"));

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("    paths: { base: \"/docs\" }, adapter: adapter()"));
}

#[test]
fn test_inject_failure_is_a_warning() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("astro.config.cjs");
    std::fs::copy(fixture("astro/wrapped.cjs"), &target).unwrap();

    confsplice()
        .arg("inject")
        .arg("--file")
        .arg(&target)
        .arg("--blank")
        .arg(fixture("blank/next.js"))
        .args(["--set", "base=/docs"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Please set base=\"/docs\" by hand"));

    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        std::fs::read_to_string(fixture("astro/wrapped.cjs")).unwrap()
    );
}

#[test]
fn test_inject_requires_a_target() {
    confsplice()
        .args(["inject", "--set", "a=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Specify --config or --file"));
}

#[test]
fn test_locate_reports_idiom() {
    confsplice()
        .arg("locate")
        .arg(fixture("astro/wrapped.cjs"))
        .arg("--allow-wrapping-call")
        .assert()
        .success()
        .stdout(predicate::str::contains("Idiom: module.exports = wrapper({ ... })"));

    confsplice()
        .arg("locate")
        .arg(fixture("astro/wrapped.cjs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No configuration object found"));
}

#[test]
fn test_get_property() {
    confsplice()
        .arg("get")
        .arg(fixture("nuxt/async.mjs"))
        .arg("mode")
        .assert()
        .success()
        .stdout(predicate::str::diff("'universal'\n"));

    confsplice()
        .arg("get")
        .arg(fixture("nuxt/async.mjs"))
        .arg("router.base")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Property not set: router.base"));
}

#[test]
fn test_init_writes_default_config_once() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("confsplice.toml");

    confsplice()
        .args(["init", "--output"])
        .arg(&output)
        .assert()
        .success();
    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("[properties]"));

    confsplice()
        .args(["init", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
