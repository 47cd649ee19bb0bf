//! Integration tests for cachedisk

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn cachedisk() -> Command {
        cargo_bin_cmd!("cachedisk")
    }

    /// Command wired to a throwaway HOME and config so the user's real
    /// environment is never touched
    fn sandboxed(temp: &TempDir) -> Command {
        let mut cmd = cachedisk();
        cmd.env("HOME", temp.path())
            .env_remove("CACHEDISK_CONFIG")
            .args([
                "--config",
                temp.path().join("config.toml").to_str().unwrap(),
                "--no-local",
            ]);
        cmd
    }

    #[test]
    fn help_displays() {
        cachedisk()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("cache"));
    }

    #[test]
    fn version_displays() {
        cachedisk()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("cachedisk"));
    }

    #[test]
    fn resolve_falls_back_to_home() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args(["resolve", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains(temp.path().to_str().unwrap()));

        assert!(temp.path().join("_caches").is_dir());
    }

    #[test]
    fn resolve_creates_nested_cache_dir() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args(["resolve", "--dir", "_caches/nuke", "--format", "plain"])
            .assert()
            .success();

        assert!(temp.path().join("_caches").is_dir());
        assert!(temp.path().join("_caches").join("nuke").is_dir());
    }

    #[test]
    fn resolve_json_reports_the_decision_trail() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args([
                "resolve",
                "cachedisk-test-no-such-volume",
                "--format",
                "json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("home-fallback"))
            .stdout(predicate::str::contains("cachedisk-test-no-such-volume"))
            .stdout(predicate::str::contains("not-mounted"));
    }

    #[test]
    fn resolve_rejects_absolute_dir_with_code_2() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args(["resolve", "--dir", "/tmp/absolute-cache"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("relative"));
    }

    #[test]
    fn resolve_is_idempotent() {
        let temp = TempDir::new().unwrap();

        let first = sandboxed(&temp)
            .args(["resolve", "--format", "plain"])
            .output()
            .unwrap();
        let second = sandboxed(&temp)
            .args(["resolve", "--format", "plain"])
            .output()
            .unwrap();

        assert!(first.status.success());
        assert!(second.status.success());
        assert_eq!(first.stdout, second.stdout);
    }

    #[test]
    fn resolve_logs_stay_off_stdout() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args([
                "-v",
                "resolve",
                "cachedisk-test-no-such-volume",
                "--format",
                "plain",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("not mounted").not())
            .stderr(predicate::str::contains("not mounted"));
    }

    #[test]
    fn resolve_export_prints_configured_vars() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "[export]\nvars = [\"NUKE_TEMP_DIR\", \"NUKE_DISK_CACHE\"]\n",
        )
        .unwrap();

        sandboxed(&temp)
            .args(["resolve", "--export"])
            .assert()
            .success()
            .stdout(predicate::str::contains("export NUKE_TEMP_DIR='"))
            .stdout(predicate::str::contains("export NUKE_DISK_CACHE='"));
    }

    #[test]
    fn volumes_lists_in_json() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args(["volumes", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("["));
    }

    #[test]
    fn config_path_honors_config_flag() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args(["config", "set", "cache.dir", "_caches/nuke"])
            .assert()
            .success();

        sandboxed(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("_caches/nuke"));
    }

    #[test]
    fn config_set_rejects_unknown_key() {
        let temp = TempDir::new().unwrap();
        sandboxed(&temp)
            .args(["config", "set", "cache.bogus", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn init_creates_local_config() {
        let temp = TempDir::new().unwrap();
        cachedisk()
            .args(["init", "--path", temp.path().to_str().unwrap()])
            .assert()
            .success();

        assert!(temp.path().join(".cachedisk.toml").is_file());
    }

    #[test]
    fn init_refuses_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".cachedisk.toml"), "existing").unwrap();

        cachedisk()
            .args(["init", "--path", temp.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn completions_generate() {
        cachedisk()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cachedisk"));
    }
}
