//! Integration tests for jlinkw

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// jlinkw isolated from user and project configuration
    fn jlinkw(config: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("jlinkw");
        cmd.env_remove("RUST_LOG")
            .arg("--no-local")
            .arg("--plain")
            .arg("--config")
            .arg(config);
        cmd
    }

    fn write_config(temp: &TempDir, content: &str) -> std::path::PathBuf {
        let path = temp.path().join("jlinkw.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("jlinkw")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Build Java runtime images with jlink"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("jlinkw")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("jlinkw"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("custom.toml");

        jlinkw(&config)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("custom.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "[jlink]\nadd_modules = [\"java.sql\"]\n");

        jlinkw(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]").and(predicate::str::contains("java.sql")));
    }

    #[test]
    fn config_init_creates_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("nested").join("config.toml");

        jlinkw(&config).args(["config", "init"]).assert().success();
        assert!(config.is_file());
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "skip = \"sometimes\"\n");

        jlinkw(&config)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn build_without_output_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");

        jlinkw(&config)
            .arg("build")
            .assert()
            .failure()
            .stderr(
                predicate::str::contains("Error:").and(predicate::str::contains("Output folder")),
            );
    }

    #[test]
    fn build_skip_succeeds_without_output() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");

        jlinkw(&config).args(["build", "--skip"]).assert().success();
    }

    #[test]
    fn build_unknown_provider_hints() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");

        jlinkw(&config)
            .args(["build", "--provider", "zulu", "--output", "image"])
            .assert()
            .failure()
            .stderr(
                predicate::str::contains("Unknown JDK provider")
                    .and(predicate::str::contains("Hint:")),
            );
    }

    #[test]
    fn build_local_provider_requires_home() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache");
        let config = write_config(
            &temp,
            &format!("[cache]\npath = \"{}\"\n", cache.display()),
        );

        jlinkw(&config)
            .args(["build", "--output"])
            .arg(temp.path().join("image"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Provider failure"));
        assert!(cache.is_dir());
    }

    #[test]
    fn modules_prints_merged_list() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");
        let report = temp.path().join("jdeps.txt");
        fs::write(
            &report,
            "app.jar -> java.base\napp.jar -> java.logging\nnot a dependency line\n",
        )
        .unwrap();

        jlinkw(&config)
            .args(["modules", "--add-modules", "java.sql", "--jdeps-report"])
            .arg(&report)
            .assert()
            .success()
            .stdout("java.base\njava.logging\njava.sql\n");
    }

    #[test]
    fn modules_missing_report_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");

        jlinkw(&config)
            .args(["modules", "--jdeps-report"])
            .arg(temp.path().join("missing.txt"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Can't read jdeps report"));
    }

    #[test]
    fn toolchains_lists_registry() {
        let temp = TempDir::new().unwrap();
        let registry = temp.path().join("toolchains.toml");
        fs::write(
            &registry,
            "[[toolchain]]\nhome = \"/opt/jdk-21\"\n[toolchain.provides]\nversion = \"21\"\n",
        )
        .unwrap();
        let config = write_config(
            &temp,
            &format!("[toolchains]\nfile = \"{}\"\n", registry.display()),
        );

        jlinkw(&config)
            .arg("toolchains")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("/opt/jdk-21").and(predicate::str::contains("version=21")),
            );
    }
}
