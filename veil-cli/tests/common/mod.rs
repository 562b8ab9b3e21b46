use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().unwrap(),
        }
    }

    pub fn veil(&self) -> Command {
        let mut cmd = Command::cargo_bin("veil").unwrap();
        let path = self.home_dir.path();
        cmd.env("VEIL_HOME", path.join(".veil"));
        cmd.env("HOME", path);
        cmd.env("USERPROFILE", path);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("VEIL_LEXICON");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Writes a word list whose entry `i` is `w<i>`.
    pub fn lexicon(&self, size: usize) -> PathBuf {
        let path = self.home_dir.path().join("words.txt");
        let words: Vec<String> = (0..size).map(|i| format!("w{}", i)).collect();
        std::fs::write(&path, words.join("\n")).unwrap();
        path
    }

    pub fn settings(&self) -> PathBuf {
        self.home_dir.path().join(".veil").join("settings.json")
    }
}
