//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the texcheck binary against a
//! temporary project.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::Path;
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Exit codes of the binary.
pub mod exit {
    pub const SUCCESS: i32 = 0;
    pub const VIOLATIONS: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const PROCESSING: i32 = 3;
}

/// Returns a Command configured to run the texcheck binary
pub fn texcheck_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("texcheck"));
    cmd.env("NO_COLOR", "1")
        .env_remove("COLOR")
        .env_remove("TEXCHECK_CONFIG")
        .env_remove("TEXCHECK_LOG");
    cmd
}

/// Create a run builder inside a project
pub fn texcheck(project: &Project) -> RunBuilder {
    RunBuilder {
        dir: project.path().to_path_buf(),
        args: Vec::new(),
    }
}

/// Fluent builder for one invocation.
pub struct RunBuilder {
    dir: std::path::PathBuf,
    args: Vec<String>,
}

#[allow(dead_code)]
impl RunBuilder {
    /// Append CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    fn command(self) -> Command {
        let mut cmd = texcheck_cmd();
        cmd.args(&self.args).current_dir(&self.dir);
        cmd
    }

    /// Assert exit code 0
    pub fn passes(self) -> RunAssert {
        self.exits(exit::SUCCESS)
    }

    /// Assert exit code 1
    pub fn finds_violations(self) -> RunAssert {
        self.exits(exit::VIOLATIONS)
    }

    /// Assert a specific exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
            code,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Captured output of a finished run.
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout should be JSON")
    }

    /// Assert stdout equals expected
    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = self.stderr();
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary project directory.
///
/// A `.git` directory marks it as a repository root so config discovery
/// never escapes into the surrounding filesystem.
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write texcheck.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        self.file("texcheck.toml", &content);
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        self.bytes(path, content.as_bytes());
    }

    /// Write raw bytes at the given path
    pub fn bytes(&self, path: impl AsRef<Path>, content: &[u8]) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Write a pattern check definition into `dir`
    pub fn pattern_check(&self, dir: &str, id: &str, pattern: &str) {
        self.file(
            format!("{dir}/{id}.yaml"),
            &format!(
                "id: {id}\nname: {name}\nmessage: found {pattern}\nentry:\n  type: pattern\n  pattern: '{pattern}'\n",
                name = id.to_lowercase()
            ),
        );
    }
}
