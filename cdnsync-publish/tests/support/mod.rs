//! Throwaway git repositories for incremental change-set tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

/// Runs git in `dir` with a fixed identity and no signing.
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=cdnsync tests",
            "-c",
            "user.email=tests@cdnsync.invalid",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git must be installed");
    assert!(status.success(), "git {args:?} failed with {status}");
}

pub fn init_repo(dir: &Path) {
    git(dir, &["init", "-q"]);
}

/// Stages everything, deletions included, and commits it.
pub fn commit_all(dir: &Path, message: &str) {
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "-q", "-m", message]);
}

pub fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}
