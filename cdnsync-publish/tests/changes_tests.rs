use cdnsync_publish::changes::{enumerate_all, git_diff_changes, parse_name_status};
use cdnsync_publish::{CategoryMapping, ChangeStatus, FileChange};
use pretty_assertions::assert_eq;
use std::fs;

mod support;
use support::{commit_all, git, init_repo, write};

#[test]
fn parses_basic_statuses_in_order() {
    let output = "A\0public/images/new.png\0M\0public/locales/en.json\0D\0public/fonts/old.woff2\0";
    assert_eq!(
        parse_name_status(output),
        vec![
            FileChange::added("public/images/new.png"),
            FileChange::modified("public/locales/en.json"),
            FileChange::deleted("public/fonts/old.woff2"),
        ]
    );
}

#[test]
fn rename_becomes_delete_then_add() {
    let changes = parse_name_status("R087\0public/images/a.png\0public/images/b.png\0");
    assert_eq!(
        changes,
        vec![
            FileChange::deleted("public/images/a.png"),
            FileChange::added("public/images/b.png"),
        ]
    );
}

#[test]
fn copy_adds_destination_only() {
    let changes = parse_name_status("C100\0public/images/a.png\0public/images/c.png\0");
    assert_eq!(changes, vec![FileChange::added("public/images/c.png")]);
}

#[test]
fn type_change_counts_as_modified() {
    let changes = parse_name_status("T\0public/images/link.png\0");
    assert_eq!(changes[0].status, ChangeStatus::Modified);
}

#[test]
fn unknown_records_are_skipped_with_their_path() {
    let output = "U\0public/images/conflict.png\0X\0public/images/x.png\0A\0public/images/ok.png\0";
    assert_eq!(
        parse_name_status(output),
        vec![FileChange::added("public/images/ok.png")]
    );
}

#[test]
fn paths_are_taken_verbatim() {
    let output = "A\0public/images/caf\u{e9} menu.png\0M\0public/locales/tab\there.json\0";
    assert_eq!(
        parse_name_status(output),
        vec![
            FileChange::added("public/images/caf\u{e9} menu.png"),
            FileChange::modified("public/locales/tab\there.json"),
        ]
    );
}

#[test]
fn truncated_record_is_dropped() {
    assert_eq!(
        parse_name_status("A\0public/images/a.png\0R100\0public/images/b.png\0"),
        vec![FileChange::added("public/images/a.png")]
    );
    assert!(parse_name_status("").is_empty());
}

#[test]
fn status_display_uses_git_letters() {
    assert_eq!(ChangeStatus::Added.to_string(), "A");
    assert_eq!(ChangeStatus::Modified.to_string(), "M");
    assert_eq!(ChangeStatus::Deleted.to_string(), "D");
}

#[tokio::test]
async fn diff_outside_repository_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let changes = git_diff_changes(dir.path(), "origin/main", "public").await;
    assert!(changes.is_empty());
}

#[tokio::test]
async fn diff_keeps_non_ascii_paths_unquoted() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    init_repo(root);
    write(root, "public/locales/en.json", "{}");
    commit_all(root, "initial");
    git(root, &["branch", "base"]);

    write(root, "public/images/caf\u{e9}.png", "png");
    write(root, "public/images/plain.png", "png");
    git(root, &["add", "-A"]);

    let changes = git_diff_changes(root, "base", "public").await;
    assert_eq!(
        changes,
        vec![
            FileChange::added("public/images/caf\u{e9}.png"),
            FileChange::added("public/images/plain.png"),
        ]
    );
}

#[tokio::test]
async fn diff_is_limited_to_assets_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    init_repo(root);
    write(root, "public/images/a.png", "a");
    write(root, "src/app.ts", "export {}");
    commit_all(root, "initial");
    git(root, &["branch", "base"]);

    write(root, "public/images/a.png", "a2");
    write(root, "src/app.ts", "export const x = 1");
    write(root, "publicity/b.png", "b");
    commit_all(root, "edit");

    let changes = git_diff_changes(root, "base", "public").await;
    assert_eq!(changes, vec![FileChange::modified("public/images/a.png")]);
}

#[tokio::test]
async fn option_like_reference_is_not_read_as_option() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    init_repo(root);
    write(root, "public/images/a.png", "a");
    commit_all(root, "initial");

    let out = root.join("leak.txt");
    let reference = format!("--output={}", out.display());
    let changes = git_diff_changes(root, &reference, "public").await;

    assert!(changes.is_empty());
    assert!(!out.exists());
}

#[test]
fn enumerate_all_walks_mapped_roots_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("public/locales")).unwrap();
    fs::create_dir_all(root.join("public/images/icons")).unwrap();
    fs::create_dir_all(root.join(".next/static/chunks")).unwrap();
    fs::write(root.join("public/locales/fr.json"), "{}").unwrap();
    fs::write(root.join("public/locales/en.json"), "{}").unwrap();
    fs::write(root.join("public/images/icons/x.svg"), "<svg/>").unwrap();
    fs::write(root.join(".next/static/chunks/app.js"), "").unwrap();
    fs::write(root.join("public/robots.txt"), "").unwrap();

    let changes = enumerate_all(root, &CategoryMapping::default()).unwrap();
    assert_eq!(
        changes,
        vec![
            FileChange::added("public/locales/en.json"),
            FileChange::added("public/locales/fr.json"),
            FileChange::added("public/images/icons/x.svg"),
            FileChange::added(".next/static/chunks/app.js"),
        ]
    );
}

#[test]
fn enumerate_all_skips_missing_roots() {
    let dir = tempfile::tempdir().unwrap();
    let changes = enumerate_all(dir.path(), &CategoryMapping::default()).unwrap();
    assert!(changes.is_empty());
}
