//! End-to-end tests for the built-in status summary

mod common;

use common::{
    clone_repo, create_test_commit, git, is_git_available, strip_ansi, TestRepoBuilder, TestTree,
};
use gits::commands::{handle_run, inspect_repo};
use gits::core::{find_repos, FilterSet, Mode, Repository, RunConfig};
use gits::git::RemoteSyncState;
use tempfile::TempDir;

/// An upstream repository outside the scanned tree plus a clone inside it
fn upstream_and_clone(tree: &TestTree) -> (TempDir, std::path::PathBuf) {
    let upstream_dir = TempDir::new().unwrap();
    let upstream = TestRepoBuilder::new(upstream_dir.path().join("upstream"))
        .build()
        .unwrap();

    let clone = tree.root().join("clone");
    clone_repo(upstream.path(), &clone).unwrap();
    (upstream_dir, clone)
}

async fn single_repo(tree: &TestTree) -> Repository {
    let mut repos = find_repos(tree.root(), &FilterSet::new()).await.unwrap();
    assert_eq!(repos.len(), 1);
    repos.remove(0)
}

#[tokio::test]
async fn test_status_lines_are_aligned_and_sorted() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let tree = TestTree::new().unwrap();
    tree.repo("abc").build().unwrap();
    tree.repo("group/repo-1").build().unwrap();

    let report = handle_run(&RunConfig::new(tree.root(), Mode::Status))
        .await
        .unwrap();
    assert_eq!(report.exit_code(), 0);

    let lines: Vec<String> = report.results().iter().map(|r| strip_ansi(r)).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("abc          [main]"));
    assert!(lines[1].starts_with("group/repo-1 [main]"));
}

#[tokio::test]
async fn test_status_lists_other_branches_sorted() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let tree = TestTree::new().unwrap();
    tree.repo("repo")
        .with_branch("zeta")
        .with_branch("alpha")
        .on_branch("feature")
        .dirty()
        .build()
        .unwrap();

    let line = inspect_repo(&single_repo(&tree).await).await;
    assert_eq!(line.current_branch, "feature");
    assert!(!line.clean);
    assert_eq!(line.other_branches, vec!["alpha", "main", "zeta"]);

    let rendered = strip_ansi(&line.render(4));
    assert!(rendered.starts_with("repo [feature](📝"));
    assert!(rendered.ends_with(" [alpha] [main] [zeta]"));
}

#[tokio::test]
async fn test_status_reports_ahead_of_remote() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let tree = TestTree::new().unwrap();
    let (_upstream, clone) = upstream_and_clone(&tree);
    create_test_commit(&clone, "local.txt", "local", "Local work").unwrap();

    let line = inspect_repo(&single_repo(&tree).await).await;
    assert!(line.clean);
    assert_eq!(line.remote_sync, RemoteSyncState::AheadRemote);
    assert!(strip_ansi(&line.render(5)).contains("(🏎💨)"));
}

#[tokio::test]
async fn test_status_reports_behind_remote() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let tree = TestTree::new().unwrap();
    let (upstream_dir, clone) = upstream_and_clone(&tree);
    let upstream = upstream_dir.path().join("upstream");
    create_test_commit(&upstream, "remote.txt", "remote", "Remote work").unwrap();
    git(&clone, &["fetch", "-q"]).unwrap();

    let line = inspect_repo(&single_repo(&tree).await).await;
    assert_eq!(line.remote_sync, RemoteSyncState::BehindRemote);
    assert!(strip_ansi(&line.render(5)).contains("(😰)"));
}

#[tokio::test]
async fn test_status_in_sync_has_no_annotation() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let tree = TestTree::new().unwrap();
    let (_upstream, _clone) = upstream_and_clone(&tree);

    let line = inspect_repo(&single_repo(&tree).await).await;
    assert_eq!(line.remote_sync, RemoteSyncState::SyncRemote);
    assert!(line.annotation().is_empty());
    assert!(!strip_ansi(&line.render(5)).contains('('));
}

#[tokio::test]
async fn test_status_with_branch_filter() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let tree = TestTree::new().unwrap();
    tree.repo("A").build().unwrap();
    tree.repo("B").on_branch("bugfix-123").dirty().build().unwrap();

    let mut config = RunConfig::new(tree.root(), Mode::Status);
    config.branch = Some("bugfix-123".to_string());

    let report = handle_run(&config).await.unwrap();
    assert_eq!(report.results().len(), 1);
    assert!(strip_ansi(&report.results()[0]).starts_with("B [bugfix-123](📝)"));
}
