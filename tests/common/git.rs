//! Git testing utilities

use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Runs git in `path`, failing with stderr when it exits non-zero
pub fn git(path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(path).output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Sets up a git repository with user config, checked out on `main`
pub fn setup_git_repo(path: &Path) -> Result<()> {
    git(path, &["init", "-q"])?;

    // Pin the initial branch regardless of the host's init.defaultbranch
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;

    // Disable commit signing for tests
    git(path, &["config", "commit.gpgsign", "false"])?;

    Ok(())
}

/// Creates a test commit in the repository
pub fn create_test_commit(path: &Path, file_name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;
    git(path, &["add", file_name])?;
    git(path, &["commit", "-q", "-m", message])?;
    Ok(())
}

/// Creates and checks out a new branch
pub fn checkout_new_branch(path: &Path, branch: &str) -> Result<()> {
    git(path, &["checkout", "-q", "-b", branch])?;
    Ok(())
}

/// Clones `source` into `dest` and configures the clone for committing
pub fn clone_repo(source: &Path, dest: &Path) -> Result<()> {
    let parent = dest.parent().unwrap_or(dest);
    let source = source.to_string_lossy();
    let dest = dest.to_string_lossy();
    git(parent, &["clone", "-q", &source, &dest])?;

    let dest = Path::new(dest.as_ref());
    git(dest, &["config", "user.name", "Test User"])?;
    git(dest, &["config", "user.email", "test@example.com"])?;
    git(dest, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Creates multiple test repositories in a parent directory
pub fn create_multiple_repos(parent_dir: &Path, count: usize) -> Result<Vec<String>> {
    let mut repo_names = Vec::new();

    for i in 0..count {
        let repo_name = format!("test-repo-{}", i + 1);
        let repo_path = parent_dir.join(&repo_name);
        std::fs::create_dir(&repo_path)?;

        setup_git_repo(&repo_path)?;
        create_test_commit(
            &repo_path,
            "README.md",
            &format!("# Repo {}", i + 1),
            "Initial commit",
        )?;

        repo_names.push(repo_name);
    }

    Ok(repo_names)
}

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
