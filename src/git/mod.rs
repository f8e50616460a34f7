//! Repository access seam.
//!
//! Exercises talk to the sandbox repository exclusively through the
//! [`GitRepo`] trait so the orchestration layer can be exercised against an
//! in-memory fake, while the binary wires in the [`GitCli`] subprocess
//! implementation.

mod cli;

pub use cli::GitCli;

use async_trait::async_trait;

use crate::error::Result;

/// A single commit as reported by the log query, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEntry {
    /// Full commit hash.
    pub hash: String,
    /// Subject line of the commit message.
    pub message: String,
    /// Message body (empty for single-line messages).
    pub body: String,
}

/// One porcelain status entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Index (staging area) state letter.
    pub index: char,
    /// Working tree state letter.
    pub worktree: char,
    /// Path relative to the repository root.
    pub path: String,
}

/// Snapshot of the repository working state.
#[derive(Debug, Clone, Default)]
pub struct RepoStatus {
    /// Current branch name, `None` when HEAD is detached.
    pub current: Option<String>,
    /// All non-clean paths.
    pub entries: Vec<StatusEntry>,
}

impl RepoStatus {
    /// Paths git does not track yet.
    pub fn untracked(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.index == '?' && e.worktree == '?')
            .map(|e| e.path.as_str())
            .collect()
    }

    /// Paths added to the index but not committed.
    pub fn staged_new(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.index == 'A')
            .map(|e| e.path.as_str())
            .collect()
    }

    /// Tracked paths with uncommitted modifications.
    pub fn modified(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.index == 'M' || e.worktree == 'M')
            .map(|e| e.path.as_str())
            .collect()
    }

    /// True when the working tree has no changes of any kind.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Narrow interface over the sandbox repository.
///
/// Mutating operations are used by task setup; queries by task checks.
/// Implementations report fatal tool failures as [`crate::Error::Git`];
/// "negative" answers (not a repo, nothing ignored) are regular values.
#[async_trait]
pub trait GitRepo: Send + Sync {
    /// Initializes a new repository in the working folder.
    async fn init(&self) -> Result<()>;

    /// Returns true when the working folder is the root of a repository.
    async fn is_repo_root(&self) -> Result<bool>;

    /// Sets the local committer identity for the repository.
    async fn set_user(&self, name: &str, email: &str) -> Result<()>;

    /// Renames the current branch.
    async fn rename_branch(&self, name: &str) -> Result<()>;

    /// Stages every change under the working folder.
    async fn add_all(&self) -> Result<()>;

    /// Commits staged changes and returns the new commit hash.
    async fn commit(&self, message: &str) -> Result<String>;

    /// Returns commits reachable from `branch` (or HEAD), newest first.
    async fn log(&self, branch: Option<&str>) -> Result<Vec<CommitEntry>>;

    /// Returns the current branch and porcelain status entries.
    async fn status(&self) -> Result<RepoStatus>;

    /// Returns the local branch names.
    async fn branches(&self) -> Result<Vec<String>>;

    /// Returns the subset of `paths` that is ignored.
    ///
    /// An empty result means nothing is ignored; it is not an error.
    async fn check_ignore(&self, paths: &[&str]) -> Result<Vec<String>>;

    /// Checks out a branch or commit.
    async fn checkout(&self, target: &str) -> Result<()>;

    /// Creates a new branch at HEAD and switches to it.
    async fn create_branch(&self, name: &str) -> Result<()>;
}

/// Stages everything and commits it, returning the new commit hash.
///
/// Task setups use this to build commit histories in one step.
pub async fn commit_all(repo: &dyn GitRepo, message: &str) -> Result<String> {
    repo.add_all().await?;
    repo.commit(message).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: char, worktree: char, path: &str) -> StatusEntry {
        StatusEntry {
            index,
            worktree,
            path: path.to_string(),
        }
    }

    #[test]
    fn status_classifies_entries() {
        let status = RepoStatus {
            current: Some("main".to_string()),
            entries: vec![
                entry('?', '?', "untracked.txt"),
                entry('A', ' ', "staged.txt"),
                entry(' ', 'M', "edited.txt"),
                entry('M', ' ', "staged_edit.txt"),
            ],
        };

        assert_eq!(status.untracked(), vec!["untracked.txt"]);
        assert_eq!(status.staged_new(), vec!["staged.txt"]);
        assert_eq!(status.modified(), vec!["edited.txt", "staged_edit.txt"]);
        assert!(!status.is_clean());
    }

    #[test]
    fn empty_status_is_clean() {
        let status = RepoStatus::default();
        assert!(status.is_clean());
        assert!(status.untracked().is_empty());
    }
}
