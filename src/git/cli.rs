//! Subprocess-backed implementation of the repository seam.

use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

use super::{CommitEntry, GitRepo, RepoStatus, StatusEntry};

/// Field and record separators for the log format string.
const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';

/// Runs `git` against a fixed working folder.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Creates a handle for the repository at `workdir`.
    ///
    /// The folder does not have to be a repository yet; `init` makes it one.
    pub fn open(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Returns the working folder this handle operates on.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    async fn output(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(args = ?args, workdir = ?self.workdir, "running git");
        let output = Command::new("git")
            .current_dir(&self.workdir)
            .args(args)
            .output()
            .await?;
        Ok(output)
    }

    /// Runs git and returns stdout, failing on a non-zero exit status.
    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or(""),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl GitRepo for GitCli {
    async fn init(&self) -> Result<()> {
        self.run(&["init"]).await?;
        Ok(())
    }

    async fn is_repo_root(&self) -> Result<bool> {
        let output = self.output(&["rev-parse", "--show-toplevel"]).await?;
        if !output.status.success() {
            return Ok(false);
        }
        let toplevel = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        // Canonicalize both sides so symlinked temp folders compare equal.
        let toplevel = toplevel.canonicalize().unwrap_or(toplevel);
        let workdir = self
            .workdir
            .canonicalize()
            .unwrap_or_else(|_| self.workdir.clone());
        Ok(toplevel == workdir)
    }

    async fn set_user(&self, name: &str, email: &str) -> Result<()> {
        self.run(&["config", "user.name", name]).await?;
        self.run(&["config", "user.email", email]).await?;
        Ok(())
    }

    async fn rename_branch(&self, name: &str) -> Result<()> {
        self.run(&["branch", "-m", name]).await?;
        Ok(())
    }

    async fn add_all(&self) -> Result<()> {
        self.run(&["add", "."]).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<String> {
        self.run(&["commit", "-m", message]).await?;
        let hash = self.run(&["rev-parse", "HEAD"]).await?;
        Ok(hash.trim().to_string())
    }

    async fn log(&self, branch: Option<&str>) -> Result<Vec<CommitEntry>> {
        let format = format!("--format=%H{FIELD_SEP}%s{FIELD_SEP}%b{RECORD_SEP}");
        let mut args = vec!["log", format.as_str()];
        if let Some(branch) = branch {
            args.push(branch);
        }
        let raw = self.run(&args).await?;
        Ok(parse_log(&raw))
    }

    async fn status(&self) -> Result<RepoStatus> {
        let raw = self
            .run(&["status", "--porcelain=v1", "--branch", "-uall"])
            .await?;
        Ok(parse_status(&raw))
    }

    async fn branches(&self) -> Result<Vec<String>> {
        let raw = self
            .run(&["branch", "--format=%(refname:short)"])
            .await?;
        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    async fn check_ignore(&self, paths: &[&str]) -> Result<Vec<String>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }
        let mut args = vec!["check-ignore", "--"];
        args.extend_from_slice(paths);
        let output = self.output(&args).await?;
        // Exit code 1 means "no path is ignored", which is a normal answer.
        match output.status.code() {
            Some(0) | Some(1) => Ok(String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(String::from)
                .collect()),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(Error::Git(format!(
                    "git check-ignore failed: {}",
                    stderr.trim()
                )))
            }
        }
    }

    async fn checkout(&self, target: &str) -> Result<()> {
        self.run(&["checkout", target]).await?;
        Ok(())
    }

    async fn create_branch(&self, name: &str) -> Result<()> {
        self.run(&["checkout", "-b", name]).await?;
        Ok(())
    }
}

fn parse_log(raw: &str) -> Vec<CommitEntry> {
    raw.split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_matches(['\n', ' ']);
            if record.is_empty() {
                return None;
            }
            let mut fields = record.splitn(3, FIELD_SEP);
            let hash = fields.next()?.trim().to_string();
            let message = fields.next().unwrap_or("").to_string();
            let body = fields.next().unwrap_or("").trim_end().to_string();
            Some(CommitEntry {
                hash,
                message,
                body,
            })
        })
        .collect()
}

fn parse_status(raw: &str) -> RepoStatus {
    let mut status = RepoStatus::default();
    for line in raw.lines() {
        if let Some(branch_line) = line.strip_prefix("## ") {
            status.current = parse_branch_header(branch_line);
            continue;
        }
        let mut chars = line.chars();
        let (Some(index), Some(worktree), Some(' ')) =
            (chars.next(), chars.next(), chars.next())
        else {
            continue;
        };
        status.entries.push(StatusEntry {
            index,
            worktree,
            path: chars.as_str().to_string(),
        });
    }
    status
}

fn parse_branch_header(header: &str) -> Option<String> {
    if header.starts_with("HEAD (no branch)") {
        return None;
    }
    let header = header.strip_prefix("No commits yet on ").unwrap_or(header);
    let name = header.split("...").next().unwrap_or(header).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_log_records() {
        let raw = format!(
            "abc123{FIELD_SEP}Second commit{FIELD_SEP}{RECORD_SEP}\n\
             def456{FIELD_SEP}First commit{FIELD_SEP}some body\n{RECORD_SEP}\n"
        );
        let log = parse_log(&raw);

        assert_eq!(log.len(), 2);
        assert_eq!(log[0].hash, "abc123");
        assert_eq!(log[0].message, "Second commit");
        assert_eq!(log[0].body, "");
        assert_eq!(log[1].message, "First commit");
        assert_eq!(log[1].body, "some body");
    }

    #[test]
    fn parses_porcelain_status() {
        let raw = "## main...origin/main\n M file1.txt\nA  file2.txt\n?? junk.txt\n";
        let status = parse_status(raw);

        assert_eq!(status.current.as_deref(), Some("main"));
        assert_eq!(status.modified(), vec!["file1.txt"]);
        assert_eq!(status.staged_new(), vec!["file2.txt"]);
        assert_eq!(status.untracked(), vec!["junk.txt"]);
    }

    #[test]
    fn parses_unborn_branch_header() {
        let status = parse_status("## No commits yet on ex1\n?? something.txt\n");
        assert_eq!(status.current.as_deref(), Some("ex1"));
        assert!(!status.is_clean());
    }

    #[test]
    fn detached_head_has_no_current_branch() {
        let status = parse_status("## HEAD (no branch)\n");
        assert_eq!(status.current, None);
        assert!(status.is_clean());
    }
}
