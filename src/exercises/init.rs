//! Exercise 1: initializing a repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::GitRepo;

const SOME_FILE: &str = "something.txt";
const COMMIT_MESSAGE: &str = "Very first commit";
const TARGET_BRANCH: &str = "main";

/// Store key recording whether the sandbox became a repository.
///
/// The later tasks of this exercise can only be verified once the first one
/// passed, so its check records the answer for them.
const IS_REPO_KEY: &str = "isRepo";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = "A folder is a italic[Git repo root] when it contains a special folder fs[.git] with Git system files.\n\
        Git will track all the files and sub-folders of this folder as part of a Git repo.\n\
        When you clone a remote repo, git creates the folder automatically.\n\
        When you need to make some folder a Git repo root, use the cmd[git init] command\n"
        .to_string();

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "initialize git repo".to_string(),
            description: "You will need to make it a git repo and commit files into it.".to_string(),
            tasks: vec![
                Box::new(InitRepoTask {
                    context: context.clone(),
                }),
                Box::new(AddChangesTask {
                    context: context.clone(),
                }),
                Box::new(CommitTask {
                    context: context.clone(),
                }),
                Box::new(RenameBranchTask { context }),
            ],
            init_repo: false,
        },
    )
}

fn is_repo_confirmed(context: &ExerciseContext) -> Result<bool> {
    Ok(context.store().get(IS_REPO_KEY)?.as_deref() == Some("true"))
}

struct InitRepoTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for InitRepoTask {
    fn description(&self) -> String {
        format!(
            "initializing repo ({} is a repo root)",
            self.context.folder_name()
        )
    }

    fn hints(&self) -> Vec<Hint> {
        vec![Hint::link(
            "git init",
            "https://git-scm.com/docs/git-init",
            "(initialization)",
        )]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            "git init",
            "Creates a new .git folder (with relevant git content) under the current folder, \
             which makes this folder a git repo root",
        )]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let is_repo = repo.is_repo_root().await?;
        self.context
            .store()
            .put(IS_REPO_KEY, &is_repo.to_string())?;

        let result = if is_repo {
            TaskResult::pass(self.description())
        } else {
            TaskResult::fail(
                self.description(),
                format!(
                    "folder {} is not a git repo root",
                    self.context.folder_name()
                ),
            )
        };
        Ok(vec![result])
    }
}

struct AddChangesTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for AddChangesTask {
    fn description(&self) -> String {
        "add the existing file to be committed (add to git)".to_string()
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            "it contains a special fs[.gitignore] file - you should commit it to the repo as well"
                .to_string(),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![Hint::link(
            "git add",
            "https://git-scm.com/docs/git-add",
            "(for making unversioned files versioned by adding to git repo)",
        )]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![
            Solution::command(
                format!("git add {SOME_FILE}"),
                "Adds an untracked file to git repo",
            ),
            Solution::command(
                "git add .",
                "Adds all the untracked files in the current folder (recursively) to git repo",
            ),
        ]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        self.context.write_text(SOME_FILE, "Hello, Git world!")
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        if !is_repo_confirmed(&self.context)? {
            return Ok(vec![TaskResult::fail_unexplained(self.description())]);
        }

        let status = repo.status().await?;
        let result = if status.untracked().contains(&SOME_FILE) {
            TaskResult::fail(
                self.description(),
                format!("File {SOME_FILE} is not added to git"),
            )
        } else {
            TaskResult::pass(self.description())
        };
        Ok(vec![result])
    }
}

struct CommitTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for CommitTask {
    fn description(&self) -> String {
        format!("commit the added changes (new file) to git with message \"msg[{COMMIT_MESSAGE}]\"")
    }

    fn hints(&self) -> Vec<Hint> {
        vec![Hint::link(
            "git commit",
            "https://git-scm.com/docs/git-commit",
            "(for committing the changes to a repo)",
        )]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            format!("git commit -m \"{COMMIT_MESSAGE}\""),
            "Commits changes to the current branch",
        )]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        if !is_repo_confirmed(&self.context)? {
            return Ok(vec![TaskResult::fail_unexplained(self.description())]);
        }

        // A repo without commits makes `git log` fail; that is the learner
        // not being done yet, not an infrastructure problem.
        let log = match repo.log(None).await {
            Ok(log) => log,
            Err(e) => {
                return Ok(vec![TaskResult::fail(
                    self.description(),
                    format!("Failed to get git log: bad[{e}]"),
                )]);
            }
        };
        let status = repo.status().await?;

        let result = if status.staged_new().contains(&SOME_FILE) {
            TaskResult::fail(
                self.description(),
                format!("File {SOME_FILE} is expected to be committed but it is only staged"),
            )
        } else if log[0].message.to_lowercase() != COMMIT_MESSAGE.to_lowercase() {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected commit message: \"ok[{COMMIT_MESSAGE}]\", actual: \"bad[{}]\"",
                    log[0].message
                ),
            )
        } else if log.len() != 1 {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected to have a single commit, but found bad[{}] commits",
                    log.len()
                ),
            )
        } else {
            TaskResult::pass(self.description())
        };
        Ok(vec![result])
    }
}

struct RenameBranchTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for RenameBranchTask {
    fn description(&self) -> String {
        format!("change the name of the old[master] branch to new[{TARGET_BRANCH}]")
    }

    fn hints(&self) -> Vec<Hint> {
        vec![Hint::link(
            "git branch",
            "https://git-scm.com/docs/git-branch",
            "(find the rename option)",
        )]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            format!("git branch -m {TARGET_BRANCH}"),
            format!(
                "Renames the current branch to the provided name (\"{TARGET_BRANCH}\" in this case)"
            ),
        )]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        if !is_repo_confirmed(&self.context)? {
            return Ok(vec![TaskResult::fail_unexplained(self.description())]);
        }

        let status = repo.status().await?;
        let branches = repo.branches().await?;

        let result = if status.current.as_deref() != Some(TARGET_BRANCH) {
            TaskResult::fail(
                self.description(),
                format!(
                    "expected to be \"ok[{TARGET_BRANCH}]\" but is \"bad[{}]\"",
                    status.current.as_deref().unwrap_or("???")
                ),
            )
        } else if branches.len() != 1 {
            TaskResult::fail(
                self.description(),
                format!(
                    "expected to have a single branch but found bad[{}] branches",
                    branches.len()
                ),
            )
        } else {
            TaskResult::pass(self.description())
        };
        Ok(vec![result])
    }
}
