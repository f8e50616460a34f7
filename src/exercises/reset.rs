//! Exercises 10 and 11: resetting the HEAD pointer, soft and hard.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};

const COMMIT_3_MESSAGE: &str = "Third commit";

const FILE_1: &str = "file1.txt";
const FILE_2: &str = "file2.txt";

const NEW_CONTENT: &str = "My change";

const HASH_KEY: &str = "hash3";

/// The exercise teaching `git reset --soft`.
pub fn build_soft(context: Arc<ExerciseContext>) -> Exercise {
    build(context, true)
}

/// The exercise teaching `git reset --hard`.
pub fn build_hard(context: Arc<ExerciseContext>) -> Exercise {
    build(context, false)
}

fn build(context: Arc<ExerciseContext>, soft: bool) -> Exercise {
    let opt = if soft { "soft" } else { "hard" };
    let text = if soft {
        "- cmd[git reset --soft HEAD~N] to set the HEAD pointer to sv[N] commits back (N could be 0) bold[without changing the file system state]"
    } else {
        "- cmd[git reset --hard HEAD~N] to set the HEAD pointer to sv[N] commits back (N could be 0) and bold[change the file system state as it was on that commit]"
    };

    let topic = format!(
        "Resetting the HEAD pointer to the specified state. Git repo state consists of 2 parts\n\
         \x20- the current position of the HEAD pointer (normally points to the last commit in the repo)\n\
         \x20- the current state of the file system (that is, the actual content of the files)\n\n\
         The cmd[git reset] command changes one or both of these parts - depending on the parameters.\n\
         We will take a look at one of the most useful: opt[--{opt}]."
    );
    let description = format!(
        "Repo has a few commits. You will play with resetting the state and inspecting it afterwards. Use\n{text}\n"
    );

    let task: Box<dyn Task> = if soft {
        Box::new(ResetSoftTask {
            context: context.clone(),
        })
    } else {
        Box::new(ResetHardTask {
            context: context.clone(),
        })
    };

    Exercise::new(
        context,
        ExerciseDef {
            topic,
            tldr: format!("reset the state - {opt}"),
            description,
            tasks: vec![task],
            init_repo: true,
        },
    )
}

/// Builds the shared commit history both reset exercises start from.
async fn setup_history(context: &ExerciseContext, repo: &dyn GitRepo) -> Result<()> {
    commit_all(repo, "Initial").await?;

    context.write_text(FILE_1, "I'm a file - 1st edition\n")?;
    commit_all(repo, "First commit").await?;

    context.write_text(FILE_1, "I'm a file - 2nd edition\n")?;
    commit_all(repo, "Second commit").await?;

    context.write_text(FILE_1, "I'm a file - 3rd edition\n")?;
    let hash = commit_all(repo, COMMIT_3_MESSAGE).await?;
    context.store().put(HASH_KEY, &hash)?;

    context.write_text(FILE_1, "I'm a file - 4th edition\n")?;
    context.write_text(FILE_2, "I'm another file")?;
    commit_all(repo, "Forth commit").await?;
    Ok(())
}

fn shared_before_notes() -> Vec<String> {
    vec![
        "inspect the state - note that there are no changes to commit".to_string(),
        format!("update file fs[{FILE_1}] content - add a new line there: msg[{NEW_CONTENT}]"),
        "check the state (cmd[git status]) - see the file you changed is in the list".to_string(),
    ]
}

struct ResetSoftTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for ResetSoftTask {
    fn description(&self) -> String {
        format!("reset sv[soft] the state to the commit with \"msg[{COMMIT_3_MESSAGE}]\"")
    }

    fn before_notes(&self) -> Vec<String> {
        shared_before_notes()
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            format!("check the state again - note another file fs[{FILE_2}] in the list"),
            format!("check the content of fs[{FILE_1}] - verify that it still contains your change"),
            "* once done and checked - restart the exercise and try doing the reset using the sv[hash] of the commit and not the HEAD ref"
                .to_string(),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link("git reset --soft", "https://git-scm.com/docs/git-reset", ""),
            Hint::link("git log", "https://git-scm.com/docs/git-log", ""),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            "git reset --soft HEAD~1",
            "Resets the tree to the one before the last commit without changing the filesystem state",
        )]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        setup_history(&self.context, repo).await
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let hash = self.context.store().get(HASH_KEY)?;
        let log = repo.log(None).await?;
        let status = repo.status().await?;

        let commits_result = if log.first().map(|entry| entry.hash.clone()) != hash {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected the last commit to be hash[{}]",
                    hash.unwrap_or_default()
                ),
            )
        } else if !status.staged_new().contains(&FILE_2) {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected file fs[{FILE_2}] to be in the created list ({})",
                    status.staged_new().join(", ")
                ),
            )
        } else if !status.modified().contains(&FILE_1) {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected file fs[{FILE_1}] to be in the modified list ({})",
                    status.modified().join(", ")
                ),
            )
        } else {
            TaskResult::pass(self.description())
        };

        let fs_text = format!("change file fs[{FILE_1}]");
        let content = self.context.read_text(FILE_1)?;
        let fs_result = if content.contains(NEW_CONTENT) {
            TaskResult::pass(fs_text)
        } else {
            TaskResult::fail(
                fs_text,
                format!("Expected file fs[{FILE_1}] to contain msg[{NEW_CONTENT}]"),
            )
        };

        Ok(vec![fs_result, commits_result])
    }
}

struct ResetHardTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for ResetHardTask {
    fn description(&self) -> String {
        format!("reset sv[hard] the state to the commit with \"msg[{COMMIT_3_MESSAGE}]\"")
    }

    fn before_notes(&self) -> Vec<String> {
        shared_before_notes()
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            "check the state again - note that the working tree is clean".to_string(),
            format!("check the content of the folder - cmd[ls] - note there is no file fs[{FILE_2}]"),
            format!("check the content of fs[{FILE_1}] - note that your change is gone"),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link("git reset --hard", "https://git-scm.com/docs/git-reset", ""),
            Hint::link("git log", "https://git-scm.com/docs/git-log", ""),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            "git reset --hard HEAD~1",
            "Resets both the tree and the filesystem state to the one before the last commit",
        )]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        setup_history(&self.context, repo).await
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let hash = self.context.store().get(HASH_KEY)?;
        let log = repo.log(None).await?;
        let status = repo.status().await?;

        let result = if log.first().map(|entry| entry.hash.clone()) != hash {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected the last commit to be hash[{}]",
                    hash.unwrap_or_default()
                ),
            )
        } else if !status.is_clean() {
            TaskResult::fail(self.description(), "Expected the working tree to be clean")
        } else {
            TaskResult::pass(self.description())
        };

        Ok(vec![result])
    }
}
