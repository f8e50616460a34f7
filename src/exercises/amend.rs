//! Exercise 4: amending the last commit.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};

use super::REBASING_WARNING;

const FIRST_FILE: &str = "file1.txt";
const SECOND_FILE: &str = "file2.txt";
const TARGET_BRANCH: &str = "main";
const ORIGINAL_MESSAGE: &str = "Original message";
const EXPECTED_MESSAGE: &str = "New message";

const SECOND_FILE_KEY: &str = "secondFileExists";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = format!(
        "Sometimes we want to change the last commit because we forgot to commit one of the changes and\n\
         just want to add another change to the same commit.\n\
         Git allows doing so easily using the opt[--amend] option. This option will update the last commit with the current changes.\n\
         {REBASING_WARNING}"
    );
    let description = format!(
        "Repo has a single branch \"{TARGET_BRANCH}\" with a single commit with a message msg[\"{ORIGINAL_MESSAGE}\"]. \
         You will need to amend this commit."
    );

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "amend last commit".to_string(),
            description,
            tasks: vec![
                Box::new(CreateFileTask {
                    context: context.clone(),
                }),
                Box::new(AmendCommitTask { context }),
            ],
            init_repo: true,
        },
    )
}

struct CreateFileTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for CreateFileTask {
    fn description(&self) -> String {
        format!("create a new file named fs[{SECOND_FILE}] in that folder")
    }

    fn before_notes(&self) -> Vec<String> {
        vec![
            "check the repo status to make sure it's clean".to_string(),
            "check the repo status between each of the following actions to see how git sees the state"
                .to_string(),
        ]
    }

    fn after_notes(&self) -> Vec<String> {
        vec!["check the repo status to see the new untracked file".to_string()]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![Hint::link(
            "git status",
            "https://git-scm.com/docs/git-status",
            "(for showing the local repo status)",
        )]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            format!("touch {SECOND_FILE}"),
            "Touches (accesses/creates if not exists) a file",
        )]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        Ok(())
    }

    async fn check(&self, _repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let exists = self.context.folder_path().join(SECOND_FILE).exists();
        self.context
            .store()
            .put(SECOND_FILE_KEY, &exists.to_string())?;

        let result = if exists {
            TaskResult::pass(self.description())
        } else {
            TaskResult::fail(
                self.description(),
                format!("Expected to have file {SECOND_FILE}, but it is missing"),
            )
        };
        Ok(vec![result])
    }
}

struct AmendCommitTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for AmendCommitTask {
    fn description(&self) -> String {
        format!(
            "commit it to Git bold[amending] the existing commit italic[(that is, \"adding\" this change to the existing commit)]\n\
             and also changing the commit message to \"msg[{EXPECTED_MESSAGE}]\""
        )
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            "inspect the commit id (hash) before amending it and after - check if it changed"
                .to_string(),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git add",
                "https://git-scm.com/docs/git-add",
                "(for making untracked files be tracked by adding to git repo)",
            ),
            Hint::link(
                "git commit",
                "https://git-scm.com/docs/git-commit",
                "(check the opt[--amend] flag)",
            ),
            Hint::link(
                "git log",
                "https://git-scm.com/docs/git-log",
                "(view commits history)",
            ),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![
            Solution::command(
                format!("git add {SECOND_FILE}"),
                "Adds an untracked/modified file to git repo",
            ),
            Solution::command(
                format!("git commit --amend -m \"{EXPECTED_MESSAGE}\""),
                "Commits changes to the git by amending the last commit and changing its message",
            ),
            Solution::command("git log", "Shows the git repo commits (history)"),
        ]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        repo.rename_branch(TARGET_BRANCH).await?;
        self.context.write_text(FIRST_FILE, "I'm file #1")?;
        commit_all(repo, ORIGINAL_MESSAGE).await?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let amend_text = "amending an existing commit";
        let reword_text = "changing the original commit message";

        let status = repo.status().await?;
        let log = repo.log(None).await?;

        let amend_result = if !status.untracked().is_empty() {
            TaskResult::fail(
                amend_text,
                format!(
                    "expected to have a clean tree but there are some untracked files: {}",
                    status.untracked().join(",")
                ),
            )
        } else if !status.staged_new().is_empty() {
            TaskResult::fail(
                amend_text,
                format!(
                    "expected to have a clean tree but there are some not committed files: {}",
                    status.staged_new().join(",")
                ),
            )
        } else if log.len() != 1 {
            TaskResult::fail(
                amend_text,
                format!(
                    "Expected to have a single commit, but found bad[{}] commits",
                    log.len()
                ),
            )
        } else if self.context.store().get(SECOND_FILE_KEY)?.as_deref() == Some("true") {
            TaskResult::pass(amend_text)
        } else {
            TaskResult::fail_unexplained(amend_text)
        };

        let reword_result = if log[0].message != EXPECTED_MESSAGE {
            TaskResult::fail(
                reword_text,
                format!(
                    "Expected the commit message to be msg[{EXPECTED_MESSAGE}], but it is msg[{}]",
                    log[0].message
                ),
            )
        } else {
            TaskResult::pass(reword_text)
        };

        Ok(vec![amend_result, reword_result])
    }
}
