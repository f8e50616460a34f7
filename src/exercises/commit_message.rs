//! Exercise 5: rewording the last commit message.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};

use super::REBASING_WARNING;

const ORIGINAL_MESSAGE: &str = "Original message";
const EXPECTED_MESSAGE: &str = "New message";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = format!(
        "Sometimes we want to change the last commit message, because of a typo for example. Git allows doing so using the opt[--amend] option.\n\
         Note that in general changing commit messages (not only the last one) is possible using the italic[interactive rebase] - cmd[git rebase -i]\n\
         and the opt[reword] option there.\n\
         {REBASING_WARNING}"
    );
    let description = format!(
        "Repo has a single commit with a message msg[\"{ORIGINAL_MESSAGE}\"] that you will need to change"
    );

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "change last commit message".to_string(),
            description,
            tasks: vec![Box::new(ChangeCommitMessageTask { context })],
            init_repo: true,
        },
    )
}

struct ChangeCommitMessageTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for ChangeCommitMessageTask {
    fn description(&self) -> String {
        format!("change the last commit message to bold[{EXPECTED_MESSAGE}]")
    }

    fn after_notes(&self) -> Vec<String> {
        vec!["try to do it interactively - without using the \"-m\" flag".to_string()]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git commit",
                "https://git-scm.com/docs/git-commit",
                "(check the opt[--amend] flag)",
            ),
            Hint::link(
                "vim (editor) Cheat Sheet",
                "https://vim.rtorr.com/",
                "(help for editing the message in Vim)",
            ),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![
            Solution::command(
                "git commit --amend",
                "Enters the editor to edit the last commit message",
            ),
            Solution::command("i", "switch to interactive (allowing to enter text) mode in vim"),
            Solution::command("ESC", "switch to non-interactive (command) mode in vim"),
            Solution::command(":wq", "write and quit command in vim (press Enter)"),
        ]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        self.context.write_text("file.txt", "I'm a file")?;
        commit_all(repo, ORIGINAL_MESSAGE).await?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let text = "changing the original commit message";
        let log = repo.log(None).await?;

        let result = if log.len() != 1 {
            TaskResult::fail(
                text,
                format!(
                    "Expected to have a single commit, but found bad[{}] commits",
                    log.len()
                ),
            )
        } else if log[0].message != EXPECTED_MESSAGE {
            TaskResult::fail(
                text,
                format!(
                    "Expected the commit message to be ok[\"{EXPECTED_MESSAGE}\"], but it is bad[\"{}\"]",
                    log[0].message
                ),
            )
        } else {
            TaskResult::pass(text)
        };
        Ok(vec![result])
    }
}
