//! Exercise 9: deleting commits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};

use super::{message_at, order_line, REBASING_WARNING};

const COMMIT_INIT_MESSAGE: &str = "Initial commit";
const COMMIT_1_1_MESSAGE: &str = "Update file1 - 1st edition";
const COMMIT_1_2_MESSAGE: &str = "Update file1 - 2nd edition";
const COMMIT_2_1_MESSAGE: &str = "Update file2 - 1st edition";
const COMMIT_2_2_MESSAGE: &str = "Update file2 - 2nd edition";

const HASH_KEY: &str = "hash";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = format!(
        "Git allows removing (deleting) some commits - via the italic[interactive rebase] mode.\n\
         Note that it is not always possible - specifically if a following commit relies on the one you are trying to delete.\n\
         {REBASING_WARNING}"
    );
    let description = "You will need to simply delete some commits.\n\
         Use the stress[interactive rebase] and just delete the relevant lines."
        .to_string();

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "delete commits".to_string(),
            description,
            tasks: vec![Box::new(DeleteTask { context })],
            init_repo: true,
        },
    )
}

struct DeleteTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for DeleteTask {
    fn description(&self) -> String {
        format!(
            "delete the commits with these messages: msg[\"{COMMIT_1_2_MESSAGE}\"] and msg[\"{COMMIT_2_2_MESSAGE}\"]"
        )
    }

    fn after_notes(&self) -> Vec<String> {
        vec!["inspect commit hashes before and after the deletion".to_string()]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git rebase",
                "https://git-scm.com/docs/git-rebase",
                "(use the opt[-i] flag - just delete the relevant lines)",
            ),
            Hint::text("to open the rebase editor for the last N commits use HEAD~N"),
            Hint::text("in the Vim editor cmd[dd] deletes the current line"),
            Hint::link(
                "vim (editor) Cheat Sheet",
                "https://vim.rtorr.com/",
                "(help for editing the lines in Vim)",
            ),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![
            Solution::command(
                "git rebase -i HEAD~4",
                "Enters the interactive rebase mode and opens an editor with the last 4 commits",
            ),
            Solution::note(format!(
                "press cmd[dd] on the lines with msg[\"{COMMIT_1_2_MESSAGE}\"] and msg[\"{COMMIT_2_2_MESSAGE}\"]"
            )),
            Solution::command("ESC", "switch to non-interactive (command) mode in vim"),
            Solution::command(":wq", "write and quit command in vim (press Enter)"),
        ]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        commit_all(repo, COMMIT_INIT_MESSAGE).await?;

        let file1 = "file1.txt";
        let file2 = "file2.txt";
        self.context.write_text(file1, "I'm file #1 - 1st edition")?;
        let hash = commit_all(repo, COMMIT_1_1_MESSAGE).await?;
        self.context.store().put(HASH_KEY, &hash)?;

        self.context.write_text(file1, "I'm file #1 - 2nd edition")?;
        commit_all(repo, COMMIT_1_2_MESSAGE).await?;

        self.context.write_text(file2, "I'm file #2 - 1st edition")?;
        commit_all(repo, COMMIT_2_1_MESSAGE).await?;

        self.context.write_text(file2, "I'm file #2 - 2nd edition")?;
        commit_all(repo, COMMIT_2_2_MESSAGE).await?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let log = repo.log(None).await?;
        let hash = self.context.store().get(HASH_KEY)?;

        let result = if log.len() != 3 {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected to have ok[3] commits, but found bad[{}] commits",
                    log.len()
                ),
            )
        } else if log.get(1).map(|entry| entry.hash.clone()) != hash {
            TaskResult::fail(
                self.description(),
                format!(
                    "Commit msg[{COMMIT_1_1_MESSAGE}] should not have been changed but its hash changed"
                ),
            )
        } else if message_at(&log, 0) != COMMIT_2_1_MESSAGE
            || message_at(&log, 2) != COMMIT_INIT_MESSAGE
        {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected to have these commits [in under[descending] order]:\n\
                     \x20 - {COMMIT_2_1_MESSAGE}\n\
                     \x20 - {COMMIT_1_1_MESSAGE}\n\
                     \x20 - {COMMIT_INIT_MESSAGE}\n\
                     \nbut actually having these:\n\
                     \x20 - {}\n\
                     \x20 - {}\n\
                     \x20 - {}\n",
                    order_line(&log, 0, COMMIT_2_1_MESSAGE),
                    order_line(&log, 1, COMMIT_1_1_MESSAGE),
                    order_line(&log, 2, COMMIT_INIT_MESSAGE),
                ),
            )
        } else {
            TaskResult::pass(self.description())
        };

        Ok(vec![result])
    }
}
