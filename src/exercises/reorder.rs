//! Exercise 8: reordering commits.

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
        "Sometimes we want to change the order of the commits - to organize them better, or as a preparation for a squash for example.\n\
         This is possible to do in the italic[interactive rebase] mode by changing the order of the lines in the editor.\n\
         {REBASING_WARNING}"
    );
    let description = "You will need to change the order of the commits without changing commit content or message.\n\
         Use the stress[interactive rebase] and the opt[pick] option.\n\
         Note: you just need to reorder lines of commits (action and commit id, the description is ignored in that mode)."
        .to_string();

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "change commits order".to_string(),
            description,
            tasks: vec![Box::new(ReorderTask { context })],
            init_repo: true,
        },
    )
}

struct ReorderTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for ReorderTask {
    fn description(&self) -> String {
        format!(
            "move the commit with message \"msg[{COMMIT_2_1_MESSAGE}]\" to be before the commit with message \"msg[{COMMIT_1_2_MESSAGE}]\""
        )
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            "inspect commit hashes before and after re-ordering".to_string(),
            format!(
                "after you did the first re-ordering, try to do another one - try to move the commit with\n\
                 message \"msg[{COMMIT_2_2_MESSAGE}]\" to be before the commit with message \"msg[{COMMIT_2_1_MESSAGE}]\" - this will fail. Why?"
            ),
            "read the instructions that will be printed when the rebase failed - they explain the options to progress from that point"
                .to_string(),
            "run cmd[git status] when the rebase attempt failed - inspect the status".to_string(),
            "see the current branch name when the rebase failed - note that it is a commit hash (not the original branch) - that's because sv[HEAD] points to that commit now"
                .to_string(),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git rebase",
                "https://git-scm.com/docs/git-rebase",
                "(use the opt[-i] flag and the opt[pick] option - just re-order the relevant lines)",
            ),
            Hint::text("to open the rebase editor for the last N commits use HEAD~N"),
            Hint::link(
                "git rebase --abort",
                "https://git-scm.com/docs/git-rebase",
                "(to abort the in-progress rebase - basically, when it failed to complete)",
            ),
            Hint::text("in the Vim editor the cmd[yy] command copies the current line into a clipboard"),
            Hint::text("in the Vim editor the cmd[p] command pastes the value from the clipboard as the next line"),
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
                "reorder lines - essentially create a new line - msg[pick HASH] (where hash[HASH] is the hash\n\
                 of the \"msg[{COMMIT_2_1_MESSAGE}]\" commit) - before the line of the \"msg[{COMMIT_1_2_MESSAGE}]\" commit"
            )),
            Solution::command("ESC", "switch to non-interactive (command) mode in vim"),
            Solution::command(":wq", "write and quit command in vim (press Enter)"),
            Solution::note(format!(
                "Moving the commit \"msg[{COMMIT_2_2_MESSAGE}]\" to be before the commit with message \"msg[{COMMIT_2_1_MESSAGE}]\"\n\
                 failed because both commits changed the same line in the same file - Git stores\n\
                 the delta (change) vs. the previous state of the same file. Thus the second\n\
                 commit relies on the state created by the first one - they can't be reordered."
            )),
        ]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        commit_all(repo, COMMIT_INIT_MESSAGE).await?;

        let file1 = "file1.txt";
        self.context.write_text(file1, "I'm file #1 - 1st edition")?;
        let hash = commit_all(repo, COMMIT_1_1_MESSAGE).await?;
        self.context.store().put(HASH_KEY, &hash)?;

        self.context.write_text(file1, "I'm file #1 - 2nd edition")?;
        commit_all(repo, COMMIT_1_2_MESSAGE).await?;

        let file2 = "file2.txt";
        self.context.write_text(file2, "I'm file #2 - 1st edition")?;
        commit_all(repo, COMMIT_2_1_MESSAGE).await?;

        self.context.write_text(file2, "I'm file #2 - 2nd edition")?;
        commit_all(repo, COMMIT_2_2_MESSAGE).await?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let log = repo.log(None).await?;
        let hash = self.context.store().get(HASH_KEY)?;

        let result = if log.len() != 5 {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected to keep all ok[5] commits, but found bad[{}] commits",
                    log.len()
                ),
            )
        } else if log.get(3).map(|entry| entry.hash.clone()) != hash {
            TaskResult::fail(
                self.description(),
                format!(
                    "Commit msg[{COMMIT_1_1_MESSAGE}] should not have been changed but its hash changed"
                ),
            )
        } else if message_at(&log, 0) != COMMIT_2_2_MESSAGE
            || message_at(&log, 1) != COMMIT_1_2_MESSAGE
            || message_at(&log, 2) != COMMIT_2_1_MESSAGE
        {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected this order of commits [in under[descending] order]:\n\
                     \x20 - {COMMIT_2_2_MESSAGE}\n\
                     \x20 - {COMMIT_1_2_MESSAGE}\n\
                     \x20 - {COMMIT_2_1_MESSAGE}\n\
                     \x20 - {COMMIT_1_1_MESSAGE}\n\
                     \x20 - {COMMIT_INIT_MESSAGE}\n\
                     \nbut the actual order is:\n\
                     \x20 - {}\n\
                     \x20 - {}\n\
                     \x20 - {}\n\
                     \x20 - {}\n\
                     \x20 - {}\n",
                    order_line(&log, 0, COMMIT_2_2_MESSAGE),
                    order_line(&log, 1, COMMIT_1_2_MESSAGE),
                    order_line(&log, 2, COMMIT_2_1_MESSAGE),
                    order_line(&log, 3, COMMIT_1_1_MESSAGE),
                    order_line(&log, 4, COMMIT_INIT_MESSAGE),
                ),
            )
        } else {
            TaskResult::pass(self.description())
        };

        Ok(vec![result])
    }
}
