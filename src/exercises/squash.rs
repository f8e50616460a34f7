//! Exercise 6: squashing commits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};

use super::REBASING_WARNING;

const COMMIT_1_MESSAGE: &str = "First commit";
const COMMIT_2_MESSAGE: &str = "Second commit";
const COMMIT_3_MESSAGE: &str = "Third commit";
const COMMIT_4_MESSAGE: &str = "Forth commit";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = format!(
        "Git allows combining a few commits into a single one using the opt[squash] option in the italic[interactive rebase] mode.\n\
         The content of a commit marked with that option will be added to the previous commit, and its commit message\n\
         will be appended to the message of the previous commit.\n\
         {REBASING_WARNING}"
    );
    let description = "Repo has 4 commits. You will need to unite (squash) the 3 last commits \
         into a single commit preserving all the commit messages (so there will be 2 commits in total).\n\
         Use the stress[interactive rebase] and the opt[squash] option"
        .to_string();

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "squash commits".to_string(),
            description,
            tasks: vec![Box::new(SquashTask { context })],
            init_repo: true,
        },
    )
}

struct SquashTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for SquashTask {
    fn description(&self) -> String {
        "squash the 3 last commits".to_string()
    }

    fn after_notes(&self) -> Vec<String> {
        vec!["preserve all the commit messages".to_string()]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git rebase",
                "https://git-scm.com/docs/git-rebase",
                "(use the opt[-i] flag and the opt[squash] option)",
            ),
            Hint::text("to open the rebase editor for the last N commits use HEAD~N"),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![
            Solution::command(
                "git rebase -i HEAD~3",
                "Enters the interactive rebase mode and opens an editor",
            ),
            Solution::command(
                "s",
                "change old[pick] to new[s] or new[squash] for the 2 last commits to squash them into a previous commit",
            ),
            Solution::command("ESC", "switch to non-interactive (command) mode in vim"),
            Solution::command(":wq", "write and quit command in vim (press Enter)"),
        ]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        let text_file = "file.txt";

        self.context.write_text(text_file, "I'm a file - 1st edition")?;
        commit_all(repo, COMMIT_1_MESSAGE).await?;

        self.context
            .write_text(text_file, "I'm a good file - 2nd edition")?;
        commit_all(repo, COMMIT_2_MESSAGE).await?;

        self.context
            .write_text(text_file, "I'm a cool file - 3rd edition")?;
        commit_all(repo, COMMIT_3_MESSAGE).await?;

        self.context
            .write_text(text_file, "I'm a great file - 4th edition")?;
        commit_all(repo, COMMIT_4_MESSAGE).await?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let log = repo.log(None).await?;

        let squash_result = if log.len() != 2 {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected to have ok[2] commits, but found bad[{}] commits",
                    log.len()
                ),
            )
        } else {
            TaskResult::pass(self.description())
        };

        let preserve_text = "preserve all commit messages";
        let combined = format!("{}\n{}", log[0].message, log[0].body);
        let missing = [COMMIT_2_MESSAGE, COMMIT_3_MESSAGE, COMMIT_4_MESSAGE]
            .into_iter()
            .find(|message| !combined.contains(message));
        let preserve_result = match missing {
            Some(message) => TaskResult::fail(
                preserve_text,
                format!(
                    "The original commit message is missing in \"msg[{combined}]\" \
                     (expected to have the \"sv[{message}]\" part)"
                ),
            ),
            None => TaskResult::pass(preserve_text),
        };

        Ok(vec![squash_result, preserve_result])
    }
}
