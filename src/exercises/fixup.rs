//! Exercise 7: fixing up commits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};

use super::{message_at, REBASING_WARNING};

const COMMIT_1_MESSAGE: &str = "First commit";
const COMMIT_2_MESSAGE: &str = "Second commit";
const COMMIT_3_MESSAGE: &str = "Third commit";
const COMMIT_4_MESSAGE: &str = "Forth commit";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = format!(
        "Git allows combining a few commits into a single one using the opt[fixup] option in the italic[interactive rebase] mode.\n\
         The content of a commit marked with that option will be added to the previous commit, while its commit message is dropped.\n\
         {REBASING_WARNING}"
    );
    let description = "Repo has 4 commits (#1, #2, #3, #4). You will need to unite commits #2 and #3 \
         into a single commit with the commit message of commit #2.\n\
         There will be 3 commits in total after you are done.\n\
         Use the stress[interactive rebase] and the opt[fixup] option"
        .to_string();

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "fixup commits".to_string(),
            description,
            tasks: vec![Box::new(FixupTask { context })],
            init_repo: true,
        },
    )
}

struct FixupTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for FixupTask {
    fn description(&self) -> String {
        "fixup commit #3 into commit #2".to_string()
    }

    fn after_notes(&self) -> Vec<String> {
        vec!["the new commit should have the commit message of commit #2".to_string()]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git rebase",
                "https://git-scm.com/docs/git-rebase",
                "(use the opt[-i] flag and the opt[fixup] option)",
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
                "f",
                "change old[pick] to new[f] or new[fixup] for commit #3 to melt it into the previous commit",
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

        let fixup_result = if log.len() != 3 {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected to have ok[3] commits, but found bad[{}] commits",
                    log.len()
                ),
            )
        } else {
            TaskResult::pass(self.description())
        };

        let messages_text = "preserve only the message from commit #2";
        let expected = [
            (2, COMMIT_1_MESSAGE, "The first commit message should not have been changed"),
            (1, COMMIT_2_MESSAGE, "The second commit message should be preserved"),
            (0, COMMIT_4_MESSAGE, "The last commit message should be preserved"),
        ];
        let mismatch = expected
            .iter()
            .find(|(index, message, _)| message_at(&log, *index) != *message);
        let messages_result = match mismatch {
            Some((index, message, note)) => TaskResult::fail(
                messages_text,
                format!(
                    "{note}. Expected to be msg[\"{message}\"] but was bad[\"{}\"]",
                    message_at(&log, *index)
                ),
            ),
            None => TaskResult::pass(messages_text),
        };

        Ok(vec![fixup_result, messages_result])
    }
}
