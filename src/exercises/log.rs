//! Exercise 2: reading the commit history.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};
use crate::prompt;

const COMMIT_1_MESSAGE: &str = "First commit";
const COMMIT_2_MESSAGE: &str = "Second commit";
const COMMIT_3_MESSAGE: &str = "Third commit";

const HASH_KEY: &str = "hash";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = "To see the git commit history git provides the cmd[git log] command that shows the commits from the last to the first,\n\
        providing basic information - such as commit hash, message and the list of pointers (like HEAD or branch pointers) pointing to that commit"
        .to_string();
    let description = "Repo has 3 commits. You will need to find out the hash (commit id) of commit #2.\n\
         Use cmd[git log] to help you with that."
        .to_string();

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "find commit hash".to_string(),
            description,
            tasks: vec![Box::new(LogTask { context })],
            init_repo: true,
        },
    )
}

struct LogTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for LogTask {
    fn description(&self) -> String {
        format!("find out the hash of the commit with message msg[{COMMIT_2_MESSAGE}]")
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            "copy the hash into the clipboard - you will need it for the check step".to_string(),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![Hint::link(
            "git log",
            "https://git-scm.com/docs/git-log",
            "(display commits history)",
        )]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command("git log", "Show the commits history")]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        let text_file = "file.txt";

        self.context.write_text(text_file, "I'm a file - 1st edition")?;
        commit_all(repo, COMMIT_1_MESSAGE).await?;

        self.context
            .write_text(text_file, "I'm a good file - 2nd edition")?;
        let hash = commit_all(repo, COMMIT_2_MESSAGE).await?;
        self.context.store().put(HASH_KEY, &hash)?;

        self.context
            .write_text(text_file, "I'm a cool file - 3rd edition")?;
        commit_all(repo, COMMIT_3_MESSAGE).await?;
        Ok(())
    }

    async fn check(&self, _repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let expected = self.context.store().get(HASH_KEY)?.unwrap_or_default();

        let answer = prompt::read_hash("Enter the hash of the second commit")?;

        let result = if answer == expected {
            TaskResult::pass(self.description())
        } else {
            TaskResult::fail(
                self.description(),
                format!("The entered hash does not match the expected one (hash[{expected}])"),
            )
        };
        Ok(vec![result])
    }
}
