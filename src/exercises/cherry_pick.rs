//! Exercise 13: cherry-picking commits between branches.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};

use super::order_line;

const BRANCH_A: &str = "A";
const BRANCH_B: &str = "B";

const COMMIT_INIT_MESSAGE: &str = "Initial commit";
const COMMIT_1_MESSAGE: &str = "Update file1 - 1st edition";
const COMMIT_2_MESSAGE: &str = "Update file1 - 2nd edition";

const COMMIT_B_1_MESSAGE: &str = "Create file2";
const COMMIT_B_2_MESSAGE: &str = "Update file1 - special edition";
const COMMIT_B_3_MESSAGE: &str = "Update file2";

const COMMIT_A_1_MESSAGE: &str = "Update file1 - 3rd edition";

const LAST_HASH_A_KEY: &str = "last_hash_a";
const LAST_HASH_B_KEY: &str = "last_hash_b";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = "You might have a few branches and sometimes you need to take a commit from one branch and add it to another.\n\
         For that git provides the cmd[git cherry-pick] command that accepts one or more hashes of commit(s) existing in another (local) branch."
        .to_string();
    let description = format!(
        "Repo has 2 branches - bname[{BRANCH_A}] and bname[{BRANCH_B}] - with a few commits each. \
         You will need to bring some commits from one branch to another.\n\
         Use the cmd[git cherry-pick] command.\n"
    );

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "cherry-pick commits".to_string(),
            description,
            tasks: vec![Box::new(CherryPickTask { context })],
            init_repo: true,
        },
    )
}

struct CherryPickTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for CherryPickTask {
    fn description(&self) -> String {
        format!(
            "cherry-pick the commits with message \"msg[{COMMIT_B_1_MESSAGE}]\" and \"msg[{COMMIT_B_3_MESSAGE}]\" \
             existing in branch bname[{BRANCH_B}] into branch bname[{BRANCH_A}]"
        )
    }

    fn before_notes(&self) -> Vec<String> {
        vec![
            format!("inspect the commits log in branch bname[{BRANCH_A}]"),
            format!("inspect the commits log in branch bname[{BRANCH_B}]"),
        ]
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            "nb[the order of listing commits is important.] try first to list them in stress[reversed] order (last and then first)"
                .to_string(),
            "(to abort a cherry-pick when it has conflicts use the opt[--abort] flag)".to_string(),
            format!("inspect the log of branch bname[{BRANCH_A}] - find the 2 picked commits"),
            "check if they have the same hash as the original ones".to_string(),
            format!("inspect the log of branch bname[{BRANCH_B}] - has it changed?"),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git cherry-pick",
                "https://git-scm.com/docs/git-cherry-pick",
                "(adds commits from other branches to the current one)",
            ),
            Hint::link(
                "git cherry-pick --abort",
                "https://git-scm.com/docs/git-cherry-pick",
                "(aborts an in-progress cmd[cherry-pick] when it has conflicts)",
            ),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            "git cherry-pick HASH1 HASH2",
            "Finds the commits with HASH1 and HASH2 in the repo and adds them to the current branch",
        )]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        repo.rename_branch(BRANCH_A).await?;
        commit_all(repo, COMMIT_INIT_MESSAGE).await?;

        let file1 = "file1.txt";
        self.context.write_text(file1, "I'm file #1 - 1st edition")?;
        commit_all(repo, COMMIT_1_MESSAGE).await?;

        self.context.write_text(file1, "I'm file #1 - 2nd edition")?;
        commit_all(repo, COMMIT_2_MESSAGE).await?;

        repo.create_branch(BRANCH_B).await?;

        let file2 = "file2.txt";
        self.context.write_text(file2, "I'm file #2 - 1st edition")?;
        commit_all(repo, COMMIT_B_1_MESSAGE).await?;

        self.context.write_text(file1, "I'm file #1 - special edition")?;
        commit_all(repo, COMMIT_B_2_MESSAGE).await?;

        self.context.write_text(file2, "I'm file #2 - 2nd edition")?;
        let last_b = commit_all(repo, COMMIT_B_3_MESSAGE).await?;
        self.context.store().put(LAST_HASH_B_KEY, &last_b)?;

        repo.checkout(BRANCH_A).await?;
        self.context.write_text(file1, "I'm file #1 - 3rd edition")?;
        let last_a = commit_all(repo, COMMIT_A_1_MESSAGE).await?;
        self.context.store().put(LAST_HASH_A_KEY, &last_a)?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let text_b = format!("branch bname[{BRANCH_B}] should not change");

        let log_a = repo.log(Some(BRANCH_A)).await?;
        let log_b = repo.log(Some(BRANCH_B)).await?;

        let last_hash_a = self
            .context
            .store()
            .get(LAST_HASH_A_KEY)?
            .unwrap_or_else(|| "???".to_string());
        let last_hash_b = self
            .context
            .store()
            .get(LAST_HASH_B_KEY)?
            .unwrap_or_else(|| "???".to_string());

        let result_b = if log_b.len() != 6 {
            TaskResult::fail(
                text_b.clone(),
                format!(
                    "Expected to keep ok[6] commits untouched, but found bad[{}] commits",
                    log_b.len()
                ),
            )
        } else if log_b[0].hash != last_hash_b {
            TaskResult::fail(
                text_b.clone(),
                format!(
                    "Expected to keep ok[6] commits untouched, but the last commit has changed \
                     (expected the ok[{last_hash_b}] hash but found bad[{}])",
                    log_b[0].hash
                ),
            )
        } else {
            TaskResult::pass(text_b)
        };

        let result_a = if log_a.len() != 6 {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected to have ok[6] commits, but found bad[{}] commits",
                    log_a.len()
                ),
            )
        } else if log_a[2].hash != last_hash_a {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected to keep commit msg[{COMMIT_A_1_MESSAGE}] untouched, but it changed \
                     (expected the ok[{last_hash_a}] hash but found bad[{}])",
                    log_a[2].hash
                ),
            )
        } else if log_a[0].message != COMMIT_B_3_MESSAGE || log_a[1].message != COMMIT_B_1_MESSAGE {
            TaskResult::fail(
                self.description(),
                format!(
                    "Expected the 2 last commits in bname[{BRANCH_A}] to have these commit messages [in under[descending] order]:\n\
                     \x20 - {COMMIT_B_3_MESSAGE}\n\
                     \x20 - {COMMIT_B_1_MESSAGE}\n\
                     \nbut the actual 2 last commits are:\n\
                     \x20 - {}\n\
                     \x20 - {}\n",
                    order_line(&log_a, 0, COMMIT_B_3_MESSAGE),
                    order_line(&log_a, 1, COMMIT_B_1_MESSAGE),
                ),
            )
        } else {
            TaskResult::pass(self.description())
        };

        Ok(vec![result_a, result_b])
    }
}
