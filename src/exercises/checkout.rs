//! Exercise 12: checking out branches and commits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::{commit_all, GitRepo};
use crate::prompt;

const COMMIT_1_MESSAGE: &str = "First commit";
const COMMIT_2_MESSAGE: &str = "Second commit";
const COMMIT_3_MESSAGE: &str = "Third commit";

const FILE_1: &str = "file1.txt";

const BRANCH_2: &str = "new_feature";
const BRANCH_NEW: &str = "from_commit";
const COMMIT_NEW_MESSAGE: &str = "my commit";

const HASH_COMMIT_1_KEY: &str = "hash_commit_1";
const HASH_LAST_BRANCH_2_KEY: &str = "hash_last_branch_2";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = "The checkout command brings the git sv[HEAD] to the requested state.\n\
         \x20- when a sv[branch name] is provided as an argument, Git switches to that branch\n\
         \x20- when provided with a sv[commit hash] - Git restores working files according to that commit\n\n\
         Checking out a commit is useful to see the state at that point. But note that nb[committing changes in that state will not change the original branch!]\n"
        .to_string();
    let description =
        "Repo has a few commits in a few branches. You will play with checking out a specific commit or another branch."
            .to_string();

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: "checkout".to_string(),
            description,
            tasks: vec![
                Box::new(CheckoutBranchTask {
                    context: context.clone(),
                }),
                Box::new(CheckoutCommitTask { context }),
            ],
            init_repo: true,
        },
    )
}

struct CheckoutBranchTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for CheckoutBranchTask {
    fn description(&self) -> String {
        "check and copy into the clipboard the hash of your commit".to_string()
    }

    fn before_notes(&self) -> Vec<String> {
        vec![
            "inspect the branches that you have in the repo using cmd[git branch]".to_string(),
            format!("switch to branch bname[{BRANCH_2}]"),
            format!("update file fs[{FILE_1}] content - add a new line there: msg[Something new]"),
            format!("commit the changes to Git (to branch bname[{BRANCH_2}])"),
        ]
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            format!("switch to branch bname[{}]", self.context.default_branch()),
            "verify your change is not present in this branch".to_string(),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git branch",
                "https://git-scm.com/docs/git-branch",
                "Shows branches information and allows creating new ones",
            ),
            Hint::link("git checkout", "https://git-scm.com/docs/git-checkout", ""),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            format!("git checkout {BRANCH_2}"),
            format!(
                "Switches to branch bname[{BRANCH_2}], HEAD will point to the last commit in that branch"
            ),
        )]
    }

    async fn setup(&self, repo: &dyn GitRepo) -> Result<()> {
        commit_all(repo, "Initial").await?;

        self.context.write_text(FILE_1, "I'm a file - 1st edition\n")?;
        let commit1 = commit_all(repo, COMMIT_1_MESSAGE).await?;
        self.context.store().put(HASH_COMMIT_1_KEY, &commit1)?;

        self.context.write_text(FILE_1, "I'm a file - 2nd edition\n")?;
        commit_all(repo, COMMIT_2_MESSAGE).await?;

        repo.create_branch(BRANCH_2).await?;

        self.context.write_text(FILE_1, "I'm a file - 3rd edition\n")?;
        let commit3 = commit_all(repo, COMMIT_3_MESSAGE).await?;
        self.context
            .store()
            .put(HASH_LAST_BRANCH_2_KEY, &commit3)?;

        repo.checkout(self.context.default_branch()).await?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let text = format!(
            "Checkout branch bname[{BRANCH_2}], make a commit, and switch back to {}",
            self.context.default_branch()
        );

        let last_auto_commit = self.context.store().get(HASH_LAST_BRANCH_2_KEY)?;

        let status = repo.status().await?;
        let log = repo.log(Some(BRANCH_2)).await?;

        let result = if status.current.as_deref() != Some(self.context.default_branch()) {
            TaskResult::fail(
                text,
                format!(
                    "make sure to switch to the bname[{}] branch",
                    self.context.default_branch()
                ),
            )
        } else if !status.is_clean() {
            TaskResult::fail(
                text,
                format!(
                    "expected the working tree for the bname[{}] branch to be clean (no changes)",
                    self.context.default_branch()
                ),
            )
        } else if log.get(1).map(|entry| entry.hash.clone()) != last_auto_commit {
            TaskResult::fail(
                text,
                format!(
                    "The commits tree of branch bname[{BRANCH_2}] is in an unexpected state \
                     - expected to find commit hash[{}] to be one commit before the last one",
                    last_auto_commit.unwrap_or_else(|| "ERR".to_string())
                ),
            )
        } else {
            let answer = prompt::read_hash(&format!(
                "Enter the hash of the commit you made to branch \"{BRANCH_2}\""
            ))?;
            if log.first().map(|entry| entry.hash.as_str()) != Some(answer.as_str()) {
                TaskResult::fail(
                    text,
                    format!(
                        "The hash does not match the last commit hash in bname[{BRANCH_2}] - bad[{}]",
                        log.first().map(|entry| entry.hash.as_str()).unwrap_or("")
                    ),
                )
            } else {
                TaskResult::pass(text)
            }
        };

        Ok(vec![result])
    }
}

struct CheckoutCommitTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for CheckoutCommitTask {
    fn description(&self) -> String {
        format!("now create a new branch from here named bname[{BRANCH_NEW}]")
    }

    fn before_notes(&self) -> Vec<String> {
        vec![
            format!("check the content of the file fs[{FILE_1}] - just to compare it later"),
            format!("checkout the commit with message msg[{COMMIT_1_MESSAGE}]"),
            "run cmd[git log] - note the commits history (now it's short)".to_string(),
            "run cmd[git status] - pay attention to the notes".to_string(),
            format!("update file fs[{FILE_1}] content - add some text"),
            format!(
                "commit the changes to Git (being in the detached mode) with a message msg[{COMMIT_NEW_MESSAGE}]"
            ),
        ]
    }

    fn after_notes(&self) -> Vec<String> {
        vec![
            format!("switch to branch bname[{}]", self.context.default_branch()),
            "verify your change is not present in this branch".to_string(),
            "check the branches list again - cmd[git branch]".to_string(),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git branch",
                "https://git-scm.com/docs/git-branch",
                "Shows branches information and allows creating new ones",
            ),
            Hint::link("git checkout", "https://git-scm.com/docs/git-checkout", ""),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![
            Solution::command(
                "git checkout COMMIT_HASH",
                "Checks out the state as it was at that commit - HEAD will point to it. The filesystem is changed according to that commit.\n\
                 Note that it is a nb[detached mode]! Changes will be lost - create a new branch to preserve them",
            ),
            Solution::command(
                "git checkout -b BRANCH_NAME",
                "Creates a new branch pointing to the current commit",
            ),
        ]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let text = format!("Create branch bname[{BRANCH_NEW}] from a checked out commit");

        let commit_hash = self.context.store().get(HASH_COMMIT_1_KEY)?;

        let branches = repo.branches().await?;
        let result = if !branches.iter().any(|b| b == BRANCH_NEW) {
            TaskResult::fail(text, format!("Branch bname[{BRANCH_NEW}] does not exist"))
        } else {
            let log = repo.log(Some(BRANCH_NEW)).await?;
            if log.get(1).map(|entry| entry.hash.clone()) != commit_hash {
                TaskResult::fail(
                    text,
                    format!(
                        "The commits tree of branch bname[{BRANCH_NEW}] is in an unexpected state \
                         - expected to find commit hash[{}] to be one commit before the last one",
                        commit_hash.unwrap_or_else(|| "ERR".to_string())
                    ),
                )
            } else if log.first().map(|entry| entry.message.as_str()) != Some(COMMIT_NEW_MESSAGE) {
                TaskResult::fail(
                    text,
                    format!(
                        "Expected the last commit in branch bname[{BRANCH_NEW}] to have message msg[{COMMIT_NEW_MESSAGE}] \
                         but it is bad[{}].",
                        log.first().map(|entry| entry.message.as_str()).unwrap_or("")
                    ),
                )
            } else {
                TaskResult::pass(text)
            }
        };

        Ok(vec![result])
    }
}
