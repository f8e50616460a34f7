//! Task contract and verification result types.

use async_trait::async_trait;

use crate::error::Result;
use crate::git::GitRepo;

/// Outcome of one verified property of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// Whether the property holds.
    pub passed: bool,
    /// What was verified, shown to the learner.
    pub text: String,
    /// Explanation of the mismatch; only present on failure.
    pub failure_details: Option<String>,
}

impl TaskResult {
    /// A passing result.
    pub fn pass(text: impl Into<String>) -> Self {
        Self {
            passed: true,
            text: text.into(),
            failure_details: None,
        }
    }

    /// A failing result with an explanation of the mismatch.
    pub fn fail(text: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            passed: false,
            text: text.into(),
            failure_details: Some(details.into()),
        }
    }

    /// A failing result without an explanation.
    ///
    /// Used when a task cannot verify anything because an earlier
    /// prerequisite already failed.
    pub fn fail_unexplained(text: impl Into<String>) -> Self {
        Self {
            passed: false,
            text: text.into(),
            failure_details: None,
        }
    }
}

/// A pointer the learner can follow when stuck.
#[derive(Debug, Clone, Default)]
pub struct Hint {
    /// Display text of the reference link.
    pub link_text: Option<String>,
    /// URL of the reference link.
    pub link_url: Option<String>,
    /// Free-form hint text.
    pub description: Option<String>,
}

impl Hint {
    /// A hint pointing at reference documentation.
    pub fn link(
        text: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            link_text: Some(text.into()),
            link_url: Some(url.into()),
            description: Some(description.into()),
        }
    }

    /// A free-form textual hint.
    pub fn text(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// One step of a worked solution.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Command to run, when the step is a command.
    pub command: Option<String>,
    /// What the step does.
    pub description: String,
}

impl Solution {
    /// A solution step built around a command.
    pub fn command(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            description: description.into(),
        }
    }

    /// A descriptive solution step without a command.
    pub fn note(description: impl Into<String>) -> Self {
        Self {
            command: None,
            description: description.into(),
        }
    }
}

/// One verifiable learning step within an exercise.
///
/// Tasks are stateless apart from their captured context: `setup` prepares
/// the baseline repository state once per sandbox lifetime, and `check`
/// re-inspects the repository from scratch as often as the learner asks.
///
/// `check` reports every expected mismatch (wrong branch, wrong commit
/// count, hash mismatch) as a failing [`TaskResult`]; it returns an error
/// only when the sandbox infrastructure itself is broken.
#[async_trait]
pub trait Task: Send + Sync {
    /// Instruction shown in the task list.
    fn description(&self) -> String;

    /// Notes printed before the instruction.
    fn before_notes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Notes printed after the instruction.
    fn after_notes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Pointers for a stuck learner.
    fn hints(&self) -> Vec<Hint> {
        Vec::new()
    }

    /// Worked solution steps.
    fn solutions(&self) -> Vec<Solution>;

    /// Prepares the baseline repository state for this task.
    async fn setup(&self, repo: &dyn GitRepo) -> Result<()>;

    /// Verifies the learner's work, one result per property in order.
    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_carries_no_details() {
        let result = TaskResult::pass("renamed the branch");
        assert!(result.passed);
        assert_eq!(result.failure_details, None);
    }

    #[test]
    fn fail_carries_details() {
        let result = TaskResult::fail("renamed the branch", "still on bad[master]");
        assert!(!result.passed);
        assert!(result.failure_details.is_some());
    }

    #[test]
    fn unexplained_failure_is_legal() {
        let result = TaskResult::fail_unexplained("commit the changes");
        assert!(!result.passed);
        assert_eq!(result.failure_details, None);
    }
}
