//! The workshop's exercise registry.
//!
//! One module per exercise; [`build_all`] wires them into the fixed ordered
//! list the command dispatcher works against. Exercise identity is the
//! 1-based position in this list, and the sandbox folder and branch names
//! (`ex<id>`) are derived from it.

mod amend;
mod checkout;
mod cherry_pick;
mod commit_message;
mod delete;
mod fixup;
mod gitignore;
mod init;
mod log;
mod reorder;
mod reset;
mod squash;

use std::path::Path;
use std::sync::Arc;

use crate::exercise::{Exercise, ExerciseContext};
use crate::git::CommitEntry;

type Builder = fn(Arc<ExerciseContext>) -> Exercise;

/// Builds every exercise, in workshop order, rooted under `root`.
pub fn build_all(root: &Path) -> Vec<Exercise> {
    let builders: [Builder; 13] = [
        init::build,
        log::build,
        gitignore::build,
        amend::build,
        commit_message::build,
        squash::build,
        fixup::build,
        reorder::build,
        delete::build,
        reset::build_soft,
        reset::build_hard,
        checkout::build,
        cherry_pick::build,
    ];

    builders
        .iter()
        .enumerate()
        .map(|(index, build)| build(Arc::new(ExerciseContext::new(root, index + 1))))
        .collect()
}

/// Warning shared by every exercise that rewrites history.
pub(crate) const REBASING_WARNING: &str =
    "nb[This is a rebasing operation - it changes history (commit hashes) - be aware!]";

/// Commit subject at a log position, tolerating missing entries.
pub(crate) fn message_at(log: &[CommitEntry], index: usize) -> &str {
    log.get(index)
        .map(|entry| entry.message.as_str())
        .unwrap_or("<missing>")
}

/// Renders one actual-order line, tagged ok or bad against the expected subject.
pub(crate) fn order_line(log: &[CommitEntry], index: usize, expected: &str) -> String {
    let message = message_at(log, index);
    let tag = if message == expected { "ok" } else { "bad" };
    format!("{tag}[{message}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn registry_is_ordered_and_complete() {
        let root = TempDir::new().expect("failed to create temp dir");
        let exercises = build_all(root.path());

        assert_eq!(exercises.len(), 13);
        for (index, exercise) in exercises.iter().enumerate() {
            assert_eq!(exercise.id(), (index + 1).to_string());
        }
        assert_eq!(exercises[0].tldr(), "initialize git repo");
        assert_eq!(exercises[12].tldr(), "cherry-pick commits");
    }

    #[test]
    fn contexts_do_not_touch_the_filesystem() {
        let root = TempDir::new().expect("failed to create temp dir");
        let exercises = build_all(root.path());

        for exercise in &exercises {
            assert!(!exercise.in_progress());
        }
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }
}
