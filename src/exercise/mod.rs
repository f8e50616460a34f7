//! Exercise composition and sandbox lifecycle.
//!
//! An [`Exercise`] owns an ordered list of tasks and one sandbox folder.
//! The folder is the whole of the mutable state: `start` creates it,
//! `clean` removes it, and its existence is the single source of truth for
//! "exercise in progress".

mod context;
mod task;

pub use context::ExerciseContext;
pub use task::{Hint, Solution, Task, TaskResult};

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;

use crate::error::Result;
use crate::git::{GitCli, GitRepo};
use crate::report;

/// Builds a repository handle for a sandbox folder.
///
/// The binary wires in [`GitCli`]; orchestration tests substitute fakes.
pub type RepoFactory = Box<dyn Fn(&Path) -> Arc<dyn GitRepo> + Send + Sync>;

/// Outcome of a `start` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The sandbox was created and task setups ran.
    Started,
    /// The sandbox already existed; nothing was touched.
    AlreadyInProgress,
}

/// Static definition of one exercise.
pub struct ExerciseDef {
    /// Short topic introduction printed with the instructions.
    pub topic: String,
    /// One-line summary for the exercise listing.
    pub tldr: String,
    /// What the learner is asked to achieve.
    pub description: String,
    /// Ordered task list.
    pub tasks: Vec<Box<dyn Task>>,
    /// Whether `start` initializes the sandbox repository.
    ///
    /// False only for the exercise that teaches repository initialization.
    pub init_repo: bool,
}

/// An ordered group of tasks sharing one sandbox and one topic.
pub struct Exercise {
    context: Arc<ExerciseContext>,
    def: ExerciseDef,
    repo_factory: RepoFactory,
}

impl Exercise {
    /// Creates an exercise backed by the real `git` binary.
    pub fn new(context: Arc<ExerciseContext>, def: ExerciseDef) -> Self {
        Self::with_repo_factory(
            context,
            def,
            Box::new(|folder: &Path| -> Arc<dyn GitRepo> { Arc::new(GitCli::open(folder)) }),
        )
    }

    /// Creates an exercise with a custom repository factory.
    pub fn with_repo_factory(
        context: Arc<ExerciseContext>,
        def: ExerciseDef,
        repo_factory: RepoFactory,
    ) -> Self {
        Self {
            context,
            def,
            repo_factory,
        }
    }

    /// Exercise identity, 1-based.
    pub fn id(&self) -> &str {
        self.context.id()
    }

    /// One-line summary for the exercise listing.
    pub fn tldr(&self) -> &str {
        &self.def.tldr
    }

    /// True while the sandbox folder exists.
    pub fn in_progress(&self) -> bool {
        self.context.folder_path().exists()
    }

    /// Creates the sandbox and runs every task's setup.
    ///
    /// Refuses with a printed notice when the sandbox already exists; this
    /// guard is the only protection against double initialization.
    pub async fn start(&self) -> Result<StartOutcome> {
        if self.in_progress() {
            report::print_already_started(self.id());
            return Ok(StartOutcome::AlreadyInProgress);
        }

        tracing::info!(exercise = %self.id(), folder = ?self.context.folder_path(), "starting exercise");
        let repo = self.setup_sandbox().await?;

        // Task setups within one exercise touch disjoint state, so they are
        // launched together and awaited as a group.
        let setups = self.def.tasks.iter().map(|task| task.setup(repo.as_ref()));
        for outcome in join_all(setups).await {
            outcome?;
        }

        self.print_details();
        Ok(StartOutcome::Started)
    }

    /// Verifies the learner's work and prints the report.
    ///
    /// Checks run sequentially in task order; later tasks may rely on state
    /// that earlier checks asserted or recorded.
    pub async fn check(&self) -> Result<Vec<TaskResult>> {
        let mut results = Vec::new();

        if !self.in_progress() {
            results.push(TaskResult::fail(
                "state",
                format!(
                    "folder {} not found - make sure you ran and completed exercise #{} tasks",
                    self.context.folder_path().display(),
                    self.id()
                ),
            ));
        } else {
            let repo = (self.repo_factory)(self.context.folder_path());
            for task in &self.def.tasks {
                results.extend(task.check(repo.as_ref()).await?);
            }
        }

        self.print_details();
        report::print_results(self.id(), &results);
        Ok(results)
    }

    /// Removes the sandbox folder; silently does nothing when absent.
    pub async fn clean(&self) -> Result<()> {
        if !self.in_progress() {
            return Ok(());
        }
        report::print_removing_folder(self.context.folder_path());
        tokio::fs::remove_dir_all(self.context.folder_path()).await?;
        Ok(())
    }

    /// `clean` followed by `start`.
    pub async fn restart(&self) -> Result<StartOutcome> {
        self.clean().await?;
        self.start().await
    }

    /// Prints the worked solution for every task in order.
    pub fn print_solution(&self) {
        self.print_details();
        let solutions: Vec<Solution> = self
            .def
            .tasks
            .iter()
            .flat_map(|task| task.solutions())
            .collect();
        report::print_solutions(self.id(), &solutions);
    }

    /// Prints topic, description, task instructions and hints.
    pub fn print_details(&self) {
        let repo_note = if self.def.init_repo {
            " It is a root of a git repo."
        } else {
            ""
        };
        let description = format!(
            "The working folder for this exercise is fs[{}].{}\n{}",
            self.context.folder_path().display(),
            repo_note,
            self.def.description
        );

        let tasks: Vec<String> = self
            .def
            .tasks
            .iter()
            .flat_map(|task| {
                let mut lines = task.before_notes();
                lines.push(task.description());
                lines.extend(task.after_notes());
                lines
            })
            .collect();
        let hints: Vec<Hint> = self
            .def
            .tasks
            .iter()
            .flat_map(|task| task.hints())
            .collect();

        report::print_exercise(self.id(), &self.def.topic, &description, &tasks, &hints);
    }

    async fn setup_sandbox(&self) -> Result<Arc<dyn GitRepo>> {
        std::fs::create_dir_all(self.context.folder_path())?;
        let repo = (self.repo_factory)(self.context.folder_path());

        if self.def.init_repo {
            repo.init().await?;
            repo.rename_branch(self.context.default_branch()).await?;
            // Local identity so setup commits work without global git config.
            repo.set_user("Git Workshop", "workshop@localhost").await?;
        }

        let store = self.context.store();
        std::fs::create_dir_all(store.folder())?;
        let ignore_rule = format!(
            "{}\n",
            store
                .folder()
                .file_name()
                .expect("store folder has a name")
                .to_string_lossy()
        );
        self.context.write_text(".gitignore", &ignore_rule)?;

        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::error::Result;
    use crate::git::{CommitEntry, RepoStatus};

    /// Repository fake recording which operations ran.
    #[derive(Default)]
    struct FakeRepo {
        calls: Mutex<Vec<String>>,
    }

    impl FakeRepo {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GitRepo for FakeRepo {
        async fn init(&self) -> Result<()> {
            self.record("init");
            Ok(())
        }

        async fn is_repo_root(&self) -> Result<bool> {
            Ok(true)
        }

        async fn set_user(&self, _name: &str, _email: &str) -> Result<()> {
            self.record("set_user");
            Ok(())
        }

        async fn rename_branch(&self, name: &str) -> Result<()> {
            self.record(&format!("rename_branch:{name}"));
            Ok(())
        }

        async fn add_all(&self) -> Result<()> {
            self.record("add_all");
            Ok(())
        }

        async fn commit(&self, _message: &str) -> Result<String> {
            self.record("commit");
            Ok("0000000".to_string())
        }

        async fn log(&self, _branch: Option<&str>) -> Result<Vec<CommitEntry>> {
            Ok(Vec::new())
        }

        async fn status(&self) -> Result<RepoStatus> {
            Ok(RepoStatus::default())
        }

        async fn branches(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        async fn check_ignore(&self, _paths: &[&str]) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        async fn checkout(&self, _target: &str) -> Result<()> {
            Ok(())
        }

        async fn create_branch(&self, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    /// Task that records setup/check calls and emits a fixed result count.
    struct ScriptedTask {
        label: &'static str,
        results: usize,
        journal: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Task for ScriptedTask {
        fn description(&self) -> String {
            self.label.to_string()
        }

        fn solutions(&self) -> Vec<Solution> {
            Vec::new()
        }

        async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
            self.journal
                .lock()
                .unwrap()
                .push(format!("setup:{}", self.label));
            Ok(())
        }

        async fn check(&self, _repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
            self.journal
                .lock()
                .unwrap()
                .push(format!("check:{}", self.label));
            Ok((0..self.results)
                .map(|index| TaskResult::pass(format!("{}-{index}", self.label)))
                .collect())
        }
    }

    struct Fixture {
        exercise: Exercise,
        repo: Arc<FakeRepo>,
        journal: Arc<Mutex<Vec<String>>>,
        _root: TempDir,
    }

    fn fixture(task_results: &[usize], init_repo: bool) -> Fixture {
        let root = TempDir::new().expect("failed to create temp dir");
        let context = Arc::new(ExerciseContext::new(root.path(), 1));
        let journal = Arc::new(Mutex::new(Vec::new()));
        let repo = Arc::new(FakeRepo::default());

        let tasks: Vec<Box<dyn Task>> = task_results
            .iter()
            .enumerate()
            .map(|(index, results)| {
                Box::new(ScriptedTask {
                    label: ["first", "second", "third"][index],
                    results: *results,
                    journal: journal.clone(),
                }) as Box<dyn Task>
            })
            .collect();

        let factory_repo = repo.clone();
        let exercise = Exercise::with_repo_factory(
            context,
            ExerciseDef {
                topic: "topic".to_string(),
                tldr: "summary".to_string(),
                description: "description".to_string(),
                tasks,
                init_repo,
            },
            Box::new(move |_: &Path| -> Arc<dyn GitRepo> { factory_repo.clone() }),
        );

        Fixture {
            exercise,
            repo,
            journal,
            _root: root,
        }
    }

    #[tokio::test]
    async fn start_creates_sandbox_and_runs_setups() {
        let fx = fixture(&[1, 1], true);

        let outcome = fx.exercise.start().await.unwrap();

        assert_eq!(outcome, StartOutcome::Started);
        assert!(fx.exercise.in_progress());

        let calls = fx.repo.calls();
        assert_eq!(calls[0], "init");
        assert_eq!(calls[1], "rename_branch:ex1");
        assert_eq!(calls[2], "set_user");

        let journal = fx.journal.lock().unwrap().clone();
        assert!(journal.contains(&"setup:first".to_string()));
        assert!(journal.contains(&"setup:second".to_string()));
    }

    #[tokio::test]
    async fn start_writes_the_store_ignore_rule() {
        let fx = fixture(&[1], true);
        fx.exercise.start().await.unwrap();

        let context = ExerciseContext::new(fx._root.path(), 1);
        assert_eq!(context.read_text(".gitignore").unwrap(), ".workshop\n");
        assert!(context.folder_path().join(".workshop").is_dir());
    }

    #[tokio::test]
    async fn start_skips_repo_init_when_disabled() {
        let fx = fixture(&[1], false);
        fx.exercise.start().await.unwrap();

        assert!(fx.repo.calls().is_empty());
    }

    #[tokio::test]
    async fn second_start_is_a_guarded_noop() {
        let fx = fixture(&[1], true);
        fx.exercise.start().await.unwrap();

        let marker = fx._root.path().join("ex1").join("learner-work.txt");
        std::fs::write(&marker, "precious").unwrap();
        let setup_count = |journal: &Arc<Mutex<Vec<String>>>| {
            journal
                .lock()
                .unwrap()
                .iter()
                .filter(|call| call.starts_with("setup:"))
                .count()
        };
        let before = setup_count(&fx.journal);

        let outcome = fx.exercise.start().await.unwrap();

        assert_eq!(outcome, StartOutcome::AlreadyInProgress);
        assert_eq!(setup_count(&fx.journal), before);
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "precious");
    }

    #[tokio::test]
    async fn check_without_sandbox_synthesizes_one_failing_result() {
        let fx = fixture(&[1, 1], true);

        let results = fx.exercise.check().await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert!(results[0]
            .failure_details
            .as_deref()
            .unwrap()
            .contains("not found"));
        // No task check ran against the missing sandbox.
        assert!(fx.journal.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn check_runs_tasks_sequentially_and_flattens_results() {
        let fx = fixture(&[2, 1], true);
        fx.exercise.start().await.unwrap();
        fx.journal.lock().unwrap().clear();

        let results = fx.exercise.check().await.unwrap();

        assert_eq!(
            fx.journal.lock().unwrap().as_slice(),
            ["check:first", "check:second"]
        );
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["first-0", "first-1", "second-0"]);
    }

    #[tokio::test]
    async fn clean_removes_the_sandbox() {
        let fx = fixture(&[1], true);
        fx.exercise.start().await.unwrap();
        assert!(fx.exercise.in_progress());

        fx.exercise.clean().await.unwrap();

        assert!(!fx.exercise.in_progress());
    }

    #[tokio::test]
    async fn clean_on_missing_sandbox_is_a_noop() {
        let fx = fixture(&[1], true);

        fx.exercise.clean().await.unwrap();

        assert!(!fx.exercise.in_progress());
        assert_eq!(std::fs::read_dir(fx._root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn restart_cleans_and_starts_again() {
        let fx = fixture(&[1], true);
        fx.exercise.start().await.unwrap();
        let marker = fx._root.path().join("ex1").join("learner-work.txt");
        std::fs::write(&marker, "stale").unwrap();

        let outcome = fx.exercise.restart().await.unwrap();

        assert_eq!(outcome, StartOutcome::Started);
        assert!(fx.exercise.in_progress());
        assert!(!marker.exists());
    }
}
