//! Exercise 3: ignoring files and folders.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseContext, ExerciseDef, Hint, Solution, Task, TaskResult};
use crate::git::GitRepo;

const FILE_TO_KEEP: &str = "file_to_keep.txt";
const FILE_TO_IGNORE: &str = "file_to_ignore.txt";

const FOLDER_TO_IGNORE: &str = "folder1";

const FOLDER_TO_KEEP: &str = "folder2";
const SUBFOLDER_TO_IGNORE: &str = "folder2/subfolder";
const SUBFOLDER_FILE_TO_IGNORE: &str = "folder2/subfolder/file1.txt";
const SUBFOLDER_FILE_TO_KEEP: &str = "folder2/file1.txt";

const PATTERN_FOLDER: &str = "folder3";
const PATTERN_FILE1_IGNORE: &str = "folder3/file1.txt";
const PATTERN_FILE2_IGNORE: &str = "folder3/file2.txt";
const PATTERN_FILE3_KEEP: &str = "folder3/file3.dat";

pub fn build(context: Arc<ExerciseContext>) -> Exercise {
    let topic = "Sometimes you don't want to commit particular files or whole folders into your Git repo.\n\
        Git allows that by supporting a special fs[.gitignore] file.\n\
        Such a file could be placed in any folder - git will respect all the .gitignore files.\n\
        Each line in the file should be a name (or path from the current folder) of the file/folder you want to ignore\n\
        or a wildcard to describe a pattern - ext[*.txt] for example to ignore all the files with the .txt extension.\n\
        fs[.gitignore] should be committed to the Git repository as any other file.\n"
        .to_string();
    let description = "This repo will have a few files and folders - all of them \"untracked\".\n\
        You will need to update .gitignore files in the root or in folders, and commit all files that\n\
        should not be ignored to Git - the git tree must be clean.\n\
        Run cmd[git status] between your actions to see how git sees the changes.\n"
        .to_string();

    Exercise::new(
        context.clone(),
        ExerciseDef {
            topic,
            tldr: ".gitignore".to_string(),
            description,
            tasks: vec![
                Box::new(RootFilesTask {
                    context: context.clone(),
                }),
                Box::new(IgnoreFolderTask {
                    context: context.clone(),
                }),
                Box::new(IgnoreSubFolderTask {
                    context: context.clone(),
                }),
                Box::new(IgnorePatternTask { context }),
            ],
            init_repo: true,
        },
    )
}

struct RootFilesTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for RootFilesTask {
    fn description(&self) -> String {
        format!("make file fs[{FILE_TO_IGNORE}] be ignored")
    }

    fn hints(&self) -> Vec<Hint> {
        vec![
            Hint::link(
                "git status",
                "https://git-scm.com/docs/git-status",
                "(see the untracked objects, and the added/changed ones)",
            ),
            Hint::text(
                "git status should print ok[nothing to commit, working tree clean] when you are done",
            ),
            Hint::link(
                "ls",
                "https://man7.org/linux/man-pages/man1/ls.1.html",
                "(command to show the content of the folder)",
            ),
            Hint::link(
                "cd [folder]",
                "https://man7.org/linux/man-pages/man1/cd.1p.html",
                "(command to change the folder - \"cd foo\" will take you to the sub-folder \"foo\"\n\
                 of the folder you are running the command at)",
            ),
            Hint::text(
                "fs[.gitignore] will not be shown by a simple cmd[ls] command because it starts with sv[.] (dot)\n\
                 that makes files \"hidden\". Use cmd[ls -la] to show all files - including the hidden ones",
            ),
            Hint::link(
                "vi .gitignore",
                "https://vim.rtorr.com/",
                "(opens the fs[.gitignore] file in the vim editor)",
            ),
        ]
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![
            Solution::command("vi .gitignore", ""),
            Solution::note(format!(
                "add a new line containing msg[{FILE_TO_IGNORE}] text to the fs[{}] file",
                self.context.folder_path().join(".gitignore").display()
            )),
        ]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        self.context.write_text(FILE_TO_KEEP, "Bla")?;
        self.context.write_text(FILE_TO_IGNORE, "Bla-bla")?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let ignored = repo.check_ignore(&[FILE_TO_KEEP, FILE_TO_IGNORE]).await?;

        let result = if !ignored.iter().any(|p| p == FILE_TO_IGNORE) {
            TaskResult::fail(
                self.description(),
                format!("fs[{FILE_TO_IGNORE}] is expected to be ignored but it is not"),
            )
        } else if ignored.iter().any(|p| p == FILE_TO_KEEP) {
            TaskResult::fail(
                self.description(),
                format!("fs[{FILE_TO_KEEP}] is not expected to be ignored but it is"),
            )
        } else {
            TaskResult::pass(self.description())
        };
        Ok(vec![result])
    }
}

struct IgnoreFolderTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for IgnoreFolderTask {
    fn description(&self) -> String {
        format!("make the whole folder fs[{FOLDER_TO_IGNORE}] be ignored")
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::note(format!(
            "add a new line containing msg[{FOLDER_TO_IGNORE}] text to the fs[{}] file",
            self.context.folder_path().join(".gitignore").display()
        ))]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        self.context.create_dir_all(FOLDER_TO_IGNORE)?;
        self.context.write_text("file1.txt", "Bla")?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let ignored = repo.check_ignore(&[FOLDER_TO_IGNORE]).await?;

        let result = if !ignored.iter().any(|p| p == FOLDER_TO_IGNORE) {
            TaskResult::fail(
                self.description(),
                format!("fs[{FOLDER_TO_IGNORE}] is expected to be ignored but it is not"),
            )
        } else {
            TaskResult::pass(self.description())
        };
        Ok(vec![result])
    }
}

struct IgnoreSubFolderTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for IgnoreSubFolderTask {
    fn description(&self) -> String {
        format!("make the whole folder fs[{SUBFOLDER_TO_IGNORE}] be ignored")
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::note(format!(
            "add a new line containing msg[{SUBFOLDER_TO_IGNORE}] text to the fs[{}] file",
            self.context.folder_path().join(".gitignore").display()
        ))]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        self.context.create_dir_all(SUBFOLDER_TO_IGNORE)?;
        self.context.write_text(SUBFOLDER_FILE_TO_KEEP, "Bla")?;
        self.context.write_text(SUBFOLDER_FILE_TO_IGNORE, "Bla")?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        let ignored = repo
            .check_ignore(&[
                SUBFOLDER_TO_IGNORE,
                SUBFOLDER_FILE_TO_IGNORE,
                SUBFOLDER_FILE_TO_KEEP,
            ])
            .await?;

        let result = if !ignored.iter().any(|p| p == SUBFOLDER_TO_IGNORE) {
            TaskResult::fail(
                self.description(),
                format!("fs[{SUBFOLDER_TO_IGNORE}] is expected to be ignored but it is not"),
            )
        } else if !ignored.iter().any(|p| p == SUBFOLDER_FILE_TO_IGNORE) {
            TaskResult::fail(
                self.description(),
                format!("fs[{SUBFOLDER_FILE_TO_IGNORE}] is expected to be ignored but it is not"),
            )
        } else if ignored.iter().any(|p| p == SUBFOLDER_FILE_TO_KEEP) {
            TaskResult::fail(
                self.description(),
                format!("fs[{SUBFOLDER_FILE_TO_KEEP}] is not expected to be ignored but it is"),
            )
        } else {
            TaskResult::pass(self.description())
        };
        Ok(vec![result])
    }
}

struct IgnorePatternTask {
    context: Arc<ExerciseContext>,
}

#[async_trait]
impl Task for IgnorePatternTask {
    fn description(&self) -> String {
        format!(
            "make all the files with extension ext[.txt] in folder fs[{PATTERN_FOLDER}] be ignored \
             by editing the .gitignore file in that folder"
        )
    }

    fn solutions(&self) -> Vec<Solution> {
        vec![Solution::command(
            format!("vi {PATTERN_FOLDER}/.gitignore"),
            format!(
                "add a new line containing ext[*.txt] text to the fs[{}] file",
                self.context
                    .folder_path()
                    .join(PATTERN_FOLDER)
                    .join(".gitignore")
                    .display()
            ),
        )]
    }

    async fn setup(&self, _repo: &dyn GitRepo) -> Result<()> {
        self.context.create_dir_all(PATTERN_FOLDER)?;
        self.context.write_text(PATTERN_FILE1_IGNORE, "Bla")?;
        self.context.write_text(PATTERN_FILE2_IGNORE, "Bla")?;
        self.context.write_text(PATTERN_FILE3_KEEP, "Bla")?;
        self.context
            .write_text(format!("{PATTERN_FOLDER}/.gitignore"), "")?;
        Ok(())
    }

    async fn check(&self, repo: &dyn GitRepo) -> Result<Vec<TaskResult>> {
        // Drop a fresh probe file in; a correct pattern rule must cover
        // files that did not exist when the rule was written.
        let probe = format!("{PATTERN_FOLDER}/foo.txt");
        self.context.write_text(&probe, "Bla")?;

        let status = repo.status().await?;
        let ignored = repo
            .check_ignore(&[PATTERN_FILE1_IGNORE, PATTERN_FILE2_IGNORE, PATTERN_FILE3_KEEP])
            .await?;

        let pattern_result = if !ignored.iter().any(|p| p == PATTERN_FILE1_IGNORE) {
            TaskResult::fail(
                self.description(),
                format!("fs[{PATTERN_FILE1_IGNORE}] is expected to be ignored but it is not"),
            )
        } else if !ignored.iter().any(|p| p == PATTERN_FILE2_IGNORE) {
            TaskResult::fail(
                self.description(),
                format!("fs[{PATTERN_FILE2_IGNORE}] is expected to be ignored but it is not"),
            )
        } else if ignored.iter().any(|p| p == PATTERN_FILE3_KEEP) {
            TaskResult::fail(
                self.description(),
                format!("fs[{PATTERN_FILE3_KEEP}] is not expected to be ignored but it is"),
            )
        } else if !status.untracked().is_empty() {
            TaskResult::fail(
                self.description(),
                format!("fs[{probe}] is expected to be ignored but it is not"),
            )
        } else {
            TaskResult::pass(self.description())
        };

        let clean_result = if status.is_clean() {
            TaskResult::pass("Repo tree should be clean")
        } else {
            TaskResult::fail("Repo tree should be clean", "repo tree is not clean")
        };

        Ok(vec![pattern_result, clean_result])
    }
}
