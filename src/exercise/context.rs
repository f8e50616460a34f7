//! Per-exercise sandbox context.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::SandboxStore;

/// Identity and filesystem scope of one exercise sandbox.
///
/// Derived deterministically from the exercise id at process start and
/// shared read-only between the exercise and its tasks. The sandbox folder
/// itself may or may not exist; this value only names it.
#[derive(Debug)]
pub struct ExerciseContext {
    id: String,
    folder_name: String,
    folder_path: PathBuf,
    default_branch: String,
    store: SandboxStore,
}

impl ExerciseContext {
    /// Builds the context for exercise number `id` under `root`.
    pub fn new(root: &Path, id: usize) -> Self {
        let folder_name = format!("ex{id}");
        let folder_path = root.join(&folder_name);
        let store = SandboxStore::new(&folder_path);
        Self {
            id: id.to_string(),
            default_branch: folder_name.clone(),
            folder_name,
            folder_path,
            store,
        }
    }

    /// Exercise identity, 1-based.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the sandbox folder (`ex<id>`).
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    /// Absolute path of the sandbox folder.
    pub fn folder_path(&self) -> &Path {
        &self.folder_path
    }

    /// Branch name the sandbox repository starts on.
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// The sandbox's key-value store.
    pub fn store(&self) -> &SandboxStore {
        &self.store
    }

    /// Writes a text file at a path relative to the sandbox folder.
    pub fn write_text(&self, relpath: impl AsRef<Path>, content: &str) -> Result<()> {
        std::fs::write(self.folder_path.join(relpath), content)?;
        Ok(())
    }

    /// Reads a text file at a path relative to the sandbox folder.
    pub fn read_text(&self, relpath: impl AsRef<Path>) -> Result<String> {
        Ok(std::fs::read_to_string(self.folder_path.join(relpath))?)
    }

    /// Creates a folder (and parents) relative to the sandbox folder.
    pub fn create_dir_all(&self, relpath: impl AsRef<Path>) -> Result<()> {
        std::fs::create_dir_all(self.folder_path.join(relpath))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn derives_identity_from_id() {
        let root = TempDir::new().expect("failed to create temp dir");
        let context = ExerciseContext::new(root.path(), 7);

        assert_eq!(context.id(), "7");
        assert_eq!(context.folder_name(), "ex7");
        assert_eq!(context.default_branch(), "ex7");
        assert_eq!(context.folder_path(), root.path().join("ex7"));
    }

    #[test]
    fn text_io_is_scoped_to_the_sandbox() {
        let root = TempDir::new().expect("failed to create temp dir");
        let context = ExerciseContext::new(root.path(), 1);
        context.create_dir_all(".").unwrap();

        context.write_text("note.txt", "hello").unwrap();

        assert_eq!(context.read_text("note.txt").unwrap(), "hello");
        assert!(root.path().join("ex1").join("note.txt").exists());
    }
}
