use std::{cell::RefCell, path::PathBuf, rc::Rc};

use crate::Result;

/// Receives the exported grid text after every commit.
pub trait Persistence {
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be stored.
    fn persist(&mut self, text: &str) -> Result<()>;
}

/// Writes each committed snapshot to a file, replacing its contents.
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Persistence for FilePersistence {
    fn persist(&mut self, text: &str) -> Result<()> {
        std::fs::write(&self.path, text)?;
        log::debug!("Stored diagram to {}", self.path.display());
        Ok(())
    }
}

/// Records committed snapshots in memory. Clones share the same record.
#[derive(Default, Clone, Debug)]
pub struct MemoryPersistence {
    snapshots: Rc<RefCell<Vec<String>>>,
}

impl MemoryPersistence {
    pub fn snapshots(&self) -> Vec<String> {
        self.snapshots.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.snapshots.borrow().last().cloned()
    }
}

impl Persistence for MemoryPersistence {
    fn persist(&mut self, text: &str) -> Result<()> {
        self.snapshots.borrow_mut().push(text.to_string());
        Ok(())
    }
}
