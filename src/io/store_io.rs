use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::model::task_list::TaskList;
use crate::parse::{ParseError, parse_task_list, serialize_task_list};

/// Extension appended to every task file name
pub const EXTENSION: &str = "tsk";

/// Characters that may not appear in a task file name
const DISALLOWED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Error type for task file operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0:?} is not a valid task file name")]
    InvalidFileName(String),
    #[error("task file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse { path: PathBuf, source: ParseError },
}

/// What a file name is about to be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePurpose {
    /// Target of a save; need not exist yet
    Save,
    /// Must name an existing task file
    Load,
    /// Must name an existing task file
    Delete,
}

/// Whole-file persistence for task lists, rooted at one directory.
///
/// Remembers which file was last loaded so that saving over it releases
/// the old file before the replacement lands.
#[derive(Debug)]
pub struct TaskStore {
    dir: PathBuf,
    current: Option<PathBuf>,
}

impl TaskStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TaskStore {
            dir: dir.into(),
            current: None,
        }
    }

    /// The file most recently loaded, if it is still open
    pub fn current_file(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Check a user-supplied name and normalize it to `<name>.tsk`.
    ///
    /// For `Load` and `Delete` the file must also exist.
    pub fn validate_name(&self, candidate: &str, purpose: NamePurpose) -> Result<String, StoreError> {
        let name = normalize_name(candidate)?;
        match purpose {
            NamePurpose::Save => Ok(name),
            NamePurpose::Load | NamePurpose::Delete => {
                if self.dir.join(&name).is_file() {
                    Ok(name)
                } else {
                    Err(StoreError::InvalidFileName(candidate.to_string()))
                }
            }
        }
    }

    /// Full path a (valid) name resolves to
    pub fn path_for(&self, candidate: &str) -> Result<PathBuf, StoreError> {
        Ok(self.dir.join(normalize_name(candidate)?))
    }

    /// Read a whole task list from `name`. The loaded file becomes current.
    pub fn load(&mut self, name: &str) -> Result<TaskList, StoreError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(StoreError::FileNotFound(path));
        }
        let content = fs::read_to_string(&path).map_err(|e| StoreError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        let list = parse_task_list(&content).map_err(|e| StoreError::Parse {
            path: path.clone(),
            source: e,
        })?;
        info!(path = %path.display(), tasks = list.len(), "loaded task list");
        self.current = Some(path);
        Ok(list)
    }

    /// Write the whole list to `name`, replacing any existing file.
    /// Returns the path written.
    pub fn save(&mut self, list: &TaskList, name: &str) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::WriteError {
            path: self.dir.clone(),
            source: e,
        })?;

        let reopen = self.release_if_current(&path);
        let content = serialize_task_list(list);
        let written = atomic_write(&path, content.as_bytes());
        if reopen {
            self.current = Some(path.clone());
        }
        written.map_err(|e| StoreError::WriteError {
            path: path.clone(),
            source: e,
        })?;
        info!(path = %path.display(), tasks = list.len(), "saved task list");
        Ok(path)
    }

    /// Remove the task file `name`.
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(StoreError::FileNotFound(path));
        }
        self.release_if_current(&path);
        fs::remove_file(&path).map_err(|e| StoreError::WriteError {
            path: path.clone(),
            source: e,
        })?;
        info!(path = %path.display(), "deleted task file");
        Ok(())
    }

    /// Names of all task files in the directory, sorted.
    pub fn list_files(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::ReadError {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::ReadError {
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Drop the current-file marker if it points at `path`.
    /// Returns whether it did.
    fn release_if_current(&mut self, path: &Path) -> bool {
        if self.current.as_deref() == Some(path) {
            debug!(path = %path.display(), "releasing current task file");
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// Trim, sanity-check and add the `.tsk` extension when absent.
fn normalize_name(candidate: &str) -> Result<String, StoreError> {
    let invalid = || StoreError::InvalidFileName(candidate.to_string());
    let name = candidate.trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(invalid());
    }
    if name.chars().any(|c| c.is_control() || DISALLOWED.contains(&c)) {
        return Err(invalid());
    }

    let suffix = format!(".{}", EXTENSION);
    match name.strip_suffix(&suffix) {
        Some("") => Err(invalid()),
        Some(_) => Ok(name.to_string()),
        None => Ok(format!("{}{}", name, suffix)),
    }
}

/// Replace `path` with `content` in one step: write a sibling temp file,
/// then rename it over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
