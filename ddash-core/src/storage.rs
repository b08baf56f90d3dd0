//! Blob storage for uploaded build and test logs.
//!
//! Logs are addressed by a relative name that includes the id of the
//! owning row. Saving under a name that is already taken replaces the
//! stored content in place: names are never suffixed or versioned, so
//! re-uploading a log for the same row always lands at the same path,
//! and two rows never share one.

use ddash_types::data::Entity;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait LogStorage: Send + Sync {
    /// Stores `contents` under `name`, replacing any previous content,
    /// and returns the name the blob is reachable at.
    fn save(&self, name: &str, contents: &[u8]) -> io::Result<String>;

    fn open(&self, name: &str) -> io::Result<Vec<u8>>;

    fn exists(&self, name: &str) -> bool;
}

/// Name a log uploaded for row `id` of `entity` is stored under: the
/// entity's folder, the row id, then the final component of the
/// client-side file name.
pub fn upload_path(entity: Entity, id: i32, file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("log.txt");
    let folder = match entity {
        Entity::BuildResult => "build_results",
        Entity::TestRunResult => "test_run_results",
        _ => "logs",
    };
    format!("{folder}/{id}/{base}")
}

/// Reads back a stored log. Rows created without an upload record an
/// empty name and have no log.
pub(crate) fn read_log(storage: &dyn LogStorage, name: &str) -> io::Result<Option<Vec<u8>>> {
    if name.is_empty() || !storage.exists(name) {
        return Ok(None);
    }
    storage.open(name).map(Some)
}

/// Filesystem storage rooted at a media directory.
#[derive(Clone, Debug)]
pub struct OverwriteStorage {
    root: PathBuf,
}

impl OverwriteStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> io::Result<PathBuf> {
        let relative = Path::new(name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("log name {name:?} escapes the media root"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl LogStorage for OverwriteStorage {
    fn save(&self, name: &str, contents: &[u8]) -> io::Result<String> {
        let path = self.path(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if path.exists() {
            tracing::debug!("overwriting stored log {}", name);
            fs::remove_file(&path)?;
        }
        fs::write(&path, contents)?;
        Ok(name.to_string())
    }

    fn open(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.path(name)?)
    }

    fn exists(&self, name: &str) -> bool {
        self.path(name).map(|path| path.is_file()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_paths() {
        assert_eq!(
            upload_path(Entity::BuildResult, 4, "build.log"),
            "build_results/4/build.log"
        );
        assert_eq!(
            upload_path(Entity::TestRunResult, 12, "/tmp/run/results.log"),
            "test_run_results/12/results.log"
        );
        assert_eq!(
            upload_path(Entity::BuildResult, 4, ""),
            "build_results/4/log.txt"
        );
        assert_ne!(
            upload_path(Entity::BuildResult, 4, "build.log"),
            upload_path(Entity::BuildResult, 5, "build.log")
        );
    }

    #[test]
    fn saving_twice_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = OverwriteStorage::new(dir.path());
        let first = storage.save("build_results/1/build.log", b"first attempt").unwrap();
        let second = storage.save("build_results/1/build.log", b"second").unwrap();
        assert_eq!(first, second);
        assert_eq!(storage.open(&second).unwrap(), b"second");
        let entries = fs::read_dir(dir.path().join("build_results/1")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn names_cannot_escape_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = OverwriteStorage::new(dir.path());
        assert!(storage.save("../outside.log", b"x").is_err());
        assert!(storage.save("/etc/passwd", b"x").is_err());
        assert!(!storage.exists("../outside.log"));
    }
}
