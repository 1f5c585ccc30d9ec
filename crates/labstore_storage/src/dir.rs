//! Directory-based key-value backend for persistent storage.

use crate::backend::{validate_key, KvBackend};
use crate::error::StorageResult;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// File extension for stored values.
const VALUE_EXT: &str = "json";
/// Suffix for in-flight writes.
const TEMP_SUFFIX: &str = ".tmp";

/// A directory-based key-value backend.
///
/// Each key is stored as one file (`<key>.json`) inside the backend
/// directory. Data survives process restarts.
///
/// # Durability
///
/// Writes use the write-then-rename pattern for crash safety:
/// 1. Write the new value to `<key>.json.tmp`
/// 2. Sync the temporary file to disk
/// 3. Rename it over `<key>.json`
/// 4. Fsync the directory so the rename itself is durable
///
/// A crash at any point leaves the key at its prior value or the new one,
/// never a torn mix - which is exactly the whole-collection-overwrite
/// contract the collection layer is built on.
///
/// # Example
///
/// ```no_run
/// use labstore_storage::{KvBackend, DirBackend};
/// use std::path::Path;
///
/// let mut backend = DirBackend::open(Path::new("store")).unwrap();
/// backend.put("laboratories", b"[]").unwrap();
/// backend.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct DirBackend {
    root: PathBuf,
}

impl DirBackend {
    /// Opens a directory backend, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    pub fn open(root: &Path) -> StorageResult<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Returns the backend's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{VALUE_EXT}"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{VALUE_EXT}{TEMP_SUFFIX}"))
    }

    #[cfg(unix)]
    fn sync_root(&self) -> StorageResult<()> {
        // On Unix, fsync on a directory syncs the directory entries
        let dir = File::open(&self.root)?;
        dir.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_root(&self) -> StorageResult<()> {
        // Windows NTFS journaling covers metadata durability
        Ok(())
    }
}

impl KvBackend for DirBackend {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let path = self.value_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path)?;
        let mut value = Vec::new();
        file.read_to_end(&mut value)?;
        Ok(Some(value))
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        let temp = self.temp_path(key);
        let target = self.value_path(key);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp)?;
        file.write_all(value)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp, &target)?;
        self.sync_root()?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let path = self.value_path(key);

        if path.exists() {
            fs::remove_file(&path)?;
            self.sync_root()?;
        }
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(&format!(".{VALUE_EXT}")) else {
                continue;
            };
            if validate_key(stem).is_ok() {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn sync(&mut self) -> StorageResult<()> {
        self.sync_root()
    }
}
