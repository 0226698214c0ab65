//! File-backed snapshot adapter.
//!
//! Layout: a store root directory holding
//! - `settings.snap`: the current snapshot blob
//! - `LOCK`: fs2 exclusive lock, held for the adapter's lifetime so
//!   two writer processes cannot interleave saves
//!
//! Saves are atomic: write to `settings.snap.tmp`, optionally fsync,
//! rename over the target, then fsync the directory (best-effort on
//! non-unix). A crashed save leaves either the old or the new snapshot,
//! never a torn file.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
#[cfg(unix)]
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::StoreOptions;
use crate::consts::{LOCK_FILE, SNAP_FILE, SNAP_TMP_FILE};
use crate::errors::PersistError;

use super::Persistence;

#[cfg(unix)]
fn fsync_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
fn fsync_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

pub struct FileSnapshot {
    root: PathBuf,
    data_fsync: bool,
    _lock: std::fs::File, // held for the adapter's lifetime
}

impl FileSnapshot {
    /// Open (creating the root directory if needed) with default
    /// options: fsync on save.
    pub fn open(root: &Path) -> Result<Self> {
        Self::open_with_config(root, &StoreOptions::default())
    }

    pub fn open_with_config(root: &Path, opts: &StoreOptions) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create store root {}", root.display()))?;

        let lock_path = root.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("open lock file {}", lock_path.display()))?;
        lock.lock_exclusive()
            .with_context(|| format!("lock_exclusive {}", lock_path.display()))?;

        Ok(Self {
            root: root.to_path_buf(),
            data_fsync: opts.data_fsync,
            _lock: lock,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAP_FILE)
    }
}

impl Persistence for FileSnapshot {
    fn load(&mut self) -> Result<Option<Vec<u8>>, PersistError> {
        match fs::read(self.snapshot_path()) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistError::Io(e)),
        }
    }

    fn save(&mut self, blob: &[u8]) -> Result<(), PersistError> {
        let path = self.snapshot_path();
        let tmp = self.root.join(SNAP_TMP_FILE);
        let _ = fs::remove_file(&tmp); // best-effort

        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)?;
        f.write_all(blob)?;
        if self.data_fsync {
            f.sync_all()?;
        }
        drop(f);

        fs::rename(&tmp, &path)?;
        if self.data_fsync {
            let _ = fsync_dir(&path);
        }
        Ok(())
    }
}
