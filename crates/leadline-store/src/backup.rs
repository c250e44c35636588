use crate::db;
use crate::error::{Result, StoreError};
use crate::paths;
use rusqlite::backup::Backup;
use rusqlite::Connection;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const PAGES_PER_STEP: i32 = 200;
const PAUSE_BETWEEN_STEPS: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub path: PathBuf,
    pub bytes: u64,
}

impl BackupReport {
    pub fn to_json(&self) -> serde_json::Value {
        json!({ "path": self.path.display().to_string(), "bytes": self.bytes })
    }
}

/// Online copy of the open database. Refuses to write over the live file or
/// its WAL/SHM sidecars.
pub fn backup_to(conn: &Connection, path: &Path) -> Result<BackupReport> {
    paths::ensure_parent_dir(path)?;
    let target = absolute_target(path)?;
    if let Some(live) = live_db_path(conn) {
        let live = absolute_target(&live)?;
        if target == live || is_sidecar(&target, &live) || same_inode(&target, &live)? {
            return Err(StoreError::InvalidBackupPath(path.to_path_buf()));
        }
    }

    let mut dest = Connection::open(&target)?;
    {
        let backup = Backup::new(conn, &mut dest)?;
        backup.run_to_completion(PAGES_PER_STEP, PAUSE_BETWEEN_STEPS, None)?;
    }
    drop(dest);
    db::restrict_db_permissions(&target)?;

    let bytes = fs::metadata(&target)?.len();
    info!(path = %target.display(), bytes, "backup written");
    Ok(BackupReport {
        path: target,
        bytes,
    })
}

fn absolute_target(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(fs::canonicalize(path)?);
    }
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidBackupPath(path.to_path_buf()))?;
    Ok(fs::canonicalize(parent)?.join(file_name))
}

fn live_db_path(conn: &Connection) -> Option<PathBuf> {
    conn.path()
        .filter(|file| !file.is_empty())
        .map(PathBuf::from)
}

fn is_sidecar(target: &Path, live: &Path) -> bool {
    ["-wal", "-shm", "-journal"].iter().any(|suffix| {
        let mut sidecar = live.as_os_str().to_owned();
        sidecar.push(suffix);
        target == Path::new(&sidecar)
    })
}

#[cfg(unix)]
fn same_inode(target: &Path, live: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    if !target.exists() || !live.exists() {
        return Ok(false);
    }
    let target_meta = fs::metadata(target)?;
    let live_meta = fs::metadata(live)?;
    Ok(target_meta.dev() == live_meta.dev() && target_meta.ino() == live_meta.ino())
}

#[cfg(not(unix))]
fn same_inode(_target: &Path, _live: &Path) -> Result<bool> {
    Ok(false)
}
