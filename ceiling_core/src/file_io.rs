//! # File I/O Module
//!
//! Estimate file operations:
//! - **Atomic saves**: write to `.fce.tmp`, fsync, rename over the target
//! - **File locking**: an OS lock plus a `.fce.lock` file naming the holder,
//!   so two estimators on a shared drive do not overwrite each other
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use ceiling_core::file_io::{save_estimate, load_estimate, FileLock};
//! use ceiling_core::project::Estimate;
//! use std::path::Path;
//!
//! let estimate = Estimate::new("Estimator", "25-001", "Client");
//! let path = Path::new("job.fce");
//!
//! let lock = FileLock::acquire(path, "estimator@company.com").unwrap();
//! save_estimate(&estimate, path).unwrap();
//! drop(lock);
//!
//! let loaded = load_estimate(path).unwrap();
//! assert_eq!(loaded.meta.job_id, "25-001");
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Estimate, SCHEMA_VERSION};

/// Locks older than this are treated as abandoned.
const STALE_LOCK_HOURS: i64 = 24;

/// Lock file metadata stored in .fce.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Whether the holder has gone away (dead local process, or too old).
    fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    // No cheap liveness check; fall back to the age limit.
    true
}

/// File lock guard that releases the lock when dropped.
pub struct FileLock {
    estimate_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on an estimate file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(CalcError::FileLocked)` - Another user or process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = FileLock::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = open_exclusive(&lock_path).map_err(|e| match e {
            CalcError::FileLocked { .. } => CalcError::file_locked(path.display().to_string(), "another process", "unknown"),
            other => other,
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        lock_file
            .write_all(lock_json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        tracing::debug!("acquired lock on {}", path.display());

        Ok(FileLock {
            estimate_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        read_lock_info(&lock_path).ok().filter(|info| !info.is_stale())
    }

    /// Path to the locked estimate file
    pub fn estimate_path(&self) -> &Path {
        &self.estimate_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // OS lock goes with _lock_file
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(estimate_path: &Path) -> PathBuf {
    let mut lock_path = estimate_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Open the lock file and take the OS lock before touching its contents, so a
/// process that loses the race leaves the holder's metadata intact.
fn open_exclusive(lock_path: &Path) -> CalcResult<File> {
    let lock_file = OpenOptions::new()
        .write(true)
        .read(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

    lock_file
        .try_lock_exclusive()
        .map_err(|_| CalcError::file_locked(lock_path.display().to_string(), "another process", "unknown"))?;

    lock_file
        .set_len(0)
        .map_err(|e| CalcError::file_error("truncate lock", lock_path.display().to_string(), e.to_string()))?;
    Ok(lock_file)
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = fs::read_to_string(lock_path)
        .map_err(|e| CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Save an estimate with atomic write semantics.
///
/// Serializes to JSON, writes `<path>.tmp`, syncs it to disk and renames it
/// over `path`, so an interrupted save never leaves a truncated file.
pub fn save_estimate(estimate: &Estimate, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(estimate).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("fce.tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!("saved estimate {} ({} rooms) to {}", estimate.meta.job_id, estimate.room_count(), path.display());
    Ok(())
}

/// Save a freshly created estimate, refusing to replace an existing file.
///
/// # Returns
///
/// * `Err(CalcError::FileError)` - `path` already exists, or the save failed
pub fn save_new_estimate(estimate: &Estimate, path: &Path) -> CalcResult<()> {
    if path.exists() {
        return Err(CalcError::file_error("create", path.display().to_string(), "File already exists"));
    }
    save_estimate(estimate, path)
}

/// Load an estimate from a file.
///
/// # Returns
///
/// * `Ok(Estimate)` - Successfully loaded estimate
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_estimate(path: &Path) -> CalcResult<Estimate> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let estimate: Estimate = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&estimate.meta.version)?;

    tracing::info!("loaded estimate {} ({} rooms) from {}", estimate.meta.job_id, estimate.room_count(), path.display());
    Ok(estimate)
}

/// Load an estimate along with the lock holder, if someone else has it open.
pub fn load_estimate_with_lock_check(path: &Path) -> CalcResult<(Estimate, Option<LockInfo>)> {
    let estimate = load_estimate(path)?;
    Ok((estimate, FileLock::check(path)))
}

/// Major versions must match; within 0.x the file's minor version may not be
/// newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}
