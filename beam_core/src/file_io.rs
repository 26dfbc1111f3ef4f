//! # File I/O Module
//!
//! Writes calculation output to disk:
//! - **Report export**: the plain-text report from [`crate::report`]
//! - **Saved analyses**: JSON records that can be reloaded later
//!
//! Every write goes to a temporary file first, is synced, then renamed over
//! the target. Report export additionally holds a [`FileLock`] on the target
//! for the duration of the write; the lock is released when the guard drops,
//! including on early error returns.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::calculations::compute;
//! use beam_core::file_io::export_report;
//! use beam_core::units::UnitSystem;
//! use std::path::Path;
//!
//! let analysis = compute(2.0, 10.0, 5.0, UnitSystem::Metric)?;
//! export_report(&analysis, Path::new("beam_results.txt"), 2)?;
//! # Ok::<(), beam_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::calculations::BeamAnalysis;
use crate::errors::{CalcError, CalcResult};
use crate::report::render_report;

/// Current schema version for saved analysis files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Who is writing a target, as recorded in its `.lock` sidecar.
///
/// Informational only: whether a target is locked is decided by the OS lock
/// on the sidecar, never by these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockOwner {
    pub user: String,
    pub pid: u32,
    pub since: DateTime<Utc>,
}

impl LockOwner {
    /// Owner record for the current process
    pub fn current(user: impl Into<String>) -> Self {
        LockOwner {
            user: user.into(),
            pid: std::process::id(),
            since: Utc::now(),
        }
    }

    fn describe(&self) -> String {
        format!("{} (pid {})", self.user, self.pid)
    }
}

/// Login name of the current user, for lock metadata
pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Scoped exclusive lock on an output file.
///
/// Holds an fs2 lock on a `.lock` sidecar next to the target. The OS drops
/// that lock when its process exits, so a sidecar left behind by a crashed
/// writer never blocks the next one. Dropping the guard removes the sidecar.
pub struct FileLock {
    target_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub owner: LockOwner,
}

impl FileLock {
    /// Acquire an exclusive lock on `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired
    /// * `Err(CalcError::FileLocked)` - Another open handle holds the lock
    pub fn acquire(path: &Path, user: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let mut lock_file = open_sidecar(&lock_path)?;

        if lock_file.try_lock_exclusive().is_err() {
            let holder = read_owner(&mut lock_file);
            return Err(CalcError::file_locked(
                path.display().to_string(),
                holder.as_ref().map_or_else(|| "another process".to_string(), LockOwner::describe),
                holder.map_or_else(|| "unknown".to_string(), |h| h.since.to_rfc3339()),
            ));
        }

        // Ours now; whatever a dead writer left is overwritten
        let owner = LockOwner::current(user);
        let write_err =
            |e: std::io::Error| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string());
        let owner_json = serde_json::to_vec_pretty(&owner)?;
        lock_file.set_len(0).map_err(write_err)?;
        lock_file.seek(SeekFrom::Start(0)).map_err(write_err)?;
        lock_file.write_all(&owner_json).map_err(write_err)?;
        lock_file.sync_all().map_err(write_err)?;

        Ok(FileLock {
            target_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            owner,
        })
    }

    /// Return the holder of the lock on `path` if the lock is currently held.
    ///
    /// A sidecar whose OS lock is free reports `None`, whatever it contains.
    pub fn check(path: &Path) -> Option<LockOwner> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        let mut file = open_sidecar(&lock_path).ok()?;
        if file.try_lock_exclusive().is_ok() {
            let _ = file.unlock();
            return None;
        }
        read_owner(&mut file)
    }

    /// Path of the file this lock protects
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // OS lock goes with _lock_file
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Open (or create) the sidecar without disturbing its contents.
fn open_sidecar(lock_path: &Path) -> CalcResult<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| CalcError::file_error("open lock", lock_path.display().to_string(), e.to_string()))
}

/// Best-effort read of the owner record, for error messages only.
fn read_owner(file: &mut File) -> Option<LockOwner> {
    let mut contents = String::new();
    file.seek(SeekFrom::Start(0)).ok()?;
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn lock_path_for(path: &Path) -> PathBuf {
    with_suffix(path, "lock")
}

fn tmp_path_for(path: &Path) -> PathBuf {
    with_suffix(path, "tmp")
}

/// `report.txt` -> `report.txt.<suffix>`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    let extension = out
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    out.set_extension(extension);
    out
}

/// Write `contents` to `path` through a synced temp file and rename.
fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Export the plain-text report for `analysis` to `path`.
///
/// The target stays locked for the whole write.
pub fn export_report(analysis: &BeamAnalysis, path: &Path, decimals: usize) -> CalcResult<()> {
    let _lock = FileLock::acquire(path, current_user())?;
    write_atomic(path, render_report(analysis, decimals).as_bytes())
}

/// A calculation persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAnalysis {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// When the record was written
    pub saved_at: DateTime<Utc>,
    /// Input, results, diagrams and labels
    pub analysis: BeamAnalysis,
}

impl SavedAnalysis {
    pub fn new(analysis: BeamAnalysis) -> Self {
        SavedAnalysis {
            version: SCHEMA_VERSION.to_string(),
            saved_at: Utc::now(),
            analysis,
        }
    }
}

/// Save an analysis as pretty-printed JSON with atomic write semantics.
pub fn save_analysis(saved: &SavedAnalysis, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(saved)?;
    write_atomic(path, json.as_bytes())
}

/// Load a saved analysis, checking its schema version.
///
/// # Returns
///
/// * `Ok(SavedAnalysis)` - Loaded record
/// * `Err(CalcError::VersionMismatch)` - Written by an incompatible version
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_analysis(path: &Path) -> CalcResult<SavedAnalysis> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let saved: SavedAnalysis = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&saved.version)?;
    Ok(saved)
}

/// Major versions must match; within 0.x a newer minor is rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, rest @ ..], [current_major, current_rest @ ..]) => {
            if file_major != current_major {
                return Err(mismatch());
            }
            if *current_major == 0 {
                if let (Some(file_minor), Some(current_minor)) = (rest.first(), current_rest.first()) {
                    if file_minor > current_minor {
                        return Err(mismatch());
                    }
                }
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::compute;
    use crate::units::UnitSystem;
    use std::env::temp_dir;

    fn temp_path(name: &str, ext: &str) -> PathBuf {
        temp_dir().join(format!("beam_core_test_{}.{}", name, ext))
    }

    #[test]
    fn test_sidecar_paths() {
        let path = Path::new("/path/to/results.txt");
        assert_eq!(lock_path_for(path), Path::new("/path/to/results.txt.lock"));
        assert_eq!(tmp_path_for(path), Path::new("/path/to/results.txt.tmp"));
        assert_eq!(lock_path_for(Path::new("results")), Path::new("results.lock"));
    }

    #[test]
    fn test_export_report() {
        let path = temp_path("export", "txt");
        let analysis = compute(2.0, 10.0, 5.0, UnitSystem::Metric).unwrap();

        export_report(&analysis, &path, 2).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Simply Supported Beam Analysis\n"));
        assert!(contents.contains("Moment at B (Mb): -12.00 kN-m"));

        // Lock and temp file are gone after the export
        assert!(!lock_path_for(&path).exists());
        assert!(!tmp_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_export_refuses_locked_target() {
        let path = temp_path("export_locked", "txt");
        let lock = FileLock::acquire(&path, "someone@example.com").unwrap();
        assert_eq!(lock.target_path(), path.as_path());

        let analysis = compute(1.0, 1.0, 2.0, UnitSystem::Metric).unwrap();
        let err = export_report(&analysis, &path, 2).unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");

        drop(lock);
        assert!(!lock_path_for(&path).exists());
        export_report(&analysis, &path, 2).unwrap();

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip", "json");
        let analysis = compute(6.5, 2.25, 16.0, UnitSystem::Imperial).unwrap();

        save_analysis(&SavedAnalysis::new(analysis.clone()), &path).unwrap();
        let loaded = load_analysis(&path).unwrap();

        assert_eq!(loaded.version, SCHEMA_VERSION);
        assert_eq!(loaded.analysis.input, analysis.input);
        assert_eq!(loaded.analysis.labels, analysis.labels);
        assert_eq!(loaded.analysis.diagrams.moment.len(), analysis.diagrams.moment.len());
        assert!((loaded.analysis.result.reaction_a - analysis.result.reaction_a).abs() < 1e-12);
        assert!((loaded.analysis.result.moment_b - analysis.result.moment_b).abs() < 1e-12);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_path("garbage", "json");
        fs::write(&path, "not json").unwrap();

        let err = load_analysis(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("").is_err());
    }

    #[test]
    fn test_leftover_sidecar_does_not_block_export() {
        let path = temp_path("export_leftover", "txt");
        let lock_path = lock_path_for(&path);

        // Sidecar of a writer that died without cleaning up
        fs::write(
            &lock_path,
            r#"{"user":"me","pid":999999,"since":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(FileLock::check(&path).is_none());

        let analysis = compute(2.0, 10.0, 5.0, UnitSystem::Metric).unwrap();
        export_report(&analysis, &path, 2).unwrap();

        assert!(fs::read_to_string(&path).unwrap().contains("Reaction at A (Ra): 6.00 kN"));
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_records_owner() {
        let path = temp_path("lock_owner", "txt");
        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.owner.user, "test@example.com");
        assert_eq!(lock.owner.pid, std::process::id());

        let holder = FileLock::check(&path).unwrap();
        assert_eq!(holder.user, "test@example.com");

        match FileLock::acquire(&path, "other").err().unwrap() {
            CalcError::FileLocked { locked_by, .. } => assert!(locked_by.starts_with("test@example.com")),
            other => panic!("expected FileLocked, got {other:?}"),
        }

        drop(lock);
        assert!(FileLock::check(&path).is_none());
    }
}
