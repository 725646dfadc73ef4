//! # File I/O Module
//!
//! Handles project file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Version validation**: Ensure schema compatibility
//!
//! Also owns the plain-text wall export: an append-only results file with
//! one space-separated line per wall, and the symmetric reader for it.
//!
//! ## File Formats
//!
//! Projects are saved as `.swl` (Shearline) files containing JSON. Lock
//! files use `.swl.lock` extension with metadata about who holds the lock.
//! The wall export is bare text: `id x1 y1 x2 y2 height orientation`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use shearline_core::file_io::{save_project, load_project, FileLock};
//! use shearline_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "26-001", "Client");
//! let path = Path::new("myproject.swl");
//!
//! // Acquire lock before saving
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//!
//! // Save with atomic write
//! save_project(&project, path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{ShearError, ShearResult};
use crate::geometry::{Orientation, Point};
use crate::project::{Project, SCHEMA_VERSION};
use crate::walls::{Wall, WallSystem};

/// Lock file metadata stored in .swl.lock files
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
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. .lock file with metadata for user visibility
pub struct FileLock {
    /// Path to the main project file
    project_path: PathBuf,
    /// Path to the lock file
    lock_path: PathBuf,
    /// The underlying file handle (keeps OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the .swl project file
    /// * `user_id` - Identifier for the user acquiring the lock
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(ShearError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> ShearResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        // A live lock file from someone else means no.
        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(ShearError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                // Stale lock, take it over.
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                ShearError::file_error(
                    "create lock",
                    lock_path.display().to_string(),
                    e.to_string(),
                )
            })?;

        // Non-blocking exclusive OS-level lock on top of the sidecar file.
        lock_file.try_lock_exclusive().map_err(|_| {
            ShearError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| ShearError::SerializationError {
                reason: e.to_string(),
            })?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            ShearError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            ShearError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            project_path: path.to_path_buf(),
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
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    /// Get the path to the project file
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Remove the lock file; the OS lock goes with the handle.
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Get the lock file path for a project file
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut lock_path = project_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Read lock info from a lock file
fn read_lock_info(lock_path: &Path) -> ShearResult<LockInfo> {
    let mut file = File::open(lock_path).map_err(|e| {
        ShearError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        ShearError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| ShearError::SerializationError {
        reason: e.to_string(),
    })
}

/// Check if a lock is stale (the process that created it is no longer running)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    // Locks older than a day are treated as abandoned.
    let age = Utc::now() - info.locked_at;
    age.num_hours() > 24
}

/// Save a project to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to .swl (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted during write.
pub fn save_project(project: &Project, path: &Path) -> ShearResult<()> {
    let json =
        serde_json::to_string_pretty(project).map_err(|e| ShearError::SerializationError {
            reason: e.to_string(),
        })?;

    let tmp_path = path.with_extension("swl.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        ShearError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        ShearError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        ShearError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ShearError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a project from a `.swl` file.
///
/// The wall system's braced-wall-line clusterers are derived state and are
/// rebuilt here after deserialization, so a loaded project is immediately
/// ready to solve.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(ShearError::VersionMismatch)` - File version is incompatible
/// * `Err(ShearError::SerializationError)` - Invalid JSON
/// * `Err(ShearError::FileError)` - I/O error
pub fn load_project(path: &Path) -> ShearResult<Project> {
    let mut file = File::open(path)
        .map_err(|e| ShearError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| ShearError::file_error("read", path.display().to_string(), e.to_string()))?;

    let mut project: Project =
        serde_json::from_str(&contents).map_err(|e| ShearError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    project.system.refresh();

    Ok(project)
}

/// Load a project, returning whether it's read-only due to a lock.
///
/// # Returns
///
/// * `Ok((Project, None))` - Loaded successfully, no lock
/// * `Ok((Project, Some(LockInfo)))` - Loaded, but another user has the lock
pub fn load_project_with_lock_check(path: &Path) -> ShearResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    let lock_info = FileLock::check(path);
    Ok((project, lock_info))
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> ShearResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(ShearError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(ShearError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions, a newer minor version than ours is unreadable
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(ShearError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    Ok(())
}

// ============================================================================
// Plain-text wall export
// ============================================================================

/// Append every wall in the system to a plain-text results file.
///
/// One line per wall, space-separated:
///
/// ```text
/// id start_x start_y end_x end_y height orientation
/// ```
///
/// The file is append-only; repeated exports accumulate. Ids are
/// informational - a reader assigns fresh ids on import.
pub fn export_walls(system: &WallSystem, path: &Path) -> ShearResult<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| {
            ShearError::file_error("open export", path.display().to_string(), e.to_string())
        })?;

    for (id, wall) in system.walls() {
        writeln!(
            file,
            "{} {} {} {} {} {} {}",
            id,
            wall.start.x,
            wall.start.y,
            wall.end.x,
            wall.end.y,
            wall.height_ft,
            wall.orientation.code(),
        )
        .map_err(|e| {
            ShearError::file_error("write export", path.display().to_string(), e.to_string())
        })?;
    }

    Ok(())
}

/// Read a plain-text wall export back into validated wall records.
///
/// Labels are synthesized from the exported id (`W-{id}`); the records
/// themselves get fresh ids when added to a system.
pub fn read_walls(path: &Path) -> ShearResult<Vec<Wall>> {
    let file = File::open(path).map_err(|e| {
        ShearError::file_error("open export", path.display().to_string(), e.to_string())
    })?;

    let mut walls = Vec::new();
    for (line_number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            ShearError::file_error("read export", path.display().to_string(), e.to_string())
        })?;
        if line.trim().is_empty() {
            continue;
        }
        walls.push(parse_wall_line(&line, line_number + 1, path)?);
    }

    Ok(walls)
}

/// Parse one `id x1 y1 x2 y2 height orientation` export line.
fn parse_wall_line(line: &str, line_number: usize, path: &Path) -> ShearResult<Wall> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 7 {
        return Err(ShearError::file_error(
            "parse export",
            path.display().to_string(),
            format!("line {}: expected 7 fields, found {}", line_number, fields.len()),
        ));
    }

    let parse_f64 = |field: &str, name: &str| -> ShearResult<f64> {
        field.parse().map_err(|_| {
            ShearError::file_error(
                "parse export",
                path.display().to_string(),
                format!("line {}: {} '{}' is not a number", line_number, name, field),
            )
        })
    };

    let id = fields[0];
    let start = Point::new(parse_f64(fields[1], "start_x")?, parse_f64(fields[2], "start_y")?);
    let end = Point::new(parse_f64(fields[3], "end_x")?, parse_f64(fields[4], "end_y")?);
    let height_ft = parse_f64(fields[5], "height")?;
    let orientation = Orientation::from_code(fields[6]).ok_or_else(|| {
        ShearError::file_error(
            "parse export",
            path.display().to_string(),
            format!("line {}: unknown orientation '{}'", line_number, fields[6]),
        )
    })?;

    Wall::new(format!("W-{}", id), start, end, height_ft, orientation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str, extension: &str) -> PathBuf {
        temp_dir().join(format!("shearline_test_{}.{}", name, extension))
    }

    fn sample_project() -> Project {
        let mut project = Project::new("Test Engineer", "TEST-001", "Test Client");
        project.add_wall(
            Wall::new(
                "W-1",
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                9.0,
                Orientation::EastWest,
            )
            .unwrap(),
        );
        project.add_wall(
            Wall::new(
                "W-2",
                Point::new(0.0, 75.0),
                Point::new(20.0, 75.0),
                9.0,
                Orientation::EastWest,
            )
            .unwrap(),
        );
        project
    }

    #[test]
    fn test_lock_path_generation() {
        let project_path = Path::new("/path/to/project.swl");
        let lock_path = lock_path_for(project_path);
        assert_eq!(lock_path, Path::new("/path/to/project.swl.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(info.pid > 0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip", "swl");

        let project = sample_project();
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.system.len(), 2);
        // Clusterers are rebuilt on load.
        assert_eq!(
            loaded
                .system
                .lines(crate::geometry::Orientation::EastWest)
                .line_count(),
            2
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic", "swl");
        let tmp_path = path.with_extension("swl.tmp");

        let project = Project::new("Test", "TEST", "Client");
        save_project(&project, &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_path("lock_test", "swl");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.project_path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_export_append_and_read_back() {
        let path = temp_path("export", "txt");
        let _ = fs::remove_file(&path);

        let project = sample_project();
        export_walls(&project.system, &path).unwrap();

        let walls = read_walls(&path).unwrap();
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].start, Point::new(0.0, 0.0));
        assert_eq!(walls[0].end, Point::new(20.0, 0.0));
        assert_eq!(walls[1].height_ft, 9.0);
        assert_eq!(walls[1].orientation, Orientation::EastWest);

        // Append-only: a second export doubles the line count.
        export_walls(&project.system, &path).unwrap();
        let walls = read_walls(&path).unwrap();
        assert_eq!(walls.len(), 4);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_rejects_malformed_lines() {
        let path = temp_path("malformed", "txt");
        fs::write(&path, "0 0.0 0.0 20.0\n").unwrap();

        let result = read_walls(&path);
        assert!(matches!(result, Err(ShearError::FileError { .. })));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_rejects_degenerate_wall() {
        let path = temp_path("degenerate", "txt");
        fs::write(&path, "0 5.0 5.0 5.0 5.0 9.0 EW\n").unwrap();

        let result = read_walls(&path);
        assert!(matches!(result, Err(ShearError::InvalidGeometry { .. })));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_path("lock_check", "swl");

        let project = Project::new("Test", "TEST", "Client");
        save_project(&project, &path).unwrap();

        let (loaded, lock_info) = load_project_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }
}
