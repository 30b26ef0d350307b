//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "moviecat";
const APPLICATION: &str = "moviecat";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the data directory for persistent application data.
///
/// - Linux: `$XDG_DATA_HOME/moviecat` or `~/.local/share/moviecat`
/// - macOS: `~/Library/Application Support/dev.moviecat.moviecat`
/// - Windows: `C:\Users\<User>\AppData\Roaming\moviecat\moviecat\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the cache directory for temporary/regenerable data.
///
/// - Linux: `$XDG_CACHE_HOME/moviecat` or `~/.cache/moviecat`
/// - macOS: `~/Library/Caches/dev.moviecat.moviecat`
/// - Windows: `C:\Users\<User>\AppData\Local\moviecat\moviecat\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the database holding the trending cache and favorites.
pub fn database() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("moviecat.db"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Archived logs kept next to `latest.log`.
const KEEP_ARCHIVED_LOGS: usize = 25;

/// Archives the previous run's log and prunes old archives.
///
/// Call before opening a new [`log_file`].
pub fn rotate_logs() {
    if let Some(latest) = log_file() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        rotate(&latest, &stamp, KEEP_ARCHIVED_LOGS);
    }
}

/// Renames `latest` to `<stamp>.log` beside it, then keeps the `keep` most
/// recently modified archives.
fn rotate(latest: &Path, stamp: &str, keep: usize) {
    let Some(dir) = latest.parent() else { return };

    if latest.exists() {
        let _ = fs::rename(latest, dir.join(format!("{stamp}.log")));
    }

    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut archived: Vec<(SystemTime, PathBuf)> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| path.as_path() != latest && path.extension().is_some_and(|ext| ext == "log"))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();

    // Newest first; everything past `keep` goes.
    archived.sort_by(|a, b| b.cmp(a));
    for (_, path) in archived.into_iter().skip(keep) {
        let _ = fs::remove_file(path);
    }
}
