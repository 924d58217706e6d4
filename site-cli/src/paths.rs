//! Where the CLI keeps its files.
//!
//! Config under the platform config dir, stored preferences under the data
//! dir, logs under the cache dir. All lookups return `None` when no home
//! directory can be determined.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Name of the log file written by the running process.
const LATEST_LOG: &str = "latest.log";

/// Archived logs kept after rotation.
const KEEP_LOGS: usize = 10;

fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "azigroup", "site")
}

/// `config.toml` in the config dir, e.g. `~/.config/site/config.toml`.
pub fn config_file() -> Option<PathBuf> {
    dirs().map(|d| d.config_dir().join("config.toml"))
}

/// `settings.json` in the data dir, e.g. `~/.local/share/site/settings.json`.
pub fn settings_file() -> Option<PathBuf> {
    dirs().map(|d| d.data_dir().join("settings.json"))
}

pub fn log_file() -> Option<PathBuf> {
    dirs().map(|d| d.cache_dir().join(LATEST_LOG))
}

/// Archive the previous run's log and prune old archives. Must run before
/// the logger opens `latest.log`.
pub fn rotate_logs() {
    let Some(dirs) = dirs() else { return };
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    if let Err(e) = rotate_in(dirs.cache_dir(), &stamp, KEEP_LOGS) {
        eprintln!("warning: log rotation failed: {e}");
    }
}

/// Rename `latest.log` in `dir` to `{stamp}.log` and delete all but the
/// `keep` newest archives. Archive names sort chronologically.
fn rotate_in(dir: &Path, stamp: &str, keep: usize) -> io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        fs::rename(&latest, dir.join(format!("{stamp}.log")))?;
    }

    let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for old in &archives[..excess] {
        fs::remove_file(old)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("site-cli-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_rotation_archives_latest() {
        let dir = scratch("archive");
        fs::write(dir.join(LATEST_LOG), "run 1").unwrap();

        rotate_in(&dir, "20240305_101500", 10).unwrap();

        assert!(!dir.join(LATEST_LOG).exists());
        assert_eq!(
            fs::read_to_string(dir.join("20240305_101500.log")).unwrap(),
            "run 1"
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rotation_keeps_newest_archives() {
        let dir = scratch("prune");
        for day in 1..=4 {
            fs::write(dir.join(format!("2024030{day}_000000.log")), "").unwrap();
        }
        fs::write(dir.join("notes.txt"), "").unwrap();

        rotate_in(&dir, "20240305_000000", 2).unwrap();

        let mut left: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, vec!["20240303_000000.log", "20240304_000000.log", "notes.txt"]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
