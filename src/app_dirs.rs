use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the data directory, mainly for tests and portable installs.
pub const DATA_DIR_ENV: &str = "HANGMAN_DATA_DIR";

const LOG_FILE: &str = "hangman.log";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Directory holding the persisted scores, form submissions and log.
    pub fn data_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("hangman"),
            )
        } else {
            ProjectDirs::from("", "", "hangman").map(|proj_dirs| proj_dirs.data_local_dir().into())
        }
    }

    /// Log file inside `data_dir`, which may come from `--data-dir`.
    pub fn log_path(data_dir: &Path) -> PathBuf {
        data_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_the_data_dir() {
        let path = AppDirs::log_path(Path::new("/tmp/hangman-data"));
        assert_eq!(path, PathBuf::from("/tmp/hangman-data/hangman.log"));
    }
}
