//! User preferences document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::storage::StorageResult;

/// Remembered window placement for the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: 740,
            height: 600,
            x: None,
            y: None,
        }
    }
}

/// Per-user settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPrefs {
    pub window: WindowGeometry,
    pub data_file_path: PathBuf,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            window: WindowGeometry::default(),
            data_file_path: PathBuf::from("records.json"),
        }
    }
}

/// Reads preferences, falling back to defaults when the file is missing or
/// malformed. Preferences are advisory; a broken file never blocks startup.
pub fn load_prefs(path: &Path) -> UserPrefs {
    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(prefs) => prefs,
            Err(err) => {
                log::warn!(
                    "event=prefs_malformed module=storage status=fallback path={} error={err}",
                    path.display()
                );
                UserPrefs::default()
            }
        },
        Err(_) => UserPrefs::default(),
    }
}

/// Overwrites the preferences document at `path`.
pub fn save_prefs(path: &Path, prefs: &UserPrefs) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(prefs)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_prefs, UserPrefs};
    use std::path::Path;

    #[test]
    fn missing_prefs_file_falls_back_to_defaults() {
        let prefs = load_prefs(Path::new("/nonexistent/prefs.json"));
        assert_eq!(prefs, UserPrefs::default());
        assert_eq!(prefs.window.width, 740);
    }
}
