//! Persisted user settings (live in the OS config directory).

use std::path::PathBuf;

use crate::model::{LeavePolicy, ViewMode};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Active view mode key; unknown values fall back to Month on read.
    pub view_mode: String,
    /// Whether dragging out of the chart commits the gesture (true) or
    /// cancels it (false).
    pub commit_on_leave: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Month.key().to_string(),
            commit_on_leave: true,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        std::fs::read_to_string(settings_path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(&path, json);
        }
    }

    pub fn mode(&self) -> ViewMode {
        ViewMode::from_key(&self.view_mode)
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode.key().to_string();
        self.save();
    }

    pub fn leave_policy(&self) -> LeavePolicy {
        if self.commit_on_leave {
            LeavePolicy::Commit
        } else {
            LeavePolicy::Cancel
        }
    }
}

/// OS config directory for the app; also holds user-visible data files.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "Sprintview")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_month_and_commit_on_leave() {
        let s = AppSettings::default();
        assert_eq!(s.mode(), ViewMode::Month);
        assert_eq!(s.leave_policy(), LeavePolicy::Commit);
    }

    #[test]
    fn stale_mode_key_degrades_to_month() {
        let s: AppSettings =
            serde_json::from_str(r#"{ "view_mode": "fortnight" }"#).unwrap_or_default();
        assert_eq!(s.mode(), ViewMode::Month);
    }
}
