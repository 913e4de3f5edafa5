use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const COUNTDOWN_MIN_SECS: u32 = 5;
pub const COUNTDOWN_MAX_SECS: u32 = 600;
pub const COUNTDOWN_STEP_SECS: u32 = 5;
pub const NOTIFY_MIN_SECS: u32 = 1;
pub const NOTIFY_MAX_SECS: u32 = 60;

pub const DEFAULT_FONT: &str = "Monospaced";

/// User preferences, stored as one pretty-printed JSON object. The member
/// names are part of the on-disk format; missing members take their
/// defaults, unknown members are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub is_countdown_mode: bool,
    pub countdown_start_time: u32,
    pub auto_start: bool,
    pub enable_animations: bool,
    pub night_mode: bool,
    pub selected_font: String,
    pub enable_notifications: bool,
    pub notification_time: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_countdown_mode: false,
            countdown_start_time: 60,
            auto_start: false,
            enable_animations: true,
            night_mode: false,
            selected_font: DEFAULT_FONT.to_string(),
            enable_notifications: false,
            notification_time: 5,
        }
    }
}

impl Settings {
    /// Clamp loaded integers into their documented ranges.
    fn normalize(&mut self) {
        self.countdown_start_time = self
            .countdown_start_time
            .clamp(COUNTDOWN_MIN_SECS, COUNTDOWN_MAX_SECS);
        self.notification_time =
            self.notification_time.clamp(NOTIFY_MIN_SECS, NOTIFY_MAX_SECS);
    }

    /// Move the countdown start value by `steps` increments of 5 s within
    /// [5, 600].
    pub fn step_countdown_start(&mut self, steps: i32) {
        self.countdown_start_time = stepped(
            self.countdown_start_time,
            steps,
            COUNTDOWN_STEP_SECS,
            COUNTDOWN_MIN_SECS,
            COUNTDOWN_MAX_SECS,
        );
    }

    /// Move the notification lead time by `steps` seconds within [1, 60].
    pub fn step_notification_time(&mut self, steps: i32) {
        self.notification_time =
            stepped(self.notification_time, steps, 1, NOTIFY_MIN_SECS, NOTIFY_MAX_SECS);
    }
}

fn stepped(value: u32, steps: i32, step: u32, min: u32, max: u32) -> u32 {
    let next = i64::from(value) + i64::from(steps) * i64::from(step);
    next.clamp(i64::from(min), i64::from(max)) as u32
}

pub struct SettingsStore {
    settings: Settings,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Open the store at `path`, writing a file of defaults on first run.
    /// A file that fails to parse loads as defaults but stays writable; one
    /// that cannot be read at all drops the session to in-memory defaults.
    /// Both are logged, never fatal.
    pub fn open(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    log::warn!("Settings directory unavailable: {:?}", e);
                    return Self {
                        settings: Settings::default(),
                        path: None,
                    };
                }
            }
        }

        let mut settings = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(parsed) => parsed,
                Err(e) => {
                    log::warn!("Settings file corrupt, using defaults: {:?}", e);
                    Settings::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let defaults = Settings::default();
                write_settings(&path, &defaults);
                defaults
            }
            Err(e) => {
                log::warn!("Settings file unreadable: {:?}", e);
                return Self {
                    settings: Settings::default(),
                    path: None,
                };
            }
        };
        settings.normalize();

        Self {
            settings,
            path: Some(path),
        }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from("tempo").join("settings.json")
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Apply an edit and persist immediately. A failed write keeps the
    /// in-memory value for the session.
    pub fn update(&mut self, edit: impl FnOnce(&mut Settings)) {
        edit(&mut self.settings);
        if let Some(path) = &self.path {
            write_settings(path, &self.settings);
        }
    }
}

fn write_settings(path: &Path, settings: &Settings) {
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = fs::write(path, json) {
                log::error!("Failed to save settings: {:?}", e);
            }
        }
        Err(e) => log::error!("Failed to encode settings: {:?}", e),
    }
}
