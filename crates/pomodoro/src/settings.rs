use crate::config;
use crate::theme::Theme;
use crate::timer::{Durations, Minutes, TimerMode};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay, AsRefStr)]
pub enum SettingKey {
    #[strum(serialize = "selected_theme")]
    SelectedTheme,
    #[strum(serialize = "pomodoro_duration")]
    FocusMinutes,
    #[strum(serialize = "short_break_duration")]
    ShortBreakMinutes,
    #[strum(serialize = "long_break_duration")]
    LongBreakMinutes,
}

impl SettingKey {
    pub fn for_mode(mode: TimerMode) -> Self {
        match mode {
            TimerMode::Focus => Self::FocusMinutes,
            TimerMode::ShortBreak => Self::ShortBreakMinutes,
            TimerMode::LongBreak => Self::LongBreakMinutes,
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to determine settings directory")]
    SettingsDirNotFound,
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait SettingsStore {
    fn get(&self, key: SettingKey) -> Option<u32>;
    fn set(&mut self, key: SettingKey, value: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, u32>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: SettingKey) -> Option<u32> {
        self.values.get(key.as_ref()).copied()
    }

    fn set(&mut self, key: SettingKey, value: u32) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, u32>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs_err::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn open_default() -> Result<Self, StoreError> {
        let path = config::get_settings_path().map_err(|_| StoreError::SettingsDirNotFound)?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs_err::write(&self.path, raw)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: SettingKey) -> Option<u32> {
        self.values.get(key.as_ref()).copied()
    }

    fn set(&mut self, key: SettingKey, value: u32) -> Result<(), StoreError> {
        if self.values.get(key.as_ref()) == Some(&value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

pub fn open_store() -> Box<dyn SettingsStore> {
    match FileStore::open_default() {
        Ok(store) => {
            log::debug!("Settings loaded from {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::error!("Settings unavailable, changes will not persist: {}", e);
            Box::new(MemoryStore::default())
        }
    }
}

/// Stored durations layered over `defaults`; stored values are re-clamped.
pub fn load_durations(store: &dyn SettingsStore, defaults: Durations) -> Durations {
    let mut durations = defaults;
    for mode in TimerMode::iter() {
        if let Some(minutes) = store.get(SettingKey::for_mode(mode)) {
            durations.set(mode, Minutes::new(minutes));
        }
    }
    durations
}

pub fn save_duration(
    store: &mut dyn SettingsStore,
    mode: TimerMode,
    minutes: Minutes,
) -> Result<(), StoreError> {
    store.set(SettingKey::for_mode(mode), mode.clamp(minutes).get())
}

pub fn load_theme(store: &dyn SettingsStore, default: Theme) -> Theme {
    store
        .get(SettingKey::SelectedTheme)
        .map(Theme::from_index)
        .unwrap_or(default)
}

pub fn save_theme(store: &mut dyn SettingsStore, theme: Theme) -> Result<(), StoreError> {
    store.set(SettingKey::SelectedTheme, theme.index())
}
