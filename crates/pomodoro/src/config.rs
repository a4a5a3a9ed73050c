use crate::events::AppEvent;
use crate::theme::Theme;
use crate::timer::{DEFAULT_LONG_BREAK_INTERVAL, Durations};
use async_channel::Sender;
use dial::tracker::DEFAULT_HIT_TOLERANCE;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub durations: Durations,
    pub theme: Theme,
    /// Every n-th finished focus phase is followed by a long break.
    pub long_break_interval: u32,
    pub auto_start: bool,
    pub hit_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            theme: Theme::default(),
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
            auto_start: true,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Config watcher error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Config directory I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "pomodoro", "pomodoro")
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn get_settings_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("settings.json"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    let config = load_config_from(config::File::from(config_path).required(false))?;
    log::debug!("Loaded config: {:?}", config);
    Ok(config)
}

fn load_config_from<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("POMODORO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

type WatchEvents = async_channel::Receiver<notify::Result<notify::Event>>;

/// Starts watching the directory holding `config_path`. The watcher must be kept alive
/// for as long as events are wanted.
fn watch_config_dir(config_path: &Path) -> Result<(RecommendedWatcher, WatchEvents), ConfigError> {
    let dir = config_path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(dir)?;

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, events_rx))
}

fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let watched = get_config_path()
        .and_then(|path| watch_config_dir(&path).map(|(watcher, events)| (path, watcher, events)));
    let (config_path, _watcher, events) = match watched {
        Ok(w) => w,
        Err(e) => {
            log::error!("Config reload disabled: {}", e);
            return;
        }
    };
    log::debug!("Watching {} for changes", config_path.display());

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("{}", ConfigError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Minutes;

    fn from_toml(raw: &str) -> Config {
        load_config_from(config::File::from_str(raw, config::FileFormat::Toml)).unwrap()
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = from_toml("");
        assert_eq!(config.durations, Durations::default());
        assert_eq!(config.theme, Theme::Lavender);
        assert_eq!(config.long_break_interval, 4);
        assert!(config.auto_start);
        assert_eq!(config.hit_tolerance, 50.0);
    }

    #[test]
    fn test_partial_file_overrides() {
        let config = from_toml(
            r#"
theme = "peach"
auto_start = false

[durations]
focus = 50
"#,
        );
        assert_eq!(config.theme, Theme::Peach);
        assert!(!config.auto_start);
        assert_eq!(config.durations.focus, Minutes::new(50));
        assert_eq!(config.durations.long_break, Minutes::new(15));
    }

    #[test]
    fn test_only_changes_to_config_file_trigger_reload() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let config_path = PathBuf::from("/home/u/.config/pomodoro/config.toml");
        let other = PathBuf::from("/home/u/.config/pomodoro/settings.json");

        let modify = notify::Event::new(EventKind::Modify(ModifyKind::Any));
        assert!(is_config_change(&modify.clone().add_path(config_path.clone()), &config_path));
        assert!(!is_config_change(&modify.add_path(other), &config_path));

        let create =
            notify::Event::new(EventKind::Create(CreateKind::File)).add_path(config_path.clone());
        assert!(is_config_change(&create, &config_path));

        let access =
            notify::Event::new(EventKind::Access(AccessKind::Any)).add_path(config_path.clone());
        assert!(!is_config_change(&access, &config_path));
    }

    #[test]
    fn test_watcher_errors_are_config_errors() {
        let err = ConfigError::from(notify::Error::generic("inotify limit reached"));
        assert!(matches!(err, ConfigError::Notify(_)));
        assert!(err.to_string().contains("inotify limit reached"));

        let err = ConfigError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let config = from_toml(DEFAULT_CONFIG);
        assert_eq!(config.durations, Durations::default());
        assert_eq!(config.long_break_interval, 4);
    }
}
