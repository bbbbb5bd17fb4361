#![cfg(feature = "std")]

//! Cosmetic preferences kept in a string key-value store.
//!
//! The store has the shape of browser local storage: flat string keys and
//! string values. Only `gridSize` matters to placement; changing it through
//! [`Preferences::set_grid_size`] notifies every subscribed session.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tokio::sync::watch;

use crate::config::GridSize;
use crate::session::GridSizeSource;

pub const GRID_SIZE_KEY: &str = "gridSize";
pub const THEME_KEY: &str = "theme";
pub const ANIMATIONS_KEY: &str = "animations";
pub const SOUND_KEY: &str = "soundEnabled";
pub const DIFFICULTY_KEY: &str = "difficulty";

/// Errors raised while reading or writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("preferences file error: {0}")]
    Io(#[from] io::Error),
    #[error("preferences file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Key-value persistence behind [`Preferences`].
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store persisted as one flat JSON object; rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("loaded {} preference(s) from {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, picking up changes written by another process.
    pub fn refresh(&mut self) -> Result<(), PreferenceError> {
        *self = Self::open(&self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value.to_owned());
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(PreferenceError::InvalidValue {
                key: THEME_KEY,
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(PreferenceError::InvalidValue {
                key: DIFFICULTY_KEY,
                value: s.to_owned(),
            }),
        }
    }
}

/// Every preference with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub grid_size: GridSize,
    pub theme: Theme,
    pub animations: bool,
    pub sound_enabled: bool,
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            theme: Theme::default(),
            animations: true,
            sound_enabled: true,
            difficulty: Difficulty::default(),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<13} {}", GRID_SIZE_KEY, self.grid_size.get())?;
        writeln!(f, "{:<13} {}", THEME_KEY, self.theme.as_str())?;
        writeln!(f, "{:<13} {}", ANIMATIONS_KEY, self.animations)?;
        writeln!(f, "{:<13} {}", SOUND_KEY, self.sound_enabled)?;
        write!(f, "{:<13} {}", DIFFICULTY_KEY, self.difficulty.as_str())
    }
}

fn parse_grid_size(value: &str) -> Option<GridSize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| GridSize::try_from(n).ok())
}

/// Typed access to a [`PreferenceStore`] with grid size notifications.
pub struct Preferences<S: PreferenceStore> {
    store: S,
    grid_tx: watch::Sender<GridSize>,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        let grid = read_or_default(&store, GRID_SIZE_KEY, parse_grid_size, GridSize::default());
        let (grid_tx, _) = watch::channel(grid);
        Self { store, grid_tx }
    }

    /// Current settings; missing or malformed entries fall back to defaults.
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            grid_size: self.grid_size(),
            theme: read_or_default(&self.store, THEME_KEY, |v| v.parse().ok(), defaults.theme),
            animations: read_or_default(
                &self.store,
                ANIMATIONS_KEY,
                |v| v.parse().ok(),
                defaults.animations,
            ),
            sound_enabled: read_or_default(
                &self.store,
                SOUND_KEY,
                |v| v.parse().ok(),
                defaults.sound_enabled,
            ),
            difficulty: read_or_default(
                &self.store,
                DIFFICULTY_KEY,
                |v| v.parse().ok(),
                defaults.difficulty,
            ),
        }
    }

    /// Grid size last published to subscribers.
    pub fn grid_size(&self) -> GridSize {
        *self.grid_tx.borrow()
    }

    /// Store a new grid size and notify subscribers.
    pub fn set_grid_size(&mut self, size: GridSize) -> Result<(), PreferenceError> {
        self.store.set(GRID_SIZE_KEY, &size.get().to_string())?;
        let previous = self.grid_tx.send_replace(size);
        if previous != size {
            log::info!("grid size set to {}", size);
        }
        Ok(())
    }

    /// Re-read the grid size from the store, e.g. after [`FileStore::refresh`].
    /// Subscribers are notified only if the value changed.
    pub fn reload_grid_size(&mut self) -> GridSize {
        let size = read_or_default(&self.store, GRID_SIZE_KEY, parse_grid_size, GridSize::default());
        self.grid_tx.send_if_modified(|current| {
            if *current == size {
                false
            } else {
                *current = size;
                true
            }
        });
        size
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PreferenceError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    pub fn set_animations(&mut self, enabled: bool) -> Result<(), PreferenceError> {
        self.store.set(ANIMATIONS_KEY, if enabled { "true" } else { "false" })
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) -> Result<(), PreferenceError> {
        self.store.set(SOUND_KEY, if enabled { "true" } else { "false" })
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), PreferenceError> {
        self.store.set(DIFFICULTY_KEY, difficulty.as_str())
    }

    /// Receiver that follows grid size changes; usable as a [`GridSizeSource`].
    pub fn subscribe_grid_size(&self) -> watch::Receiver<GridSize> {
        self.grid_tx.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl Preferences<FileStore> {
    /// Re-read the preferences file and publish a grid size written there by
    /// another process.
    pub fn reload(&mut self) -> Result<GridSize, PreferenceError> {
        self.store.refresh()?;
        Ok(self.reload_grid_size())
    }
}

fn read_or_default<S, T, F>(store: &S, key: &str, parse: F, default: T) -> T
where
    S: PreferenceStore,
    F: FnOnce(&str) -> Option<T>,
{
    match store.get(key) {
        None => default,
        Some(raw) => parse(&raw).unwrap_or_else(|| {
            log::warn!("ignoring invalid {} preference {:?}", key, raw);
            default
        }),
    }
}

impl GridSizeSource for watch::Receiver<GridSize> {
    fn latest(&mut self) -> GridSize {
        *self.borrow_and_update()
    }
}
