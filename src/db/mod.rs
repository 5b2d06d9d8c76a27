use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};
#[cfg(not(target_arch = "wasm32"))]
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(String),
    #[error("failed to prepare data directory: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid stored json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no data directory available")]
    NoDataDir,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        DbError::Sqlite(err.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        DbError::Io(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<StorageError> for DbError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SerdeError(err) => DbError::Json(err),
            other => DbError::Storage(other.to_string()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "tunebar.player_settings";
#[cfg(target_arch = "wasm32")]
const LIKED_KEY: &str = "tunebar.liked_songs";

const DEFAULT_VOLUME: f64 = 1.0;

/// Player configuration stored alongside the liked songs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,
    /// Stream through a media element rather than decoding whole files.
    #[serde(default = "default_stream_html5")]
    pub stream_html5: bool,
    #[serde(default = "default_stream_format")]
    pub stream_format: Vec<String>,
    /// Prefix for relative song and image paths. Empty means paths are used as-is.
    #[serde(default)]
    pub media_base_url: String,
}

fn default_initial_volume() -> f64 {
    DEFAULT_VOLUME
}

fn default_stream_html5() -> bool {
    true
}

fn default_stream_format() -> Vec<String> {
    vec!["mp3".to_string()]
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
            stream_html5: default_stream_html5(),
            stream_format: default_stream_format(),
            media_base_url: String::new(),
        }
    }
}

/// Brings a stored volume back into 0.0..=1.0, accepting legacy percent values.
pub fn normalize_volume(mut value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_VOLUME;
    }
    let mut passes = 0;
    while value > 1.0 && passes < 4 {
        value /= 100.0;
        passes += 1;
    }
    value.clamp(0.0, 1.0)
}

// Native storage: a small SQLite file in the platform data directory.

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<Connection, DbError> {
    let data_dir = dirs::data_dir().ok_or(DbError::NoDataDir)?.join("tunebar");
    std::fs::create_dir_all(&data_dir)?;
    Ok(Connection::open(data_dir.join("tunebar.db"))?)
}

#[cfg(not(target_arch = "wasm32"))]
fn create_tables(conn: &Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS liked_songs (
            song_id TEXT PRIMARY KEY
        )",
        [],
    )?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_settings(conn: &Connection) -> Result<PlayerSettings, DbError> {
    let json: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key = 'player_settings'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match json {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(PlayerSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_settings(conn: &Connection, settings: &PlayerSettings) -> Result<(), DbError> {
    let json = serde_json::to_string(settings)?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES ('player_settings', ?1)",
        [&json],
    )?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_liked_songs(conn: &Connection) -> Result<BTreeSet<String>, DbError> {
    let mut stmt = conn.prepare("SELECT song_id FROM liked_songs")?;
    let liked = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(liked)
}

#[cfg(not(target_arch = "wasm32"))]
fn write_song_liked(conn: &Connection, song_id: &str, liked: bool) -> Result<(), DbError> {
    if liked {
        conn.execute(
            "INSERT OR IGNORE INTO liked_songs (song_id) VALUES (?1)",
            [song_id],
        )?;
    } else {
        conn.execute("DELETE FROM liked_songs WHERE song_id = ?1", [song_id])?;
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), DbError> {
    create_tables(&get_db_connection()?)
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), DbError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<PlayerSettings, DbError> {
    read_settings(&get_db_connection()?)
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<PlayerSettings, DbError> {
    match LocalStorage::get(SETTINGS_KEY) {
        Ok(settings) => Ok(settings),
        Err(StorageError::KeyNotFound(_)) => Ok(PlayerSettings::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: PlayerSettings) -> Result<(), DbError> {
    write_settings(&get_db_connection()?, &settings)
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: PlayerSettings) -> Result<(), DbError> {
    Ok(LocalStorage::set(SETTINGS_KEY, settings)?)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_liked_songs() -> Result<BTreeSet<String>, DbError> {
    read_liked_songs(&get_db_connection()?)
}

#[cfg(target_arch = "wasm32")]
pub async fn load_liked_songs() -> Result<BTreeSet<String>, DbError> {
    match LocalStorage::get(LIKED_KEY) {
        Ok(liked) => Ok(liked),
        Err(StorageError::KeyNotFound(_)) => Ok(BTreeSet::new()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn set_song_liked(song_id: String, liked: bool) -> Result<(), DbError> {
    write_song_liked(&get_db_connection()?, &song_id, liked)
}

#[cfg(target_arch = "wasm32")]
pub async fn set_song_liked(song_id: String, liked: bool) -> Result<(), DbError> {
    let mut current = load_liked_songs().await?;
    if liked {
        current.insert(song_id);
    } else {
        current.remove(&song_id);
    }
    Ok(LocalStorage::set(LIKED_KEY, current)?)
}
