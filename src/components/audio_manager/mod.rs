//! Audio Manager - owns the playback handle behind the control bar.
//! Handles are created and released outside of the render cycle so that
//! unrelated state changes never restart audio.

use std::rc::Rc;

use dioxus::prelude::*;
use serde::Serialize;
use thiserror::Error;

mod session;

#[cfg(not(target_arch = "wasm32"))]
mod desktop_backend;
#[cfg(target_arch = "wasm32")]
mod web_backend;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(not(target_arch = "wasm32"))]
pub use desktop_backend::{DesktopAudioBackend, DesktopSound};
pub use session::{PlaybackSession, StreamConfig};
#[cfg(target_arch = "wasm32")]
pub use web_backend::{WebAudioBackend, WebSound};

/// Backend used by the running app for the current target.
#[cfg(target_arch = "wasm32")]
pub type PlatformBackend = WebAudioBackend;

/// Backend used by the running app for the current target.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformBackend = DesktopAudioBackend;

pub type SoundCallback = Rc<dyn Fn()>;

/// Callbacks registered on every handle.
#[derive(Clone)]
pub struct SoundEvents {
    pub on_play: SoundCallback,
    pub on_end: SoundCallback,
    pub on_pause: SoundCallback,
}

/// Construction parameters for one handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundOptions {
    pub src: String,
    pub volume: f64,
    /// Stream through a media element instead of decoding the whole file up front.
    pub html5: bool,
    pub format: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SoundError {
    #[cfg(target_arch = "wasm32")]
    #[error("no document available to host the audio element")]
    NoDocument,
    #[error("failed to create audio element: {0}")]
    CreateElement(String),
    #[error("audio bridge rejected the handle: {0}")]
    Bridge(String),
}

/// A live audio resource bound to one source.
///
/// `play` and `pause` only issue requests; the outcome is reported through the
/// `SoundEvents` the handle was created with. After `unload` the handle must not
/// fire any of its callbacks again.
pub trait Sound {
    fn play(&self);
    fn pause(&self);
    fn set_volume(&self, volume: f64);
    fn unload(&mut self);
}

pub trait SoundBackend {
    type Sound: Sound;

    fn create(&self, options: SoundOptions, events: SoundEvents)
        -> Result<Self::Sound, SoundError>;
}

/// Playback lifecycle as observed through handle callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn is_playing(self) -> bool {
        self == PlaybackStatus::Playing
    }
}

/// Where the session mirrors playback status. Reads must not subscribe the caller.
pub trait StatusSink: Clone + 'static {
    fn status(&self) -> PlaybackStatus;
    fn set_status(&self, status: PlaybackStatus);
}

impl StatusSink for Signal<PlaybackStatus> {
    fn status(&self) -> PlaybackStatus {
        *self.peek()
    }

    fn set_status(&self, status: PlaybackStatus) {
        let mut signal = *self;
        if *signal.peek() != status {
            signal.set(status);
        }
    }
}

/// Maps a container/codec hint to the mime type a media element understands.
pub(crate) fn format_mime(format: &str) -> String {
    match format.trim().to_ascii_lowercase().as_str() {
        "mp3" | "mpeg" => "audio/mpeg".to_string(),
        "m4a" | "aac" => "audio/mp4".to_string(),
        "oga" | "ogg" => "audio/ogg".to_string(),
        "weba" | "webm" => "audio/webm".to_string(),
        other => format!("audio/{other}"),
    }
}

pub(crate) fn clamp_volume(volume: f64) -> f64 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_hints_cover_common_formats() {
        assert_eq!(format_mime("mp3"), "audio/mpeg");
        assert_eq!(format_mime(" AAC "), "audio/mp4");
        assert_eq!(format_mime("flac"), "audio/flac");
    }

    #[test]
    fn volume_is_clamped_into_unit_range() {
        assert_eq!(clamp_volume(1.4), 1.0);
        assert_eq!(clamp_volume(-0.2), 0.0);
        assert_eq!(clamp_volume(f64::NAN), 0.0);
        assert_eq!(clamp_volume(0.35), 0.35);
    }
}
