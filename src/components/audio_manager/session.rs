use std::cell::Cell;
use std::rc::Rc;

use super::{
    clamp_volume, PlaybackStatus, Sound, SoundBackend, SoundEvents, SoundOptions, StatusSink,
};
use crate::db::PlayerSettings;

/// Streaming options applied to every handle a session creates.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    pub html5: bool,
    pub format: Vec<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            html5: true,
            format: vec!["mp3".to_string()],
        }
    }
}

impl From<&PlayerSettings> for StreamConfig {
    fn from(settings: &PlayerSettings) -> Self {
        let format = if settings.stream_format.is_empty() {
            StreamConfig::default().format
        } else {
            settings.stream_format.clone()
        };
        Self {
            html5: settings.stream_html5,
            format,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LoadedSource {
    src: String,
    volume: f64,
}

struct LiveSound<S> {
    sound: S,
    // Cleared on release; callbacks check it before touching status.
    alive: Rc<Cell<bool>>,
}

/// Owns at most one playback handle for the control bar.
///
/// `sync` is the dependency-change hook: it releases the current handle and
/// creates a new one whenever the `(src, volume)` key differs from the one the
/// live handle was built with. Status only ever changes inside handle callbacks.
pub struct PlaybackSession<B: SoundBackend, S: StatusSink> {
    backend: B,
    status: S,
    stream: StreamConfig,
    live: Option<LiveSound<B::Sound>>,
    loaded: Option<LoadedSource>,
    volume: f64,
}

impl<B: SoundBackend, S: StatusSink> PlaybackSession<B, S> {
    pub fn new(backend: B, status: S, stream: StreamConfig, volume: f64) -> Self {
        Self {
            backend,
            status,
            stream,
            live: None,
            loaded: None,
            volume: clamp_volume(volume),
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status.status()
    }

    pub fn has_sound(&self) -> bool {
        self.live.is_some()
    }

    /// Source the live handle was created for.
    pub fn loaded_src(&self) -> Option<&str> {
        self.live
            .as_ref()
            .and(self.loaded.as_ref())
            .map(|loaded| loaded.src.as_str())
    }

    /// Slider input. Only records the value; the next `sync` rebuilds the handle.
    pub fn set_volume(&mut self, volume: f64) -> f64 {
        self.volume = clamp_volume(volume);
        self.volume
    }

    /// Brings the handle in line with `src` at the current volume.
    /// Returns true when a new handle was created.
    pub fn sync(&mut self, src: &str) -> bool {
        let key = LoadedSource {
            src: src.trim().to_string(),
            volume: self.volume,
        };
        if self.loaded.as_ref() == Some(&key) {
            return false;
        }

        self.release();
        let created = !key.src.is_empty() && self.create(&key);
        self.loaded = Some(key);
        created
    }

    fn create(&mut self, key: &LoadedSource) -> bool {
        let alive = Rc::new(Cell::new(true));
        let options = SoundOptions {
            src: key.src.clone(),
            volume: key.volume,
            html5: self.stream.html5,
            format: self.stream.format.clone(),
        };

        match self.backend.create(options, self.events(&alive)) {
            Ok(sound) => {
                tracing::debug!(src = %key.src, volume = key.volume, "created playback handle");
                self.live = Some(LiveSound { sound, alive });
                true
            }
            Err(err) => {
                alive.set(false);
                tracing::warn!(src = %key.src, "failed to create playback handle: {err}");
                false
            }
        }
    }

    fn events(&self, alive: &Rc<Cell<bool>>) -> SoundEvents {
        let report = |next: PlaybackStatus| {
            let alive = alive.clone();
            let status = self.status.clone();
            Rc::new(move || {
                if alive.get() {
                    status.set_status(next);
                }
            }) as Rc<dyn Fn()>
        };

        SoundEvents {
            on_play: report(PlaybackStatus::Playing),
            on_end: report(PlaybackStatus::Idle),
            on_pause: report(PlaybackStatus::Paused),
        }
    }

    /// Play when stopped, pause when playing. No-op without a handle.
    pub fn toggle_play(&self) {
        let Some(live) = self.live.as_ref() else {
            return;
        };
        if self.status.status().is_playing() {
            live.sound.pause();
        } else {
            live.sound.play();
        }
    }

    /// Flips the volume between 0 and 1 and pushes it into the live handle.
    pub fn toggle_mute(&mut self) -> f64 {
        let next = if self.volume == 0.0 { 1.0 } else { 0.0 };
        self.volume = next;
        if let Some(live) = self.live.as_ref() {
            live.sound.set_volume(next);
        }
        next
    }

    /// Releases the handle and returns the status to idle.
    pub fn release(&mut self) {
        if self.release_sound() {
            self.status.set_status(PlaybackStatus::Idle);
        }
    }

    /// Releases the handle without touching status, for use while the owning
    /// scope is being torn down.
    pub fn unmount(&mut self) {
        self.release_sound();
        self.loaded = None;
    }

    fn release_sound(&mut self) -> bool {
        let Some(mut live) = self.live.take() else {
            return false;
        };
        live.alive.set(false);
        live.sound.unload();
        tracing::debug!(
            src = self.loaded.as_ref().map(|l| l.src.as_str()).unwrap_or_default(),
            "released playback handle"
        );
        true
    }
}

impl<B: SoundBackend, S: StatusSink> Drop for PlaybackSession<B, S> {
    fn drop(&mut self) {
        self.release_sound();
    }
}
