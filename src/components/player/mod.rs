use crate::api::Song;
use crate::components::audio_manager::{PlatformBackend, PlaybackStatus, StreamConfig};
use crate::components::{LikeButton, MediaItem, PlayerQueue};
use crate::db::{normalize_volume, PlayerSettings};
use dioxus::prelude::*;

mod controls;
mod playback;

use controls::{NextButton, PlayPauseButton, PrevButton, VolumeControl};
use playback::use_playback_session;

/// Player - mounts the control bar for the active song.
/// Keyed by the playable URL so a new song gets a fresh control bar.
#[component]
pub fn Player() -> Element {
    let library = use_context::<Signal<Vec<Song>>>();
    let settings = use_context::<Signal<PlayerSettings>>();
    let queue = use_context::<PlayerQueue>();

    let song = queue
        .active_id()
        .and_then(|id| library().into_iter().find(|song| song.id == id));
    let Some(song) = song else {
        return rsx! {};
    };
    let Some(song_url) = song.stream_url(&settings().media_base_url) else {
        tracing::warn!(song_id = %song.id, "active song has no playable path");
        return rsx! {};
    };
    let bar_key = song_url.clone();

    rsx! {
        div { class: "player-shell",
            PlayerContent { key: "{bar_key}", song, song_url }
        }
    }
}

#[component]
pub fn PlayerContent(song: Song, song_url: String) -> Element {
    let settings = use_context::<Signal<PlayerSettings>>();
    let volume = use_signal(|| normalize_volume(settings.peek().initial_volume));
    let status = use_signal(PlaybackStatus::default);

    let controls = use_playback_session(song_url, volume, status, || {
        let stream = StreamConfig::from(&*settings.peek());
        (PlatformBackend::default(), stream)
    });

    let on_toggle_play = {
        let controls = controls.clone();
        use_callback(move |_: MouseEvent| controls.toggle_play())
    };

    // Mute goes straight to the live handle; the slider only updates state
    let on_toggle_mute = {
        let controls = controls.clone();
        use_callback(move |_: MouseEvent| controls.toggle_mute())
    };

    let on_volume_change = move |value: f64| controls.set_volume(value);

    let playing = status().is_playing();
    let song_id = song.id.clone();

    rsx! {
        div { class: "player-grid",
            div { class: "flex w-full justify-start",
                div { class: "flex items-center gap-x-4",
                    MediaItem { song }
                    LikeButton { song_id }
                }
            }

            div { class: "player-transport-mobile col-auto w-full justify-end items-center",
                PlayPauseButton { playing, onclick: on_toggle_play }
            }

            div { class: "player-transport-desktop h-full justify-center items-center w-full max-w-[722px] gap-x-6",
                PrevButton {}
                PlayPauseButton { playing, onclick: on_toggle_play }
                NextButton {}
            }

            div { class: "player-volume w-full justify-end pr-2",
                VolumeControl {
                    volume: volume(),
                    on_toggle_mute,
                    on_change: on_volume_change,
                }
            }
        }
    }
}
