use std::collections::BTreeSet;

use crate::api::*;
use crate::components::{LikeButton, LikedSongsSignal, MediaItem, Player, PlayerQueue};
use crate::db::{
    initialize_database, load_liked_songs, load_settings, normalize_volume, save_settings,
    PlayerSettings,
};
use dioxus::prelude::*;

#[component]
pub fn AppShell() -> Element {
    let library = use_signal(|| match bundled_library() {
        Ok(songs) => songs,
        Err(err) => {
            tracing::error!("bundled library is invalid: {err}");
            Vec::new()
        }
    });
    let mut settings = use_signal(PlayerSettings::default);
    let mut liked_songs = use_signal(BTreeSet::<String>::new);
    let queue_ids = use_signal(Vec::<String>::new);
    let active_id = use_signal(|| None::<String>);
    let queue = PlayerQueue::new(queue_ids, active_id);

    // Provide state via context
    use_context_provider(|| library);
    use_context_provider(|| settings);
    use_context_provider(|| LikedSongsSignal(liked_songs));
    use_context_provider(|| queue);

    // Initialize storage and load saved state on mount
    use_effect(move || {
        spawn(async move {
            if let Err(err) = initialize_database().await {
                tracing::error!("failed to initialize storage: {err}");
                return;
            }

            match load_settings().await {
                Ok(mut loaded) => {
                    let original_volume = loaded.initial_volume;
                    loaded.initial_volume = normalize_volume(original_volume);
                    if loaded.initial_volume != original_volume {
                        if let Err(err) = save_settings(loaded.clone()).await {
                            tracing::warn!("failed to save normalized settings: {err}");
                        }
                    }
                    tracing::info!(
                        initial_volume = loaded.initial_volume,
                        formats = ?loaded.stream_format,
                        "loaded player settings"
                    );
                    settings.set(loaded);
                }
                Err(err) => tracing::warn!("failed to load settings, using defaults: {err}"),
            }

            match load_liked_songs().await {
                Ok(liked) => liked_songs.set(liked),
                Err(err) => tracing::warn!("failed to load liked songs: {err}"),
            }
        });
    });

    let on_select = use_callback(move |song_id: String| {
        let ids = library.peek().iter().map(|song| song.id.clone()).collect();
        queue.set_ids(ids);
        queue.set_id(song_id);
    });

    rsx! {
        div { class: "song-list flex flex-col gap-y-2 w-full",
            h1 { class: "text-white text-2xl font-semibold mb-4", "Library" }
            if library().is_empty() {
                p { class: "text-neutral-400", "No songs available." }
            }
            for song in library() {
                div { key: "{song.id}", class: "flex items-center gap-x-4 w-full",
                    div { class: "flex-1",
                        MediaItem { song: song.clone(), onclick: on_select }
                    }
                    LikeButton { song_id: song.id.clone() }
                }
            }
        }
        Player {}
    }
}
