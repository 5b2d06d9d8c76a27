use crate::components::Icon;
use crate::db::set_song_liked;
use dioxus::prelude::*;
use std::collections::BTreeSet;

/// Ids of the songs the listener has liked.
#[derive(Clone, Copy)]
pub struct LikedSongsSignal(pub Signal<BTreeSet<String>>);

#[component]
pub fn LikeButton(song_id: String) -> Element {
    let mut liked_songs = use_context::<LikedSongsSignal>().0;
    let mut saving = use_signal(|| false);

    let is_liked = liked_songs().contains(&song_id);
    let label = if is_liked { "Unlike" } else { "Like" };

    let on_toggle = move |_| {
        if saving() {
            return;
        }
        let song_id = song_id.clone();
        let should_like = !is_liked;
        spawn(async move {
            saving.set(true);
            match set_song_liked(song_id.clone(), should_like).await {
                Ok(()) => {
                    liked_songs.with_mut(|liked| {
                        if should_like {
                            liked.insert(song_id);
                        } else {
                            liked.remove(&song_id);
                        }
                    });
                }
                Err(err) => tracing::warn!(song_id = %song_id, "failed to update liked song: {err}"),
            }
            saving.set(false);
        });
    };

    rsx! {
        button {
            r#type: "button",
            "aria-label": label,
            disabled: saving(),
            class: if is_liked { "p-1 text-emerald-500 hover:opacity-75 transition" } else { "p-1 text-white hover:opacity-75 transition" },
            onclick: on_toggle,
            Icon {
                name: if is_liked { "heart-filled".to_string() } else { "heart".to_string() },
                class: "w-6 h-6".to_string(),
            }
        }
    }
}
