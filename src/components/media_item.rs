use crate::api::Song;
use crate::components::{Icon, PlayerQueue};
use crate::db::PlayerSettings;
use dioxus::prelude::*;

/// Cover, title and author of one song. Clicking makes it the active song
/// unless the caller handles the click itself.
#[component]
pub fn MediaItem(song: Song, onclick: Option<EventHandler<String>>) -> Element {
    let settings = use_context::<Signal<PlayerSettings>>();
    let queue = use_context::<PlayerQueue>();

    let cover_url = song.cover_url(&settings().media_base_url);
    let author = song.display_author().to_string();

    let on_click = {
        let song_id = song.id.clone();
        move |_| match onclick {
            Some(handler) => handler.call(song_id.clone()),
            None => queue.set_id(song_id.clone()),
        }
    };

    rsx! {
        div {
            class: "flex items-center gap-x-3 cursor-pointer hover:bg-neutral-800/50 w-full p-2 rounded-md",
            onclick: on_click,
            div { class: "relative rounded-md min-h-[48px] min-w-[48px] overflow-hidden bg-neutral-800",
                {
                    match cover_url {
                        Some(url) => rsx! {
                            img {
                                src: "{url}",
                                alt: "{song.title}",
                                class: "w-12 h-12 object-cover",
                                loading: "lazy",
                            }
                        },
                        None => rsx! {
                            div { class: "w-12 h-12 flex items-center justify-center",
                                Icon { name: "music".to_string(), class: "w-5 h-5 text-neutral-400".to_string() }
                            }
                        },
                    }
                }
            }
            div { class: "flex flex-col gap-y-1 overflow-hidden",
                p { class: "text-white truncate", "{song.title}" }
                p { class: "text-neutral-400 text-sm truncate", "{author}" }
            }
        }
    }
}
