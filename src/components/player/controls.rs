use crate::components::{Icon, PlayerQueue, Slider};
use dioxus::prelude::*;

/// Play/Pause button. Shows what the handle last reported, not what was requested.
#[component]
pub(super) fn PlayPauseButton(playing: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let label = if playing { "Pause" } else { "Play" };

    rsx! {
        button {
            r#type: "button",
            "aria-label": label,
            class: "h-10 w-10 flex items-center justify-center rounded-full bg-white p-1 cursor-pointer",
            onclick: move |evt| onclick.call(evt),
            if playing {
                Icon {
                    name: "pause".to_string(),
                    class: "w-6 h-6 text-black".to_string(),
                }
            } else {
                Icon {
                    name: "play".to_string(),
                    class: "w-6 h-6 text-black ml-0.5".to_string(),
                }
            }
        }
    }
}

#[component]
pub(super) fn PrevButton() -> Element {
    let queue = use_context::<PlayerQueue>();

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            class: "text-neutral-400 cursor-pointer hover:text-white transition",
            onclick: move |_| queue.play_previous(),
            Icon { name: "prev".to_string(), class: "w-7 h-7".to_string() }
        }
    }
}

#[component]
pub(super) fn NextButton() -> Element {
    let queue = use_context::<PlayerQueue>();

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            class: "text-neutral-400 cursor-pointer hover:text-white transition",
            onclick: move |_| queue.play_next(),
            Icon { name: "next".to_string(), class: "w-7 h-7".to_string() }
        }
    }
}

/// Mute toggle plus volume slider
#[component]
pub(super) fn VolumeControl(
    volume: f64,
    on_toggle_mute: EventHandler<MouseEvent>,
    on_change: EventHandler<f64>,
) -> Element {
    let muted = volume == 0.0;

    rsx! {
        div { class: "flex items-center gap-x-2 w-[120px]",
            button {
                id: "mute-btn",
                r#type: "button",
                class: "cursor-pointer text-white",
                onclick: move |evt| on_toggle_mute.call(evt),
                Icon {
                    name: if muted { "volume-x".to_string() } else { "volume".to_string() },
                    class: "w-8 h-8".to_string(),
                }
            }
            Slider { value: volume, on_change }
        }
    }
}
