use dioxus::prelude::*;

/// Range input over 0.0..=1.0 in tenths.
#[component]
pub fn Slider(#[props(default = 1.0)] value: f64, on_change: EventHandler<f64>) -> Element {
    let on_input = move |e: Event<FormData>| {
        if let Ok(val) = e.value().parse::<f64>() {
            on_change.call(val.clamp(0.0, 1.0));
        }
    };

    rsx! {
        input {
            r#type: "range",
            "aria-label": "Volume",
            min: "0",
            max: "1",
            step: "0.1",
            value: "{value}",
            class: "player-slider h-1.5 bg-neutral-600 rounded-full appearance-none",
            oninput: on_input,
        }
    }
}
