use dioxus::prelude::*;
use tracing::Level;

mod api;
mod components;
mod db;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialize logger: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#000000" }
        document::Title { "Tunebar" }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
