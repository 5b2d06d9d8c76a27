//! The components module contains all shared components for our app.

mod app;
pub mod audio_manager;
mod icons;
mod like_button;
mod media_item;
mod player;
mod player_queue;
mod slider;

pub use app::*;
pub use icons::*;
pub use like_button::*;
pub use media_item::*;
pub use player::*;
pub use player_queue::*;
pub use slider::*;
