use std::cell::RefCell;
use std::rc::Rc;

use crate::components::audio_manager::{PlaybackSession, PlaybackStatus, SoundBackend, StreamConfig};
use dioxus::prelude::*;

type SharedSession<B> = Rc<RefCell<PlaybackSession<B, Signal<PlaybackStatus>>>>;

/// What the control bar's buttons act on.
pub(super) struct PlaybackControls<B: SoundBackend> {
    session: SharedSession<B>,
    volume: Signal<f64>,
}

impl<B: SoundBackend> Clone for PlaybackControls<B> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            volume: self.volume,
        }
    }
}

impl<B: SoundBackend> PlaybackControls<B> {
    pub fn toggle_play(&self) {
        self.session.borrow().toggle_play();
    }

    /// Mute goes straight to the live handle, then the new volume flows back
    /// through the effect like any slider change.
    pub fn toggle_mute(&self) {
        let next = self.session.borrow_mut().toggle_mute();
        let mut volume = self.volume;
        volume.set(next);
    }

    pub fn set_volume(&self, value: f64) {
        let mut volume = self.volume;
        volume.set(value);
    }
}

/// Binds a playback session to the calling scope.
///
/// The handle is rebuilt whenever `song_url` or `volume` changes and released
/// when the scope unmounts.
pub(super) fn use_playback_session<B>(
    song_url: String,
    volume: Signal<f64>,
    status: Signal<PlaybackStatus>,
    init: impl FnOnce() -> (B, StreamConfig),
) -> PlaybackControls<B>
where
    B: SoundBackend + 'static,
    B::Sound: 'static,
{
    let session: SharedSession<B> = use_hook(|| {
        let (backend, stream) = init();
        Rc::new(RefCell::new(PlaybackSession::new(
            backend,
            status,
            stream,
            *volume.peek(),
        )))
    });

    {
        let session = session.clone();
        use_effect(use_reactive((&song_url,), move |(song_url,)| {
            let vol = volume();
            let mut session = session.borrow_mut();
            session.set_volume(vol);
            if session.sync(&song_url) {
                tracing::debug!(
                    src = session.loaded_src().unwrap_or_default(),
                    volume = session.volume(),
                    "control bar rebuilt playback handle"
                );
            } else if !session.has_sound() {
                tracing::debug!(src = %song_url, "control bar has no playback handle");
            }
        }));
    }

    {
        let session = session.clone();
        use_drop(move || {
            if let Ok(mut session) = session.try_borrow_mut() {
                session.unmount();
            }
        });
    }

    PlaybackControls { session, volume }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::components::audio_manager::mock::{MockBackend, MockCall};

    #[derive(Clone, Default)]
    struct Harness {
        backend: MockBackend,
        controls: Rc<RefCell<Option<PlaybackControls<MockBackend>>>>,
        status: Rc<Cell<Option<Signal<PlaybackStatus>>>>,
        show: Rc<Cell<Option<Signal<bool>>>>,
    }

    impl Harness {
        fn controls(&self) -> PlaybackControls<MockBackend> {
            self.controls.borrow().clone().expect("bar mounted")
        }
    }

    fn harness_root() -> Element {
        let harness = use_context::<Harness>();
        let show = use_signal(|| true);
        harness.show.set(Some(show));

        rsx! {
            if show() {
                HarnessBar {}
            }
        }
    }

    #[component]
    fn HarnessBar() -> Element {
        let harness = use_context::<Harness>();
        let volume = use_signal(|| 0.5);
        let status = use_signal(PlaybackStatus::default);
        let song_url = "a.mp3".to_string();

        let backend = harness.backend.clone();
        let controls = use_playback_session(song_url, volume, status, move || {
            (backend, StreamConfig::default())
        });
        harness.status.set(Some(status));
        harness
            .controls
            .borrow_mut()
            .get_or_insert_with(|| controls.clone());

        rsx! {}
    }

    fn mount() -> (VirtualDom, Harness) {
        let harness = Harness::default();
        let mut dom = VirtualDom::new(harness_root).with_root_context(harness.clone());
        dom.rebuild_in_place();
        settle(&mut dom);
        (dom, harness)
    }

    // Runs queued tasks, effects and re-renders until nothing is left.
    fn settle(dom: &mut VirtualDom) {
        for _ in 0..4 {
            dom.render_immediate_to_vec();
        }
    }

    #[test]
    fn mounting_the_bar_creates_one_handle() {
        let (_dom, harness) = mount();

        let created = harness.backend.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].src, "a.mp3");
        assert_eq!(created[0].volume, 0.5);
    }

    #[test]
    fn volume_signal_change_rebuilds_the_handle() {
        let (mut dom, harness) = mount();

        dom.in_runtime(|| harness.controls().set_volume(0.8));
        assert_eq!(harness.backend.created().len(), 1);
        settle(&mut dom);

        assert_eq!(
            harness.backend.calls(),
            vec![
                MockCall::Create { id: 0, src: "a.mp3".to_string(), volume: 0.5 },
                MockCall::Unload(0),
                MockCall::Create { id: 1, src: "a.mp3".to_string(), volume: 0.8 },
            ]
        );
    }

    #[test]
    fn mute_reaches_the_live_handle_before_rebuilding() {
        let (mut dom, harness) = mount();

        dom.in_runtime(|| harness.controls().toggle_mute());
        assert_eq!(harness.backend.volume_calls(0), vec![0.0]);
        settle(&mut dom);

        let created = harness.backend.created();
        assert_eq!(created.len(), 2);
        assert_eq!(created[1].volume, 0.0);
        assert_eq!(harness.backend.live_handles(), 1);
    }

    #[test]
    fn play_status_follows_handle_callbacks() {
        let (mut dom, harness) = mount();
        let status = harness.status.get().expect("bar mounted");

        dom.in_runtime(|| harness.controls().toggle_play());
        assert_eq!(harness.backend.calls().last(), Some(&MockCall::Play(0)));
        assert_eq!(dom.in_runtime(|| *status.peek()), PlaybackStatus::Idle);

        dom.in_runtime(|| harness.backend.fire_play(0));
        settle(&mut dom);
        assert_eq!(dom.in_runtime(|| *status.peek()), PlaybackStatus::Playing);
    }

    #[test]
    fn unmounting_the_bar_releases_the_handle() {
        let (mut dom, harness) = mount();
        let mut show = harness.show.get().expect("root rendered");

        dom.in_runtime(|| show.set(false));
        settle(&mut dom);

        assert_eq!(harness.backend.live_handles(), 0);
        assert_eq!(harness.backend.calls().last(), Some(&MockCall::Unload(0)));
    }
}
