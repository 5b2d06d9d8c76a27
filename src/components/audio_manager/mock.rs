// Recording backend for session tests. Callbacks are fired by hand so tests
// control when the "library" reports back.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{PlaybackStatus, Sound, SoundBackend, SoundError, SoundEvents, SoundOptions, StatusSink};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MockCall {
    Create { id: usize, src: String, volume: f64 },
    Play(usize),
    Pause(usize),
    Volume(usize, f64),
    Unload(usize),
}

#[derive(Default)]
struct MockState {
    calls: Vec<MockCall>,
    created: Vec<SoundOptions>,
    events: Vec<SoundEvents>,
    live: usize,
    fail_next: bool,
}

#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    state: Rc<RefCell<MockState>>,
}

impl MockBackend {
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.borrow().calls.clone()
    }

    pub fn created(&self) -> Vec<SoundOptions> {
        self.state.borrow().created.clone()
    }

    pub fn live_handles(&self) -> usize {
        self.state.borrow().live
    }

    pub fn volume_calls(&self, handle: usize) -> Vec<f64> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                MockCall::Volume(id, volume) if *id == handle => Some(*volume),
                _ => None,
            })
            .collect()
    }

    pub fn fail_next_create(&self) {
        self.state.borrow_mut().fail_next = true;
    }

    // Fires regardless of unload, like a backend whose event races the release.
    fn fire(&self, handle: usize, pick: impl Fn(&SoundEvents) -> Rc<dyn Fn()>) {
        let callback = self.state.borrow().events.get(handle).map(pick);
        if let Some(callback) = callback {
            callback();
        }
    }

    pub fn fire_play(&self, handle: usize) {
        self.fire(handle, |events| events.on_play.clone());
    }

    pub fn fire_pause(&self, handle: usize) {
        self.fire(handle, |events| events.on_pause.clone());
    }

    pub fn fire_end(&self, handle: usize) {
        self.fire(handle, |events| events.on_end.clone());
    }
}

pub(crate) struct MockSound {
    id: usize,
    state: Rc<RefCell<MockState>>,
    unloaded: Cell<bool>,
}

impl Sound for MockSound {
    fn play(&self) {
        self.state.borrow_mut().calls.push(MockCall::Play(self.id));
    }

    fn pause(&self) {
        self.state.borrow_mut().calls.push(MockCall::Pause(self.id));
    }

    fn set_volume(&self, volume: f64) {
        self.state
            .borrow_mut()
            .calls
            .push(MockCall::Volume(self.id, volume));
    }

    fn unload(&mut self) {
        if self.unloaded.replace(true) {
            return;
        }
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::Unload(self.id));
        state.live -= 1;
    }
}

impl SoundBackend for MockBackend {
    type Sound = MockSound;

    fn create(&self, options: SoundOptions, events: SoundEvents) -> Result<MockSound, SoundError> {
        let mut state = self.state.borrow_mut();
        if std::mem::take(&mut state.fail_next) {
            return Err(SoundError::CreateElement("mock failure".to_string()));
        }

        let id = state.created.len();
        state.calls.push(MockCall::Create {
            id,
            src: options.src.clone(),
            volume: options.volume,
        });
        state.created.push(options);
        state.events.push(events);
        state.live += 1;

        Ok(MockSound {
            id,
            state: self.state.clone(),
            unloaded: Cell::new(false),
        })
    }
}

#[derive(Clone, Default)]
pub(crate) struct StatusCell(Rc<Cell<PlaybackStatus>>);

impl StatusCell {
    pub fn get(&self) -> PlaybackStatus {
        self.0.get()
    }
}

impl StatusSink for StatusCell {
    fn status(&self) -> PlaybackStatus {
        self.0.get()
    }

    fn set_status(&self, status: PlaybackStatus) {
        self.0.set(status);
    }
}
