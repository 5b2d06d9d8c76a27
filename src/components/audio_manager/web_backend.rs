// Browser backend: one detached HtmlAudioElement per handle.
use dioxus::core::{Runtime, RuntimeGuard};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlAudioElement};

use super::{
    clamp_volume, format_mime, Sound, SoundBackend, SoundCallback, SoundError, SoundEvents,
    SoundOptions,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct WebAudioBackend;

pub struct WebSound {
    audio: HtmlAudioElement,
    listeners: Vec<Closure<dyn FnMut()>>,
}

fn listener(runtime: std::rc::Rc<Runtime>, callback: SoundCallback) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let _guard = RuntimeGuard::new(runtime.clone());
        callback();
    }) as Box<dyn FnMut()>)
}

fn web_try_play(audio: &HtmlAudioElement) {
    if let Ok(promise) = audio.play() {
        // Rejections (autoplay policy, network stalls) are reported by the element's own events.
        wasm_bindgen_futures::spawn_local(async move {
            let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
        });
    }
}

impl SoundBackend for WebAudioBackend {
    type Sound = WebSound;

    fn create(&self, options: SoundOptions, events: SoundEvents) -> Result<WebSound, SoundError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(SoundError::NoDocument)?;
        let audio: HtmlAudioElement = document
            .create_element("audio")
            .map_err(|err| SoundError::CreateElement(format!("{err:?}")))?
            .dyn_into()
            .map_err(|_| SoundError::CreateElement("element is not audio".to_string()))?;

        // Metadata-only preload keeps large files streaming instead of buffering whole.
        let preload = if options.html5 { "metadata" } else { "auto" };
        audio
            .set_attribute("preload", preload)
            .map_err(|err| SoundError::CreateElement(format!("{err:?}")))?;

        let playable = options
            .format
            .iter()
            .any(|format| !audio.can_play_type(&format_mime(format)).is_empty());
        if !playable {
            tracing::warn!(src = %options.src, formats = ?options.format, "browser reports no supported format");
        }

        let runtime = Runtime::current();
        let on_play = listener(runtime.clone(), events.on_play);
        let on_pause = listener(runtime.clone(), events.on_pause);
        let on_end = listener(runtime, events.on_end);
        audio.set_onplay(Some(on_play.as_ref().unchecked_ref()));
        audio.set_onpause(Some(on_pause.as_ref().unchecked_ref()));
        audio.set_onended(Some(on_end.as_ref().unchecked_ref()));

        audio.set_volume(clamp_volume(options.volume));
        audio.set_src(&options.src);

        Ok(WebSound {
            audio,
            listeners: vec![on_play, on_pause, on_end],
        })
    }
}

impl Sound for WebSound {
    fn play(&self) {
        web_try_play(&self.audio);
    }

    fn pause(&self) {
        let _ = self.audio.pause();
    }

    fn set_volume(&self, volume: f64) {
        self.audio.set_volume(clamp_volume(volume));
    }

    fn unload(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        // Detach before dropping the closures; a dropped closure must never be invoked from JS.
        self.audio.set_onplay(None);
        self.audio.set_onpause(None);
        self.audio.set_onended(None);
        let _ = self.audio.pause();
        let _ = self.audio.remove_attribute("src");
        self.audio.load();
        self.listeners.clear();
    }
}
