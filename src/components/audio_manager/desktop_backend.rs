// Desktop-webview backend: audio lives in the webview, driven through `document::eval`.
use std::cell::Cell;

use dioxus::core::Task;
use dioxus::prelude::*;

use super::{clamp_volume, Sound, SoundBackend, SoundError, SoundEvents, SoundOptions};

const SOUND_BRIDGE_JS: &str = r#"
(() => {
  if (window.__tunebarSounds) {
    return true;
  }

  const handles = {};

  window.__tunebarSounds = {
    handles,
    create(id, opts, send, finish) {
      const audio = new Audio();
      audio.preload = opts.html5 ? "metadata" : "auto";
      audio.volume = Math.max(0, Math.min(1, opts.volume));
      audio.src = opts.src;

      const onPlay = () => send("play");
      const onPause = () => send("pause");
      const onEnded = () => send("end");
      audio.addEventListener("play", onPlay);
      audio.addEventListener("pause", onPause);
      audio.addEventListener("ended", onEnded);

      handles[id] = {
        audio,
        finish,
        detach() {
          audio.removeEventListener("play", onPlay);
          audio.removeEventListener("pause", onPause);
          audio.removeEventListener("ended", onEnded);
        },
      };
    },
    apply(id, cmd) {
      const handle = handles[id];
      if (!handle || !cmd || !cmd.type) return;
      const audio = handle.audio;

      switch (cmd.type) {
        case "play":
          audio.play().catch(() => {});
          break;
        case "pause":
          audio.pause();
          break;
        case "volume":
          audio.volume = Math.max(0, Math.min(1, cmd.volume));
          break;
        case "unload":
          handle.detach();
          audio.pause();
          audio.removeAttribute("src");
          audio.load();
          delete handles[id];
          handle.finish();
          break;
        default:
          break;
      }
    },
  };

  return true;
})();
"#;

thread_local! {
    static NEXT_SOUND_ID: Cell<u64> = const { Cell::new(0) };
}

fn next_sound_id() -> u64 {
    NEXT_SOUND_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    })
}

// The eval stays open as the handle's event channel until `unload` resolves it.
fn create_script(id: u64, opts: &str) -> String {
    format!(
        r#"await new Promise((finish) => {{
            window.__tunebarSounds.create({id}, {opts}, (kind) => dioxus.send(kind), finish);
        }});"#
    )
}

fn sound_command(id: u64, value: serde_json::Value) {
    let payload = serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string());
    let script = format!(
        r#"(function () {{
            const bridge = window.__tunebarSounds;
            if (!bridge) return false;
            bridge.apply({id}, {payload});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopAudioBackend;

pub struct DesktopSound {
    id: u64,
    listener: Option<Task>,
}

impl SoundBackend for DesktopAudioBackend {
    type Sound = DesktopSound;

    fn create(
        &self,
        options: SoundOptions,
        events: SoundEvents,
    ) -> Result<DesktopSound, SoundError> {
        let id = next_sound_id();
        let options = SoundOptions {
            volume: clamp_volume(options.volume),
            ..options
        };
        let opts = serde_json::to_string(&options).map_err(|err| SoundError::Bridge(err.to_string()))?;

        let _ = document::eval(SOUND_BRIDGE_JS);
        let mut eval = document::eval(&create_script(id, &opts));

        let listener = spawn(async move {
            while let Ok(kind) = eval.recv::<String>().await {
                match kind.as_str() {
                    "play" => (events.on_play)(),
                    "pause" => (events.on_pause)(),
                    "end" => (events.on_end)(),
                    other => tracing::debug!(sound = id, "ignoring unknown sound event {other}"),
                }
            }
        });

        Ok(DesktopSound {
            id,
            listener: Some(listener),
        })
    }
}

impl Sound for DesktopSound {
    fn play(&self) {
        sound_command(self.id, serde_json::json!({ "type": "play" }));
    }

    fn pause(&self) {
        sound_command(self.id, serde_json::json!({ "type": "pause" }));
    }

    fn set_volume(&self, volume: f64) {
        sound_command(
            self.id,
            serde_json::json!({ "type": "volume", "volume": clamp_volume(volume) }),
        );
    }

    fn unload(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        listener.cancel();
        sound_command(self.id, serde_json::json!({ "type": "unload" }));
    }
}
