use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use keepsake_engine::{AudioEngine, AudioError, Pitch, SampleManifest};

// Host-side sampler shim (`window.keepsakeAudio`). Every trigger may throw,
// typically a NotAllowedError before the first user gesture.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = keepsakeAudio, js_name = createSampler)]
    fn create_sampler(manifest_json: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = keepsakeAudio, js_name = isLoaded)]
    fn sampler_is_loaded(sampler: &JsValue) -> bool;

    #[wasm_bindgen(catch, js_namespace = keepsakeAudio, js_name = start)]
    fn start_audio() -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = keepsakeAudio, js_name = triggerAttack)]
    fn trigger_attack(sampler: &JsValue, note: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = keepsakeAudio, js_name = triggerRelease)]
    fn trigger_release(sampler: &JsValue, note: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = keepsakeAudio, js_name = triggerAttackRelease)]
    fn trigger_attack_release(sampler: &JsValue, note: &str, duration: f32) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = keepsakeAudio, js_name = dispose)]
    fn dispose_sampler(sampler: &JsValue);
}

fn blocked(err: JsValue) -> AudioError {
    let message = match err.dyn_into::<js_sys::Error>() {
        Ok(error) => String::from(error.message()),
        Err(value) => value.as_string().unwrap_or_else(|| "unknown error".to_string()),
    };
    AudioError::Blocked(message)
}

/// `AudioEngine` backed by the host's sampler.
pub struct JsSampler {
    handle: Option<JsValue>,
    disposed: bool,
}

impl JsSampler {
    /// Ask the host to start loading `manifest`. On failure the sampler never
    /// reports loaded and the piano stays on its loading screen.
    pub fn new(manifest: &SampleManifest) -> Self {
        let handle = match manifest.to_json() {
            Ok(json) => match create_sampler(&json) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    log::warn!("sampler unavailable: {}", blocked(err));
                    None
                }
            },
            Err(err) => {
                log::warn!("bad sample manifest: {}", err);
                None
            }
        };
        Self {
            handle,
            disposed: false,
        }
    }

    fn handle(&self) -> Result<&JsValue, AudioError> {
        if self.disposed {
            return Err(AudioError::Disposed);
        }
        self.handle.as_ref().ok_or(AudioError::NotLoaded)
    }
}

impl AudioEngine for JsSampler {
    fn is_loaded(&self) -> bool {
        self.handle().map(sampler_is_loaded).unwrap_or(false)
    }

    fn try_start(&mut self) -> Result<(), AudioError> {
        self.handle()?;
        start_audio().map_err(blocked)
    }

    fn try_attack(&mut self, pitch: Pitch) -> Result<(), AudioError> {
        trigger_attack(self.handle()?, &pitch.sample_name()).map_err(blocked)
    }

    fn try_release(&mut self, pitch: Pitch) -> Result<(), AudioError> {
        trigger_release(self.handle()?, &pitch.sample_name()).map_err(blocked)
    }

    fn try_attack_release(&mut self, pitch: Pitch, duration: f32) -> Result<(), AudioError> {
        trigger_attack_release(self.handle()?, &pitch.sample_name(), duration).map_err(blocked)
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(handle) = self.handle.take() {
            dispose_sampler(&handle);
        }
        self.disposed = true;
    }
}
