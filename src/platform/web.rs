//! Browser host
//!
//! JS owns the canvas, the render loop and DOM events. It forwards them here
//! and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;
use web_sys::Storage;

use crate::audio::{WebAudioSink, effective_volume};
use crate::persistence::{PersistentStore, StoreError};
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{FrameClock, InputState, Key};

/// LocalStorage-backed store. Without storage every read is absent.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - scores won't persist");
        }
        Self { storage }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistentStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".into()))?;
        storage
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore, WebAudioSink>,
    input: InputState,
    clock: FrameClock,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        let store = LocalStorageStore::new();
        let settings = Settings::load(&store);
        let audio = WebAudioSink::new(effective_volume(&settings));
        Self {
            session: Session::new(seed as u64, store, audio),
            input: InputState::new(),
            clock: FrameClock::new(),
        }
    }

    /// Advance to `timestamp_ms` (the rAF timestamp). Returns the frame's events as JSON.
    pub fn frame(&mut self, timestamp_ms: f64) -> String {
        let dt = self.clock.delta(timestamp_ms / 1000.0);
        self.session.tick(&self.input, dt);
        if self.session.is_game_over() {
            self.input.clear();
        }
        let events = self.session.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Everything the renderer needs, as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Pointer coordinates are normalized screen space: (0, 0) top-left, (1, 1) bottom-right
    pub fn pointer_down(&mut self, nx: f32, ny: f32) {
        self.session.audio().resume();
        self.input.pointer_down(nx, ny);
    }

    pub fn pointer_move(&mut self, nx: f32, ny: f32) {
        self.input.pointer_move(nx, ny);
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_up();
    }

    /// `code` is `KeyboardEvent.code`. Returns true when the key was handled.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        self.session.audio().resume();
        let repeat = self.input.is_down(key);
        self.input.set_key(key, true);
        if key == Key::Fire && !repeat {
            self.session.request_fire();
        }
        true
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        self.input.set_key(key, false);
        true
    }

    /// Fire button. Returns true when a beam went out.
    pub fn fire(&mut self) -> bool {
        self.session.request_fire()
    }

    pub fn restart(&mut self) {
        self.input.clear();
        self.session.restart();
    }

    /// Call when the page becomes visible again so the hidden time isn't simulated
    pub fn resume_clock(&mut self) {
        self.clock.reset();
    }

    pub fn set_volume(&mut self, master: f32) {
        let settings = Settings {
            master_volume: master.clamp(0.0, 1.0),
            ..self.session.settings().clone()
        };
        self.session.audio_mut().set_volume(effective_volume(&settings));
        self.session.set_settings(settings);
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    pub fn best(&self) -> f64 {
        self.session.best() as f64
    }

    pub fn health_percent(&self) -> u32 {
        self.session.state().health.percent()
    }

    pub fn status(&self) -> String {
        self.session.state().status.text.clone()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Drift Runner starting...");
}
