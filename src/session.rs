//! A play session: one game state wired to its collaborators
//!
//! Lifecycle: `new` (loads best score and settings), `tick` once per frame,
//! `restart` after a game over. Sound cues go to the audio sink and new bests
//! are written to the store within the call that produced them.

use crate::audio::AudioSink;
use crate::best_score::BestScore;
use crate::persistence::PersistentStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputSource, Snapshot, combat, tick};

/// Game session holding all state
pub struct Session<S: PersistentStore, A: AudioSink> {
    state: GameState,
    best: BestScore,
    settings: Settings,
    store: S,
    audio: A,
    /// Events waiting for the presentation layer
    outbox: Vec<GameEvent>,
}

impl<S: PersistentStore, A: AudioSink> Session<S, A> {
    pub fn new(seed: u64, store: S, audio: A) -> Self {
        let best = BestScore::load(&store);
        let settings = Settings::load(&store);
        let mut state = GameState::with_best(seed, best.value);
        apply_settings(&mut state, &settings);
        log::info!("Session started (seed {}, best {})", seed, best.value);

        Self {
            state,
            best,
            settings,
            store,
            audio,
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.state)
    }

    pub fn best(&self) -> u64 {
        self.best.value
    }

    pub fn score(&self) -> u64 {
        self.state.run.score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.run.paused()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply and persist new preferences
    pub fn set_settings(&mut self, settings: Settings) {
        apply_settings(&mut self.state, &settings);
        if let Err(e) = settings.save(&mut self.store) {
            log::warn!("Could not save settings: {}", e);
        }
        self.settings = settings;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Advance one frame. `raw_dt` is clamped before use.
    pub fn tick(&mut self, input: &dyn InputSource, raw_dt: f32) {
        tick(&mut self.state, input, raw_dt);
        self.dispatch();
    }

    /// Fire trigger edge. Returns true when a beam was created.
    pub fn request_fire(&mut self) -> bool {
        let fired = combat::request_fire(&mut self.state);
        self.dispatch();
        fired
    }

    /// Start a new run. The best score carries over.
    pub fn restart(&mut self) {
        self.state.restart();
        log::info!("Run restarted (best {})", self.best.value);
        self.dispatch();
    }

    /// Take everything the presentation layer hasn't seen yet
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match &event {
                GameEvent::Sound { cue } => self.audio.play(*cue),
                GameEvent::NewBest { best } => {
                    if self.best.record(*best, &mut self.store) {
                        log::debug!("New best {}", best);
                    }
                }
                GameEvent::GameOver { final_score, best } => {
                    self.best.record(*final_score, &mut self.store);
                    log::info!("Run over: {} (best {})", final_score, best);
                }
                _ => {}
            }
            self.outbox.push(event);
        }
    }
}

fn apply_settings(state: &mut GameState, settings: &Settings) {
    state.bursts.cap = settings.particle_cap();
    state.calm_fx = settings.reduced_motion;
}
