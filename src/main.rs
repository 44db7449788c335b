//! Drift Runner entry point
//!
//! Native builds run a headless autopilot session and log the result.
//! The browser build starts from `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::ops::ControlFlow;

    use drift_runner::Session;
    use drift_runner::audio::LogAudio;
    use drift_runner::consts::MAX_FRAME_DT;
    use drift_runner::persistence::{FileStore, MemoryStore, PersistentStore};
    use drift_runner::sim::{self, Autopilot, GameEvent};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Two minutes of frames
    const MAX_FRAMES: u32 = 60 * 120;

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Drift Runner (native) starting...");

        let seed = std::env::var("DRIFT_RUNNER_SEED")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(rand::random);

        match std::env::var("DRIFT_RUNNER_STORE") {
            Ok(path) => play(seed, FileStore::open(path)),
            Err(_) => play(seed, MemoryStore::new()),
        }
    }

    fn play<S: PersistentStore>(seed: u64, store: S) {
        let mut session = Session::new(seed, store, LogAudio);
        let mut pilot = Autopilot::new();
        let mut shots = 0u32;
        let mut destroyed = 0u32;

        let mut remaining = MAX_FRAMES;
        let next_delta = move || {
            remaining = remaining.checked_sub(1)?;
            Some(FRAME_DT)
        };

        let frames = sim::run(next_delta, MAX_FRAME_DT, |dt| {
            pilot.plan(session.state());
            if pilot.wants_fire() && session.request_fire() {
                shots += 1;
            }
            session.tick(&pilot, dt);

            for event in session.drain_events() {
                match event {
                    GameEvent::ObstacleDestroyed { .. } => destroyed += 1,
                    GameEvent::Status { text } => log::debug!("{}", text),
                    _ => {}
                }
            }

            if session.is_game_over() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        let state = session.state();
        log::info!(
            "Seed {}: flew {:.0} units in {} frames: score {}, best {}, {} pickups, {} shots, {} obstacles cleared, health {}%",
            state.seed,
            state.run.run_origin_z - state.player.pos.z,
            frames,
            state.run.score,
            session.best(),
            state.run.pickups_collected,
            shots,
            destroyed,
            state.health.percent(),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
