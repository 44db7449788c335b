//! Platform bindings
//!
//! The browser host lives in `web` (wasm32 only): LocalStorage persistence,
//! Web Audio cues and a `WebGame` handle driven from `requestAnimationFrame`.
//! Native hosts use `persistence::FileStore` and `audio::LogAudio` directly.

#[cfg(target_arch = "wasm32")]
pub mod web;
