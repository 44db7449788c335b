//! Sound cues and the sinks that play them
//!
//! The simulation only names cues; a sink decides what they sound like.
//! Sinks are fire-and-forget and must never fail the caller.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Laser shot
    Fire,
    /// Hull struck by an obstacle
    Impact,
    /// Nanite canister collected
    HealPickup,
    /// Energy orb collected
    SpeedPickup,
}

/// Something that can play cues
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Silent sink for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Sink that records cues, for tests
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundCue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }
}

/// Sink that logs each cue at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("sound: {:?}", cue);
    }
}

/// Oscillator shape for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One tone of a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds
    pub duration: f32,
    pub wave: Wave,
    pub gain: f32,
}

/// Tones making up each cue
pub fn tones(cue: SoundCue) -> &'static [Tone] {
    match cue {
        SoundCue::Fire => &[
            Tone {
                freq: 980.0,
                duration: 0.12,
                wave: Wave::Square,
                gain: 0.2,
            },
            Tone {
                freq: 320.0,
                duration: 0.18,
                wave: Wave::Sawtooth,
                gain: 0.12,
            },
        ],
        SoundCue::Impact => &[Tone {
            freq: 200.0,
            duration: 0.25,
            wave: Wave::Sawtooth,
            gain: 0.2,
        }],
        SoundCue::HealPickup => &[Tone {
            freq: 420.0,
            duration: 0.22,
            wave: Wave::Sine,
            gain: 0.18,
        }],
        SoundCue::SpeedPickup => &[Tone {
            freq: 660.0,
            duration: 0.18,
            wave: Wave::Triangle,
            gain: 0.22,
        }],
    }
}

/// Effective output volume for the given settings
pub fn effective_volume(settings: &Settings) -> f32 {
    if settings.muted {
        0.0
    } else {
        settings.master_volume * settings.sfx_volume
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundCue, Tone, Wave, tones};

    /// Audio sink using the Web Audio API
    pub struct WebAudioSink {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl WebAudioSink {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
            let osc_type = match tone.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
                Wave::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + tone.duration as f64;

            gain.gain().set_value_at_time(tone.gain * self.volume, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.0001, end).ok();

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }

    impl AudioSink for WebAudioSink {
        fn play(&mut self, cue: SoundCue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            if ctx.state() != AudioContextState::Running {
                return;
            }

            for tone in tones(cue) {
                self.play_tone(ctx, tone);
            }
        }
    }
}
