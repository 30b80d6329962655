//! Synthesized sound cues.
//!
//! Short fundsp graphs rendered straight into detached rodio sinks. Audio is
//! best-effort: when no output device exists the game simply runs silent.

use std::time::Duration;

use fundsp::{hpc::*, prelude::*};
use rodio::{self, OutputStream, Sink, mixer::Mixer};

const SAMPLE_RATE: f64 = 44100.0;

/// Owns the output stream for the lifetime of the game.
pub struct Audio {
    stream: Option<OutputStream>,
}

impl Audio {
    pub fn open() -> Self {
        match rodio::OutputStreamBuilder::open_default_stream() {
            Ok(stream) => Self {
                stream: Some(stream),
            },
            Err(err) => {
                log::warn!("audio disabled: {err}");
                Self { stream: None }
            }
        }
    }

    fn mixer(&self) -> Option<&Mixer> {
        self.stream.as_ref().map(|s| s.mixer())
    }

    /// Short rising chirp on each flap.
    pub fn flap(&self) {
        let Some(mixer) = self.mixer() else { return };
        let sink = Sink::connect_new(mixer);

        let freq = lfo(|t: f64| lerp11(320.0, 620.0, (t / 0.08).min(1.0)));
        let gain = lfo(|t: f64| lerp11(0.10, 0.0, (t / 0.12).min(1.0)));
        let sound = freq >> sine() >> mul(gain);

        let source = rodio::source::from_iter(sound.take(SAMPLE_RATE * 0.12))
            .convert_samples::<f32>()
            .periodic_samples(Duration::from_secs_f32(1.0 / SAMPLE_RATE as f32), 1);
        sink.append(source);
        sink.detach();
    }

    /// Two-step ding when an obstacle is cleared.
    pub fn score(&self) {
        let Some(mixer) = self.mixer() else { return };
        let sink = Sink::connect_new(mixer);

        let freq = lfo(|t: f64| if t < 0.07 { 880.0 } else { 1174.0 });
        let gain = lfo(|t: f64| lerp11(0.08, 0.0, (t / 0.18).min(1.0)));
        let sound = freq >> triangle() >> mul(gain);

        let source = rodio::source::from_iter(sound.take(SAMPLE_RATE * 0.18))
            .convert_samples::<f32>()
            .periodic_samples(Duration::from_secs_f32(1.0 / SAMPLE_RATE as f32), 1);
        sink.append(source);
        sink.detach();
    }

    /// Falling saw sweep when the run ends.
    pub fn game_over(&self) {
        let Some(mixer) = self.mixer() else { return };
        let sink = Sink::connect_new(mixer);

        let freq = lfo(|t: f64| lerp11(360.0, 70.0, (t / 0.45).min(1.0)));
        let gain = lfo(|t: f64| lerp11(0.14, 0.0, (t / 0.55).min(1.0)));
        let sound = freq >> saw() >> mul(gain);

        let source = rodio::source::from_iter(sound.take(SAMPLE_RATE * 0.55))
            .convert_samples::<f32>()
            .periodic_samples(Duration::from_secs_f32(1.0 / SAMPLE_RATE as f32), 1);
        sink.append(source);
        sink.detach();
    }
}
