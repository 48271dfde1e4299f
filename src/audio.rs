use fundsp::prelude32::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::config::Volumes;
use crate::error::Result;

const SAMPLE_RATE: u32 = 44100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clip {
    Ambient,
    Jump,
    Hit,
    HighScore,
    GameOver,
}

impl Clip {
    pub const ALL: [Clip; 5] = [
        Clip::Ambient,
        Clip::Jump,
        Clip::Hit,
        Clip::HighScore,
        Clip::GameOver,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Fire-and-forget playback. Only the ambient clip loops, and only it can be
/// stopped.
pub trait AudioSink {
    fn play(&mut self, clip: Clip);
    fn stop_ambient(&mut self);
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, clip: Clip) {
        (**self).play(clip)
    }

    fn stop_ambient(&mut self) {
        (**self).stop_ambient()
    }
}

/// Used when muted or when no output device could be opened.
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _clip: Clip) {}
    fn stop_ambient(&mut self) {}
}

// ── Synthesis ───────────────────────────────────────────────────────────────

/// Runs `osc` for `secs`, driving its frequency input and scaling its output
/// with `voice(t) -> (hz, gain)`. Generators without inputs ignore `hz`.
fn render(mut osc: Box<dyn AudioUnit>, secs: f64, voice: impl Fn(f64) -> (f32, f32)) -> Vec<f32> {
    osc.set_sample_rate(SAMPLE_RATE as f64);
    osc.reset();
    let n = (secs * SAMPLE_RATE as f64) as usize;
    let inputs = osc.inputs();
    let mut out = [0.0f32];
    (0..n)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            let (hz, gain) = voice(t);
            let input = [hz];
            osc.tick(&input[..Ord::min(inputs, 1)], &mut out);
            (out[0] * gain).clamp(-1.0, 1.0)
        })
        .collect()
}

fn ramp(from: f64, to: f64, t: f64, over: f64) -> f64 {
    from + (to - from) * (t / over).min(1.0)
}

/// Short fade at both ends of a note so steps don't click.
fn edge_fade(t: f64, len: f64) -> f64 {
    let edge = 0.01;
    (t / edge).min((len - t) / edge).clamp(0.0, 1.0)
}

pub fn synth(clip: Clip) -> Vec<f32> {
    match clip {
        Clip::Ambient => {
            const BASS: [f64; 4] = [110.0, 130.81, 146.83, 98.0];
            render(Box::new(sine()), 4.0, |t| {
                let note = Ord::min(t as usize, BASS.len() - 1);
                let local = t - note as f64;
                (BASS[note] as f32, (0.25 * edge_fade(local, 1.0)) as f32)
            })
        }
        Clip::Jump => render(Box::new(square()), 0.15, |t| {
            (
                ramp(320.0, 760.0, t, 0.15) as f32,
                ramp(0.5, 0.0, t, 0.15) as f32,
            )
        }),
        Clip::Hit => render(Box::new(noise()), 0.25, |t| {
            let decay = ramp(1.0, 0.0, t, 0.25);
            (0.0, (0.7 * decay * decay) as f32)
        }),
        Clip::HighScore => {
            const NOTES: [f64; 4] = [523.25, 659.25, 783.99, 1046.5];
            render(Box::new(square()), 0.6, |t| {
                let note = Ord::min((t / 0.15) as usize, NOTES.len() - 1);
                let local = t - note as f64 * 0.15;
                let gain = 0.35 * ramp(1.0, 0.3, local, 0.15) * edge_fade(local, 0.15);
                (NOTES[note] as f32, gain as f32)
            })
        }
        // Falling sawtooth, 400Hz to 80Hz.
        Clip::GameOver => render(Box::new(saw()), 0.5, |t| {
            (
                ramp(400.0, 80.0, t, 0.4) as f32,
                ramp(0.3, 0.0, t, 0.5) as f32,
            )
        }),
    }
}

// ── Output ──────────────────────────────────────────────────────────────────

/// Plays synthesized clips on the default output device.
pub struct SynthAudio {
    stream: OutputStream,
    clips: Vec<Vec<f32>>,
    ambient: Option<Sink>,
    volumes: Volumes,
}

impl SynthAudio {
    pub fn open(volumes: Volumes) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        stream.log_on_drop(false);
        let clips = Clip::ALL.iter().map(|&clip| synth(clip)).collect();
        debug!("audio output opened, clips synthesized");
        Ok(SynthAudio {
            stream,
            clips,
            ambient: None,
            volumes,
        })
    }

    fn source(&self, clip: Clip) -> SamplesBuffer {
        SamplesBuffer::new(1, SAMPLE_RATE, self.clips[clip.index()].clone())
    }
}

impl AudioSink for SynthAudio {
    fn play(&mut self, clip: Clip) {
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volumes.of(clip).clamp(0.0, 1.0));
        if clip == Clip::Ambient {
            self.stop_ambient();
            sink.append(self.source(clip).buffered().repeat_infinite());
            self.ambient = Some(sink);
        } else {
            sink.append(self.source(clip));
            sink.detach();
        }
    }

    fn stop_ambient(&mut self) {
        if let Some(sink) = self.ambient.take() {
            sink.stop();
        }
    }
}

/// Records what was asked of it.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub played: Vec<Clip>,
    pub ambient_on: bool,
}

#[cfg(test)]
impl Recorder {
    pub fn count(&self, clip: Clip) -> usize {
        self.played.iter().filter(|&&c| c == clip).count()
    }
}

#[cfg(test)]
impl AudioSink for Recorder {
    fn play(&mut self, clip: Clip) {
        if clip == Clip::Ambient {
            self.ambient_on = true;
        }
        self.played.push(clip);
    }

    fn stop_ambient(&mut self) {
        self.ambient_on = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_have_expected_length_and_range() {
        for (clip, secs) in [
            (Clip::Ambient, 4.0),
            (Clip::Jump, 0.15),
            (Clip::Hit, 0.25),
            (Clip::HighScore, 0.6),
            (Clip::GameOver, 0.5),
        ] {
            let samples = synth(clip);
            assert_eq!(samples.len(), (secs * SAMPLE_RATE as f64) as usize, "{clip:?}");
            assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
            assert!(samples.iter().any(|s| *s != 0.0), "{clip:?} is silent");
        }
    }

    #[test]
    fn ramp_holds_final_value() {
        assert_eq!(ramp(400.0, 80.0, 0.0, 0.4), 400.0);
        assert_eq!(ramp(400.0, 80.0, 0.4, 0.4), 80.0);
        assert_eq!(ramp(400.0, 80.0, 1.0, 0.4), 80.0);
    }

    #[test]
    fn clip_index_matches_all() {
        for (i, clip) in Clip::ALL.iter().enumerate() {
            assert_eq!(clip.index(), i);
        }
    }
}
