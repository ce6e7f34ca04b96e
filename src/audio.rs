//! Sound cues
//!
//! The cabinet speaker beeps a square wave at one pitch or one octave above
//! it. Each cue maps to a [`Tone`]; the [`AudioManager`] plays
//! one tone at a time on a single [`AudioSink`] voice.

use std::time::Duration;

/// Base pitch of every cue
pub const BASE_FREQUENCY_HZ: f32 = 245.0;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Ball hits top or bottom wall
    WallBounce,
    /// Ball hits a paddle
    PaddleBounce,
    /// A point was scored
    Score,
}

/// A single note: pitch, gate length and peak amplitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub amplitude: f32,
}

impl AudioCue {
    pub fn tone(self) -> Tone {
        let (octave, secs) = match self {
            AudioCue::WallBounce => (0, 0.016),
            AudioCue::PaddleBounce => (1, 0.032),
            AudioCue::Score => (0, 0.51),
        };
        Tone {
            frequency_hz: BASE_FREQUENCY_HZ * 2f32.powi(octave),
            duration: Duration::from_secs_f32(secs),
            amplitude: 1.0,
        }
    }
}

/// One synthesizer voice
pub trait AudioSink {
    /// Silence whatever is sounding
    fn release_all(&mut self);
    /// Start `tone` with its amplitude envelope restarted from the top
    fn press(&mut self, tone: Tone);
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(sink: Option<Box<dyn AudioSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio output - audio disabled");
        }
        Self {
            sink,
            volume: 1.0,
            muted: false,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a cue, cutting off any cue still sounding
    pub fn play(&mut self, cue: AudioCue) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        let Some(sink) = &mut self.sink else { return };

        let mut tone = cue.tone();
        tone.amplitude *= self.volume;
        sink.release_all();
        sink.press(tone);
    }
}

/// Sink that only logs, for hosts without a speaker
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn release_all(&mut self) {}

    fn press(&mut self, tone: Tone) {
        log::debug!(
            "beep {:.0} Hz for {} ms",
            tone.frequency_hz,
            tone.duration.as_millis()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Release,
        Press(Tone),
    }

    #[derive(Clone, Default)]
    struct RecordingSink(Rc<RefCell<Vec<Call>>>);

    impl AudioSink for RecordingSink {
        fn release_all(&mut self) {
            self.0.borrow_mut().push(Call::Release);
        }

        fn press(&mut self, tone: Tone) {
            self.0.borrow_mut().push(Call::Press(tone));
        }
    }

    #[test]
    fn test_cue_tones() {
        let wall = AudioCue::WallBounce.tone();
        let paddle = AudioCue::PaddleBounce.tone();
        let score = AudioCue::Score.tone();
        assert_eq!(wall.frequency_hz, 245.0);
        assert_eq!(paddle.frequency_hz, 490.0);
        assert_eq!(score.frequency_hz, 245.0);
        assert!(wall.duration < paddle.duration);
        assert!(paddle.duration < score.duration);
    }

    #[test]
    fn test_each_cue_releases_then_presses() {
        let sink = RecordingSink::default();
        let mut audio = AudioManager::new(Some(Box::new(sink.clone())));
        audio.play(AudioCue::WallBounce);
        audio.play(AudioCue::PaddleBounce);

        let calls = sink.0.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], Call::Release);
        assert_eq!(calls[1], Call::Press(AudioCue::WallBounce.tone()));
        assert_eq!(calls[2], Call::Release);
        assert_eq!(calls[3], Call::Press(AudioCue::PaddleBounce.tone()));
    }

    #[test]
    fn test_muted_plays_nothing() {
        let sink = RecordingSink::default();
        let mut audio = AudioManager::new(Some(Box::new(sink.clone())));
        audio.set_muted(true);
        audio.play(AudioCue::Score);
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn test_volume_scales_amplitude() {
        let sink = RecordingSink::default();
        let mut audio = AudioManager::new(Some(Box::new(sink.clone())));
        audio.set_volume(0.5);
        audio.play(AudioCue::Score);
        match &sink.0.borrow()[1] {
            Call::Press(tone) => assert_eq!(tone.amplitude, 0.5),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_sink_is_silent() {
        let mut audio = AudioManager::new(None);
        audio.play(AudioCue::Score);
    }
}
