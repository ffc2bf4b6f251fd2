use tracing::debug;

/// Plays short sound cues
pub trait AudioSink {
    /// Starts `cue` from the beginning at `volume` (0-1)
    fn play(&mut self, cue: &str, volume: f32);
}

/// Records every cue instead of playing it
#[derive(Debug, Default, Clone)]
pub struct CueLog {
    played: Vec<(String, f32)>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> &[(String, f32)] {
        &self.played
    }

    pub fn count(&self) -> usize {
        self.played.len()
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: &str, volume: f32) {
        self.played.push((cue.to_string(), volume));
    }
}

/// Reports cues through the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAudio;

impl AudioSink for TracingAudio {
    fn play(&mut self, cue: &str, volume: f32) {
        debug!(cue, volume, "play");
    }
}
