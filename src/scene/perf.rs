use tracing::debug;

/// Frame timing summary, the headless stand-in for a perf overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfSnapshot {
    pub frames: u32,
    pub average_frame_time: f32,
    pub max_frame_time: f32,
}

impl PerfSnapshot {
    pub fn fps(&self) -> f32 {
        if self.average_frame_time > 0.0 {
            1.0 / self.average_frame_time
        } else {
            0.0
        }
    }
}

/// Accumulates frame times and reports them every `interval` seconds
#[derive(Debug, Clone)]
pub struct PerfMonitor {
    interval: f32,
    elapsed: f32,
    frames: u32,
    max_frame_time: f32,
    last: Option<PerfSnapshot>,
}

impl PerfMonitor {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            elapsed: 0.0,
            frames: 0,
            max_frame_time: 0.0,
            last: None,
        }
    }

    /// Records one frame; returns a snapshot when a report window closes
    pub fn record(&mut self, frame_time: f32) -> Option<PerfSnapshot> {
        self.elapsed += frame_time;
        self.frames += 1;
        self.max_frame_time = self.max_frame_time.max(frame_time);

        if self.elapsed < self.interval {
            return None;
        }

        let snapshot = PerfSnapshot {
            frames: self.frames,
            average_frame_time: self.elapsed / self.frames as f32,
            max_frame_time: self.max_frame_time,
        };
        debug!(fps = snapshot.fps(), max_frame_time = snapshot.max_frame_time, "perf");

        self.elapsed = 0.0;
        self.frames = 0;
        self.max_frame_time = 0.0;
        self.last = Some(snapshot);
        Some(snapshot)
    }

    /// The most recent completed report
    pub fn last(&self) -> Option<PerfSnapshot> {
        self.last
    }
}
