/// Fixed timestep accumulator.
/// Converts variable frame deltas into a whole number of simulation ticks,
/// for hosts that want refresh-rate independent pacing.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Build a timestep from a tick rate. Non-positive rates fall back to 60 Hz.
    pub fn from_rate(ticks_per_second: f32) -> Self {
        let rate = if ticks_per_second > 0.0 { ticks_per_second } else { 60.0 };
        Self::new(1.0 / rate)
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}

/// Animation clock fed with host frame timestamps (milliseconds).
///
/// The first timestamp becomes the origin, so `elapsed_ms` starts at zero
/// no matter what epoch the host clock uses.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    origin_ms: Option<f64>,
    last_ms: Option<f64>,
    elapsed_ms: f64,
    frame_dt_ms: f64,
    ticks: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new frame timestamp. Timestamps that run backwards are treated
    /// as a zero-length frame.
    pub fn frame(&mut self, now_ms: f64) {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        self.frame_dt_ms = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms.max(self.last_ms.unwrap_or(now_ms)));
        self.elapsed_ms = (now_ms - origin).max(self.elapsed_ms);
    }

    /// Count simulation ticks run during the current frame.
    pub fn add_ticks(&mut self, ticks: u32) {
        self.ticks += ticks as u64;
    }

    /// Milliseconds since the first frame.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Seconds since the first frame.
    pub fn elapsed_secs(&self) -> f32 {
        (self.elapsed_ms / 1000.0) as f32
    }

    /// Milliseconds between the last two frames.
    pub fn frame_dt_ms(&self) -> f64 {
        self.frame_dt_ms
    }

    /// Total simulation ticks so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
