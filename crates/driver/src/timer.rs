use std::time::Duration;

/// Rolling window of tick durations for instrumentation.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: Vec<Duration>,
    next: usize,
    full: bool,
}

impl FrameTimer {
    /// A window of `capacity` samples (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![Duration::ZERO; capacity.max(1)],
            next: 0,
            full: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.samples[self.next] = dt;
        self.next = (self.next + 1) % self.samples.len();
        if self.next == 0 {
            self.full = true;
        }
    }

    fn window(&self) -> &[Duration] {
        if self.full {
            &self.samples
        } else {
            &self.samples[..self.next]
        }
    }

    pub fn count(&self) -> usize {
        self.window().len()
    }

    pub fn average(&self) -> Duration {
        let window = self.window();
        if window.is_empty() {
            return Duration::ZERO;
        }
        window.iter().sum::<Duration>() / window.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.window().iter().copied().max().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.window().iter().copied().min().unwrap_or_default()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(120)
    }
}
