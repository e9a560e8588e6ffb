//! Completion progress and the animated progress fill

use std::time::{Duration, Instant};

/// Satisfied slots over total slots, recomputed on every change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub completed: usize,
    pub total: usize,
}

impl ProgressState {
    /// Rounded percentage, 0..=100
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (100.0 * self.completed as f64 / self.total as f64).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Text shown next to the bar
    pub fn label(&self) -> String {
        format!("{}% Complete", self.percentage())
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        // One slot each for the checkbox and radio groups
        Self {
            completed: 0,
            total: 2,
        }
    }
}

/// Eases the drawn fill from the previous percentage to the current one
#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    from: f32,
    to: f32,
    started: Instant,
    /// Current fill in percent
    pub displayed: f32,
}

impl ProgressAnimation {
    /// Length of the fill transition
    const DURATION: Duration = Duration::from_millis(300);

    pub fn new(percentage: u8) -> Self {
        let value = percentage as f32;
        Self {
            from: value,
            to: value,
            started: Instant::now(),
            displayed: value,
        }
    }

    /// Start easing toward a new target from wherever the fill is now
    pub fn retarget(&mut self, percentage: u8) {
        let target = percentage as f32;
        if (target - self.to).abs() < f32::EPSILON {
            return;
        }
        self.from = self.displayed;
        self.to = target;
        self.started = Instant::now();
    }

    /// Advance the fill based on elapsed time
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= Self::DURATION {
            self.displayed = self.to;
            return;
        }
        let progress = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        let eased = simple_easing::cubic_out(progress);
        self.displayed = self.from + (self.to - self.from) * eased;
    }

    /// Whether the fill is still moving
    pub fn is_animating(&self) -> bool {
        (self.displayed - self.to).abs() > f32::EPSILON
    }
}
