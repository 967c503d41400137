//! Drifting color ramp
//!
//! Each LED is `COLOR_DRIFT_STEP` brighter per channel than the previous one,
//! wrapping at 255. The first LED advances by the same step every frame, so
//! the ramp appears to crawl along the strip.

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::color::{Rgb, wrapping_step};

pub const COLOR_DRIFT_INTERVAL: Duration = Duration::from_millis(30);

pub const COLOR_DRIFT_STEP: u8 = 10;

#[derive(Debug, Clone)]
pub struct ColorDriftEffect {
    seed: Rgb,
    first: Rgb,
}

impl ColorDriftEffect {
    pub const fn new(seed: Rgb) -> Self {
        Self { seed, first: seed }
    }
}

impl Effect for ColorDriftEffect {
    fn frame_interval(&self) -> Duration {
        COLOR_DRIFT_INTERVAL
    }

    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let mut next = self.first;
        for led in leds {
            *led = next;
            next = wrapping_step(next, COLOR_DRIFT_STEP);
        }
        self.first = wrapping_step(self.first, COLOR_DRIFT_STEP);
    }

    fn reset(&mut self) {
        self.first = self.seed;
    }
}
