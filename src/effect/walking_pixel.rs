//! Walking pixel test pattern
//!
//! Lights one LED per frame, moving one position further each time and
//! wrapping at the end of the strip. Handy for spotting dead or swapped LEDs.

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::color::{OFF, Rgb};

pub const WALKING_PIXEL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct WalkingPixelEffect {
    color: Rgb,
    step: usize,
}

impl WalkingPixelEffect {
    pub const fn new(color: Rgb) -> Self {
        Self { color, step: 0 }
    }
}

impl Effect for WalkingPixelEffect {
    fn frame_interval(&self) -> Duration {
        WALKING_PIXEL_INTERVAL
    }

    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        leds.fill(OFF);
        if leds.is_empty() {
            return;
        }
        leds[self.step % leds.len()] = self.color;
        self.step = self.step.wrapping_add(1);
    }

    fn reset(&mut self) {
        self.step = 0;
    }
}
