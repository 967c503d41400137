//! Demo animations.
//!
//! Every effect is a pure renderer over a slice of LEDs plus the interval at
//! which it wants to be redrawn. [`EffectSlot`] holds any of them without
//! heap allocation.

mod color_drift;
mod load_meter;
mod walking_pixel;

use embassy_time::{Duration, Instant};
pub use color_drift::{COLOR_DRIFT_INTERVAL, COLOR_DRIFT_STEP, ColorDriftEffect};
pub use load_meter::{CpuStats, LOAD_METER_INTERVAL, LoadMeterEffect};
pub use walking_pixel::{WALKING_PIXEL_INTERVAL, WalkingPixelEffect};

use crate::color::Rgb;

const EFFECT_NAME_WALKING_PIXEL: &str = "walking_pixel";
const EFFECT_NAME_COLOR_DRIFT: &str = "color_drift";
const EFFECT_NAME_LOAD_METER: &str = "load_meter";

const EFFECT_ID_WALKING_PIXEL: u8 = 0;
const EFFECT_ID_COLOR_DRIFT: u8 = 1;
const EFFECT_ID_LOAD_METER: u8 = 2;

pub trait Effect {
    /// How long a rendered frame stays on the strip
    fn frame_interval(&self) -> Duration;

    /// Render a single frame
    fn render(&mut self, now: Instant, leds: &mut [Rgb]);

    /// Reset effect state
    fn reset(&mut self) {}
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Single lit LED moving along the strip
    WalkingPixel(WalkingPixelEffect),
    /// Color ramp that shifts every frame
    ColorDrift(ColorDriftEffect),
    /// Whole strip colored by CPU load
    LoadMeter(LoadMeterEffect),
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    WalkingPixel = EFFECT_ID_WALKING_PIXEL,
    ColorDrift = EFFECT_ID_COLOR_DRIFT,
    LoadMeter = EFFECT_ID_LOAD_METER,
}

impl EffectId {
    pub const ALL: [Self; 3] = [Self::WalkingPixel, Self::ColorDrift, Self::LoadMeter];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_WALKING_PIXEL => Self::WalkingPixel,
            EFFECT_ID_COLOR_DRIFT => Self::ColorDrift,
            EFFECT_ID_LOAD_METER => Self::LoadMeter,
            _ => return None,
        })
    }

    /// Build the effect; `color` is the lit pixel or the drift seed
    pub fn to_slot(self, color: Rgb) -> EffectSlot {
        match self {
            Self::WalkingPixel => EffectSlot::WalkingPixel(WalkingPixelEffect::new(color)),
            Self::ColorDrift => EffectSlot::ColorDrift(ColorDriftEffect::new(color)),
            Self::LoadMeter => EffectSlot::LoadMeter(LoadMeterEffect::new()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WalkingPixel => EFFECT_NAME_WALKING_PIXEL,
            Self::ColorDrift => EFFECT_NAME_COLOR_DRIFT,
            Self::LoadMeter => EFFECT_NAME_LOAD_METER,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_WALKING_PIXEL => Some(Self::WalkingPixel),
            EFFECT_NAME_COLOR_DRIFT => Some(Self::ColorDrift),
            EFFECT_NAME_LOAD_METER => Some(Self::LoadMeter),
            _ => None,
        }
    }
}

impl EffectSlot {
    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::WalkingPixel(_) => EffectId::WalkingPixel,
            Self::ColorDrift(_) => EffectId::ColorDrift,
            Self::LoadMeter(_) => EffectId::LoadMeter,
        }
    }

    /// The load meter, if that is the current effect
    pub fn load_meter_mut(&mut self) -> Option<&mut LoadMeterEffect> {
        match self {
            Self::LoadMeter(effect) => Some(effect),
            _ => None,
        }
    }
}

impl Effect for EffectSlot {
    fn frame_interval(&self) -> Duration {
        match self {
            Self::WalkingPixel(effect) => effect.frame_interval(),
            Self::ColorDrift(effect) => effect.frame_interval(),
            Self::LoadMeter(effect) => effect.frame_interval(),
        }
    }

    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        match self {
            Self::WalkingPixel(effect) => effect.render(now, leds),
            Self::ColorDrift(effect) => effect.render(now, leds),
            Self::LoadMeter(effect) => effect.render(now, leds),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::WalkingPixel(effect) => effect.reset(),
            Self::ColorDrift(effect) => effect.reset(),
            Self::LoadMeter(effect) => effect.reset(),
        }
    }
}
