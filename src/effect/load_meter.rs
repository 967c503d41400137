//! CPU load meter
//!
//! Fills the strip with a single color sliding from green (idle) to red (fully
//! busy). The load itself comes from outside, typically two samples of the
//! aggregate `cpu` line of `/proc/stat` fed through [`CpuStats`].

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::color::Rgb;

pub const LOAD_METER_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Default)]
pub struct LoadMeterEffect {
    usage: f32,
}

impl LoadMeterEffect {
    pub const fn new() -> Self {
        Self { usage: 0.0 }
    }

    /// Set the load as a fraction of full usage.
    ///
    /// Values are clamped to `0.0..=1.0`; NaN counts as idle.
    pub fn set_usage(&mut self, usage: f32) {
        self.usage = if usage.is_nan() {
            0.0
        } else {
            usage.clamp(0.0, 1.0)
        };
    }

    pub const fn usage(&self) -> f32 {
        self.usage
    }

    /// Color shown for the current load
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn color(&self) -> Rgb {
        let r = (self.usage * 255.0) as u8;
        Rgb { r, g: 255 - r, b: 0 }
    }
}

impl Effect for LoadMeterEffect {
    fn frame_interval(&self) -> Duration {
        LOAD_METER_INTERVAL
    }

    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        leds.fill(self.color());
    }
}

/// Aggregate CPU time counters, in jiffies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuStats {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuStats {
    /// Parse the aggregate `cpu` line of `/proc/stat`.
    ///
    /// Needs the first eight counters; any further columns are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        if fields.next()? != "cpu" {
            return None;
        }
        let mut counters = [0u64; 8];
        for counter in &mut counters {
            *counter = fields.next()?.parse().ok()?;
        }
        let [user, nice, system, idle, iowait, irq, softirq, steal] = counters;
        Some(Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
        })
    }

    /// Time spent doing work, saturating at `u64::MAX`
    pub const fn busy(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
            .saturating_add(self.irq)
            .saturating_add(self.softirq)
            .saturating_add(self.steal)
    }

    /// Time spent waiting
    pub const fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    /// Fraction of time busy between `earlier` and `self`, in `0.0..=1.0`
    #[allow(clippy::cast_precision_loss)]
    pub fn usage_since(&self, earlier: &Self) -> f32 {
        let busy = self.busy().saturating_sub(earlier.busy());
        let idle = self.idle_total().saturating_sub(earlier.idle_total());
        let total = busy.saturating_add(idle);
        if total == 0 {
            return 0.0;
        }
        (busy as f32 / total as f32).min(1.0)
    }
}
