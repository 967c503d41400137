//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::canvas::Canvas;
use crate::effect::Effect;
use crate::error::Error;
use crate::strip::OutputDriver;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Drives an effect into a canvas at the effect's own frame interval.
///
/// # Usage
///
/// ```ignore
/// let canvas = Canvas::new(&strip)?;
/// let mut scheduler = FrameScheduler::new(canvas, WalkingPixelEffect::new(WHITE));
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()))?;
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, O, E, const MAX_LEDS: usize>
where
    O: OutputDriver + ?Sized,
    E: Effect,
{
    canvas: Canvas<'a, O, MAX_LEDS>,
    effect: E,
    next_frame: Instant,
}

impl<'a, O, E, const MAX_LEDS: usize> FrameScheduler<'a, O, E, MAX_LEDS>
where
    O: OutputDriver + ?Sized,
    E: Effect,
{
    pub fn new(canvas: Canvas<'a, O, MAX_LEDS>, effect: E) -> Self {
        Self {
            canvas,
            effect,
            next_frame: Instant::from_millis(0),
        }
    }

    /// Render, commit and return the timing of the next frame.
    ///
    /// Falling more than two intervals behind restarts the schedule from
    /// `now` instead of bursting through the backlog. A failed commit leaves
    /// the schedule where it was.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, Error> {
        let interval = self.effect.frame_interval();
        if now > self.next_frame + interval * 2 {
            self.next_frame = now;
        }

        self.effect.render(now, self.canvas.leds_mut());
        self.canvas.commit()?;

        self.next_frame += interval;
        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        })
    }

    /// Whether the next frame is due at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Swap in a new effect and render it at the next tick
    pub fn set_effect(&mut self, mut effect: E) {
        effect.reset();
        self.effect = effect;
        self.next_frame = Instant::from_millis(0);
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    pub fn canvas(&self) -> &Canvas<'a, O, MAX_LEDS> {
        &self.canvas
    }
}
