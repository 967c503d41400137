//! Staged frame with per-LED editing.
//!
//! A [`Canvas`] keeps its own copy of the frame. Edits only touch that copy;
//! nothing reaches the strip until [`Canvas::commit`].

use crate::color::{BYTES_PER_LED, Rgb};
use crate::error::Error;
use crate::frame::Frame;
use crate::strip::OutputDriver;

pub struct Canvas<'a, O: OutputDriver + ?Sized, const MAX_LEDS: usize> {
    output: &'a O,
    staged: Frame<MAX_LEDS>,
}

impl<'a, O: OutputDriver + ?Sized, const MAX_LEDS: usize> Canvas<'a, O, MAX_LEDS> {
    /// Create a canvas sized for `output`, all LEDs off
    pub fn new(output: &'a O) -> Result<Self, Error> {
        let staged = Frame::new(output.led_count() as usize)?;
        Ok(Self { output, staged })
    }

    /// Number of LEDs on the canvas
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Set a single LED
    pub fn set(&mut self, index: usize, color: Rgb) -> Result<(), Error> {
        let num_leds = self.staged.len();
        let led = self
            .staged
            .get_mut(index)
            .ok_or(Error::Index { index, num_leds })?;
        *led = color;
        Ok(())
    }

    /// Set every LED to `color`
    pub fn fill(&mut self, color: Rgb) {
        self.staged.fill(color);
    }

    /// Switch every LED off
    pub fn clear(&mut self) {
        self.staged.clear();
    }

    pub fn leds(&self) -> &[Rgb] {
        &self.staged
    }

    pub fn leds_mut(&mut self) -> &mut [Rgb] {
        &mut self.staged
    }

    /// Send the staged frame to the output unchanged
    pub fn commit(&self) -> Result<(), Error> {
        let accepted = self.output.write_colors(&self.staged)?;
        if accepted != self.staged.byte_len() {
            return Err(Error::Size {
                leds: accepted / BYTES_PER_LED,
                capacity: self.staged.len(),
            });
        }
        Ok(())
    }
}
