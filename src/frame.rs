//! Frame buffer.
//!
//! A frame holds exactly one color per LED, in strip order. Its length is set
//! when it is created and never changes; loads shorter than the frame switch
//! the remaining LEDs off.

use core::ops::{Deref, DerefMut};

use heapless::Vec;

use crate::color::{BYTES_PER_LED, OFF, Rgb};
use crate::error::{Error, InitError};

/// Check a byte buffer against a strip of `num_leds` LEDs.
///
/// Returns the number of LEDs the buffer addresses.
pub const fn check_len(byte_len: usize, num_leds: usize) -> Result<usize, Error> {
    if byte_len % BYTES_PER_LED != 0 {
        return Err(Error::Range { len: byte_len });
    }
    let leds = byte_len / BYTES_PER_LED;
    if leds > num_leds {
        return Err(Error::Size {
            leds,
            capacity: num_leds,
        });
    }
    Ok(leds)
}

/// Colors for every LED of a strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<const MAX_LEDS: usize> {
    leds: Vec<Rgb, MAX_LEDS>,
}

impl<const MAX_LEDS: usize> Frame<MAX_LEDS> {
    /// Allocate a frame of `num_leds` LEDs, all off
    pub fn new(num_leds: usize) -> Result<Self, InitError> {
        let mut leds = Vec::new();
        leds.resize(num_leds, OFF).map_err(|()| InitError::Capacity {
            requested: num_leds,
            max: MAX_LEDS,
        })?;
        Ok(Self { leds })
    }

    /// Size of the byte view
    pub fn byte_len(&self) -> usize {
        self.leds.len() * BYTES_PER_LED
    }

    /// Byte view in wire order: r, g, b per LED
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.leds.iter().flat_map(|led| [led.r, led.g, led.b])
    }

    /// Load raw bytes, switching off LEDs past the end of `bytes`.
    ///
    /// The frame is untouched if `bytes` is rejected.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, Error> {
        let count = check_len(bytes.len(), self.leds.len())?;
        for (led, chunk) in self.leds.iter_mut().zip(bytes.chunks_exact(BYTES_PER_LED)) {
            *led = Rgb::new(chunk[0], chunk[1], chunk[2]);
        }
        self.switch_off_from(count);
        Ok(bytes.len())
    }

    /// Load colors, switching off LEDs past the end of `colors`
    pub fn load_colors(&mut self, colors: &[Rgb]) -> Result<usize, Error> {
        if colors.len() > self.leds.len() {
            return Err(Error::Size {
                leds: colors.len(),
                capacity: self.leds.len(),
            });
        }
        self.leds[..colors.len()].copy_from_slice(colors);
        self.switch_off_from(colors.len());
        Ok(colors.len() * BYTES_PER_LED)
    }

    /// Copy the byte view into `out`, which must hold the whole frame
    pub fn copy_to(&self, out: &mut [u8]) -> Result<usize, Error> {
        let needed = self.byte_len();
        if out.len() < needed {
            return Err(Error::Copy {
                needed,
                available: out.len(),
            });
        }
        for (dst, byte) in out.iter_mut().zip(self.bytes()) {
            *dst = byte;
        }
        Ok(needed)
    }

    /// Switch every LED off
    pub fn clear(&mut self) {
        self.fill(OFF);
    }

    /// Set every LED to `color`
    pub fn fill(&mut self, color: Rgb) {
        self.leds.fill(color);
    }

    fn switch_off_from(&mut self, index: usize) {
        self.leds[index..].fill(OFF);
    }
}

impl<const MAX_LEDS: usize> Deref for Frame<MAX_LEDS> {
    type Target = [Rgb];

    fn deref(&self) -> &Self::Target {
        &self.leds
    }
}

impl<const MAX_LEDS: usize> DerefMut for Frame<MAX_LEDS> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.leds
    }
}
