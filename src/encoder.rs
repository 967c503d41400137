//! WS2801 bit encoder.
//!
//! Bytes are shifted out MSB first: for every bit the clock goes low, the data
//! line takes the bit value, the clock goes high and is held for
//! [`Timings::bit_hold`]. After the last bit the clock stays low for
//! [`Timings::latch`], which makes the strip copy its shift registers onto
//! the LED outputs.
//!
//! The strip samples on the rising edge and gives no acknowledgement, so a
//! transfer cannot fail once started. A latch cut short (or a bit stretched
//! past the strip's patience by preemption) shows up as a wrong or stale frame
//! until the next transfer.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

use crate::pins::PinPair;

/// Shortest clock-high hold per bit
pub const MIN_BIT_HOLD: Duration = Duration::from_micros(1);

/// Shortest low-clock interval that latches a frame
pub const MIN_LATCH: Duration = Duration::from_millis(1);

/// Protocol hold times.
///
/// Values are lower bounds; longer holds are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    bit_hold: Duration,
    latch: Duration,
}

impl Timings {
    /// Protocol minimums
    pub const DEFAULT: Self = Self {
        bit_hold: MIN_BIT_HOLD,
        latch: MIN_LATCH,
    };

    /// Create timings, raising anything below the protocol minimum
    pub fn new(bit_hold: Duration, latch: Duration) -> Self {
        Self {
            bit_hold: bit_hold.max(MIN_BIT_HOLD),
            latch: latch.max(MIN_LATCH),
        }
    }

    pub const fn bit_hold(&self) -> Duration {
        self.bit_hold
    }

    pub const fn latch(&self) -> Duration {
        self.latch
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Saturating conversion for `DelayNs::delay_us`
fn as_micros_u32(duration: Duration) -> u32 {
    u32::try_from(duration.as_micros()).unwrap_or(u32::MAX)
}

/// Drives a [`PinPair`] with the WS2801 serial protocol
pub struct BitEncoder<P, D> {
    pins: P,
    delay: D,
    timings: Timings,
    bit_hold_us: u32,
    latch_us: u32,
}

impl<P: PinPair, D: DelayNs> BitEncoder<P, D> {
    pub fn new(pins: P, delay: D, timings: Timings) -> Self {
        Self {
            pins,
            delay,
            timings,
            bit_hold_us: as_micros_u32(timings.bit_hold),
            latch_us: as_micros_u32(timings.latch),
        }
    }

    /// Shift `bytes` into the strip and latch them.
    ///
    /// An empty sequence still produces the latch pulse. Length is not checked
    /// here; the caller decides how many bytes make a frame.
    pub fn transmit<I>(&mut self, bytes: I)
    where
        I: IntoIterator<Item = u8>,
    {
        for byte in bytes {
            self.send_byte(byte);
        }
        self.latch();
    }

    fn send_byte(&mut self, byte: u8) {
        let mut mask = 0x80u8;
        while mask != 0 {
            self.pins.set_clock(false);
            self.pins.set_data(byte & mask != 0);
            self.pins.set_clock(true);
            self.delay.delay_us(self.bit_hold_us);
            mask >>= 1;
        }
    }

    fn latch(&mut self) {
        self.pins.set_clock(false);
        self.delay.delay_us(self.latch_us);
    }

    pub const fn timings(&self) -> Timings {
        self.timings
    }

    /// Give back the pins and the delay provider
    pub fn release(self) -> (P, D) {
        (self.pins, self.delay)
    }
}
