//! Clock and data line access.
//!
//! The encoder only ever needs two operations, so hardware is reached through
//! [`PinPair`]. [`GpioPins`] adapts any pair of `embedded-hal` output pins.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::InitError;

/// Two output lines feeding the strip's shift register
pub trait PinPair {
    /// Drive the clock line
    fn set_clock(&mut self, high: bool);

    /// Drive the data line
    fn set_data(&mut self, high: bool);
}

impl<T: PinPair + ?Sized> PinPair for &mut T {
    fn set_clock(&mut self, high: bool) {
        (**self).set_clock(high);
    }

    fn set_data(&mut self, high: bool) {
        (**self).set_data(high);
    }
}

/// [`PinPair`] backed by two `embedded-hal` output pins
pub struct GpioPins<CLK, DATA> {
    clock: CLK,
    data: DATA,
}

impl<CLK, DATA> GpioPins<CLK, DATA>
where
    CLK: OutputPin,
    DATA: OutputPin,
{
    /// Take ownership of both lines and drive them low.
    ///
    /// Fails if either line refuses its initial level.
    pub fn new(mut clock: CLK, mut data: DATA) -> Result<Self, InitError> {
        clock.set_low().map_err(|_| InitError::ClockPin)?;
        data.set_low().map_err(|_| InitError::DataPin)?;
        Ok(Self { clock, data })
    }

    /// Give the lines back
    pub fn release(self) -> (CLK, DATA) {
        (self.clock, self.data)
    }
}

impl<CLK, DATA> PinPair for GpioPins<CLK, DATA>
where
    CLK: OutputPin,
    DATA: OutputPin,
{
    // A failed toggle can only corrupt the frame being shifted out.
    fn set_clock(&mut self, high: bool) {
        self.clock.set_state(PinState::from(high)).ok();
    }

    fn set_data(&mut self, high: bool) {
        self.data.set_state(PinState::from(high)).ok();
    }
}
