//! Transfer gate.
//!
//! A [`Strip`] owns the frame buffer, the pins and the delay provider behind a
//! single blocking mutex. Reads and writes are serialized by that mutex with
//! no reader/writer distinction, so a reader never sees a frame that is only
//! partly written. Waiting callers block until the gate is free; there is no
//! timeout, cancellation or fairness guarantee.
//!
//! The bit stream itself is produced inside `critical_section::with`. On
//! embedded targets that masks interrupts, so nothing can stretch a bit past
//! the strip's inter-bit limit. The `std` critical-section implementation only
//! serializes threads: on hosted platforms timing is best-effort, and a
//! dedicated real-time thread is the closest approximation.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embedded_hal::delay::DelayNs;

#[cfg(feature = "log")]
use esp_println::println;

use crate::color::Rgb;
use crate::config::StripConfig;
use crate::encoder::{BitEncoder, Timings};
use crate::error::Error;
use crate::frame::{Frame, check_len};
use crate::pins::PinPair;

/// Something that can accept whole frames of colors
pub trait OutputDriver {
    /// Number of LEDs a frame holds
    fn led_count(&self) -> u32;

    /// Write colors to the LED strip, returning the accepted byte count
    fn write_colors(&self, colors: &[Rgb]) -> Result<usize, Error>;
}

impl<T: OutputDriver + ?Sized> OutputDriver for &T {
    fn led_count(&self) -> u32 {
        (**self).led_count()
    }

    fn write_colors(&self, colors: &[Rgb]) -> Result<usize, Error> {
        (**self).write_colors(colors)
    }
}

/// State only touched while holding the gate
struct Transfer<P, D, const MAX_LEDS: usize> {
    frame: Frame<MAX_LEDS>,
    encoder: BitEncoder<P, D>,
}

/// WS2801 strip exposed as a byte-buffer device
pub struct Strip<M: RawMutex, P, D, const MAX_LEDS: usize> {
    num_leds: u32,
    gate: Mutex<M, RefCell<Option<Transfer<P, D, MAX_LEDS>>>>,
}

/// Strip usable from several threads or interrupt contexts
pub type SharedStrip<P, D, const MAX_LEDS: usize> = Strip<CriticalSectionRawMutex, P, D, MAX_LEDS>;

impl<M, P, D, const MAX_LEDS: usize> Strip<M, P, D, MAX_LEDS>
where
    M: RawMutex,
    P: PinPair,
    D: DelayNs,
{
    /// Open a strip on an acquired pin pair.
    ///
    /// Allocates a frame of `config.num_leds` LEDs, all off, and parks both
    /// lines low. Nothing is sent until the first write.
    pub fn open(config: &StripConfig, mut pins: P, delay: D) -> Result<Self, Error> {
        let num_leds = config.num_leds as usize;
        let frame = Frame::new(num_leds)?;

        pins.set_clock(false);
        pins.set_data(false);

        #[cfg(feature = "log")]
        println!("ws2801: opened strip with {} LEDs", num_leds);

        Ok(Self {
            num_leds: config.num_leds,
            gate: Mutex::new(RefCell::new(Some(Transfer {
                frame,
                encoder: BitEncoder::new(pins, delay, config.timings),
            }))),
        })
    }

    /// LED count fixed at open; never takes the gate
    pub const fn led_count(&self) -> u32 {
        self.num_leds
    }

    /// Write a raw frame and block until it is latched.
    ///
    /// `bytes` holds r, g, b per LED starting at the first LED. A shorter
    /// buffer switches the remaining LEDs off. Returns the number of bytes
    /// accepted, which is `bytes.len()`.
    pub fn write(&self, bytes: &[u8]) -> Result<usize, Error> {
        match check_len(bytes.len(), self.num_leds as usize) {
            Ok(_leds) => {
                #[cfg(feature = "log")]
                println!("ws2801: setting {} LEDs", _leds);
            }
            Err(e) => {
                #[cfg(feature = "log")]
                println!("ws2801: rejected write: {}", e);
                return Err(e);
            }
        }

        self.transfer(|frame| frame.load_bytes(bytes))
    }

    /// Write a frame of colors and block until it is latched.
    ///
    /// Same contract as [`Strip::write`]; returns accepted bytes.
    pub fn write_colors(&self, colors: &[Rgb]) -> Result<usize, Error> {
        if colors.len() > self.num_leds as usize {
            #[cfg(feature = "log")]
            println!("ws2801: rejected write of {} LEDs", colors.len());
            return Err(Error::Size {
                leds: colors.len(),
                capacity: self.num_leds as usize,
            });
        }

        #[cfg(feature = "log")]
        println!("ws2801: setting {} LEDs", colors.len());

        self.transfer(|frame| frame.load_colors(colors))
    }

    /// Snapshot of the current frame
    pub fn read(&self) -> Result<Frame<MAX_LEDS>, Error> {
        self.gate.lock(|cell| {
            cell.borrow()
                .as_ref()
                .map(|transfer| transfer.frame.clone())
                .ok_or(Error::Closed)
        })
    }

    /// Copy the current frame's bytes into `out`.
    ///
    /// `out` must hold at least `3 * led_count()` bytes. Returns the number
    /// of bytes copied.
    pub fn read_into(&self, out: &mut [u8]) -> Result<usize, Error> {
        self.gate.lock(|cell| {
            let slot = cell.borrow();
            let transfer = slot.as_ref().ok_or(Error::Closed)?;
            transfer.frame.copy_to(out)
        })
    }

    /// Protocol timings in use, `None` once closed
    pub fn timings(&self) -> Option<Timings> {
        self.gate.lock(|cell| {
            cell.borrow()
                .as_ref()
                .map(|transfer| transfer.encoder.timings())
        })
    }

    /// Release the pins and the frame.
    ///
    /// Returns the pin pair and delay provider on the first call and `None`
    /// afterwards. Later reads and writes fail with [`Error::Closed`].
    pub fn close(&self) -> Option<(P, D)> {
        let transfer = self.gate.lock(|cell| cell.borrow_mut().take())?;

        #[cfg(feature = "log")]
        println!("ws2801: closed strip");

        Some(transfer.encoder.release())
    }

    pub fn is_closed(&self) -> bool {
        self.gate.lock(|cell| cell.borrow().is_none())
    }

    /// Load the frame and shift it out while holding the gate
    fn transfer<F>(&self, load: F) -> Result<usize, Error>
    where
        F: FnOnce(&mut Frame<MAX_LEDS>) -> Result<usize, Error>,
    {
        self.gate.lock(|cell| {
            let mut slot = cell.borrow_mut();
            let transfer = slot.as_mut().ok_or(Error::Closed)?;
            let accepted = load(&mut transfer.frame)?;

            let Transfer { frame, encoder } = transfer;
            critical_section::with(|_| encoder.transmit(frame.bytes()));
            Ok(accepted)
        })
    }
}

impl<M, P, D, const MAX_LEDS: usize> OutputDriver for Strip<M, P, D, MAX_LEDS>
where
    M: RawMutex,
    P: PinPair,
    D: DelayNs,
{
    fn led_count(&self) -> u32 {
        self.num_leds
    }

    fn write_colors(&self, colors: &[Rgb]) -> Result<usize, Error> {
        Strip::write_colors(self, colors)
    }
}
