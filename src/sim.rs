//! Software model of a WS2801 strip.
//!
//! [`SimBus`] stands in for real hardware: its [`SimPins`] and [`SimDelay`]
//! plug into a [`Strip`](crate::Strip) like GPIO lines and a timer would, and
//! feed a [`ShiftRegisterModel`] that decodes the pin activity the way the
//! strip's chips do. Time is modeled, never slept, so a frame "takes" its real
//! duration without the caller waiting for it.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

use crate::color::{BYTES_PER_LED, OFF, Rgb};
use crate::pins::PinPair;

const LATCH_THRESHOLD_US: u64 = 500;
const LATCH_THRESHOLD_NS: u64 = LATCH_THRESHOLD_US * 1_000;

/// Low-clock time after which the chips latch their shift registers
pub const LATCH_THRESHOLD: Duration = Duration::from_micros(LATCH_THRESHOLD_US);

/// Receive side of a strip of `LEDS` chips
#[derive(Debug, Clone)]
pub struct ShiftRegisterModel<const LEDS: usize> {
    clock: bool,
    data: bool,
    shift: u8,
    shift_bits: u8,
    pending: [Rgb; LEDS],
    received_bytes: usize,
    outputs: [Rgb; LEDS],
    latches: u32,
    bits: u64,
    low_ns: u64,
    high_ns: u64,
    latched_this_low: bool,
    shortest_high_ns: Option<u64>,
}

impl<const LEDS: usize> ShiftRegisterModel<LEDS> {
    pub const fn new() -> Self {
        Self {
            clock: false,
            data: false,
            shift: 0,
            shift_bits: 0,
            pending: [OFF; LEDS],
            received_bytes: 0,
            outputs: [OFF; LEDS],
            latches: 0,
            bits: 0,
            low_ns: 0,
            high_ns: 0,
            latched_this_low: false,
            shortest_high_ns: None,
        }
    }

    /// Colors currently shown by the LEDs
    pub fn outputs(&self) -> &[Rgb; LEDS] {
        &self.outputs
    }

    /// Number of latch events seen
    pub const fn latches(&self) -> u32 {
        self.latches
    }

    /// Clock rising edges seen since creation
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Whole bytes shifted in since the last latch
    pub const fn received_bytes(&self) -> usize {
        self.received_bytes
    }

    /// Shortest time the clock was held high before falling, in nanoseconds
    pub const fn shortest_clock_high_ns(&self) -> Option<u64> {
        self.shortest_high_ns
    }

    /// Shortest clock-high hold, rounded down to whole microseconds.
    ///
    /// Never overstates the hold; use [`Self::shortest_clock_high_ns`] for
    /// the exact value.
    pub fn shortest_clock_high(&self) -> Option<Duration> {
        self.shortest_high_ns
            .map(|ns| Duration::from_micros(ns / 1_000))
    }

    /// Current level of the clock line
    pub const fn clock(&self) -> bool {
        self.clock
    }

    fn set_clock(&mut self, high: bool) {
        match (self.clock, high) {
            (false, true) => self.rising_edge(),
            (true, false) => self.falling_edge(),
            _ => {}
        }
        self.clock = high;
    }

    fn set_data(&mut self, high: bool) {
        self.data = high;
    }

    fn rising_edge(&mut self) {
        self.bits += 1;
        self.low_ns = 0;
        self.high_ns = 0;
        self.latched_this_low = false;

        self.shift = (self.shift << 1) | u8::from(self.data);
        self.shift_bits += 1;
        if self.shift_bits == 8 {
            self.push_byte(self.shift);
            self.shift = 0;
            self.shift_bits = 0;
        }
    }

    fn falling_edge(&mut self) {
        let held = self.high_ns;
        self.shortest_high_ns = Some(self.shortest_high_ns.map_or(held, |ns| ns.min(held)));
    }

    fn push_byte(&mut self, byte: u8) {
        let index = self.received_bytes / BYTES_PER_LED;
        if let Some(led) = self.pending.get_mut(index) {
            match self.received_bytes % BYTES_PER_LED {
                0 => led.r = byte,
                1 => led.g = byte,
                _ => led.b = byte,
            }
        }
        self.received_bytes += 1;
    }

    fn elapse(&mut self, ns: u64) {
        if self.clock {
            self.high_ns += ns;
            return;
        }
        self.low_ns += ns;
        if self.low_ns >= LATCH_THRESHOLD_NS && !self.latched_this_low {
            self.latch();
        }
    }

    fn latch(&mut self) {
        let complete = (self.received_bytes / BYTES_PER_LED).min(LEDS);
        self.outputs[..complete].copy_from_slice(&self.pending[..complete]);
        self.latches += 1;
        self.latched_this_low = true;
        self.received_bytes = 0;
        self.shift = 0;
        self.shift_bits = 0;
    }
}

impl<const LEDS: usize> Default for ShiftRegisterModel<LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared model reachable from both the pins and the delay
pub struct SimBus<const LEDS: usize> {
    model: Mutex<RefCell<ShiftRegisterModel<LEDS>>>,
}

impl<const LEDS: usize> SimBus<LEDS> {
    pub const fn new() -> Self {
        Self {
            model: Mutex::new(RefCell::new(ShiftRegisterModel::new())),
        }
    }

    pub const fn pins(&self) -> SimPins<'_, LEDS> {
        SimPins { bus: self }
    }

    pub const fn delay(&self) -> SimDelay<'_, LEDS> {
        SimDelay { bus: self }
    }

    /// Copy of the model's current state
    pub fn snapshot(&self) -> ShiftRegisterModel<LEDS> {
        self.with(|model| model.clone())
    }

    /// Colors currently shown by the LEDs
    pub fn outputs(&self) -> [Rgb; LEDS] {
        self.with(|model| model.outputs)
    }

    fn with<R>(&self, f: impl FnOnce(&mut ShiftRegisterModel<LEDS>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.model.borrow(cs).borrow_mut()))
    }
}

impl<const LEDS: usize> Default for SimBus<LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock and data lines of a [`SimBus`]
#[derive(Clone, Copy)]
pub struct SimPins<'a, const LEDS: usize> {
    bus: &'a SimBus<LEDS>,
}

impl<const LEDS: usize> PinPair for SimPins<'_, LEDS> {
    fn set_clock(&mut self, high: bool) {
        self.bus.with(|model| model.set_clock(high));
    }

    fn set_data(&mut self, high: bool) {
        self.bus.with(|model| model.set_data(high));
    }
}

/// Delay provider that advances the model's clock instead of sleeping
#[derive(Clone, Copy)]
pub struct SimDelay<'a, const LEDS: usize> {
    bus: &'a SimBus<LEDS>,
}

impl<const LEDS: usize> DelayNs for SimDelay<'_, LEDS> {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.with(|model| model.elapse(u64::from(ns)));
    }
}
