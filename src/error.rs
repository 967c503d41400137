//! Error types for strip operations

use core::fmt;

/// Failure while opening a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The clock line could not be driven to its idle level
    ClockPin,
    /// The data line could not be driven to its idle level
    DataPin,
    /// The configured LED count does not fit the frame capacity
    Capacity { requested: usize, max: usize },
}

/// Error type for strip, frame and canvas operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Opening the strip failed
    Init(InitError),
    /// Buffer length is not a whole number of colors
    Range { len: usize },
    /// More LEDs were addressed than the strip provides
    Size { leds: usize, capacity: usize },
    /// Single LED index past the end of the strip
    Index { index: usize, num_leds: usize },
    /// Caller buffer cannot hold the frame
    Copy { needed: usize, available: usize },
    /// The strip was closed
    Closed,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::ClockPin => write!(f, "unable to drive clock pin"),
            InitError::DataPin => write!(f, "unable to drive data pin"),
            InitError::Capacity { requested, max } => {
                write!(f, "{} LEDs requested, capacity is {}", requested, max)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Init(e) => write!(f, "init error: {}", e),
            Error::Range { len } => write!(f, "incorrect range {}", len),
            Error::Size { leds, capacity } => {
                write!(f, "{} LEDs addressed, strip has {}", leds, capacity)
            }
            Error::Index { index, num_leds } => {
                write!(f, "LED index {} out of range ({} LEDs)", index, num_leds)
            }
            Error::Copy { needed, available } => {
                write!(f, "buffer of {} bytes cannot hold {} bytes", available, needed)
            }
            Error::Closed => write!(f, "strip is closed"),
        }
    }
}

impl core::error::Error for InitError {}

impl core::error::Error for Error {}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Error::Init(e)
    }
}
