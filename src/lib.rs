#![no_std]

pub mod canvas;
pub mod color;
pub mod config;
pub mod effect;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod frame_scheduler;
pub mod pins;
pub mod sim;
pub mod strip;

pub use canvas::Canvas;
pub use config::{DEFAULT_NUM_LEDS, StripConfig, parse_num_leds};
pub use effect::{Effect, EffectId, EffectSlot};
pub use encoder::{BitEncoder, Timings};
pub use error::{Error, InitError};
pub use frame::Frame;
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use pins::{GpioPins, PinPair};
pub use strip::{OutputDriver, SharedStrip, Strip};

pub use color::Rgb;
pub use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
pub use embassy_time::{Duration, Instant};
