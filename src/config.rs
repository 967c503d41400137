use crate::encoder::Timings;

#[cfg(feature = "log")]
use esp_println::println;

/// LED count used when the configuration source has no value
pub const DEFAULT_NUM_LEDS: u32 = 20;

/// Configuration read once when a strip is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    /// Number of LEDs on the strip
    pub num_leds: u32,
    /// Protocol hold times
    pub timings: Timings,
}

impl StripConfig {
    /// Build a config from an optional external LED count.
    ///
    /// `value` comes from whatever source the platform has (a device-tree
    /// `num-leds` property, an environment value, a hardware query). Missing
    /// values fall back to [`DEFAULT_NUM_LEDS`].
    pub fn from_num_leds(value: Option<u32>) -> Self {
        let num_leds = match value {
            Some(num_leds) => {
                #[cfg(feature = "log")]
                println!("ws2801: using {} LEDs", num_leds);
                num_leds
            }
            None => {
                #[cfg(feature = "log")]
                println!("ws2801: defaulting to {} LEDs", DEFAULT_NUM_LEDS);
                DEFAULT_NUM_LEDS
            }
        };
        Self {
            num_leds,
            timings: Timings::DEFAULT,
        }
    }

    /// Replace the protocol timings
    #[must_use]
    pub const fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            num_leds: DEFAULT_NUM_LEDS,
            timings: Timings::DEFAULT,
        }
    }
}

/// Parse a raw LED count, e.g. from an environment variable.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is not
/// an unsigned integer.
pub fn parse_num_leds(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
