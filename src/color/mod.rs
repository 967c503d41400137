use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Bytes one LED occupies in a frame (r, g, b)
pub const BYTES_PER_LED: usize = 3;

/// All channels off
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Add `step` to every channel, wrapping around at 255
#[inline]
pub const fn wrapping_step(color: Rgb, step: u8) -> Rgb {
    Rgb {
        r: color.r.wrapping_add(step),
        g: color.g.wrapping_add(step),
        b: color.b.wrapping_add(step),
    }
}
