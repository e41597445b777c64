//! The fixed catalog of sensor modes and the format negotiation helpers built on it.

use crate::s5k3l6::program::RegisterProgram;
use crate::s5k3l6::tables;

/// Number of CSI-2 data lanes.
pub const LANES: u64 = 4;

/// Selectable CSI-2 link frequencies in Hz, indexed by [`Mode::link_frequency_index`].
pub const LINK_FREQUENCIES: [u64; 2] = [600_000_000, 284_000_000];

/// Pixel rate of the fastest link: frequency * 2 (DDR) * lanes / bits per pixel.
pub const PIXEL_RATE_MAX: u64 = LINK_FREQUENCIES[0] * 2 * LANES / 10;

/// Largest vertical total (lines per frame) the sensor accepts.
pub const VTS_MAX: u32 = 0xfff7;

/// Media-bus codes of the raw 10-bit Bayer output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MediaBusCode {
    Sbggr10 = 0x3007,
    Sgrbg10 = 0x300a,
    Sgbrg10 = 0x300e,
    Srggb10 = 0x300f,
}

impl MediaBusCode {
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// A time per frame, in seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Fraction {
            numerator,
            denominator,
        }
    }

    /// Frames per second, rounded to the closest integer.
    pub const fn frames_per_second(self) -> u32 {
        (self.denominator + self.numerator / 2) / self.numerator
    }
}

/// A rectangle on the pixel array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// A supported sensor mode.
#[derive(Debug)]
pub struct Mode {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in lines.
    pub height: u32,
    /// Frame interval at the default vertical blank.
    pub max_frame_interval: Fraction,
    /// Horizontal total, in pixels.
    pub hts: u32,
    /// Default vertical total, in lines.
    pub vts: u32,
    /// Default exposure, in lines.
    pub exposure: u32,
    /// Index into [`LINK_FREQUENCIES`].
    pub link_frequency_index: usize,
    pub bits_per_pixel: u32,
    /// Active area width.
    pub crop_width: u32,
    /// Active area height.
    pub crop_height: u32,
    /// Register program putting the sensor into this mode.
    pub program: &'static RegisterProgram,
}

impl Mode {
    /// Horizontal blank, fixed per mode.
    pub const fn hblank(&self) -> u32 {
        self.hts - self.width
    }

    /// Vertical blank at the default vertical total.
    pub const fn vblank_default(&self) -> u32 {
        self.vts - self.height
    }

    /// Largest vertical blank allowed.
    pub const fn vblank_max(&self) -> u32 {
        VTS_MAX - self.height
    }

    pub fn link_frequency(&self) -> u64 {
        LINK_FREQUENCIES[self.link_frequency_index]
    }

    /// Pixel rate in pixels per second.
    pub fn pixel_rate(&self) -> u64 {
        self.link_frequency() / u64::from(self.bits_per_pixel) * 2 * LANES
    }

    /// Centred crop rectangle, aligned to 4 pixels.
    pub const fn crop_bounds(&self) -> Rect {
        Rect {
            left: crop_start(self.width, self.crop_width),
            top: crop_start(self.height, self.crop_height),
            width: self.crop_width,
            height: self.crop_height,
        }
    }

    pub const fn info(&self) -> ModeInfo {
        ModeInfo {
            width: self.width,
            height: self.height,
            interval: self.max_frame_interval,
        }
    }
}

const fn crop_start(source: u32, active: u32) -> u32 {
    (source - active) / 2 / 4 * 4
}

/// Public summary of a mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ModeInfo {
    pub width: u32,
    pub height: u32,
    pub interval: Fraction,
}

/// Supported modes.
pub static MODES: [Mode; 2] = [
    Mode {
        width: 4208,
        height: 3120,
        max_frame_interval: Fraction::new(10000, 300000),
        hts: 0x1320,
        vts: 0x0cbc,
        exposure: 0x0cb0,
        link_frequency_index: 0,
        bits_per_pixel: 10,
        crop_width: 4208,
        crop_height: 3120,
        program: &tables::MODE_4208X3120_30FPS,
    },
    Mode {
        width: 2104,
        height: 1560,
        max_frame_interval: Fraction::new(10000, 300000),
        hts: 0x1320,
        vts: 0x0cbc,
        exposure: 0x0cb0,
        link_frequency_index: 1,
        bits_per_pixel: 10,
        crop_width: 2096,
        crop_height: 1560,
        program: &tables::MODE_2104X1560_30FPS,
    },
];

/// Mode the device starts in.
pub fn default_mode() -> &'static Mode {
    &MODES[0]
}

/// The mode closest to the requested size, by `|dw| + |dh|`. Ties go to the earlier mode.
pub fn best_fit(width: u32, height: u32) -> &'static Mode {
    MODES
        .iter()
        .min_by_key(|mode| {
            u64::from(mode.width.abs_diff(width)) + u64::from(mode.height.abs_diff(height))
        })
        .unwrap_or(&MODES[0])
}

/// All modes, in catalog order.
pub fn enumerate() -> impl Iterator<Item = ModeInfo> + Clone {
    MODES.iter().map(Mode::info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_sizes() {
        assert_eq!(best_fit(4208, 3120).width, 4208);
        assert_eq!(best_fit(2104, 1560).width, 2104);
    }

    #[test]
    fn nearest_size() {
        assert_eq!(best_fit(2200, 1600).width, 2104);
        assert_eq!(best_fit(640, 480).width, 2104);
        assert_eq!(best_fit(8000, 6000).width, 4208);
        assert_eq!(best_fit(u32::MAX, u32::MAX).width, 4208);
    }

    #[test]
    fn tie_goes_to_first() {
        // Both modes are 1832 away from this request
        let (w, h) = (3156, 2340);
        let d0 = 4208 - w + 3120 - h;
        let d1 = w - 2104 + h - 1560;
        assert_eq!(d0, d1);
        assert!(core::ptr::eq(best_fit(w, h), &MODES[0]));
    }

    #[test]
    fn pixel_rates() {
        assert_eq!(PIXEL_RATE_MAX, 480_000_000);
        assert_eq!(MODES[0].pixel_rate(), 480_000_000);
        assert_eq!(MODES[1].pixel_rate(), 227_200_000);
    }

    #[test]
    fn blanking() {
        assert_eq!(MODES[0].hblank(), 0x1320 - 4208);
        assert_eq!(MODES[0].vblank_default(), 0x0cbc - 3120);
        assert_eq!(MODES[1].vblank_max(), 0xfff7 - 1560);
    }

    #[test]
    fn crop() {
        assert_eq!(
            MODES[0].crop_bounds(),
            Rect {
                left: 0,
                top: 0,
                width: 4208,
                height: 3120
            }
        );
        assert_eq!(
            MODES[1].crop_bounds(),
            Rect {
                left: 4,
                top: 0,
                width: 2096,
                height: 1560
            }
        );
    }

    #[test]
    fn enumeration_restarts() {
        let modes = enumerate();
        assert_eq!(modes.clone().count(), 2);
        assert_eq!(modes.map(|info| info.width).max(), Some(4208));
        assert_eq!(MODES[0].max_frame_interval.frames_per_second(), 30);
    }
}
