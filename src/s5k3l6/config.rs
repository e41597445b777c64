//! Runtime configuration, chosen when the device context is created.

use crate::s5k3l6::modes::MediaBusCode;

/// Default 7-bit I2C address of the S5K3L6.
pub const DEFAULT_ADDRESS: u8 = 0x2D;

/// How the sensor is mounted on the module. Each orientation shifts the Bayer phase, so it also
/// picks the media-bus code reported to the receiver.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Normal,
    Mirror,
    Flip,
    FlipMirror,
}

impl Orientation {
    /// Bus code of the pixel data in this orientation.
    pub const fn bus_code(self) -> MediaBusCode {
        match self {
            Orientation::Normal => MediaBusCode::Sgrbg10,
            Orientation::Mirror => MediaBusCode::Srggb10,
            Orientation::Flip => MediaBusCode::Sbggr10,
            Orientation::FlipMirror => MediaBusCode::Sgbrg10,
        }
    }

    /// Low byte of the orientation word written to the mode select register.
    pub const fn register_value(self) -> u32 {
        match self {
            Orientation::Normal => 0x00,
            Orientation::Mirror => 0x01,
            Orientation::Flip => 0x02,
            Orientation::FlipMirror => 0x03,
        }
    }
}

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// 7-bit I2C address.
    pub address: u8,
    /// Mounting orientation.
    pub orientation: Orientation,
    /// Expose the digital gain control.
    pub digital_gain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: DEFAULT_ADDRESS,
            orientation: Orientation::Normal,
            digital_gain: false,
        }
    }
}
