//! Sensor controls and the dependencies between them.
//!
//! The graph only holds values. Changes yield the register writes they cause, and the device
//! context decides whether the sensor is powered to receive them.

use crate::s5k3l6::cci::{BusError, Register, RegisterWrite, Width};
use crate::s5k3l6::modes::{Mode, PIXEL_RATE_MAX};
use heapless::{LinearMap, Vec};

/// Maximum number of controls.
pub const CONTROL_COUNT: usize = 8;

/// Controls, in declaration order.
pub type ControlMap = LinearMap<ControlId, Control, CONTROL_COUNT>;

/// Register writes caused by one control change.
pub type Updates = Vec<RegisterWrite, 4>;

pub const EXPOSURE_MIN: i64 = 1;
pub const EXPOSURE_STEP: i64 = 1;
/// Lines the exposure must stay below the vertical total.
pub const EXPOSURE_MARGIN: i64 = 4;

pub const ANALOG_GAIN_MIN: i64 = 0x20;
pub const ANALOG_GAIN_MAX: i64 = 0x200;
pub const ANALOG_GAIN_STEP: i64 = 1;
pub const ANALOG_GAIN_DEFAULT: i64 = 0x100;

pub const DIGITAL_GAIN_MIN: i64 = 0x100;
pub const DIGITAL_GAIN_MAX: i64 = 0xfff;
pub const DIGITAL_GAIN_STEP: i64 = 1;
pub const DIGITAL_GAIN_DEFAULT: i64 = 0x100;

/// Test pattern menu entries.
pub const TEST_PATTERN_MENU: [&str; 4] = [
    "Disabled",
    "Vertical Color Bar Type 1",
    "Vertical Color Bar Type 2",
    "Vertical Color Bar Type 3",
];

/// Test pattern register bit enabling the generator.
const TEST_PATTERN_ENABLE: u32 = 0x80;

/// Control identifiers. [`ControlId::cid`] gives the V4L2 control ID.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlId {
    LinkFrequency,
    PixelRate,
    HorizontalBlank,
    VerticalBlank,
    Exposure,
    AnalogGain,
    DigitalGain,
    TestPattern,
}

impl ControlId {
    pub const ALL: [ControlId; CONTROL_COUNT] = [
        ControlId::LinkFrequency,
        ControlId::PixelRate,
        ControlId::HorizontalBlank,
        ControlId::VerticalBlank,
        ControlId::Exposure,
        ControlId::AnalogGain,
        ControlId::DigitalGain,
        ControlId::TestPattern,
    ];

    /// V4L2 control ID.
    pub const fn cid(self) -> u32 {
        match self {
            ControlId::LinkFrequency => 0x009f_0901,
            ControlId::PixelRate => 0x009f_0902,
            ControlId::HorizontalBlank => 0x009e_0902,
            ControlId::VerticalBlank => 0x009e_0901,
            ControlId::Exposure => 0x0098_0911,
            ControlId::AnalogGain => 0x009e_0903,
            ControlId::DigitalGain => 0x009f_0905,
            ControlId::TestPattern => 0x009f_0903,
        }
    }
}

impl TryFrom<u32> for ControlId {
    type Error = u32;

    fn try_from(cid: u32) -> Result<Self, Self::Error> {
        ControlId::ALL
            .iter()
            .copied()
            .find(|id| id.cid() == cid)
            .ok_or(cid)
    }
}

/// How a control value is interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlKind {
    Integer,
    Integer64,
    /// Index into a list of names.
    Menu,
    /// Index into a list of integers.
    IntegerMenu,
}

/// A control descriptor with its current value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Control {
    pub id: ControlId,
    pub kind: ControlKind,
    pub minimum: i64,
    pub maximum: i64,
    pub step: i64,
    pub default: i64,
    pub value: i64,
    pub read_only: bool,
}

impl Control {
    fn new(
        id: ControlId,
        kind: ControlKind,
        minimum: i64,
        maximum: i64,
        step: i64,
        default: i64,
    ) -> Self {
        Control {
            id,
            kind,
            minimum,
            maximum,
            step,
            default,
            value: default,
            read_only: false,
        }
    }

    fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Nearest legal value.
    fn round(&self, value: i64) -> i64 {
        let value = value.clamp(self.minimum, self.maximum);
        let step = self.step.max(1);
        let offset = (value - self.minimum + step / 2) / step * step;
        (self.minimum + offset).min(self.maximum)
    }

    /// Replace the range, keeping the current value inside it. Returns whether the value changed.
    fn update_range(&mut self, minimum: i64, maximum: i64, default: i64) -> bool {
        self.minimum = minimum;
        self.maximum = maximum;
        self.default = default;

        let value = self.round(self.value);
        let changed = value != self.value;
        self.value = value;
        changed
    }
}

/// Control errors.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ControlError<E> {
    /// No control with this V4L2 control ID.
    #[error("unsupported control 0x{0:08x}")]
    Unsupported(u32),
    /// The control is derived from the mode.
    #[error("control {0:?} is read-only")]
    ReadOnly(ControlId),
    /// Menu index past the end of the menu.
    #[error("value {1} out of range for {0:?}")]
    OutOfRange(ControlId, i64),
    /// The register write failed.
    #[error("control write failed: {0}")]
    Bus(BusError<E>),
}

impl<E> From<BusError<E>> for ControlError<E> {
    fn from(e: BusError<E>) -> Self {
        ControlError::Bus(e)
    }
}

/// The sensor controls of the current mode.
#[derive(Debug)]
pub struct ControlGraph {
    controls: ControlMap,
    mode: &'static Mode,
}

impl ControlGraph {
    /// Creates the controls for `mode`. The digital gain control only exists when enabled.
    pub fn new(mode: &'static Mode, digital_gain: bool) -> Self {
        let hblank = i64::from(mode.hblank());
        let vblank = i64::from(mode.vblank_default());
        let exposure_max = i64::from(mode.vts) - EXPOSURE_MARGIN;
        let link = mode.link_frequency_index as i64;

        let controls = [
            Some(
                Control::new(
                    ControlId::LinkFrequency,
                    ControlKind::IntegerMenu,
                    0,
                    1,
                    1,
                    link,
                )
                .read_only(),
            ),
            Some(
                Control::new(
                    ControlId::PixelRate,
                    ControlKind::Integer64,
                    0,
                    PIXEL_RATE_MAX as i64,
                    1,
                    mode.pixel_rate() as i64,
                )
                .read_only(),
            ),
            Some(
                Control::new(
                    ControlId::HorizontalBlank,
                    ControlKind::Integer,
                    hblank,
                    hblank,
                    1,
                    hblank,
                )
                .read_only(),
            ),
            Some(Control::new(
                ControlId::VerticalBlank,
                ControlKind::Integer,
                vblank,
                i64::from(mode.vblank_max()),
                1,
                vblank,
            )),
            Some(Control::new(
                ControlId::Exposure,
                ControlKind::Integer,
                EXPOSURE_MIN,
                exposure_max,
                EXPOSURE_STEP,
                i64::from(mode.exposure),
            )),
            Some(Control::new(
                ControlId::AnalogGain,
                ControlKind::Integer,
                ANALOG_GAIN_MIN,
                ANALOG_GAIN_MAX,
                ANALOG_GAIN_STEP,
                ANALOG_GAIN_DEFAULT,
            )),
            digital_gain.then(|| {
                Control::new(
                    ControlId::DigitalGain,
                    ControlKind::Integer,
                    DIGITAL_GAIN_MIN,
                    DIGITAL_GAIN_MAX,
                    DIGITAL_GAIN_STEP,
                    DIGITAL_GAIN_DEFAULT,
                )
            }),
            Some(Control::new(
                ControlId::TestPattern,
                ControlKind::Menu,
                0,
                TEST_PATTERN_MENU.len() as i64 - 1,
                1,
                0,
            )),
        ];

        let mut map = ControlMap::new();
        for control in controls.into_iter().flatten() {
            if map.insert(control.id, control).is_err() {
                log::warn!("no room for control {:?}", control.id);
            }
        }

        ControlGraph {
            controls: map,
            mode,
        }
    }

    /// Mode the ranges are derived from.
    pub fn mode(&self) -> &'static Mode {
        self.mode
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(&id)
    }

    /// Every control, in declaration order.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }

    /// Current value of a control.
    pub fn value(&self, id: ControlId) -> Option<i64> {
        self.control(id).map(|control| control.value)
    }

    /// Recompute the mode dependent controls.
    pub fn on_mode_selected(&mut self, mode: &'static Mode) -> Updates {
        self.mode = mode;
        let mut updates = Updates::new();

        if let Some(link) = self.controls.get_mut(&ControlId::LinkFrequency) {
            link.value = mode.link_frequency_index as i64;
        }
        if let Some(rate) = self.controls.get_mut(&ControlId::PixelRate) {
            rate.value = mode.pixel_rate() as i64;
        }
        if let Some(hblank) = self.controls.get_mut(&ControlId::HorizontalBlank) {
            let value = i64::from(mode.hblank());
            hblank.update_range(value, value, value);
        }
        if let Some(vblank) = self.controls.get_mut(&ControlId::VerticalBlank) {
            let default = i64::from(mode.vblank_default());
            vblank.update_range(default, i64::from(mode.vblank_max()), default);
        }

        self.on_vblank_changed(&mut updates);
        updates
    }

    /// Exposure follows the vertical blank, the total then has to be rewritten.
    fn on_vblank_changed(&mut self, updates: &mut Updates) {
        let Some(vblank) = self.value(ControlId::VerticalBlank) else {
            return;
        };
        let maximum = i64::from(self.mode.height) + vblank - EXPOSURE_MARGIN;

        let changed = match self.controls.get_mut(&ControlId::Exposure) {
            Some(exposure) => {
                let default = exposure.default.min(maximum);
                exposure.update_range(exposure.minimum, maximum, default)
            }
            None => false,
        };
        if changed {
            self.queue(updates, ControlId::Exposure);
        }
        self.queue(updates, ControlId::VerticalBlank);
    }

    /// Set a control. Integers are clamped into range, menus must be in range.
    pub fn set<E>(&mut self, id: ControlId, value: i64) -> Result<Updates, ControlError<E>> {
        let control = self
            .controls
            .get_mut(&id)
            .ok_or(ControlError::Unsupported(id.cid()))?;
        if control.read_only {
            return Err(ControlError::ReadOnly(id));
        }

        control.value = match control.kind {
            ControlKind::Menu | ControlKind::IntegerMenu => {
                if value < control.minimum || value > control.maximum {
                    return Err(ControlError::OutOfRange(id, value));
                }
                value
            }
            ControlKind::Integer | ControlKind::Integer64 => control.round(value),
        };

        let mut updates = Updates::new();
        if id == ControlId::VerticalBlank {
            self.on_vblank_changed(&mut updates);
        } else {
            self.queue(&mut updates, id);
        }
        Ok(updates)
    }

    /// Set a control by V4L2 control ID.
    pub fn set_raw<E>(&mut self, cid: u32, value: i64) -> Result<Updates, ControlError<E>> {
        let id = ControlId::try_from(cid).map_err(ControlError::Unsupported)?;
        self.set(id, value)
    }

    /// Register write holding the current value of a writable control.
    pub fn register_write(&self, id: ControlId) -> Option<RegisterWrite> {
        let control = self.control(id)?;
        let value = control.value as u32;
        match id {
            ControlId::VerticalBlank => Some(RegisterWrite::new(
                Register::FRAME_LENGTH_LINES,
                Width::BIT16,
                value + self.mode.height,
            )),
            ControlId::Exposure => Some(RegisterWrite::new(
                Register::EXPOSURE,
                Width::BIT16,
                value,
            )),
            ControlId::AnalogGain => Some(RegisterWrite::new(
                Register::ANALOG_GAIN,
                Width::BIT16,
                value,
            )),
            ControlId::DigitalGain => Some(RegisterWrite::new(
                Register::DIGITAL_GAIN,
                Width::BIT16,
                value,
            )),
            ControlId::TestPattern => Some(RegisterWrite::new(
                Register::TEST_PATTERN,
                Width::BIT8,
                test_pattern_register(value),
            )),
            ControlId::LinkFrequency | ControlId::PixelRate | ControlId::HorizontalBlank => None,
        }
    }

    /// Writes restoring every writable control, in declaration order.
    pub fn replay(&self) -> impl Iterator<Item = RegisterWrite> + '_ {
        self.controls
            .keys()
            .filter_map(move |id| self.register_write(*id))
    }

    fn queue(&self, updates: &mut Updates, id: ControlId) {
        if let Some(write) = self.register_write(id) {
            if updates.push(write).is_err() {
                log::warn!("dropped register update for {:?}", id);
            }
        }
    }
}

/// Register encoding of a test pattern menu index.
pub const fn test_pattern_register(index: u32) -> u32 {
    if index > 0 {
        (index - 1) | TEST_PATTERN_ENABLE
    } else {
        0x00
    }
}
