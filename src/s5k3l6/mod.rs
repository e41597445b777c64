//! Driver for the Samsung S5K3L6 13MP image sensor (4-lane MIPI CSI-2, 10-bit Bayer).
//!
//! [`S5k3l6`] owns the register bus, the power sequencer and the control state. Every operation
//! takes `&mut self`, a caller sharing the sensor between execution contexts wraps it in its own
//! lock.

pub mod cci;
pub mod config;
pub mod controls;
pub mod identity;
pub mod modes;
pub mod power;
pub mod program;
mod tables;

use cci::{BusError, Cci, Register, Width, MODE_STANDBY, MODE_STREAMING};
use config::Config;
use controls::{Control, ControlError, ControlGraph, ControlId, Updates};
use core::fmt::Debug;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::i2c;
use embedded_hal::digital::v2::OutputPin;
use identity::{ChipInfo, IdentityError};
use modes::{Fraction, MediaBusCode, Mode, ModeInfo, Rect, LANES};
use power::{PowerError, PowerManager, PowerPins, PowerResources, PowerSequencer, PowerState};

/// Driver errors. `BE` comes from the bus, `PE` from the power resources and `ME` from the power
/// manager.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error<BE, PE, ME> {
    #[error("register access failed: {0}")]
    Bus(BusError<BE>),
    #[error("identification failed: {0}")]
    Identity(IdentityError<BE>),
    #[error("control rejected: {0}")]
    Control(ControlError<BE>),
    #[error("power sequencing failed: {0}")]
    Power(PowerError<PE>),
    #[error("power reference not granted: {0:?}")]
    Acquire(ME),
    /// The sensor is suspended and needs the bus.
    #[error("sensor is suspended")]
    Suspended,
}

impl<BE, PE, ME> From<BusError<BE>> for Error<BE, PE, ME> {
    fn from(e: BusError<BE>) -> Self {
        Error::Bus(e)
    }
}

impl<BE, PE, ME> From<IdentityError<BE>> for Error<BE, PE, ME> {
    fn from(e: IdentityError<BE>) -> Self {
        Error::Identity(e)
    }
}

impl<BE, PE, ME> From<ControlError<BE>> for Error<BE, PE, ME> {
    fn from(e: ControlError<BE>) -> Self {
        Error::Control(e)
    }
}

impl<BE, PE, ME> From<PowerError<PE>> for Error<BE, PE, ME> {
    fn from(e: PowerError<PE>) -> Self {
        Error::Power(e)
    }
}

/// Streaming state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StreamState {
    Stopped,
    Streaming,
}

/// Which format a negotiation call applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatWhich {
    /// The format the sensor streams with.
    Active,
    /// A scratch format for negotiation, never touches the sensor.
    Try,
}

/// A progressive frame format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Format {
    pub width: u32,
    pub height: u32,
    pub code: MediaBusCode,
}

impl Format {
    fn new(mode: &Mode, code: MediaBusCode) -> Self {
        Format {
            width: mode.width,
            height: mode.height,
            code,
        }
    }
}

/// Frame size range of one mode, a single discrete size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameSize {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

/// Physical bus type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MbusType {
    Csi2Dphy,
}

/// Bus configuration the receiver has to match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MbusConfig {
    pub bus: MbusType,
    pub lanes: u8,
    pub hsync_active_high: bool,
    pub vsync_active_high: bool,
    pub data_active_high: bool,
}

/// S5K3L6 driver.
pub struct S5k3l6<I2C, P, PIN, D, M> {
    cci: Cci<I2C>,
    power: PowerSequencer<P, PIN, D>,
    power_manager: M,
    /// Held power references, one for streaming and one for an explicit power request.
    power_users: u32,
    power_requested: bool,
    stream: StreamState,
    suspended: bool,
    mode: &'static Mode,
    try_format: Format,
    controls: ControlGraph,
    config: Config,
}

impl<I2C, BE, P, PIN, D, M> S5k3l6<I2C, P, PIN, D, M>
where
    I2C: i2c::Write<Error = BE> + i2c::WriteRead<Error = BE>,
    BE: Debug,
    P: PowerResources,
    PIN: OutputPin,
    PIN::Error: Debug,
    D: DelayUs<u32>,
    M: PowerManager,
{
    /// Creates a driver for a powered off sensor in the default mode. Nothing is sent to the
    /// sensor until it is probed, powered or started.
    pub fn new(
        i2c: I2C,
        resources: P,
        pins: PowerPins<PIN>,
        delay: D,
        power_manager: M,
        config: Config,
    ) -> Self {
        let mode = modes::default_mode();

        S5k3l6 {
            cci: Cci::new(i2c, config.address),
            power: PowerSequencer::new(resources, pins, delay),
            power_manager,
            power_users: 0,
            power_requested: false,
            stream: StreamState::Stopped,
            suspended: false,
            mode,
            try_format: Format::new(mode, config.orientation.bus_code()),
            controls: ControlGraph::new(mode, config.digital_gain),
            config,
        }
    }

    /// Stop the sensor, drop every power reference and give the peripherals back.
    pub fn release(mut self) -> (I2C, P, PowerPins<PIN>, D, M) {
        self.stop();
        while self.power_users > 0 {
            self.release_power();
        }
        self.power_requested = false;
        self.power.power_off();

        let (resources, pins, delay) = self.power.release();
        (self.cci.release(), resources, pins, delay, self.power_manager)
    }

    /// Check the sensor is present, powering it up just for the check. Fails while suspended.
    pub fn probe(&mut self) -> Result<ChipInfo, Error<BE, P::Error, M::Error>> {
        if self.suspended {
            return Err(Error::Suspended);
        }
        self.acquire_power()?;
        let result = identity::verify(&mut self.cci);
        self.release_power();

        let chip = result?;
        log::info!(
            "detected S5K3L6 sensor, id 0x{:04x} revision 0x{:02x}",
            chip.id,
            chip.revision
        );
        Ok(chip)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stream_state(&self) -> StreamState {
        self.stream
    }

    pub fn power_state(&self) -> PowerState {
        self.power.state()
    }

    /// Number of held power references.
    pub fn power_users(&self) -> u32 {
        self.power_users
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Take a power reference, powering the sensor with the first one. While suspended only the
    /// reference is taken, [`S5k3l6::resume`] powers the sensor.
    fn acquire_power(&mut self) -> Result<(), Error<BE, P::Error, M::Error>> {
        self.power_manager.acquire().map_err(Error::Acquire)?;
        if !self.suspended {
            if let Err(e) = self.power.power_on() {
                self.power_manager.release();
                return Err(e.into());
            }
        }
        self.power_users += 1;
        Ok(())
    }

    /// Drop a power reference, powering the sensor off with the last one.
    fn release_power(&mut self) {
        if self.power_users == 0 {
            return;
        }
        self.power_users -= 1;
        if self.power_users == 0 {
            self.power.power_off();
        }
        self.power_manager.release();
    }

    /// Register writes only reach a powered, referenced sensor.
    fn is_live(&self) -> bool {
        self.power_users > 0 && self.power.state() == PowerState::On
    }

    /// Explicit power request, holding its own power reference while on. While suspended the
    /// request is recorded and applied on resume.
    pub fn set_power(&mut self, on: bool) -> Result<(), Error<BE, P::Error, M::Error>> {
        if self.power_requested == on {
            return Ok(());
        }

        if on {
            self.acquire_power()?;
        } else {
            self.release_power();
        }
        self.power_requested = on;
        Ok(())
    }

    /// Start streaming in the active mode.
    pub fn start(&mut self) -> Result<(), Error<BE, P::Error, M::Error>> {
        if self.stream == StreamState::Streaming {
            return Ok(());
        }
        log::info!(
            "start stream {}x{}@{}",
            self.mode.width,
            self.mode.height,
            self.mode.max_frame_interval.frames_per_second()
        );

        self.acquire_power()?;
        if self.suspended {
            log::debug!("suspended, stream starts on resume");
            self.stream = StreamState::Streaming;
            return Ok(());
        }
        if let Err(e) = self.stream_on() {
            log::error!("failed to start stream: {:?}", e);
            self.release_power();
            return Err(e);
        }

        self.stream = StreamState::Streaming;
        Ok(())
    }

    /// Stop streaming. Always ends stopped, a failed standby write is only logged.
    pub fn stop(&mut self) {
        if self.stream == StreamState::Stopped {
            return;
        }
        log::info!("stop stream");

        if !self.suspended {
            self.stream_off();
        }
        self.release_power();
        self.stream = StreamState::Stopped;
    }

    /// Start or stop streaming.
    pub fn set_stream(&mut self, on: bool) -> Result<(), Error<BE, P::Error, M::Error>> {
        if on {
            self.start()
        } else {
            self.stop();
            Ok(())
        }
    }

    /// Program the active mode, restore the controls and enable streaming.
    fn stream_on(&mut self) -> Result<(), Error<BE, P::Error, M::Error>> {
        self.power.power_on()?;
        self.mode
            .program
            .apply(&mut self.cci, self.config.orientation)?;

        for write in self.controls.replay() {
            self.cci.apply(write)?;
        }

        self.enable_streaming()?;
        Ok(())
    }

    /// The S5K3L6 only starts streaming when the mode select write is wrapped in stream-on
    /// register writes, all three are required.
    fn enable_streaming(&mut self) -> Result<(), BusError<BE>> {
        self.cci.write(Register::STREAM_ON, Width::BIT8, 0x01)?;
        self.cci
            .write(Register::MODE_SELECT, Width::BIT8, MODE_STREAMING)?;
        self.cci.write(Register::STREAM_ON, Width::BIT8, 0x00)
    }

    fn stream_off(&mut self) {
        if let Err(e) = self
            .cci
            .write(Register::MODE_SELECT, Width::BIT8, MODE_STANDBY)
        {
            log::error!("failed to enter standby: {:?}", e);
        }
    }

    /// Power the sensor off for system sleep, keeping the stream and power state to resume.
    pub fn suspend(&mut self) {
        if self.suspended {
            return;
        }
        log::debug!("suspend");

        if self.stream == StreamState::Streaming {
            self.stream_off();
        }
        self.power.power_off();
        self.suspended = true;
    }

    /// Restore the state saved by [`S5k3l6::suspend`]. A stream that cannot be restarted is
    /// stopped.
    pub fn resume(&mut self) -> Result<(), Error<BE, P::Error, M::Error>> {
        if !self.suspended {
            return Ok(());
        }
        log::debug!("resume");
        self.suspended = false;

        let result = if self.stream == StreamState::Streaming {
            self.stream_on()
        } else if self.power_users > 0 {
            self.power.power_on().map_err(Error::from)
        } else {
            Ok(())
        };

        if let Err(e) = result {
            log::error!("failed to resume: {:?}", e);
            self.stop();
            return Err(e);
        }
        Ok(())
    }

    /// The mode streamed with.
    pub fn mode(&self) -> &'static Mode {
        self.mode
    }

    /// Negotiate a format, the closest supported mode is picked. Never fails.
    pub fn set_format(&mut self, width: u32, height: u32, which: FormatWhich) -> Format {
        let mode = modes::best_fit(width, height);
        let format = Format::new(mode, self.config.orientation.bus_code());

        match which {
            FormatWhich::Try => self.try_format = format,
            FormatWhich::Active => {
                log::debug!("select mode {}x{}", mode.width, mode.height);
                self.mode = mode;
                let updates = self.controls.on_mode_selected(mode);
                if let Err(e) = self.write_updates(updates) {
                    log::error!("failed to update mode controls: {:?}", e);
                }
            }
        }
        format
    }

    pub fn format(&self, which: FormatWhich) -> Format {
        match which {
            FormatWhich::Active => Format::new(self.mode, self.config.orientation.bus_code()),
            FormatWhich::Try => self.try_format,
        }
    }

    pub fn frame_interval(&self) -> Fraction {
        self.mode.max_frame_interval
    }

    pub fn crop_bounds(&self) -> Rect {
        self.mode.crop_bounds()
    }

    pub fn mbus_config(&self) -> MbusConfig {
        MbusConfig {
            bus: MbusType::Csi2Dphy,
            lanes: LANES as u8,
            hsync_active_high: false,
            vsync_active_high: true,
            data_active_high: true,
        }
    }

    /// The only media-bus code is the one of the configured orientation.
    pub fn enum_mbus_code(&self, index: usize) -> Option<MediaBusCode> {
        match index {
            0 => Some(self.config.orientation.bus_code()),
            _ => None,
        }
    }

    pub fn enum_frame_size(&self, index: usize, code: MediaBusCode) -> Option<FrameSize> {
        if code != self.config.orientation.bus_code() {
            return None;
        }
        modes::MODES.get(index).map(|mode| FrameSize {
            min_width: mode.width,
            max_width: mode.width,
            min_height: mode.height,
            max_height: mode.height,
        })
    }

    pub fn enum_frame_interval(&self, index: usize, code: MediaBusCode) -> Option<ModeInfo> {
        if code != self.config.orientation.bus_code() {
            return None;
        }
        modes::MODES.get(index).map(Mode::info)
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.control(id)
    }

    /// Every control, in declaration order.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.controls()
    }

    /// Set a control. The value is written to the sensor while it is powered, otherwise it is
    /// kept and written when streaming starts.
    pub fn set_control(&mut self, id: ControlId, value: i64) -> Result<(), ControlError<BE>> {
        let updates = self.controls.set(id, value)?;
        self.write_updates(updates)?;
        Ok(())
    }

    /// Set a control by V4L2 control ID.
    pub fn set_control_raw(&mut self, cid: u32, value: i64) -> Result<(), ControlError<BE>> {
        let updates = self.controls.set_raw(cid, value)?;
        self.write_updates(updates)?;
        Ok(())
    }

    /// Set controls in order. Stops at the first failure, earlier controls keep their new
    /// values.
    pub fn set_controls(&mut self, values: &[(ControlId, i64)]) -> Result<(), ControlError<BE>> {
        for (id, value) in values {
            self.set_control(*id, *value)?;
        }
        Ok(())
    }

    fn write_updates(&mut self, updates: Updates) -> Result<(), BusError<BE>> {
        if !self.is_live() {
            return Ok(());
        }
        for write in updates {
            self.cci.apply(write)?;
        }
        Ok(())
    }
}
