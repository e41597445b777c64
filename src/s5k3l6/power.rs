//! Power sequencing for the S5K3L6. The sensor needs its rails, reference clock and control pins
//! brought up in a fixed order with settle delays in between, and torn down in reverse.

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

/// Reference clock frequency in Hz.
pub const XVCLK_FREQ: u32 = 24_000_000;

/// Reference clock cycles the sensor needs after power-down release before the first register
/// access.
pub const SETTLE_CYCLES: u32 = 8192;

/// Delay after raising the power enable pin, in microseconds.
pub const POWER_ENABLE_DELAY_US: u32 = 1000;

/// Delay after releasing reset, in microseconds.
pub const RESET_DELAY_US: u32 = 500;

/// Time taken by `cycles` reference clock cycles, rounded up to whole microseconds.
pub const fn settle_delay_us(cycles: u32, clock_hz: u32) -> u32 {
    let mhz = clock_hz / 1_000_000;
    (cycles + mhz - 1) / mhz
}

/// Pin multiplexing profiles of the sensor interface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PinProfile {
    /// Pins driven for normal operation.
    Active,
    /// Pins parked while the sensor is off.
    Sleep,
}

/// Platform clock, regulator and pin multiplexing resources of the sensor.
pub trait PowerResources {
    type Error: Debug;

    /// Request a reference clock rate.
    fn set_clock_rate(&mut self, hz: u32) -> Result<(), Self::Error>;

    /// Rate the reference clock actually runs at.
    fn clock_rate(&self) -> u32;

    fn enable_clock(&mut self) -> Result<(), Self::Error>;

    fn disable_clock(&mut self);

    /// Enable all sensor supplies (analog, I/O and core) as one operation.
    fn enable_regulators(&mut self) -> Result<(), Self::Error>;

    fn disable_regulators(&mut self);

    fn select_pins(&mut self, profile: PinProfile) -> Result<(), Self::Error>;
}

/// External arbitration of device power, e.g. a runtime power manager shared with other devices.
/// `acquire` may block.
pub trait PowerManager {
    type Error: Debug;

    fn acquire(&mut self) -> Result<(), Self::Error>;

    fn release(&mut self);
}

/// Power manager for platforms without external arbitration.
#[derive(Debug, Default)]
pub struct Unmanaged;

impl PowerManager for Unmanaged {
    type Error = Infallible;

    fn acquire(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn release(&mut self) {}
}

/// Optional sensor control pins.
pub struct PowerPins<PIN> {
    /// Power enable, active high.
    pub power: Option<PIN>,
    /// Reset, active low.
    pub reset: Option<PIN>,
    /// Power down, active low.
    pub powerdown: Option<PIN>,
}

impl<PIN> PowerPins<PIN> {
    /// No control pins are wired.
    pub fn none() -> Self {
        PowerPins {
            power: None,
            reset: None,
            powerdown: None,
        }
    }
}

/// Power state of the sensor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowerState {
    Off,
    On,
}

/// Power sequencing errors.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum PowerError<E> {
    /// The reference clock could not be enabled.
    #[error("failed to enable reference clock: {0:?}")]
    Clock(E),
    /// The supplies could not be enabled.
    #[error("failed to enable regulators: {0:?}")]
    Regulators(E),
}

/// Power sequencer.
pub struct PowerSequencer<P, PIN, D> {
    resources: P,
    pins: PowerPins<PIN>,
    delay: D,
    state: PowerState,
}

impl<P, PIN, D> PowerSequencer<P, PIN, D>
where
    P: PowerResources,
    PIN: OutputPin,
    PIN::Error: Debug,
    D: DelayUs<u32>,
{
    /// Creates a sequencer for a powered off sensor.
    pub fn new(resources: P, pins: PowerPins<PIN>, delay: D) -> Self {
        // Missing pins are fine, the module may tie them off
        if pins.power.is_none() {
            log::warn!("no power enable pin");
        }
        if pins.reset.is_none() {
            log::warn!("no reset pin");
        }
        if pins.powerdown.is_none() {
            log::warn!("no power down pin");
        }

        PowerSequencer {
            resources,
            pins,
            delay,
            state: PowerState::Off,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Gives the resources, pins and delay back.
    pub fn release(self) -> (P, PowerPins<PIN>, D) {
        (self.resources, self.pins, self.delay)
    }

    /// Drive an optional pin, failures are only logged.
    fn drive(pin: &mut Option<PIN>, name: &str, high: bool) {
        if let Some(pin) = pin {
            let result = if high { pin.set_high() } else { pin.set_low() };
            if let Err(e) = result {
                log::warn!("failed to drive {} pin: {:?}", name, e);
            }
        }
    }

    /// Power the sensor up. Does nothing if it is already on.
    pub fn power_on(&mut self) -> Result<(), PowerError<P::Error>> {
        if self.state == PowerState::On {
            return Ok(());
        }
        log::debug!("power on");

        // Power enable
        Self::drive(&mut self.pins.power, "power", true);
        self.delay.delay_us(POWER_ENABLE_DELAY_US);

        if let Err(e) = self.resources.select_pins(PinProfile::Active) {
            log::warn!("could not select active pin profile: {:?}", e);
        }

        // Reference clock
        if let Err(e) = self.resources.set_clock_rate(XVCLK_FREQ) {
            log::warn!("failed to set xvclk rate (24MHz): {:?}", e);
        }
        let rate = self.resources.clock_rate();
        if rate != XVCLK_FREQ {
            log::warn!("xvclk mismatched, modes are based on 24MHz, got {}Hz", rate);
        }
        self.resources.enable_clock().map_err(PowerError::Clock)?;

        // Supplies with the sensor held in reset
        Self::drive(&mut self.pins.reset, "reset", false);
        if let Err(e) = self.resources.enable_regulators() {
            self.resources.disable_clock();
            return Err(PowerError::Regulators(e));
        }

        // Release reset, then power down
        Self::drive(&mut self.pins.reset, "reset", true);
        self.delay.delay_us(RESET_DELAY_US);
        Self::drive(&mut self.pins.powerdown, "power down", true);

        // 8192 cycles prior to the first register access
        self.delay.delay_us(settle_delay_us(SETTLE_CYCLES, XVCLK_FREQ));

        self.state = PowerState::On;
        Ok(())
    }

    /// Power the sensor down. Does nothing if it is already off.
    pub fn power_off(&mut self) {
        if self.state == PowerState::Off {
            return;
        }
        log::debug!("power off");

        Self::drive(&mut self.pins.powerdown, "power down", false);
        self.resources.disable_clock();
        Self::drive(&mut self.pins.reset, "reset", false);
        if let Err(e) = self.resources.select_pins(PinProfile::Sleep) {
            log::warn!("could not select sleep pin profile: {:?}", e);
        }
        Self::drive(&mut self.pins.power, "power", false);
        self.resources.disable_regulators();

        self.state = PowerState::Off;
    }
}
