//! Board specific functions for the STM32F746G Discovery Board with an S5K3L6 module on the
//! camera adapter.

use crate::s5k3l6::power::{PinProfile, PowerPins, PowerResources, XVCLK_FREQ};
use core::convert::Infallible;
use embedded_hal::digital::v2::OutputPin;
use stm32f7xx_hal::{
    gpio::{self, Alternate, Edge, ExtiPin, Floating, Input, Output, PushPull, AF4},
    pac::{self, EXTI, GPIOI, RCC, SYSCFG},
    prelude::*,
    time::MegaHertz,
};

/// Board crystal (X2) feeding HSE.
pub const HSE_FREQ_MHZ: u32 = 25;

/// Power enable pin type.
pub type PowerPin = gpio::gpioh::PH13<Output<PushPull>>;

/// Reset pin type.
pub type ResetPin = gpio::gpiog::PG6<Output<PushPull>>;

/// Power down pin type.
pub type PowerDownPin = gpio::gpiog::PG7<Output<PushPull>>;

/// Load switch feeding the sensor supplies.
pub type RegulatorPin = gpio::gpiob::PB4<Output<PushPull>>;

/// I2C1 SCL pin type.
pub type SclPin = gpio::gpiob::PB8<Alternate<AF4>>;

/// I2C1 SDA pin type.
pub type SdaPin = gpio::gpiob::PB9<Alternate<AF4>>;

/// USER button, toggles streaming in the demo.
pub type ButtonPin = gpio::gpioi::PI11<Input<Floating>>;

/// One of the sensor control pins, so they can share a type.
pub enum CameraPin {
    Power(PowerPin),
    Reset(ResetPin),
    PowerDown(PowerDownPin),
}

impl OutputPin for CameraPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        match self {
            CameraPin::Power(pin) => pin.set_low(),
            CameraPin::Reset(pin) => pin.set_low(),
            CameraPin::PowerDown(pin) => pin.set_low(),
        }
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        match self {
            CameraPin::Power(pin) => pin.set_high(),
            CameraPin::Reset(pin) => pin.set_high(),
            CameraPin::PowerDown(pin) => pin.set_high(),
        }
    }
}

/// Sensor power resources of the board. The reference clock comes from the 24 MHz oscillator on
/// the camera connector and runs whenever the board is powered, so only the supplies are
/// switchable.
pub struct DiscoPower {
    regulator: RegulatorPin,
}

impl DiscoPower {
    pub fn new(regulator: RegulatorPin) -> Self {
        DiscoPower { regulator }
    }
}

impl PowerResources for DiscoPower {
    type Error = Infallible;

    fn set_clock_rate(&mut self, hz: u32) -> Result<(), Self::Error> {
        if hz != XVCLK_FREQ {
            log::warn!("reference clock is fixed at {}Hz", XVCLK_FREQ);
        }
        Ok(())
    }

    fn clock_rate(&self) -> u32 {
        XVCLK_FREQ
    }

    fn enable_clock(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disable_clock(&mut self) {}

    fn enable_regulators(&mut self) -> Result<(), Self::Error> {
        self.regulator.set_high()
    }

    fn disable_regulators(&mut self) {
        let _ = self.regulator.set_low();
    }

    fn select_pins(&mut self, _profile: PinProfile) -> Result<(), Self::Error> {
        // Fixed function pins, nothing to remux
        Ok(())
    }
}

/// Configure GPIOs and return the pins needed by the drivers. Note that the peripherals are
/// stolen, so this should only be done during init to be safe.
///
/// Pin configuration:
///
///     I2C1 SCL:   PB8  --> S5K3L6 SCL
///     I2C1 SDA:   PB9 <--> S5K3L6 SDA
///     (HW OSC 24M)     --> S5K3L6 MCLK
///     DCMI_PWR_EN: PH13 --> module power enable
///     GPIO:       PG6  --> S5K3L6 XSHUTDOWN (reset)
///     GPIO:       PG7  --> S5K3L6 power down
///     GPIO:       PB4  --> supply load switch
pub fn configure_pins() -> (SclPin, SdaPin, PowerPins<CameraPin>, RegulatorPin) {
    let pac_periph = unsafe { pac::Peripherals::steal() };
    let gpiob = pac_periph.GPIOB.split();
    let gpiog = pac_periph.GPIOG.split();
    let gpioh = pac_periph.GPIOH.split();

    // Configure I2C1 for S5K3L6 CCI
    let scl = gpiob
        .pb8
        .into_alternate_af4()
        .internal_pull_up(true)
        .set_open_drain();
    let sda = gpiob
        .pb9
        .into_alternate_af4()
        .internal_pull_up(true)
        .set_open_drain();

    // Sensor control pins start low, sensor off
    let mut power = gpioh.ph13.into_push_pull_output();
    let mut reset = gpiog.pg6.into_push_pull_output();
    let mut powerdown = gpiog.pg7.into_push_pull_output();
    let mut regulator = gpiob.pb4.into_push_pull_output();
    let _ = power.set_low();
    let _ = reset.set_low();
    let _ = powerdown.set_low();
    let _ = regulator.set_low();

    let pins = PowerPins {
        power: Some(CameraPin::Power(power)),
        reset: Some(CameraPin::Reset(reset)),
        powerdown: Some(CameraPin::PowerDown(powerdown)),
    };

    (scl, sda, pins, regulator)
}

/// HSE clock source frequency.
pub fn hse() -> MegaHertz {
    HSE_FREQ_MHZ.mhz()
}

/// Route the USER button (PI11) to EXTI, rising edge. Must run before RCC is constrained.
pub fn configure_button(
    rcc: &mut RCC,
    mut syscfg: SYSCFG,
    mut exti: EXTI,
    gpio: GPIOI,
) -> ButtonPin {
    let mut button = gpio.split().pi11.into_floating_input();
    button.make_interrupt_source(&mut syscfg, rcc);
    button.trigger_on_edge(&mut exti, Edge::Rising);
    button.enable_interrupt(&mut exti);
    button
}
