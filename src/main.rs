//! S5K3L6 bring-up on the STM32F746G Discovery Board. Probes the sensor, selects the binned mode
//! with a colour bar test pattern, and toggles streaming with the USER button.

#![no_main]
#![no_std]

use s5k3l6_rs::board::stm32f746_disco::{self, ButtonPin};
use s5k3l6_rs::s5k3l6::controls::ControlId;
use s5k3l6_rs::s5k3l6::power::Unmanaged;
use s5k3l6_rs::s5k3l6::{FormatWhich, StreamState};
use s5k3l6_rs::{util, Config, S5k3l6};

use core::cell::{Cell, RefCell};
use cortex_m::interrupt::{free, Mutex};
use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use log::LevelFilter;
use stm32f7xx_hal::{
    delay::Delay,
    pac as device,
    gpio::ExtiPin,
    i2c::{BlockingI2c, Mode},
    interrupt,
    prelude::*,
    rcc::{HSEClock, HSEClockMode},
};

// Shared memory between main thread and interrupts
static BUTTON: Mutex<RefCell<Option<ButtonPin>>> = Mutex::new(RefCell::new(None));
static BUTTON_PRESSED: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

#[entry]
fn main() -> ! {
    util::init_logging(LevelFilter::Debug);

    // Get peripherals
    let pac_periph = device::Peripherals::take().unwrap();
    let cm_periph = cortex_m::Peripherals::take().unwrap();

    // USER button as an interrupt source, before RCC is handed to the HAL
    let mut pac_rcc = pac_periph.RCC;
    let button = stm32f746_disco::configure_button(
        &mut pac_rcc,
        pac_periph.SYSCFG,
        pac_periph.EXTI,
        pac_periph.GPIOI,
    );
    free(|cs| BUTTON.borrow(cs).replace(Some(button)));
    unsafe {
        NVIC::unmask(device::Interrupt::EXTI15_10);
    }

    // Discovery board: HSE = 25 MHz, use as SYSCLK source
    let mut rcc = pac_rcc.constrain();
    let hse_cfg = HSEClock::new(stm32f746_disco::hse(), HSEClockMode::Oscillator);
    let clocks = rcc.cfgr.hse(hse_cfg).sysclk(216.mhz()).freeze();

    // Delay configuration
    let delay = Delay::new(cm_periph.SYST, clocks);

    // GPIO configuration
    let (scl, sda, camera_pins, regulator) = stm32f746_disco::configure_pins();

    // I2C1 configuration (CCI)
    let i2c = BlockingI2c::i2c1(
        pac_periph.I2C1,
        (scl, sda),
        Mode::standard(100.khz()),
        clocks,
        &mut rcc.apb1,
        10000,
    );

    let mut sensor = S5k3l6::new(
        i2c,
        stm32f746_disco::DiscoPower::new(regulator),
        camera_pins,
        delay,
        Unmanaged,
        Config::default(),
    );

    // Establish communication with the S5K3L6
    if let Err(e) = sensor.probe() {
        log::error!("S5K3L6 not found: {:?}", e);
        loop {
            cortex_m::asm::wfi();
        }
    }

    // 2104x1560 with colour bars
    let format = sensor.set_format(2104, 1560, FormatWhich::Active);
    log::info!("format {}x{} code 0x{:04x}", format.width, format.height, format.code.code());
    if let Err(e) = sensor.set_control(ControlId::TestPattern, 1) {
        log::warn!("test pattern not set: {:?}", e);
    }
    log::info!("press USER to toggle streaming");

    loop {
        let pressed = free(|cs| BUTTON_PRESSED.borrow(cs).replace(false));
        if pressed {
            match sensor.stream_state() {
                StreamState::Stopped => {
                    if let Err(e) = sensor.start() {
                        log::error!("stream start failed: {:?}", e);
                    }
                }
                StreamState::Streaming => sensor.stop(),
            }
        }

        cortex_m::asm::wfi();
    }
}

#[interrupt]
fn EXTI15_10() {
    free(|cs| {
        if let Some(button) = BUTTON.borrow(cs).borrow_mut().as_mut() {
            button.clear_interrupt_pending_bit();
        }

        // Signal the press to main thread
        BUTTON_PRESSED.borrow(cs).set(true);
    });
}
