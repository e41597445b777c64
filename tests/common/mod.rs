//! Hand-written embedded-hal mocks sharing one event journal, so tests can assert the order of
//! bus transactions, pin changes, delays and power resource calls.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use embedded_hal::digital::v2::OutputPin;
use s5k3l6_rs::s5k3l6::power::{PinProfile, PowerManager, PowerPins, PowerResources};
use s5k3l6_rs::{Config, S5k3l6};

/// Error returned by every failing mock.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MockError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Write {
        address: u16,
        width: usize,
        value: u32,
    },
    Read {
        address: u16,
        width: usize,
    },
    Pin {
        name: &'static str,
        high: bool,
    },
    Delay(u32),
    SetClockRate(u32),
    ClockOn,
    ClockOff,
    RegulatorsOn,
    RegulatorsOff,
    Pins(PinProfile),
    Acquire,
    Release,
}

/// State shared by all mocks of one test.
#[derive(Default)]
pub struct Hardware {
    pub events: Vec<Event>,
    /// Values returned by register reads.
    pub registers: HashMap<u16, u32>,
    /// Fail the I2C write with this index, counting every write attempted.
    pub fail_write_at: Option<usize>,
    /// Fail every write to this register.
    pub fail_register: Option<u16>,
    pub fail_reads: bool,
    pub fail_clock: bool,
    pub fail_regulators: bool,
    pub fail_pins: bool,
    pub fail_acquire: bool,
    pub clock_rate: u32,
    writes: usize,
}

pub type Shared = Rc<RefCell<Hardware>>;

impl Hardware {
    /// Register writes, in order.
    pub fn writes(&self) -> Vec<(u16, usize, u32)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Write {
                    address,
                    width,
                    value,
                } => Some((*address, *width, *value)),
                _ => None,
            })
            .collect()
    }

    /// Everything but the bus traffic.
    pub fn power_events(&self) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| !matches!(event, Event::Write { .. } | Event::Read { .. }))
            .cloned()
            .collect()
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.events.iter().filter(|event| *event == wanted).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

pub struct MockI2c(pub Shared);

impl Write for MockI2c {
    type Error = MockError;

    fn write(&mut self, _address: u8, bytes: &[u8]) -> Result<(), MockError> {
        let mut hw = self.0.borrow_mut();
        let index = hw.writes;
        hw.writes += 1;

        let address = u16::from_be_bytes([bytes[0], bytes[1]]);
        let value = bytes[2..]
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));
        if hw.fail_write_at == Some(index) || hw.fail_register == Some(address) {
            return Err(MockError);
        }

        hw.events.push(Event::Write {
            address,
            width: bytes.len() - 2,
            value,
        });
        Ok(())
    }
}

impl WriteRead for MockI2c {
    type Error = MockError;

    fn write_read(
        &mut self,
        _address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), MockError> {
        let mut hw = self.0.borrow_mut();
        if hw.fail_reads {
            return Err(MockError);
        }

        let address = u16::from_be_bytes([bytes[0], bytes[1]]);
        let value = hw.registers.get(&address).copied().unwrap_or(0);
        let len = buffer.len();
        buffer.copy_from_slice(&value.to_be_bytes()[4 - len..]);

        hw.events.push(Event::Read {
            address,
            width: len,
        });
        Ok(())
    }
}

pub struct MockPin {
    pub name: &'static str,
    pub hw: Shared,
}

impl MockPin {
    fn drive(&mut self, high: bool) -> Result<(), MockError> {
        let mut hw = self.hw.borrow_mut();
        if hw.fail_pins {
            return Err(MockError);
        }
        hw.events.push(Event::Pin {
            name: self.name,
            high,
        });
        Ok(())
    }
}

impl OutputPin for MockPin {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), MockError> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        self.drive(true)
    }
}

pub struct MockDelay(pub Shared);

impl DelayUs<u32> for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().events.push(Event::Delay(us));
    }
}

pub struct MockResources(pub Shared);

impl PowerResources for MockResources {
    type Error = MockError;

    fn set_clock_rate(&mut self, hz: u32) -> Result<(), MockError> {
        let mut hw = self.0.borrow_mut();
        hw.events.push(Event::SetClockRate(hz));
        hw.clock_rate = hz;
        Ok(())
    }

    fn clock_rate(&self) -> u32 {
        self.0.borrow().clock_rate
    }

    fn enable_clock(&mut self) -> Result<(), MockError> {
        let mut hw = self.0.borrow_mut();
        if hw.fail_clock {
            return Err(MockError);
        }
        hw.events.push(Event::ClockOn);
        Ok(())
    }

    fn disable_clock(&mut self) {
        self.0.borrow_mut().events.push(Event::ClockOff);
    }

    fn enable_regulators(&mut self) -> Result<(), MockError> {
        let mut hw = self.0.borrow_mut();
        if hw.fail_regulators {
            return Err(MockError);
        }
        hw.events.push(Event::RegulatorsOn);
        Ok(())
    }

    fn disable_regulators(&mut self) {
        self.0.borrow_mut().events.push(Event::RegulatorsOff);
    }

    fn select_pins(&mut self, profile: PinProfile) -> Result<(), MockError> {
        self.0.borrow_mut().events.push(Event::Pins(profile));
        Ok(())
    }
}

pub struct MockManager(pub Shared);

impl PowerManager for MockManager {
    type Error = MockError;

    fn acquire(&mut self) -> Result<(), MockError> {
        let mut hw = self.0.borrow_mut();
        if hw.fail_acquire {
            return Err(MockError);
        }
        hw.events.push(Event::Acquire);
        Ok(())
    }

    fn release(&mut self) {
        self.0.borrow_mut().events.push(Event::Release);
    }
}

pub type TestSensor = S5k3l6<MockI2c, MockResources, MockPin, MockDelay, MockManager>;

pub fn pins(hw: &Shared) -> PowerPins<MockPin> {
    let pin = |name| MockPin {
        name,
        hw: hw.clone(),
    };
    PowerPins {
        power: Some(pin("power")),
        reset: Some(pin("reset")),
        powerdown: Some(pin("powerdown")),
    }
}

pub fn sensor_with(config: Config) -> (TestSensor, Shared) {
    let hw: Shared = Rc::new(RefCell::new(Hardware::default()));
    hw.borrow_mut().registers.insert(0x0000, 0x30C6);
    hw.borrow_mut().registers.insert(0x0002, 0xB0);

    let sensor = S5k3l6::new(
        MockI2c(hw.clone()),
        MockResources(hw.clone()),
        pins(&hw),
        MockDelay(hw.clone()),
        MockManager(hw.clone()),
        config,
    );
    (sensor, hw)
}

pub fn sensor() -> (TestSensor, Shared) {
    sensor_with(Config::default())
}
