//! Register programs, the fixed register sequences that put the sensor into one of its modes.

use crate::s5k3l6::cci::{BusError, Cci, Register, Width};
use crate::s5k3l6::config::Orientation;
use embedded_hal::blocking::i2c;

/// Reserved address terminating every program.
pub const REG_NULL: u16 = 0xFFFF;

/// One program entry, always written as a 16-bit value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegisterValue {
    pub address: u16,
    pub value: u16,
}

impl RegisterValue {
    pub const fn new(address: u16, value: u16) -> Self {
        RegisterValue { address, value }
    }
}

/// An immutable, sentinel terminated list of register writes.
#[derive(Debug)]
pub struct RegisterProgram {
    entries: &'static [RegisterValue],
}

impl RegisterProgram {
    /// Wraps a table ending in a [`REG_NULL`] entry.
    pub const fn new(entries: &'static [RegisterValue]) -> Self {
        RegisterProgram { entries }
    }

    /// Entries up to, not including, the sentinel.
    pub fn entries(&self) -> impl Iterator<Item = &RegisterValue> + Clone {
        self.entries
            .iter()
            .take_while(|entry| entry.address != REG_NULL)
    }

    /// Number of register writes in the program.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the orientation word, then every entry in order. Stops at the first failed write.
    pub fn apply<I2C, E>(
        &self,
        cci: &mut Cci<I2C>,
        orientation: Orientation,
    ) -> Result<(), BusError<E>>
    where
        I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
    {
        // Orientation rides in the low byte of a 16-bit write to mode select
        cci.write(
            Register::MODE_SELECT,
            Width::BIT16,
            orientation.register_value(),
        )?;

        for entry in self.entries() {
            cci.write(entry.address, Width::BIT16, entry.value.into())?;
        }

        log::debug!("applied {} register writes", self.len());
        Ok(())
    }
}
