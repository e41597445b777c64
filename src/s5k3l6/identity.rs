//! Chip identification.

use crate::s5k3l6::cci::{BusError, Cci, Register, Width};
use embedded_hal::blocking::i2c;

/// Expected chip ID.
pub const CHIP_ID: u16 = 0x30C6;

/// Identity of a detected sensor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChipInfo {
    pub id: u16,
    pub revision: u8,
}

/// Identification errors.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum IdentityError<E> {
    /// Chip ID mismatch, holds the ID that was read.
    #[error("unexpected chip id 0x{0:04x}")]
    Mismatch(u16),
    /// The ID registers could not be read.
    #[error("could not read chip id: {0}")]
    Bus(BusError<E>),
}

impl<E> From<BusError<E>> for IdentityError<E> {
    fn from(e: BusError<E>) -> Self {
        IdentityError::Bus(e)
    }
}

/// Check the chip ID matches the expected value and read the silicon revision.
pub fn verify<I2C, E>(cci: &mut Cci<I2C>) -> Result<ChipInfo, IdentityError<E>>
where
    I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    // Chip ID
    let id = cci.read(Register::CHIP_ID, Width::BIT16)? as u16;
    if id != CHIP_ID {
        log::error!("unexpected sensor id 0x{:04x}, expected 0x{:04x}", id, CHIP_ID);
        return Err(IdentityError::Mismatch(id));
    }

    // Revision
    let revision = cci.read(Register::CHIP_REVISION, Width::BIT8)? as u8;

    Ok(ChipInfo { id, revision })
}
