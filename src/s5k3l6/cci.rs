//! A generic driver for the Camera Control Interface on the S5K3L6 image sensor. CCI is plain I2C
//! with 16-bit register addresses and big-endian register values of one to four bytes, so this
//! works with any microcontroller implementing the embedded-hal I2C interface.

use embedded_hal::blocking::i2c;

/// CCI errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BusError<E> {
    /// I2C transaction error.
    #[error("i2c transaction failed: {0:?}")]
    Transport(E),
    /// Register width outside of 1 to 4 bytes.
    #[error("invalid register width of {0} bytes")]
    InvalidWidth(u8),
}

/// A register write produced by the driver state, applied through [`Cci::apply`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegisterWrite {
    /// Register address.
    pub address: u16,
    /// Value width in bytes.
    pub width: u8,
    /// Value, only the low `width` bytes are sent.
    pub value: u32,
}

impl RegisterWrite {
    /// Creates a new register write.
    pub const fn new(address: u16, width: u8, value: u32) -> Self {
        RegisterWrite {
            address,
            width,
            value,
        }
    }
}

/// CCI driver.
pub struct Cci<I2C> {
    /// Owned I2C bus.
    i2c: I2C,
    /// Device I2C address (7 bit).
    address: u8,
}

impl<I2C, E> Cci<I2C>
where
    I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    /// Creates a new CCI driver owning an I2C peripheral.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Cci { i2c, address }
    }

    /// Device I2C address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the I2C peripheral back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// I2C write wrapper for mapping `E --> BusError`.
    fn i2c_write(&mut self, buf: &[u8]) -> Result<(), BusError<E>> {
        match self.i2c.write(self.address, buf) {
            Ok(()) => Ok(()),
            Err(e) => Err(BusError::Transport(e)),
        }
    }

    /// I2C write-read wrapper for mapping `E --> BusError`.
    fn i2c_write_read(&mut self, reg: u16, buf: &mut [u8]) -> Result<(), BusError<E>> {
        match self.i2c.write_read(self.address, &reg.to_be_bytes(), buf) {
            Ok(()) => Ok(()),
            Err(e) => Err(BusError::Transport(e)),
        }
    }

    /// Write the low `width` bytes of `value` to a register, most significant byte first.
    pub fn write(&mut self, reg: u16, width: u8, value: u32) -> Result<(), BusError<E>> {
        let len = checked_width(width)?;

        // Address followed by the value, in a single transaction
        let mut buf = [0x00; 6];
        buf[..2].copy_from_slice(&reg.to_be_bytes());
        buf[2..2 + len].copy_from_slice(&value.to_be_bytes()[4 - len..]);

        log::trace!("write 0x{:04x} = 0x{:x} ({} bytes)", reg, value, len);
        self.i2c_write(&buf[..2 + len])
    }

    /// Read a `width` byte register, the address write and the read share one transfer.
    pub fn read(&mut self, reg: u16, width: u8) -> Result<u32, BusError<E>> {
        let len = checked_width(width)?;

        let mut buf = [0x00; 4];
        self.i2c_write_read(reg, &mut buf[4 - len..])?;

        Ok(u32::from_be_bytes(buf))
    }

    /// Apply a pending register write.
    pub fn apply(&mut self, write: RegisterWrite) -> Result<(), BusError<E>> {
        self.write(write.address, write.width, write.value)
    }
}

fn checked_width<E>(width: u8) -> Result<usize, BusError<E>> {
    match width {
        1..=4 => Ok(usize::from(width)),
        _ => Err(BusError::InvalidWidth(width)),
    }
}

/// Register value widths in bytes.
pub struct Width;

impl Width {
    pub const BIT8: u8 = 1;
    pub const BIT16: u8 = 2;
    pub const BIT24: u8 = 3;
    pub const BIT32: u8 = 4;
}

/// Device register addresses.
pub struct Register;

impl Register {
    // Identification
    pub const CHIP_ID: u16 = 0x0000;
    pub const CHIP_REVISION: u16 = 0x0002;

    // Streaming
    pub const MODE_SELECT: u16 = 0x0100;
    pub const STREAM_ON: u16 = 0x3C1E;

    // Integration and gain
    pub const EXPOSURE: u16 = 0x0202;
    pub const ANALOG_GAIN: u16 = 0x0204;
    pub const DIGITAL_GAIN: u16 = 0x020E;

    // Frame timing
    pub const FRAME_LENGTH_LINES: u16 = 0x0340;

    // Test pattern
    pub const TEST_PATTERN: u16 = 0x0601;
}

/// Mode select value: software standby.
pub const MODE_STANDBY: u32 = 0x00;

/// Mode select value: streaming.
pub const MODE_STREAMING: u32 = 0x01;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_bounds() {
        assert_eq!(checked_width::<()>(1), Ok(1));
        assert_eq!(checked_width::<()>(4), Ok(4));
        assert_eq!(checked_width::<()>(0), Err(BusError::InvalidWidth(0)));
        assert_eq!(checked_width::<()>(5), Err(BusError::InvalidWidth(5)));
    }
}
