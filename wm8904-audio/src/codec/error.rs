/// Errors returned by the WM8904 driver.
///
/// Bus failures are carried through untouched so callers see the exact
/// error the I2C implementation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The I2C transfer failed.
    I2c(E),
    /// The write sequencer was still busy after the polling budget ran out.
    SequencerTimeout,
    /// R0 did not read back as 0x8904.
    UnexpectedId(u16),
    /// A register field held a code the driver does not know.
    InvalidField { register: u8, value: u16 },
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::I2c(e)
    }
}
