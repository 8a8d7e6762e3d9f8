//! Test doubles shared by the codec unit tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorType, I2c, Operation};

use super::registers as reg;

/// Bus error carrying the 1-based number of the write attempt that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError(pub usize);

impl i2c::Error for MockError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Data)
    }
}

const LOG_LEN: usize = 256;

/// Mock I2C that maintains a register file and records writes.
pub(crate) struct MockI2c {
    regs: [u16; 256],
    /// Successful writes in chronological order.
    log: [(u8, u16); LOG_LEN],
    log_count: usize,
    /// Register writes attempted so far, failed ones included.
    attempts: usize,
    /// Fail the nth write attempt (1-based).
    fail_at: Option<usize>,
    pub(crate) last_address: u8,
}

impl MockI2c {
    pub(crate) fn new() -> Self {
        let mut regs = [0u16; 256];
        regs[reg::SW_RESET_AND_ID as usize] = reg::DEVICE_ID;
        // Input PGAs come out of reset muted at 0 dB
        regs[reg::ANALOGUE_LEFT_INPUT_0 as usize] = 0x0085;
        regs[reg::ANALOGUE_RIGHT_INPUT_0 as usize] = 0x0085;
        regs[reg::DAC_DIGITAL_1 as usize] = reg::DAC_MUTE;
        Self {
            regs,
            log: [(0, 0); LOG_LEN],
            log_count: 0,
            attempts: 0,
            fail_at: None,
            last_address: 0,
        }
    }

    /// A bus whose nth register write (1-based) fails.
    pub(crate) fn failing_at(n: usize) -> Self {
        let mut bus = Self::new();
        bus.fail_at = Some(n);
        bus
    }

    fn sequencer_status(&self) -> u16 {
        if self.regs[reg::CLOCK_RATES_2 as usize] & reg::CLK_SYS_ENA == 0 {
            reg::WSEQ_BUSY
        } else {
            0
        }
    }

    pub(crate) fn read_reg(&self, addr: u8) -> u16 {
        self.regs[addr as usize]
    }

    pub(crate) fn set_reg(&mut self, addr: u8, val: u16) {
        self.regs[addr as usize] = val;
    }

    /// Get the (register, value) of the nth successful write.
    pub(crate) fn write_at(&self, idx: usize) -> (u8, u16) {
        self.log[idx]
    }

    pub(crate) fn write_count(&self) -> usize {
        self.log_count
    }

    /// Whether `addr` was written at any point.
    pub(crate) fn was_written(&self, addr: u8) -> bool {
        self.log[..self.log_count].iter().any(|&(r, _)| r == addr)
    }
}

impl ErrorType for MockI2c {
    type Error = MockError;
}

impl I2c for MockI2c {
    fn read(&mut self, _addr: u8, _buf: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.last_address = addr;
        if bytes.len() == 3 {
            self.attempts += 1;
            if self.fail_at == Some(self.attempts) {
                return Err(MockError(self.attempts));
            }
            let register = bytes[0];
            let val = ((bytes[1] as u16) << 8) | bytes[2] as u16;
            self.regs[register as usize] = val;
            // The sequencer is clocked from SYSCLK and never finishes without it
            if register == reg::WRITE_SEQUENCER_3 && val & reg::WSEQ_START != 0 {
                self.regs[reg::WRITE_SEQUENCER_4 as usize] |= self.sequencer_status();
            }
            if self.log_count < LOG_LEN {
                self.log[self.log_count] = (register, val);
                self.log_count += 1;
            }
        }
        Ok(())
    }

    fn write_read(&mut self, addr: u8, wr: &[u8], rd: &mut [u8]) -> Result<(), Self::Error> {
        self.last_address = addr;
        if wr.len() == 1 && rd.len() >= 2 {
            let val = self.regs[wr[0] as usize];
            rd[0] = (val >> 8) as u8;
            rd[1] = val as u8;
        }
        Ok(())
    }

    fn transaction(
        &mut self,
        _addr: u8,
        _ops: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// No-op delay that counts requested milliseconds.
pub(crate) struct MockDelay {
    pub(crate) elapsed_ns: u64,
}

impl MockDelay {
    pub(crate) fn new() -> Self {
        Self { elapsed_ns: 0 }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}
