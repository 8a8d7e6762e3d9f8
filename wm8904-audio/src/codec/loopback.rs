//! Analogue loopback (bypass) bring-up.
//!
//! Routes IN2L/IN2R through the input PGAs straight into the headphone
//! PGAs, skipping the ADC/DAC path entirely:
//!
//! ```text
//!   IN2L ──► left input PGA  ──► HPL bypass ──► HPOUTL
//!   IN2R ──► right input PGA ──► HPR bypass ──► HPOUTR
//! ```
//!
//! After the routing registers are written the codec is brought up with
//! [`Init::LOOPBACK`] so clocks and the digital path are configured too.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::config::Init;
use super::error::Error;
use super::registers as reg;
use super::wm8904::Wm8904;

/// Register writes that set up the bypass path, in issue order.
pub const LOOPBACK_SEQUENCE: [(u8, u16); 7] = [
    // INL_ENA, INR_ENA
    (reg::POWER_MANAGEMENT_0, reg::PGA_ENA_MASK),
    // Single ended, IN2L on both PGA legs, common mode enabled
    (reg::ANALOGUE_LEFT_INPUT_1, reg::INPUT_1_IN2_SINGLE_ENDED),
    (reg::ANALOGUE_RIGHT_INPUT_1, reg::INPUT_1_IN2_SINGLE_ENDED),
    // HPL_BYP_ENA, HPR_BYP_ENA
    (reg::ANALOGUE_OUT12_ZC, reg::HP_BYP_MASK),
    // Headphones at 0 dB
    (reg::ANALOGUE_OUT1_LEFT, reg::OUT_VOL_0DB),
    (reg::ANALOGUE_OUT1_RIGHT, reg::OUT_VOL_0DB),
    // HPL_PGA_ENA, HPR_PGA_ENA
    (reg::POWER_MANAGEMENT_2, reg::PGA_ENA_MASK),
];

impl<I2C, D> Wm8904<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Put the codec into analogue loopback, then run [`init`](Self::init)
    /// with [`Init::LOOPBACK`].
    ///
    /// Stops at the first failed write and returns its error; nothing after
    /// it is written and nothing already written is undone.
    pub fn init_loopback(&mut self) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::info!("WM8904 loopback: IN2 -> headphones");

        for &(register, value) in LOOPBACK_SEQUENCE.iter() {
            self.write_register(register, value)?;
        }
        self.init(&Init::LOOPBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::config::{Frequency, InputDevice, OutputDevice, Resolution};
    use crate::codec::mock::{MockDelay, MockError, MockI2c};

    #[test]
    fn sequence_matches_register_values() {
        assert_eq!(
            LOOPBACK_SEQUENCE,
            [
                (0x0C, 0x0003),
                (0x2E, 0x0054),
                (0x2F, 0x0054),
                (0x3D, 0x000C),
                (0x39, 0x0039),
                (0x3A, 0x0039),
                (0x0E, 0x0003),
            ]
        );
    }

    #[test]
    fn writes_sequence_before_init() {
        let mut codec = Wm8904::new(MockI2c::new(), MockDelay::new());
        codec.init_loopback().unwrap();

        let (i2c, _) = codec.release();
        for (i, expected) in LOOPBACK_SEQUENCE.iter().enumerate() {
            assert_eq!(i2c.write_at(i), *expected);
        }
        // init() follows: SYSCLK up before the write sequencer starts
        assert_eq!(i2c.write_at(7), (reg::CLOCK_RATES_1, (3 << 10) | 5));
        assert_eq!(i2c.write_at(8), (reg::CLOCK_RATES_2, 0x0006));
        assert_eq!(i2c.write_at(9), (reg::WRITE_SEQUENCER_0, reg::WSEQ_ENA));
        assert_eq!(i2c.write_at(10), (reg::WRITE_SEQUENCER_3, reg::WSEQ_START));
    }

    #[test]
    fn hands_loopback_record_to_init() {
        let mut codec = Wm8904::new(MockI2c::new(), MockDelay::new());
        codec.init_loopback().unwrap();

        let config = codec.config().unwrap();
        assert_eq!(config.input_device, InputDevice::Mic1Mic2);
        assert_eq!(config.output_device, OutputDevice::Headphone);
        assert_eq!(config.frequency, Frequency::Hz44100);
        assert_eq!(config.resolution, Resolution::Bits16);
        assert_eq!(config.volume, 50);
    }

    #[test]
    fn routing_survives_init() {
        let mut codec = Wm8904::new(MockI2c::new(), MockDelay::new());
        codec.init_loopback().unwrap();

        let (i2c, _) = codec.release();
        assert_eq!(i2c.read_reg(reg::POWER_MANAGEMENT_0), 0x0003);
        assert_eq!(i2c.read_reg(reg::POWER_MANAGEMENT_2), 0x0003);
        assert_eq!(i2c.read_reg(reg::ANALOGUE_LEFT_INPUT_1), 0x0054);
        assert_eq!(i2c.read_reg(reg::ANALOGUE_RIGHT_INPUT_1), 0x0054);
        assert_eq!(i2c.read_reg(reg::ANALOGUE_OUT12_ZC), 0x000C);
        // 44.1 kHz at 256 fs, 16-bit I2S
        assert_eq!(i2c.read_reg(reg::CLOCK_RATES_1), (3 << 10) | 5);
        assert_eq!(i2c.read_reg(reg::AUDIO_INTERFACE_1), 0x0002);
    }

    #[test]
    fn failure_at_each_step_stops_immediately() {
        for step in 1..=LOOPBACK_SEQUENCE.len() {
            let mut codec = Wm8904::new(MockI2c::failing_at(step), MockDelay::new());

            assert_eq!(codec.init_loopback(), Err(Error::I2c(MockError(step))));
            // init() never ran
            assert!(codec.config().is_none());

            let (i2c, _) = codec.release();
            assert_eq!(i2c.write_count(), step - 1);
            for i in 0..step - 1 {
                assert_eq!(i2c.write_at(i), LOOPBACK_SEQUENCE[i]);
            }
            // The failing register and everything after it is untouched
            for &(register, _) in &LOOPBACK_SEQUENCE[step - 1..] {
                if !LOOPBACK_SEQUENCE[..step - 1].iter().any(|&(r, _)| r == register) {
                    assert!(!i2c.was_written(register));
                }
            }
        }
    }

    #[test]
    fn init_failure_is_propagated() {
        // Eighth write is the first one issued by init()
        let mut codec = Wm8904::new(MockI2c::failing_at(8), MockDelay::new());
        assert_eq!(codec.init_loopback(), Err(Error::I2c(MockError(8))));
        assert!(codec.config().is_none());

        let (i2c, _) = codec.release();
        assert_eq!(i2c.write_count(), 7);
    }

    #[test]
    fn sequencer_timeout_is_propagated() {
        let mut i2c = MockI2c::new();
        i2c.set_reg(reg::WRITE_SEQUENCER_4, reg::WSEQ_BUSY);
        let mut codec = Wm8904::new(i2c, MockDelay::new());
        assert_eq!(codec.init_loopback(), Err(Error::SequencerTimeout));
    }
}
