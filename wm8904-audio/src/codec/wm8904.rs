//! WM8904 audio codec driver.
//!
//! Driver for the Cirrus Logic (Wolfson) WM8904 ultra-low-power stereo
//! codec. It programs the control interface only; the digital audio
//! interface is left to the platform's I2S/SAI peripheral.
//!
//! The driver is generic over any [`embedded_hal::i2c::I2c`] and
//! [`embedded_hal::delay::DelayNs`] implementation.
//!
//! # Example
//!
//! ```ignore
//! let mut codec = Wm8904::new(i2c, delay);
//! codec.verify_id()?;
//! codec.init(&Init::default())?;   // Headphone out, 44.1 kHz, 16-bit
//! codec.set_volume(VolumeTarget::Output, 70)?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::config::{
    input_volume_code, input_volume_percent, output_volume_code, output_volume_percent,
    Frequency, Init, OutputDevice, Protocol, Resolution, VolumeTarget,
};
use super::error::Error;
use super::registers as reg;
use crate::control::AudioControl;

/// Delay between write sequencer status polls.
const SEQUENCER_POLL_MS: u32 = 10;

/// Polls before a running sequence is reported as stuck (500 ms total).
const SEQUENCER_POLLS: u32 = 50;

// ── Driver struct ──────────────────────────────────────────────────────────

/// WM8904 audio codec driver.
///
/// Generic over I2C bus and delay provider. The delay is only used while
/// waiting on the on-chip write sequencer.
pub struct Wm8904<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    /// Last record applied by [`init`](Self::init), kept in step with the
    /// individual setters.
    config: Option<Init>,
    /// Percentages last written through [`set_volume`](Self::set_volume).
    /// A register holds fewer steps than there are percentages, so these
    /// are what [`volume`](Self::volume) reports while the code still matches.
    output_percent: Option<u8>,
    input_percent: Option<u8>,
}

impl<I2C, D> Wm8904<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Default I2C address (CSB/ADDR pin low).
    pub const DEFAULT_ADDRESS: u8 = reg::I2C_ADDR_CSB_LOW;

    /// Alternate I2C address (CSB/ADDR pin high).
    pub const ALT_ADDRESS: u8 = reg::I2C_ADDR_CSB_HIGH;

    /// Create a new driver with the default I2C address (0x1A).
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::new_with_address(i2c, delay, Self::DEFAULT_ADDRESS)
    }

    /// Create a new driver with a specific I2C address.
    pub fn new_with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            config: None,
            output_percent: None,
            input_percent: None,
        }
    }

    /// Consume the driver and return the I2C bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// The record most recently applied with [`init`](Self::init), if any.
    pub fn config(&self) -> Option<Init> {
        self.config
    }

    // ── Low-level I2C helpers ──────────────────────────────────────────

    /// Write a 16-bit value to an 8-bit register.
    pub fn write_register(&mut self, register: u8, value: u16) -> Result<(), I2C::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("WM8904 R{=u8} <- {=u16:#x}", register, value);
        let buf = [register, (value >> 8) as u8, value as u8];
        self.i2c.write(self.address, &buf)
    }

    /// Read a 16-bit value from an 8-bit register.
    pub fn read_register(&mut self, register: u8) -> Result<u16, I2C::Error> {
        let mut val_buf = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut val_buf)?;
        Ok(u16::from_be_bytes(val_buf))
    }

    /// Read-modify-write: `new = (current & ~mask) | (value & mask)`.
    fn modify(&mut self, register: u8, value: u16, mask: u16) -> Result<u16, I2C::Error> {
        let current = self.read_register(register)?;
        let new_val = (current & !mask) | (value & mask);
        self.write_register(register, new_val)?;
        Ok(new_val)
    }

    // ── Identification and reset ───────────────────────────────────────

    /// Read the device ID from R0 (0x8904 on a genuine part).
    pub fn read_id(&mut self) -> Result<u16, Error<I2C::Error>> {
        Ok(self.read_register(reg::SW_RESET_AND_ID)?)
    }

    /// Check that a WM8904 answers on the configured address.
    pub fn verify_id(&mut self) -> Result<(), Error<I2C::Error>> {
        let id = self.read_id()?;
        if id != reg::DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("WM8904 ID mismatch: {=u16:#x}", id);
            return Err(Error::UnexpectedId(id));
        }
        Ok(())
    }

    /// Software reset: every register returns to its default.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_register(reg::SW_RESET_AND_ID, 0x0000)?;
        self.forget_state();
        Ok(())
    }

    // ── Write sequencer ────────────────────────────────────────────────

    /// Start the stored sequence at `index` and wait for it to finish.
    fn run_sequence(&mut self, index: u16) -> Result<(), Error<I2C::Error>> {
        self.write_register(reg::WRITE_SEQUENCER_0, reg::WSEQ_ENA)?;
        self.write_register(reg::WRITE_SEQUENCER_3, reg::WSEQ_START | index)?;

        for _ in 0..SEQUENCER_POLLS {
            self.delay.delay_ms(SEQUENCER_POLL_MS);
            if self.read_register(reg::WRITE_SEQUENCER_4)? & reg::WSEQ_BUSY == 0 {
                return Ok(());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::error!("WM8904 write sequence {=u16} did not finish", index);
        Err(Error::SequencerTimeout)
    }

    // ── Initialisation ─────────────────────────────────────────────────

    /// Bring the codec up according to `init`.
    ///
    /// Programs clocking (SYSCLK = MCLK = 256 × fs) and enables SYSCLK,
    /// which the write sequencer runs from, then runs the start-up sequence
    /// and sets up the audio interface (I2S, slave), power for the selected
    /// inputs/outputs, and the output volume.
    ///
    /// Power enables are only ever set here, never cleared, and the codec
    /// is not reset, so routing configured beforehand (see
    /// [`init_loopback`](Self::init_loopback)) is preserved.
    pub fn init(&mut self, init: &Init) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("WM8904 init: {}", init);

        // Clocking: rate first, then enable SYSCLK/DSP clock from MCLK
        self.write_sample_rate(init.frequency)?;
        self.write_register(reg::CLOCK_RATES_2, reg::CLK_SYS_ENA | reg::CLK_DSP_ENA)?;

        self.run_sequence(reg::WSEQ_STARTUP_INDEX)?;

        // Interface: I2S, word length from the record
        self.modify(
            reg::AUDIO_INTERFACE_1,
            ((init.resolution as u16) << reg::AIF_WL_SHIFT) | Protocol::I2s as u16,
            reg::AIF_WL_MASK | reg::AIF_FMT_MASK,
        )?;

        // Power: input PGAs, output PGAs, converters
        let pga = init.input_device.pga_bits();
        if pga != 0 {
            self.modify(reg::POWER_MANAGEMENT_0, pga, pga)?;
        }
        if init.output_device.headphone() {
            self.modify(reg::POWER_MANAGEMENT_2, reg::PGA_ENA_MASK, reg::PGA_ENA_MASK)?;
        }
        if init.output_device.line_out() {
            self.modify(reg::POWER_MANAGEMENT_3, reg::PGA_ENA_MASK, reg::PGA_ENA_MASK)?;
        }
        let mut converters = init.input_device.adc_bits();
        if init.output_device != OutputDevice::None {
            converters |= reg::DACL_ENA | reg::DACR_ENA;
        }
        if converters != 0 {
            self.modify(reg::POWER_MANAGEMENT_6, converters, converters)?;
        }

        // Unmute the enabled input PGAs at 0 dB
        if pga & reg::PGA_LEFT_ENA != 0 {
            self.write_register(reg::ANALOGUE_LEFT_INPUT_0, reg::IN_VOL_0DB)?;
        }
        if pga & reg::PGA_RIGHT_ENA != 0 {
            self.write_register(reg::ANALOGUE_RIGHT_INPUT_0, reg::IN_VOL_0DB)?;
        }
        if pga != 0 {
            self.input_percent = None;
        }

        self.modify(reg::DAC_DIGITAL_1, 0, reg::DAC_MUTE)?;
        self.write_output_volume(init.output_device, output_volume_code(init.volume))?;

        self.config = Some(*init);
        self.output_percent = Some(init.volume.min(100));
        Ok(())
    }

    /// Power the codec down: soft-mute, run the shutdown sequence, switch off
    /// every PGA and converter, and stop the system clocks.
    pub fn deinit(&mut self) -> Result<(), Error<I2C::Error>> {
        self.modify(reg::DAC_DIGITAL_1, reg::DAC_MUTE, reg::DAC_MUTE)?;
        self.run_sequence(reg::WSEQ_SHUTDOWN_INDEX)?;

        self.modify(reg::ANALOGUE_OUT12_ZC, 0, reg::HP_BYP_MASK)?;
        self.modify(reg::POWER_MANAGEMENT_0, 0, reg::PGA_ENA_MASK)?;
        self.modify(reg::POWER_MANAGEMENT_2, 0, reg::PGA_ENA_MASK)?;
        self.modify(reg::POWER_MANAGEMENT_3, 0, reg::PGA_ENA_MASK)?;
        self.modify(reg::POWER_MANAGEMENT_6, 0, reg::CONVERTER_ENA_MASK)?;
        self.modify(reg::CLOCK_RATES_2, 0, reg::CLK_SYS_ENA | reg::CLK_DSP_ENA)?;

        self.forget_state();
        Ok(())
    }

    fn forget_state(&mut self) {
        self.config = None;
        self.output_percent = None;
        self.input_percent = None;
    }

    // ── Playback control ───────────────────────────────────────────────

    /// Start playback (releases the DAC soft-mute).
    pub fn play(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mute(false)
    }

    /// Pause playback (DAC soft-mute, everything stays powered).
    pub fn pause(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mute(true)
    }

    /// Resume after [`pause`](Self::pause).
    pub fn resume(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mute(false)
    }

    /// Stop playback: soft-mute, then power down output PGAs and converters.
    pub fn stop(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mute(true)?;
        self.modify(reg::POWER_MANAGEMENT_2, 0, reg::PGA_ENA_MASK)?;
        self.modify(reg::POWER_MANAGEMENT_3, 0, reg::PGA_ENA_MASK)?;
        self.modify(reg::POWER_MANAGEMENT_6, 0, reg::CONVERTER_ENA_MASK)?;
        Ok(())
    }

    /// DAC soft-mute on (`true`) or off.
    pub fn set_mute(&mut self, mute: bool) -> Result<(), Error<I2C::Error>> {
        let value = if mute { reg::DAC_MUTE } else { 0 };
        self.modify(reg::DAC_DIGITAL_1, value, reg::DAC_MUTE)?;
        Ok(())
    }

    // ── Volume ─────────────────────────────────────────────────────────

    /// Set input PGA or output volume in percent (0–100).
    ///
    /// An output volume of 0 also sets the output mute bits.
    pub fn set_volume(
        &mut self,
        target: VolumeTarget,
        percent: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let percent = percent.min(100);
        match target {
            VolumeTarget::Input => {
                let code = input_volume_code(percent);
                self.write_register(reg::ANALOGUE_LEFT_INPUT_0, code)?;
                self.write_register(reg::ANALOGUE_RIGHT_INPUT_0, code)?;
                self.input_percent = Some(percent);
            }
            VolumeTarget::Output => {
                let mut code = output_volume_code(percent);
                if percent == 0 {
                    code |= reg::OUT_MUTE;
                }
                self.write_output_volume(OutputDevice::Both, code)?;
                self.output_percent = Some(percent);
                if let Some(config) = self.config.as_mut() {
                    config.volume = percent;
                }
            }
        }
        Ok(())
    }

    /// Current volume in percent, read back from the left channel.
    ///
    /// Returns the percentage last set through this driver while the
    /// register still holds its code. Otherwise the register is decoded to
    /// the smallest percentage that maps onto it.
    pub fn volume(&mut self, target: VolumeTarget) -> Result<u8, Error<I2C::Error>> {
        Ok(match target {
            VolumeTarget::Input => {
                let code = self.read_register(reg::ANALOGUE_LEFT_INPUT_0)? & reg::IN_VOL_MASK;
                match self.input_percent {
                    Some(p) if input_volume_code(p) == code => p,
                    _ => input_volume_percent(code),
                }
            }
            VolumeTarget::Output => {
                let code = self.read_register(reg::ANALOGUE_OUT1_LEFT)? & reg::OUT_VOL_MASK;
                match self.output_percent {
                    Some(p) if output_volume_code(p) == code => p,
                    _ => output_volume_percent(code),
                }
            }
        })
    }

    /// Set headphone volume in dB (−57 dB to +6 dB, 1 dB steps).
    pub fn set_output_volume_db(&mut self, db: f32) -> Result<(), Error<I2C::Error>> {
        let steps = libm::roundf(db).clamp(-57.0, 6.0) as i16;
        let code = (steps + reg::OUT_VOL_0DB as i16) as u16;
        self.write_output_volume(OutputDevice::Headphone, code)?;
        self.output_percent = None;
        Ok(())
    }

    /// Write `value` to the volume registers of `device`, latching both
    /// channels with the VU bit on the right-channel write.
    fn write_output_volume(&mut self, device: OutputDevice, value: u16) -> Result<(), I2C::Error> {
        if device.headphone() {
            self.write_register(reg::ANALOGUE_OUT1_LEFT, value)?;
            self.write_register(reg::ANALOGUE_OUT1_RIGHT, value | reg::OUT_VU)?;
        }
        if device.line_out() {
            self.write_register(reg::ANALOGUE_OUT2_LEFT, value)?;
            self.write_register(reg::ANALOGUE_OUT2_RIGHT, value | reg::OUT_VU)?;
        }
        Ok(())
    }

    // ── Routing ────────────────────────────────────────────────────────

    /// Power exactly the output PGAs `device` needs, with the DACs on
    /// whenever any output is selected.
    pub fn set_output_mode(&mut self, device: OutputDevice) -> Result<(), Error<I2C::Error>> {
        let hp = if device.headphone() { reg::PGA_ENA_MASK } else { 0 };
        let lo = if device.line_out() { reg::PGA_ENA_MASK } else { 0 };
        let dac = if device == OutputDevice::None {
            0
        } else {
            reg::DACL_ENA | reg::DACR_ENA
        };
        self.modify(reg::POWER_MANAGEMENT_2, hp, reg::PGA_ENA_MASK)?;
        self.modify(reg::POWER_MANAGEMENT_3, lo, reg::PGA_ENA_MASK)?;
        self.modify(reg::POWER_MANAGEMENT_6, dac, reg::DACL_ENA | reg::DACR_ENA)?;
        if let Some(config) = self.config.as_mut() {
            config.output_device = device;
        }
        Ok(())
    }

    /// Enable or disable the analogue input-PGA → headphone bypass.
    pub fn set_bypass(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        let value = if enabled { reg::HP_BYP_MASK } else { 0 };
        self.modify(reg::ANALOGUE_OUT12_ZC, value, reg::HP_BYP_MASK)?;
        Ok(())
    }

    // ── Audio interface ────────────────────────────────────────────────

    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Error<I2C::Error>> {
        self.modify(
            reg::AUDIO_INTERFACE_1,
            (resolution as u16) << reg::AIF_WL_SHIFT,
            reg::AIF_WL_MASK,
        )?;
        if let Some(config) = self.config.as_mut() {
            config.resolution = resolution;
        }
        Ok(())
    }

    pub fn resolution(&mut self) -> Result<Resolution, Error<I2C::Error>> {
        let aif = self.read_register(reg::AUDIO_INTERFACE_1)?;
        Ok(Resolution::from_code((aif & reg::AIF_WL_MASK) >> reg::AIF_WL_SHIFT))
    }

    pub fn set_protocol(&mut self, protocol: Protocol) -> Result<(), Error<I2C::Error>> {
        self.modify(reg::AUDIO_INTERFACE_1, protocol as u16, reg::AIF_FMT_MASK)?;
        Ok(())
    }

    pub fn protocol(&mut self) -> Result<Protocol, Error<I2C::Error>> {
        let aif = self.read_register(reg::AUDIO_INTERFACE_1)?;
        Ok(Protocol::from_code(aif & reg::AIF_FMT_MASK))
    }

    // ── Sample rate ────────────────────────────────────────────────────

    pub fn set_frequency(&mut self, frequency: Frequency) -> Result<(), Error<I2C::Error>> {
        self.write_sample_rate(frequency)?;
        if let Some(config) = self.config.as_mut() {
            config.frequency = frequency;
        }
        Ok(())
    }

    /// Sample rate read back from CLOCK_RATES_1.
    ///
    /// The chip only stores the rate band; within a band the rate last set
    /// through this driver is returned, otherwise the 48 kHz family member.
    pub fn frequency(&mut self) -> Result<Frequency, Error<I2C::Error>> {
        let value = self.read_register(reg::CLOCK_RATES_1)?;
        let hint = self.config.map(|c| c.frequency);
        Frequency::from_code(value & reg::SAMPLE_RATE_MASK, hint).ok_or(Error::InvalidField {
            register: reg::CLOCK_RATES_1,
            value,
        })
    }

    fn write_sample_rate(&mut self, frequency: Frequency) -> Result<(), I2C::Error> {
        self.modify(
            reg::CLOCK_RATES_1,
            (reg::CLK_SYS_RATE_256FS << reg::CLK_SYS_RATE_SHIFT) | frequency.code(),
            reg::CLK_SYS_RATE_MASK | reg::SAMPLE_RATE_MASK,
        )?;
        Ok(())
    }
}

// ── AudioControl trait impl ────────────────────────────────────────────────

impl<I2C, D> AudioControl for Wm8904<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = Error<I2C::Error>;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.init(&Init::default())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.deinit()
    }

    fn volume(&mut self, level: f32) -> Result<(), Self::Error> {
        let percent = (level.clamp(0.0, 1.0) * 100.0 + 0.5) as u8;
        self.set_volume(VolumeTarget::Output, percent)
    }
}
