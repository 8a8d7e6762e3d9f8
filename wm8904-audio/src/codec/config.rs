//! Initialisation record and the field selectors it is built from.

use super::registers as reg;

/// Which analogue inputs feed the ADCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputDevice {
    /// Input PGAs and ADCs stay powered down.
    None,
    /// Microphone on the left channel only.
    Mic1,
    /// Microphone on the right channel only.
    Mic2,
    /// Microphones on both channels.
    Mic1Mic2,
}

impl InputDevice {
    /// POWER_MANAGEMENT_0 / ADC enable bits for this selection.
    pub(crate) fn pga_bits(self) -> u16 {
        match self {
            InputDevice::None => 0,
            InputDevice::Mic1 => reg::PGA_LEFT_ENA,
            InputDevice::Mic2 => reg::PGA_RIGHT_ENA,
            InputDevice::Mic1Mic2 => reg::PGA_ENA_MASK,
        }
    }

    pub(crate) fn adc_bits(self) -> u16 {
        match self {
            InputDevice::None => 0,
            InputDevice::Mic1 => reg::ADCL_ENA,
            InputDevice::Mic2 => reg::ADCR_ENA,
            InputDevice::Mic1Mic2 => reg::ADCL_ENA | reg::ADCR_ENA,
        }
    }
}

/// Which analogue outputs are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDevice {
    None,
    /// HPOUTL/HPOUTR.
    Headphone,
    /// LINEOUTL/LINEOUTR.
    LineOut,
    /// Headphone and line outputs together.
    Both,
}

impl OutputDevice {
    pub(crate) fn headphone(self) -> bool {
        matches!(self, OutputDevice::Headphone | OutputDevice::Both)
    }

    pub(crate) fn line_out(self) -> bool {
        matches!(self, OutputDevice::LineOut | OutputDevice::Both)
    }
}

/// Audio sample rate.
///
/// The codec only distinguishes rate bands: 11.025/12 kHz, 22.05/24 kHz and
/// 44.1/48 kHz share a SAMPLE_RATE code. MCLK decides which member of a band
/// is actually produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frequency {
    Hz8000,
    Hz11025,
    Hz12000,
    Hz16000,
    Hz22050,
    Hz24000,
    Hz32000,
    Hz44100,
    Hz48000,
}

impl Frequency {
    /// Rate in Hz.
    pub fn hz(self) -> u32 {
        match self {
            Frequency::Hz8000 => 8_000,
            Frequency::Hz11025 => 11_025,
            Frequency::Hz12000 => 12_000,
            Frequency::Hz16000 => 16_000,
            Frequency::Hz22050 => 22_050,
            Frequency::Hz24000 => 24_000,
            Frequency::Hz32000 => 32_000,
            Frequency::Hz44100 => 44_100,
            Frequency::Hz48000 => 48_000,
        }
    }

    /// SAMPLE_RATE field code (CLOCK_RATES_1 bits 2:0).
    pub(crate) fn code(self) -> u16 {
        match self {
            Frequency::Hz8000 => 0,
            Frequency::Hz11025 | Frequency::Hz12000 => 1,
            Frequency::Hz16000 => 2,
            Frequency::Hz22050 | Frequency::Hz24000 => 3,
            Frequency::Hz32000 => 4,
            Frequency::Hz44100 | Frequency::Hz48000 => 5,
        }
    }

    /// Decode a SAMPLE_RATE code, preferring `hint` when it lies in the
    /// decoded band. Without a matching hint the 48 kHz family member wins.
    pub(crate) fn from_code(code: u16, hint: Option<Frequency>) -> Option<Self> {
        if let Some(f) = hint {
            if f.code() == code {
                return Some(f);
            }
        }
        match code {
            0 => Some(Frequency::Hz8000),
            1 => Some(Frequency::Hz12000),
            2 => Some(Frequency::Hz16000),
            3 => Some(Frequency::Hz24000),
            4 => Some(Frequency::Hz32000),
            5 => Some(Frequency::Hz48000),
            _ => None,
        }
    }
}

/// Audio interface word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    Bits16 = 0,
    Bits20 = 1,
    Bits24 = 2,
    Bits32 = 3,
}

impl Resolution {
    pub(crate) fn from_code(code: u16) -> Self {
        match code & 0x3 {
            0 => Resolution::Bits16,
            1 => Resolution::Bits20,
            2 => Resolution::Bits24,
            _ => Resolution::Bits32,
        }
    }
}

/// Audio interface frame format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    RightJustified = 0,
    LeftJustified = 1,
    I2s = 2,
    Dsp = 3,
}

impl Protocol {
    pub(crate) fn from_code(code: u16) -> Self {
        match code & 0x3 {
            0 => Protocol::RightJustified,
            1 => Protocol::LeftJustified,
            2 => Protocol::I2s,
            _ => Protocol::Dsp,
        }
    }
}

/// Volume control target for [`Wm8904::set_volume`](super::Wm8904::set_volume).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VolumeTarget {
    /// Input PGAs (left and right).
    Input,
    /// Headphone and line output PGAs.
    Output,
}

/// Parameters for [`Wm8904::init`](super::Wm8904::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Init {
    pub input_device: InputDevice,
    pub output_device: OutputDevice,
    pub frequency: Frequency,
    pub resolution: Resolution,
    /// Output volume in percent (0–100, larger values are clamped).
    pub volume: u8,
}

impl Init {
    /// Record handed to `init` by
    /// [`Wm8904::init_loopback`](super::Wm8904::init_loopback).
    pub const LOOPBACK: Init = Init {
        input_device: InputDevice::Mic1Mic2,
        output_device: OutputDevice::Headphone,
        frequency: Frequency::Hz44100,
        resolution: Resolution::Bits16,
        volume: 50,
    };
}

impl Default for Init {
    /// Headphone playback at 44.1 kHz / 16-bit, half volume, no inputs.
    fn default() -> Self {
        Init {
            input_device: InputDevice::None,
            output_device: OutputDevice::Headphone,
            frequency: Frequency::Hz44100,
            resolution: Resolution::Bits16,
            volume: 50,
        }
    }
}

/// Output volume percent → 6-bit HPOUT/LINEOUT code.
pub(crate) fn output_volume_code(percent: u8) -> u16 {
    (percent.min(100) as u16 * reg::OUT_VOL_MAX) / 100
}

/// 6-bit output code → the smallest percent that `output_volume_code` maps
/// onto it. 101 percentages share 64 codes, so this is not the inverse of
/// `output_volume_code`; it only satisfies `output_volume_code(p(c)) == c`.
pub(crate) fn output_volume_percent(code: u16) -> u8 {
    let code = code & reg::OUT_VOL_MASK;
    ((code * 100 + reg::OUT_VOL_MAX - 1) / reg::OUT_VOL_MAX) as u8
}

/// Input volume percent → 5-bit LIN_VOL/RIN_VOL code.
pub(crate) fn input_volume_code(percent: u8) -> u16 {
    (percent.min(100) as u16 * reg::IN_VOL_MASK) / 100
}

/// 5-bit input code → the smallest percent that `input_volume_code` maps
/// onto it.
pub(crate) fn input_volume_percent(code: u16) -> u8 {
    let code = code & reg::IN_VOL_MASK;
    ((code * 100 + reg::IN_VOL_MASK - 1) / reg::IN_VOL_MASK) as u8
}
