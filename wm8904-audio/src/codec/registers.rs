//! WM8904 register addresses and bitfield definitions.
//!
//! Taken from the WM8904 datasheet (Rev 4.x register map). Register
//! addresses are 8-bit; all registers hold 16-bit values. The control
//! interface sends the register address followed by the value, MSB first.

// The map lists a few registers for completeness (bias, VMID, DAC/ADC
// digital volume) that the driver does not program yet.
#![allow(dead_code)]

// ── I2C addresses ──────────────────────────────────────────────────────────

/// Default I2C address (CSB/ADDR pin low).
pub const I2C_ADDR_CSB_LOW: u8 = 0x1A;

/// Alternate I2C address (CSB/ADDR pin high).
pub const I2C_ADDR_CSB_HIGH: u8 = 0x1B;

// ── Identification and reset ───────────────────────────────────────────────

/// Software reset (write any value) and device ID (read).
pub const SW_RESET_AND_ID: u8 = 0x00;

/// Value read back from [`SW_RESET_AND_ID`].
pub const DEVICE_ID: u16 = 0x8904;

/// Bias control.
pub const BIAS_CONTROL_0: u8 = 0x04;

/// VMID control.
pub const VMID_CONTROL_0: u8 = 0x05;

// ── Power management ───────────────────────────────────────────────────────

/// Input PGA enables.
/// - Bit 1 — INL_ENA
/// - Bit 0 — INR_ENA
pub const POWER_MANAGEMENT_0: u8 = 0x0C;

/// Headphone output PGA enables.
/// - Bit 1 — HPL_PGA_ENA
/// - Bit 0 — HPR_PGA_ENA
pub const POWER_MANAGEMENT_2: u8 = 0x0E;

/// Line output PGA enables.
/// - Bit 1 — LINEOUTL_PGA_ENA
/// - Bit 0 — LINEOUTR_PGA_ENA
pub const POWER_MANAGEMENT_3: u8 = 0x0F;

/// Converter enables.
/// - Bit 3 — DACL_ENA
/// - Bit 2 — DACR_ENA
/// - Bit 1 — ADCL_ENA
/// - Bit 0 — ADCR_ENA
pub const POWER_MANAGEMENT_6: u8 = 0x12;

pub const PGA_LEFT_ENA: u16 = 1 << 1;
pub const PGA_RIGHT_ENA: u16 = 1 << 0;
pub const PGA_ENA_MASK: u16 = PGA_LEFT_ENA | PGA_RIGHT_ENA;

pub const DACL_ENA: u16 = 1 << 3;
pub const DACR_ENA: u16 = 1 << 2;
pub const ADCL_ENA: u16 = 1 << 1;
pub const ADCR_ENA: u16 = 1 << 0;
pub const CONVERTER_ENA_MASK: u16 = DACL_ENA | DACR_ENA | ADCL_ENA | ADCR_ENA;

// ── Clocking ───────────────────────────────────────────────────────────────

/// Clock rates 0 (MCLK divider, tone clock).
pub const CLOCK_RATES_0: u8 = 0x14;

/// Clock rates 1.
/// - Bits 13:10 — CLK_SYS_RATE (SYSCLK / fs ratio)
/// - Bits  2:0  — SAMPLE_RATE (0=8k, 1=11.025/12k, 2=16k, 3=22.05/24k,
///   4=32k, 5=44.1/48k)
pub const CLOCK_RATES_1: u8 = 0x15;

pub const CLK_SYS_RATE_SHIFT: u16 = 10;
pub const CLK_SYS_RATE_MASK: u16 = 0xF << CLK_SYS_RATE_SHIFT;
/// CLK_SYS_RATE code for SYSCLK = 256 × fs.
pub const CLK_SYS_RATE_256FS: u16 = 3;
pub const SAMPLE_RATE_MASK: u16 = 0x0007;

/// Clock rates 2.
/// - Bit 14 — SYSCLK_SRC (0=MCLK, 1=FLL)
/// - Bit  2 — CLK_SYS_ENA
/// - Bit  1 — CLK_DSP_ENA
pub const CLOCK_RATES_2: u8 = 0x16;

pub const SYSCLK_SRC_FLL: u16 = 1 << 14;
pub const CLK_SYS_ENA: u16 = 1 << 2;
pub const CLK_DSP_ENA: u16 = 1 << 1;

// ── Audio interface ────────────────────────────────────────────────────────

/// Audio interface 0 (ADC/DAC channel swaps, companding).
pub const AUDIO_INTERFACE_0: u8 = 0x18;

/// Audio interface 1.
/// - Bit  6   — BCLK_DIR (1=master)
/// - Bits 3:2 — AIF_WL (0=16, 1=20, 2=24, 3=32 bit)
/// - Bits 1:0 — AIF_FMT (0=right justified, 1=left justified, 2=I2S, 3=DSP)
pub const AUDIO_INTERFACE_1: u8 = 0x19;

pub const AIF_WL_SHIFT: u16 = 2;
pub const AIF_WL_MASK: u16 = 0x3 << AIF_WL_SHIFT;
pub const AIF_FMT_MASK: u16 = 0x0003;

// ── DAC / ADC digital ──────────────────────────────────────────────────────

pub const DAC_DIGITAL_VOLUME_LEFT: u8 = 0x1E;
pub const DAC_DIGITAL_VOLUME_RIGHT: u8 = 0x1F;

/// DAC digital 1.
/// - Bit 3 — DAC_MUTE (soft mute)
pub const DAC_DIGITAL_1: u8 = 0x21;

pub const DAC_MUTE: u16 = 1 << 3;

pub const ADC_DIGITAL_VOLUME_LEFT: u8 = 0x24;
pub const ADC_DIGITAL_VOLUME_RIGHT: u8 = 0x25;

// ── Analogue inputs ────────────────────────────────────────────────────────

/// Left input PGA volume.
/// - Bit  7   — LINMUTE
/// - Bits 4:0 — LIN_VOL (1.5 dB steps, 0x05 = 0 dB)
pub const ANALOGUE_LEFT_INPUT_0: u8 = 0x2C;

/// Right input PGA volume (same layout as left).
pub const ANALOGUE_RIGHT_INPUT_0: u8 = 0x2D;

pub const IN_MUTE: u16 = 1 << 7;
pub const IN_VOL_MASK: u16 = 0x001F;
pub const IN_VOL_0DB: u16 = 0x05;

/// Left input PGA configuration.
/// - Bit  6   — INL_CM_ENA
/// - Bits 5:4 — L_IP_SEL_N (0=IN1L, 1=IN2L, 2=IN3L)
/// - Bits 3:2 — L_IP_SEL_P
/// - Bits 1:0 — L_MODE (0=single ended, 1=differential line, 2=differential mic)
pub const ANALOGUE_LEFT_INPUT_1: u8 = 0x2E;

/// Right input PGA configuration (same layout as left).
pub const ANALOGUE_RIGHT_INPUT_1: u8 = 0x2F;

/// Single-ended IN2 on both PGA legs with common-mode rejection enabled.
pub const INPUT_1_IN2_SINGLE_ENDED: u16 = 0x0054;

// ── Analogue outputs ───────────────────────────────────────────────────────

/// Headphone left volume.
/// - Bit  8   — HPOUTL_MUTE
/// - Bit  7   — HPOUT_VU (volume update, latches both channels)
/// - Bit  6   — HPOUTLZC
/// - Bits 5:0 — HPOUTL_VOL (1 dB steps, 0x00 = -57 dB, 0x39 = 0 dB, 0x3F = +6 dB)
pub const ANALOGUE_OUT1_LEFT: u8 = 0x39;

/// Headphone right volume (same layout as left).
pub const ANALOGUE_OUT1_RIGHT: u8 = 0x3A;

/// Line output left volume (same layout as headphone).
pub const ANALOGUE_OUT2_LEFT: u8 = 0x3B;

/// Line output right volume.
pub const ANALOGUE_OUT2_RIGHT: u8 = 0x3C;

pub const OUT_MUTE: u16 = 1 << 8;
pub const OUT_VU: u16 = 1 << 7;
pub const OUT_ZC: u16 = 1 << 6;
pub const OUT_VOL_MASK: u16 = 0x003F;
pub const OUT_VOL_MAX: u16 = 0x3F;
pub const OUT_VOL_0DB: u16 = 0x39;

/// Output bypass enables.
/// - Bit 3 — HPL_BYP_ENA
/// - Bit 2 — HPR_BYP_ENA
/// - Bit 1 — LINEOUTL_BYP_ENA
/// - Bit 0 — LINEOUTR_BYP_ENA
pub const ANALOGUE_OUT12_ZC: u8 = 0x3D;

pub const HPL_BYP_ENA: u16 = 1 << 3;
pub const HPR_BYP_ENA: u16 = 1 << 2;
pub const HP_BYP_MASK: u16 = HPL_BYP_ENA | HPR_BYP_ENA;

// ── Write sequencer ────────────────────────────────────────────────────────

/// Write sequencer 0.
/// - Bit 8 — WSEQ_ENA
pub const WRITE_SEQUENCER_0: u8 = 0x6C;

pub const WSEQ_ENA: u16 = 1 << 8;

/// Write sequencer 3.
/// - Bit  9   — WSEQ_ABORT
/// - Bit  8   — WSEQ_START
/// - Bits 5:0 — WSEQ_START_INDEX
pub const WRITE_SEQUENCER_3: u8 = 0x6F;

pub const WSEQ_START: u16 = 1 << 8;
/// Start index of the default start-up sequence.
pub const WSEQ_STARTUP_INDEX: u16 = 0x00;
/// Start index of the default shutdown sequence.
pub const WSEQ_SHUTDOWN_INDEX: u16 = 0x18;

/// Write sequencer 4 (read-only status).
/// - Bits 9:4 — WSEQ_CURRENT_INDEX
/// - Bit  0   — WSEQ_BUSY
pub const WRITE_SEQUENCER_4: u8 = 0x70;

pub const WSEQ_BUSY: u16 = 1 << 0;
