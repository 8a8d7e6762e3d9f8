//! WM8904 audio codec driver module.
//!
//! Provides a driver for the Cirrus Logic (Wolfson) WM8904 codec: register
//! access, full bring-up and power-down, volume/mute/routing control, and
//! the analogue loopback (IN2 → headphone bypass) bring-up.
//!
//! # Feature gate
//!
//! This module is available when the `wm8904` feature is enabled (on by default).

mod config;
mod error;
mod loopback;
pub(crate) mod registers;
mod wm8904;

#[cfg(test)]
mod mock;

pub use config::{Frequency, Init, InputDevice, OutputDevice, Protocol, Resolution, VolumeTarget};
pub use error::Error;
pub use loopback::LOOPBACK_SEQUENCE;
pub use wm8904::Wm8904;
