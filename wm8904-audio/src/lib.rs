//! # wm8904-audio
//!
//! A `no_std`, allocation-free control driver for the Cirrus Logic
//! (Wolfson) WM8904 stereo codec, written against `embedded-hal` 1.0.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Trait | [`control`] | `AudioControl` trait shared by codec drivers |
//! | Codec | [`codec`] | WM8904 driver and loopback bring-up (feature-gated) |
//!
//! ## Quick start
//!
//! ```ignore
//! use wm8904_audio::codec::Wm8904;
//!
//! let mut codec = Wm8904::new(i2c, delay);
//! codec.verify_id()?;
//!
//! // IN2L/IN2R straight to the headphones, no digital path involved
//! codec.init_loopback()?;
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `wm8904` | yes | WM8904 codec driver (requires `embedded-hal`) |
//! | `defmt` | no | `defmt` logging of register writes and `defmt::Format` derives |

#![no_std]

pub mod control;

#[cfg(feature = "wm8904")]
pub mod codec;
