//! Control core for the Samsung S5K3L6 image sensor, with an optional STM32F746G Discovery Board
//! binding.

#![cfg_attr(not(test), no_std)]

/// Drivers and helper functions for using the S5K3L6.
pub mod s5k3l6;

#[cfg(feature = "board")]
pub mod board;

#[cfg(feature = "board")]
pub mod util;

pub use s5k3l6::config::{Config, Orientation};
pub use s5k3l6::{Error, S5k3l6};
