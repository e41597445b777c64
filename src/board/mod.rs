//! Board bindings for the sensor driver.

pub mod stm32f746_disco;
