// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod hal;
pub mod mock;
pub mod peripherals;
pub mod snapshot;

mod tests;

pub use hal::{Hal, HalError, HalResult, HalStatus};
pub use mock::{Initializer, MockControl, MockHal};
pub use peripherals::gpio::{GpioInit, GpioMode, GpioPort, PinState, Pins, Port, Pull, Speed};
pub use peripherals::gpio::{GPIOA, GPIOB, GPIOC, GPIOD};
pub use peripherals::rcc::{ClkInit, ClockGate, FlashLatency, OscInit, VoltageScale};
pub use peripherals::timer::{TimHandle, TimMasterConfig, TIM6};
pub use peripherals::uart::{UartHandle, UART4};
pub use peripherals::Instance;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid register offset {0:#x}")]
    InvalidOffset(u64),
    #[error("Register at offset {0:#x} is read-only")]
    ReadOnly(u64),
}

pub type SimResult<T> = Result<T, SimulationError>;

/// Trait representing a memory-mapped register block, accessed a word at a time.
pub trait Peripheral: std::fmt::Debug {
    fn read(&self, offset: u64) -> SimResult<u32>;
    fn write(&mut self, offset: u64, value: u32) -> SimResult<()>;
    fn snapshot(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}
