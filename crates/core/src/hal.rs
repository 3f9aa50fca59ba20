// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::peripherals::gpio::{GpioInit, PinState, Pins, Port};
use crate::peripherals::rcc::{ClkInit, ClockGate, FlashLatency, OscInit, VoltageScale};
use crate::peripherals::timer::{TimHandle, TimMasterConfig};
use crate::peripherals::uart::UartHandle;
use serde::Serialize;

/// Status word returned by every fallible HAL entry point.
#[must_use]
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HalStatus {
    #[default]
    Ok = 0x00,
    Error = 0x01,
    Busy = 0x02,
    Timeout = 0x03,
}

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    #[error("HAL reported an error")]
    Error,
    #[error("HAL peripheral busy")]
    Busy,
    #[error("HAL operation timed out")]
    Timeout,
}

pub type HalResult<T> = Result<T, HalError>;

impl HalStatus {
    pub fn is_ok(self) -> bool {
        self == HalStatus::Ok
    }

    /// Map the status word onto a `Result`.
    pub fn check(self) -> HalResult<()> {
        match self {
            HalStatus::Ok => Ok(()),
            HalStatus::Error => Err(HalError::Error),
            HalStatus::Busy => Err(HalError::Busy),
            HalStatus::Timeout => Err(HalError::Timeout),
        }
    }
}

impl From<HalError> for HalStatus {
    fn from(err: HalError) -> Self {
        match err {
            HalError::Error => HalStatus::Error,
            HalError::Busy => HalStatus::Busy,
            HalError::Timeout => HalStatus::Timeout,
        }
    }
}

/// The subset of the STM32F4 HAL the demo firmware calls.
///
/// Application code is written against this trait so the same init and loop
/// logic runs on the host against [`crate::MockHal`].
pub trait Hal {
    /// Reset peripherals, initialize the flash interface and SysTick.
    fn init(&mut self) -> HalStatus;
    fn rcc_osc_config(&mut self, osc: &OscInit) -> HalStatus;
    fn rcc_clock_config(&mut self, clk: &ClkInit, latency: FlashLatency) -> HalStatus;
    fn enable_clock(&mut self, gates: ClockGate);
    fn set_voltage_scaling(&mut self, scale: VoltageScale);

    fn gpio_init(&mut self, port: Port, init: &GpioInit);
    fn gpio_write_pin(&mut self, port: Port, pins: Pins, state: PinState);
    fn gpio_toggle_pin(&mut self, port: Port, pins: Pins);
    fn gpio_read_pin(&self, port: Port, pins: Pins) -> PinState;

    fn uart_init(&mut self, huart: &mut UartHandle) -> HalStatus;
    fn tim_base_init(&mut self, htim: &mut TimHandle) -> HalStatus;
    fn tim_master_config_synchronization(
        &mut self,
        htim: &mut TimHandle,
        config: &TimMasterConfig,
    ) -> HalStatus;

    /// Block for `ms` milliseconds.
    fn delay(&mut self, ms: u32);
    fn disable_irq(&mut self);
}
