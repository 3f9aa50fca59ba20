// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! STM32F407 blinky firmware logic, written against the [`halbench_core::Hal`]
//! trait so the startup sequence and main loop can be driven one step at a
//! time from a host test.

pub mod clock;
pub mod error;
pub mod firmware;

pub use clock::{ClockConfig, ResetClock, Stm32f407Clock};
pub use error::{ErrorHandler, Fault, FaultStep, InitError};
pub use firmware::{init_exit_code, Firmware, InitReport, HEARTBEAT_LED, LED_PINS, LED_PORT};
