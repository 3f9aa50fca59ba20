// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use halbench_core::{Hal, HalError};
use tracing::error;

/// Init step that reported a non-`Ok` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultStep {
    OscConfig,
    ClockConfig,
    UartInit,
    TimBaseInit,
    TimMasterConfig,
}

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
#[error("{step:?} failed: {error}")]
pub struct Fault {
    pub step: FaultStep,
    pub error: HalError,
}

impl Fault {
    pub fn new(step: FaultStep, error: HalError) -> Self {
        Self { step, error }
    }
}

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// `HAL_Init` failed; nothing after it ran.
    #[error("HAL init failed: {0}")]
    HalInit(HalError),
}

impl InitError {
    pub fn exit_code(&self) -> i32 {
        match self {
            InitError::HalInit(_) => 1,
        }
    }
}

/// Shared sink for clock and peripheral configuration failures.
///
/// On target the handler masks interrupts and parks the core. With
/// `test_mode` set it records the fault and returns after a single pass so a
/// host run can carry on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorHandler {
    test_mode: bool,
    faults: Vec<Fault>,
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new(!cfg!(feature = "halt-on-error"))
    }
}

impl ErrorHandler {
    pub fn new(test_mode: bool) -> Self {
        Self {
            test_mode,
            faults: Vec::new(),
        }
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn handle<H: Hal>(&mut self, hal: &mut H, fault: Fault) {
        error!("Error_Handler: {}", fault);
        self.faults.push(fault);
        hal.disable_irq();
        while !self.test_mode {
            std::hint::spin_loop();
        }
    }

    /// Every fault handled so far, oldest first.
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    pub fn clear(&mut self) {
        self.faults.clear();
    }
}
