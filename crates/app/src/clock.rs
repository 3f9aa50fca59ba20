// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::error::{ErrorHandler, Fault, FaultStep};
use halbench_core::peripherals::rcc::{
    AhbDivider, ApbDivider, ClockType, OscState, OscillatorType, PllInit, PllSource, PllState,
    SysclkSource, HSI_CALIBRATION_DEFAULT, PLLP_DIV2,
};
use halbench_core::{ClkInit, ClockGate, FlashLatency, Hal, OscInit, VoltageScale};
use tracing::debug;

pub const HSI_HZ: u32 = 16_000_000;

/// System clock setup step of the init sequence.
///
/// The default body leaves the clock tree untouched. Boards override it with
/// their oscillator and bus settings.
pub trait ClockConfig {
    fn configure<H: Hal>(&mut self, hal: &mut H, errors: &mut ErrorHandler) {
        let _ = (hal, errors);
    }
}

/// Keeps the reset clock tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResetClock;

impl ClockConfig for ResetClock {}

/// 168 MHz from HSI through the main PLL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stm32f407Clock {
    pub osc: OscInit,
    pub clk: ClkInit,
    pub latency: FlashLatency,
}

impl Default for Stm32f407Clock {
    fn default() -> Self {
        Self {
            osc: OscInit {
                oscillator_type: OscillatorType::HSI,
                hsi_state: OscState::On,
                hsi_calibration: HSI_CALIBRATION_DEFAULT,
                pll: PllInit {
                    state: PllState::On,
                    source: PllSource::Hsi,
                    m: 8,
                    n: 168,
                    p: PLLP_DIV2,
                    q: 4,
                },
                ..Default::default()
            },
            clk: ClkInit {
                clock_type: ClockType::HCLK
                    | ClockType::SYSCLK
                    | ClockType::PCLK1
                    | ClockType::PCLK2,
                sysclk_source: SysclkSource::PllClk,
                ahb_divider: AhbDivider::Div1,
                apb1_divider: ApbDivider::Div4,
                apb2_divider: ApbDivider::Div2,
            },
            latency: FlashLatency::Ws5,
        }
    }
}

impl Stm32f407Clock {
    pub fn sysclk_hz(&self) -> Option<u32> {
        self.osc.pll.sysclk_hz(HSI_HZ)
    }
}

impl ClockConfig for Stm32f407Clock {
    fn configure<H: Hal>(&mut self, hal: &mut H, errors: &mut ErrorHandler) {
        hal.enable_clock(ClockGate::PWR);
        hal.set_voltage_scaling(VoltageScale::Scale1);

        debug!("RCC: oscillator {:?}, PLL {:?}", self.osc.oscillator_type, self.osc.pll);
        if let Err(error) = hal.rcc_osc_config(&self.osc).check() {
            errors.handle(hal, Fault::new(FaultStep::OscConfig, error));
        }

        debug!("RCC: bus clocks {:?}, latency {:?}", self.clk.clock_type, self.latency);
        if let Err(error) = hal.rcc_clock_config(&self.clk, self.latency).check() {
            errors.handle(hal, Fault::new(FaultStep::ClockConfig, error));
        }
    }
}
