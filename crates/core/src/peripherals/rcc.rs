// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Reset and clock control parameter blocks.

use serde::Serialize;

bitflags::bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct OscillatorType: u32 {
        const HSI = 0x0000_0001;
        const HSE = 0x0000_0002;
        const LSE = 0x0000_0004;
        const LSI = 0x0000_0008;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct ClockType: u32 {
        const HCLK = 0x0000_0001;
        const SYSCLK = 0x0000_0002;
        const PCLK1 = 0x0000_0004;
        const PCLK2 = 0x0000_0008;
    }
}

bitflags::bitflags! {
    /// Peripheral clock gates (`__HAL_RCC_xxx_CLK_ENABLE`).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
    #[serde(transparent)]
    pub struct ClockGate: u32 {
        const PWR = 1 << 0;
        const GPIOA = 1 << 1;
        const GPIOB = 1 << 2;
        const GPIOC = 1 << 3;
        const GPIOD = 1 << 4;
        const GPIOH = 1 << 5;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OscState {
    #[default]
    Off = 0,
    On = 1,
    Bypass = 5,
}

/// HSI trim applied when the caller keeps the factory calibration.
pub const HSI_CALIBRATION_DEFAULT: u32 = 16;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PllState {
    /// PLL configuration left untouched.
    #[default]
    None = 0,
    On = 1,
    Off = 2,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PllSource {
    #[default]
    Hsi = 0x0000_0000,
    Hse = 0x0040_0000,
}

/// Main PLL dividers: VCO in = src / M, VCO out = in * N, SYSCLK = out / P.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PllInit {
    pub state: PllState,
    pub source: PllSource,
    pub m: u32,
    pub n: u32,
    pub p: u32,
    pub q: u32,
}

pub const PLLP_DIV2: u32 = 2;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OscInit {
    pub oscillator_type: OscillatorType,
    pub hse_state: OscState,
    pub lse_state: OscState,
    pub hsi_state: OscState,
    pub hsi_calibration: u32,
    pub lsi_state: OscState,
    pub pll: PllInit,
}

impl PllInit {
    /// SYSCLK produced from a source oscillator of `src_hz`, if the dividers are usable.
    pub fn sysclk_hz(&self, src_hz: u32) -> Option<u32> {
        if self.m == 0 || self.p == 0 {
            return None;
        }
        let vco = (src_hz as u64 / self.m as u64) * self.n as u64;
        u32::try_from(vco / self.p as u64).ok()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SysclkSource {
    #[default]
    Hsi = 0,
    Hse = 1,
    PllClk = 2,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AhbDivider {
    #[default]
    Div1 = 0x0000_0000,
    Div2 = 0x0000_0080,
    Div4 = 0x0000_0090,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ApbDivider {
    #[default]
    Div1 = 0x0000_0000,
    Div2 = 0x0000_1000,
    Div4 = 0x0000_1400,
    Div8 = 0x0000_1800,
    Div16 = 0x0000_1C00,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClkInit {
    pub clock_type: ClockType,
    pub sysclk_source: SysclkSource,
    pub ahb_divider: AhbDivider,
    pub apb1_divider: ApbDivider,
    pub apb2_divider: ApbDivider,
}

/// Flash wait states.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlashLatency {
    #[default]
    Ws0 = 0,
    Ws1 = 1,
    Ws2 = 2,
    Ws3 = 3,
    Ws4 = 4,
    Ws5 = 5,
    Ws6 = 6,
    Ws7 = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VoltageScale {
    Scale1 = 0x0000_4000,
    Scale2 = 0x0000_8000,
    Scale3 = 0x0000_C000,
}
