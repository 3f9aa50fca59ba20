// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use super::Instance;
use halbench_config::TIM6_BASE;

/// Basic timer TIM6.
pub const TIM6: Instance = Instance(TIM6_BASE);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CounterMode {
    #[default]
    Up = 0x0000_0000,
    Down = 0x0000_0010,
    CenterAligned1 = 0x0000_0020,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ClockDivision {
    #[default]
    Div1 = 0x0000_0000,
    Div2 = 0x0000_0100,
    Div4 = 0x0000_0200,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AutoReloadPreload {
    #[default]
    Disable = 0x0000_0000,
    Enable = 0x0000_0080,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimBaseInit {
    pub prescaler: u32,
    pub counter_mode: CounterMode,
    pub period: u32,
    pub clock_division: ClockDivision,
    pub repetition_counter: u32,
    pub auto_reload_preload: AutoReloadPreload,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Lock {
    #[default]
    Unlocked,
    Locked,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimState {
    #[default]
    Reset,
    Ready,
    Busy,
    Timeout,
    Error,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimHandle {
    pub instance: Option<Instance>,
    pub init: TimBaseInit,
    pub channel: u32,
    pub lock: Lock,
    pub state: TimState,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MasterOutputTrigger {
    #[default]
    Reset = 0x0000_0000,
    Enable = 0x0000_0010,
    Update = 0x0000_0020,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MasterSlaveMode {
    #[default]
    Disable = 0x0000_0000,
    Enable = 0x0000_0080,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimMasterConfig {
    pub master_output_trigger: MasterOutputTrigger,
    pub master_slave_mode: MasterSlaveMode,
}
