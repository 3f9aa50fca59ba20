// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use super::Instance;
use halbench_config::UART4_BASE;

pub const UART4: Instance = Instance(UART4_BASE);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WordLength {
    #[default]
    Bits8 = 0x0000_0000,
    Bits9 = 0x0000_1000,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    #[default]
    One = 0x0000_0000,
    Two = 0x0000_2000,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    #[default]
    None = 0x0000_0000,
    Even = 0x0000_0400,
    Odd = 0x0000_0600,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UartMode {
    #[default]
    Disabled = 0x0000_0000,
    Rx = 0x0000_0004,
    Tx = 0x0000_0008,
    TxRx = 0x0000_000C,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HwFlowControl {
    #[default]
    None = 0x0000_0000,
    Rts = 0x0000_0100,
    Cts = 0x0000_0200,
    RtsCts = 0x0000_0300,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OverSampling {
    #[default]
    By16 = 0x0000_0000,
    By8 = 0x0000_8000,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UartInit {
    pub baud_rate: u32,
    pub word_length: WordLength,
    pub stop_bits: StopBits,
    pub parity: Parity,
    pub mode: UartMode,
    pub hw_flow_ctl: HwFlowControl,
    pub over_sampling: OverSampling,
}

/// UART handle. `Default` is the zeroed handle the firmware starts from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UartHandle {
    pub instance: Option<Instance>,
    pub init: UartInit,
    pub tx_xfer_size: u16,
    pub tx_xfer_count: u16,
    pub rx_xfer_size: u16,
    pub rx_xfer_count: u16,
}
