// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{SimResult, SimulationError};
use halbench_config::{GPIOA_BASE, GPIOB_BASE, GPIOC_BASE, GPIOD_BASE};
use serde::Serialize;

bitflags::bitflags! {
    /// GPIO pin selection mask.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(transparent)]
    pub struct Pins: u16 {
        const PIN_0 = 1 << 0;
        const PIN_1 = 1 << 1;
        const PIN_2 = 1 << 2;
        const PIN_3 = 1 << 3;
        const PIN_4 = 1 << 4;
        const PIN_5 = 1 << 5;
        const PIN_6 = 1 << 6;
        const PIN_7 = 1 << 7;
        const PIN_8 = 1 << 8;
        const PIN_9 = 1 << 9;
        const PIN_10 = 1 << 10;
        const PIN_11 = 1 << 11;
        const PIN_12 = 1 << 12;
        const PIN_13 = 1 << 13;
        const PIN_14 = 1 << 14;
        const PIN_15 = 1 << 15;
    }
}

impl Pins {
    /// Single pin `n` (0..=15).
    pub fn pin(n: u8) -> Self {
        Self::from_bits_truncate(1u16.checked_shl(n as u32).unwrap_or(0))
    }

    fn mask(self) -> u32 {
        self.bits() as u32
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PinState {
    #[default]
    Reset = 0,
    Set = 1,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GpioMode {
    #[default]
    Input = 0x00,
    OutputPushPull = 0x01,
    OutputOpenDrain = 0x11,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pull {
    #[default]
    None = 0x00,
    Up = 0x01,
    Down = 0x02,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Speed {
    /// Up to 2 MHz.
    #[default]
    Low = 0x00,
    Medium = 0x01,
    High = 0x02,
    VeryHigh = 0x03,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GpioInit {
    pub pins: Pins,
    pub mode: GpioMode,
    pub pull: Pull,
    pub speed: Speed,
}

/// GPIO port identity. Each port maps to one independent register block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Port {
    A,
    B,
    C,
    D,
}

pub const GPIOA: Port = Port::A;
pub const GPIOB: Port = Port::B;
pub const GPIOC: Port = Port::C;
pub const GPIOD: Port = Port::D;

impl Port {
    pub const ALL: [Port; 4] = [Port::A, Port::B, Port::C, Port::D];

    pub fn base(self) -> u32 {
        match self {
            Port::A => GPIOA_BASE,
            Port::B => GPIOB_BASE,
            Port::C => GPIOC_BASE,
            Port::D => GPIOD_BASE,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Port::A => "GPIOA",
            Port::B => "GPIOB",
            Port::C => "GPIOC",
            Port::D => "GPIOD",
        }
    }
}

pub const MODER: u64 = 0x00;
pub const OTYPER: u64 = 0x04;
pub const OSPEEDR: u64 = 0x08;
pub const PUPDR: u64 = 0x0C;
pub const IDR: u64 = 0x10;
pub const ODR: u64 = 0x14;
pub const BSRR: u64 = 0x18;
pub const LCKR: u64 = 0x1C;
pub const AFRL: u64 = 0x20;
pub const AFRH: u64 = 0x24;

/// STM32F4 GPIO register block.
///
/// Fields are plain words so host tests can poke the input register and read
/// back the output register directly.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct GpioPort {
    pub moder: u32,   // 0x00: port mode
    pub otyper: u32,  // 0x04: output type
    pub ospeedr: u32, // 0x08: output speed
    pub pupdr: u32,   // 0x0C: pull-up/pull-down
    pub idr: u32,     // 0x10: input data
    pub odr: u32,     // 0x14: output data
    pub bsrr: u32,    // 0x18: bit set/reset
    pub lckr: u32,    // 0x1C: configuration lock
    pub afr: [u32; 2], // 0x20-0x24: alternate function low/high
}

impl GpioPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_pin(&mut self, pins: Pins, state: PinState) {
        match state {
            PinState::Set => self.odr |= pins.mask(),
            PinState::Reset => self.odr &= !pins.mask(),
        }
    }

    pub fn toggle_pin(&mut self, pins: Pins) {
        self.odr ^= pins.mask();
    }

    /// `Set` only when every selected pin reads high.
    pub fn read_pin(&self, pins: Pins) -> PinState {
        let mask = pins.mask();
        if mask != 0 && self.idr & mask == mask {
            PinState::Set
        } else {
            PinState::Reset
        }
    }
}

impl crate::Peripheral for GpioPort {
    fn read(&self, offset: u64) -> SimResult<u32> {
        match offset {
            MODER => Ok(self.moder),
            OTYPER => Ok(self.otyper),
            OSPEEDR => Ok(self.ospeedr),
            PUPDR => Ok(self.pupdr),
            IDR => Ok(self.idr),
            ODR => Ok(self.odr),
            // BSRR is write-only
            BSRR => Ok(0),
            LCKR => Ok(self.lckr),
            AFRL => Ok(self.afr[0]),
            AFRH => Ok(self.afr[1]),
            _ => Err(SimulationError::InvalidOffset(offset)),
        }
    }

    fn write(&mut self, offset: u64, value: u32) -> SimResult<()> {
        match offset {
            MODER => self.moder = value,
            OTYPER => self.otyper = value & 0xFFFF,
            OSPEEDR => self.ospeedr = value,
            PUPDR => self.pupdr = value,
            IDR => return Err(SimulationError::ReadOnly(offset)),
            ODR => self.odr = value & 0xFFFF,
            BSRR => {
                self.bsrr = value;
                let set = value & 0xFFFF;
                let reset = (value >> 16) & 0xFFFF;
                // BSx wins over BRx when both are written
                self.odr &= !reset;
                self.odr |= set;
                tracing::debug!("GPIO: BSRR {:#010x} -> ODR {:#06x}", value, self.odr);
            }
            LCKR => self.lckr = value,
            AFRL => self.afr[0] = value,
            AFRH => self.afr[1] = value,
            _ => return Err(SimulationError::InvalidOffset(offset)),
        }
        Ok(())
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
