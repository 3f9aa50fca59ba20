// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Host-side stand-in for the STM32F4 HAL.
//!
//! [`MockHal`] owns the four GPIO register blocks and a [`MockControl`]
//! record. Every entry point updates the record (call flags, counters, last
//! arguments) and returns the status injected for it. Nothing here waits or
//! touches real hardware, so a whole suite runs in near-zero time.

use crate::hal::{Hal, HalStatus};
use crate::peripherals::gpio::{GpioInit, GpioPort, PinState, Pins, Port};
use crate::peripherals::rcc::{ClkInit, ClockGate, FlashLatency, OscInit, VoltageScale};
use crate::peripherals::timer::{TimHandle, TimMasterConfig};
use crate::peripherals::uart::UartHandle;
use crate::snapshot::MockSnapshot;
use serde::Serialize;
use tracing::trace;

/// Mocked entry points whose return status can be injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Initializer {
    HalInit,
    RccOscConfig,
    RccClockConfig,
    UartInit,
    TimInit,
}

impl Initializer {
    pub const ALL: [Initializer; 5] = [
        Initializer::HalInit,
        Initializer::RccOscConfig,
        Initializer::RccClockConfig,
        Initializer::UartInit,
        Initializer::TimInit,
    ];
}

/// Injected return values, one per initializer. All `Ok` by default.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct InjectedReturns {
    pub hal_init: HalStatus,
    pub rcc_osc_config: HalStatus,
    pub rcc_clk_config: HalStatus,
    pub uart_init: HalStatus,
    pub tim_init: HalStatus,
}

/// Call tracking for every mocked entry point.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MockControl {
    pub hal_init_called: bool,
    pub rcc_osc_config_called: bool,
    pub system_clock_config_called: bool,
    pub gpio_init_called: bool,
    pub uart_init_called: bool,
    pub tim_init_called: bool,
    pub irq_disabled: bool,
    pub delay_call_count: u32,
    pub last_delay_value: u32,
    pub gpio_toggle_count: u32,
    pub last_gpio_port: Option<Port>,
    pub last_gpio_pin: Pins,
    pub last_gpio_init: Option<(Port, GpioInit)>,
    pub enabled_clocks: ClockGate,
    pub voltage_scale: Option<VoltageScale>,
    pub returns: InjectedReturns,
}

#[derive(Debug, Default, Clone)]
pub struct MockHal {
    control: MockControl,
    ports: [GpioPort; 4],
}

impl MockHal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every flag, counter and register and restore every injected
    /// status to `Ok`.
    pub fn reset(&mut self) {
        self.control = MockControl::default();
        self.ports = Default::default();
        trace!("mock: reset");
    }

    pub fn control(&self) -> &MockControl {
        &self.control
    }

    pub fn port(&self, port: Port) -> &GpioPort {
        &self.ports[port.index()]
    }

    pub fn port_mut(&mut self, port: Port) -> &mut GpioPort {
        &mut self.ports[port.index()]
    }

    pub fn set_return(&mut self, which: Initializer, status: HalStatus) {
        let returns = &mut self.control.returns;
        match which {
            Initializer::HalInit => returns.hal_init = status,
            Initializer::RccOscConfig => returns.rcc_osc_config = status,
            Initializer::RccClockConfig => returns.rcc_clk_config = status,
            Initializer::UartInit => returns.uart_init = status,
            Initializer::TimInit => returns.tim_init = status,
        }
    }

    pub fn return_status(&self, which: Initializer) -> HalStatus {
        let returns = &self.control.returns;
        match which {
            Initializer::HalInit => returns.hal_init,
            Initializer::RccOscConfig => returns.rcc_osc_config,
            Initializer::RccClockConfig => returns.rcc_clk_config,
            Initializer::UartInit => returns.uart_init,
            Initializer::TimInit => returns.tim_init,
        }
    }

    pub fn set_hal_init_return(&mut self, status: HalStatus) {
        self.set_return(Initializer::HalInit, status);
    }

    /// Sets both the oscillator and the bus clock configuration status.
    pub fn set_rcc_config_return(&mut self, status: HalStatus) {
        self.set_return(Initializer::RccOscConfig, status);
        self.set_return(Initializer::RccClockConfig, status);
    }

    pub fn set_rcc_osc_config_return(&mut self, status: HalStatus) {
        self.set_return(Initializer::RccOscConfig, status);
    }

    pub fn set_rcc_clk_config_return(&mut self, status: HalStatus) {
        self.set_return(Initializer::RccClockConfig, status);
    }

    pub fn set_uart_init_return(&mut self, status: HalStatus) {
        self.set_return(Initializer::UartInit, status);
    }

    pub fn set_tim_init_return(&mut self, status: HalStatus) {
        self.set_return(Initializer::TimInit, status);
    }

    pub fn delay_call_count(&self) -> u32 {
        self.control.delay_call_count
    }

    pub fn last_delay_value(&self) -> u32 {
        self.control.last_delay_value
    }

    pub fn gpio_toggle_count(&self) -> u32 {
        self.control.gpio_toggle_count
    }

    pub fn last_gpio_port(&self) -> Option<Port> {
        self.control.last_gpio_port
    }

    pub fn last_gpio_pin(&self) -> Pins {
        self.control.last_gpio_pin
    }

    pub fn snapshot(&self) -> serde_json::Value {
        let snapshot = MockSnapshot::capture(&self.control, &self.ports);
        serde_json::to_value(&snapshot).unwrap_or(serde_json::Value::Null)
    }
}

impl Hal for MockHal {
    fn init(&mut self) -> HalStatus {
        trace!("HAL_Init");
        self.control.hal_init_called = true;
        self.control.returns.hal_init
    }

    fn rcc_osc_config(&mut self, osc: &OscInit) -> HalStatus {
        trace!("HAL_RCC_OscConfig({:?})", osc.oscillator_type);
        self.control.rcc_osc_config_called = true;
        self.control.returns.rcc_osc_config
    }

    fn rcc_clock_config(&mut self, clk: &ClkInit, latency: FlashLatency) -> HalStatus {
        trace!("HAL_RCC_ClockConfig({:?}, {:?})", clk.sysclk_source, latency);
        self.control.system_clock_config_called = true;
        self.control.returns.rcc_clk_config
    }

    fn enable_clock(&mut self, gates: ClockGate) {
        trace!("RCC clock enable {:?}", gates);
        self.control.enabled_clocks |= gates;
    }

    fn set_voltage_scaling(&mut self, scale: VoltageScale) {
        trace!("PWR voltage scaling {:?}", scale);
        self.control.voltage_scale = Some(scale);
    }

    fn gpio_init(&mut self, port: Port, init: &GpioInit) {
        trace!("HAL_GPIO_Init({}, {:?})", port.name(), init.pins);
        self.control.gpio_init_called = true;
        self.control.last_gpio_init = Some((port, *init));
    }

    fn gpio_write_pin(&mut self, port: Port, pins: Pins, state: PinState) {
        trace!("HAL_GPIO_WritePin({}, {:?}, {:?})", port.name(), pins, state);
        self.port_mut(port).write_pin(pins, state);
    }

    fn gpio_toggle_pin(&mut self, port: Port, pins: Pins) {
        trace!("HAL_GPIO_TogglePin({}, {:?})", port.name(), pins);
        self.control.gpio_toggle_count += 1;
        self.control.last_gpio_port = Some(port);
        self.control.last_gpio_pin = pins;
        self.port_mut(port).toggle_pin(pins);
    }

    fn gpio_read_pin(&self, port: Port, pins: Pins) -> PinState {
        self.port(port).read_pin(pins)
    }

    fn uart_init(&mut self, huart: &mut UartHandle) -> HalStatus {
        trace!("HAL_UART_Init({:?})", huart.instance);
        self.control.uart_init_called = true;
        self.control.returns.uart_init
    }

    fn tim_base_init(&mut self, htim: &mut TimHandle) -> HalStatus {
        trace!("HAL_TIM_Base_Init({:?})", htim.instance);
        self.control.tim_init_called = true;
        self.control.returns.tim_init
    }

    fn tim_master_config_synchronization(
        &mut self,
        htim: &mut TimHandle,
        config: &TimMasterConfig,
    ) -> HalStatus {
        trace!(
            "HAL_TIMEx_MasterConfigSynchronization({:?}, {:?})",
            htim.instance,
            config.master_output_trigger
        );
        self.control.returns.tim_init
    }

    fn delay(&mut self, ms: u32) {
        trace!("HAL_Delay({})", ms);
        self.control.delay_call_count += 1;
        self.control.last_delay_value = ms;
    }

    fn disable_irq(&mut self) {
        trace!("__disable_irq");
        self.control.irq_disabled = true;
    }
}
