// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::clock::{ClockConfig, Stm32f407Clock};
use crate::error::{ErrorHandler, Fault, FaultStep, InitError};
use halbench_config::{
    BLINK_DELAY_MS, HEARTBEAT_PIN_MASK, LED_PINS_MASK, TIM6_PERIOD, TIM6_PRESCALER,
    UART4_BAUD_RATE,
};
use halbench_core::peripherals::timer::{
    AutoReloadPreload, CounterMode, MasterOutputTrigger, MasterSlaveMode, TimBaseInit,
};
use halbench_core::peripherals::uart::{
    HwFlowControl, OverSampling, Parity, StopBits, UartInit, UartMode, WordLength,
};
use halbench_core::{
    ClockGate, GpioInit, GpioMode, Hal, PinState, Pins, Port, Pull, Speed, TimHandle,
    TimMasterConfig, UartHandle, GPIOD, TIM6, UART4,
};
use tracing::{debug, info, warn};

pub const LED_PORT: Port = GPIOD;
/// PD12..PD15.
pub const LED_PINS: Pins = Pins::from_bits_truncate(LED_PINS_MASK);
pub const HEARTBEAT_LED: Pins = Pins::from_bits_truncate(HEARTBEAT_PIN_MASK);

/// Outcome of a completed init sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Clock and peripheral failures absorbed by the error handler.
    ///
    /// These do not turn the sequence into an `Err`: only `HAL_Init` failure
    /// does. Callers that care must inspect this list.
    pub handled_faults: Vec<Fault>,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.handled_faults.is_empty()
    }
}

/// 0 for a completed sequence, 1 when `HAL_Init` failed.
pub fn init_exit_code(result: &Result<InitReport, InitError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}

/// The blinky firmware: peripheral handles plus the startup and loop logic.
#[derive(Debug, Clone)]
pub struct Firmware<C: ClockConfig = Stm32f407Clock> {
    pub huart4: UartHandle,
    pub htim6: TimHandle,
    pub errors: ErrorHandler,
    clock: C,
}

impl Default for Firmware<Stm32f407Clock> {
    fn default() -> Self {
        Self::new()
    }
}

impl Firmware<Stm32f407Clock> {
    pub fn new() -> Self {
        Self::with_clock(Stm32f407Clock::default())
    }
}

impl<C: ClockConfig> Firmware<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            huart4: UartHandle::default(),
            htim6: TimHandle::default(),
            errors: ErrorHandler::default(),
            clock,
        }
    }

    pub fn with_error_handler(mut self, errors: ErrorHandler) -> Self {
        self.errors = errors;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run the startup sequence without entering the main loop.
    pub fn init_only<H: Hal>(&mut self, hal: &mut H) -> Result<InitReport, InitError> {
        hal.init().check().map_err(InitError::HalInit)?;

        let first_fault = self.errors.faults().len();
        self.system_clock_config(hal);
        self.gpio_init(hal);
        self.uart4_init(hal);
        self.tim6_init(hal);

        let handled_faults = self.errors.faults()[first_fault..].to_vec();
        if handled_faults.is_empty() {
            info!("Init sequence complete");
        } else {
            warn!(
                "Init sequence complete with {} handled fault(s); reporting success",
                handled_faults.len()
            );
        }
        Ok(InitReport { handled_faults })
    }

    /// One pass of the blink loop.
    pub fn single_iteration<H: Hal>(&mut self, hal: &mut H) {
        hal.gpio_toggle_pin(LED_PORT, HEARTBEAT_LED);
        hal.delay(BLINK_DELAY_MS);
    }

    pub fn system_clock_config<H: Hal>(&mut self, hal: &mut H) {
        debug!("SystemClock_Config");
        self.clock.configure(hal, &mut self.errors);
    }

    pub fn gpio_init<H: Hal>(&mut self, hal: &mut H) {
        debug!("MX_GPIO_Init");
        hal.enable_clock(ClockGate::GPIOC);
        hal.enable_clock(ClockGate::GPIOH);
        hal.enable_clock(ClockGate::GPIOA);
        hal.enable_clock(ClockGate::GPIOD);

        hal.gpio_write_pin(LED_PORT, LED_PINS, PinState::Reset);

        let init = GpioInit {
            pins: LED_PINS,
            mode: GpioMode::OutputPushPull,
            pull: Pull::None,
            speed: Speed::Low,
        };
        hal.gpio_init(LED_PORT, &init);
    }

    pub fn uart4_init<H: Hal>(&mut self, hal: &mut H) {
        debug!("MX_UART4_Init");
        self.huart4.instance = Some(UART4);
        self.huart4.init = UartInit {
            baud_rate: UART4_BAUD_RATE,
            word_length: WordLength::Bits8,
            stop_bits: StopBits::One,
            parity: Parity::None,
            mode: UartMode::TxRx,
            hw_flow_ctl: HwFlowControl::None,
            over_sampling: OverSampling::By16,
        };
        if let Err(error) = hal.uart_init(&mut self.huart4).check() {
            self.errors.handle(hal, Fault::new(FaultStep::UartInit, error));
        }
    }

    pub fn tim6_init<H: Hal>(&mut self, hal: &mut H) {
        debug!("MX_TIM6_Init");
        self.htim6.instance = Some(TIM6);
        self.htim6.init = TimBaseInit {
            prescaler: TIM6_PRESCALER,
            counter_mode: CounterMode::Up,
            period: TIM6_PERIOD,
            auto_reload_preload: AutoReloadPreload::Disable,
            ..self.htim6.init
        };
        if let Err(error) = hal.tim_base_init(&mut self.htim6).check() {
            self.errors.handle(hal, Fault::new(FaultStep::TimBaseInit, error));
        }

        let master = TimMasterConfig {
            master_output_trigger: MasterOutputTrigger::Reset,
            master_slave_mode: MasterSlaveMode::Disable,
        };
        if let Err(error) = hal
            .tim_master_config_synchronization(&mut self.htim6, &master)
            .check()
        {
            self.errors
                .handle(hal, Fault::new(FaultStep::TimMasterConfig, error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ResetClock;
    use halbench_config::SYSTEM_CORE_CLOCK;
    use halbench_core::{HalError, HalStatus, MockHal};

    fn setup() -> (Firmware, MockHal) {
        (
            Firmware::new().with_error_handler(ErrorHandler::new(true)),
            MockHal::new(),
        )
    }

    #[test]
    fn test_init_sequence_success() {
        let (mut fw, mut hal) = setup();
        let result = fw.init_only(&mut hal);
        assert_eq!(init_exit_code(&result), 0);
        assert!(result.unwrap().is_clean());

        let c = hal.control();
        assert!(c.hal_init_called);
        assert!(c.rcc_osc_config_called);
        assert!(c.system_clock_config_called);
        assert!(c.gpio_init_called);
        assert!(c.uart_init_called);
        assert!(c.tim_init_called);
        assert!(!c.irq_disabled);
    }

    #[test]
    fn test_hal_init_failure_short_circuits() {
        for status in [HalStatus::Error, HalStatus::Busy, HalStatus::Timeout] {
            let (mut fw, mut hal) = setup();
            hal.set_hal_init_return(status);

            let result = fw.init_only(&mut hal);
            assert_eq!(init_exit_code(&result), 1);
            assert!(matches!(result, Err(InitError::HalInit(_))));

            let c = hal.control();
            assert!(c.hal_init_called);
            assert!(!c.rcc_osc_config_called);
            assert!(!c.system_clock_config_called);
            assert!(!c.gpio_init_called);
            assert!(!c.uart_init_called);
            assert!(!c.tim_init_called);
            assert!(fw.errors.faults().is_empty());
        }
    }

    #[test]
    fn test_uart_failure_is_handled_but_init_succeeds() {
        let (mut fw, mut hal) = setup();
        hal.set_uart_init_return(HalStatus::Error);

        let report = fw.init_only(&mut hal).unwrap();
        assert_eq!(
            report.handled_faults,
            vec![Fault::new(FaultStep::UartInit, HalError::Error)]
        );
        assert!(hal.control().irq_disabled);
        // later steps still ran
        assert!(hal.control().tim_init_called);
    }

    #[test]
    fn test_tim_failure_hits_base_and_master_config() {
        let (mut fw, mut hal) = setup();
        hal.set_tim_init_return(HalStatus::Busy);

        let report = fw.init_only(&mut hal).unwrap();
        let steps: Vec<_> = report.handled_faults.iter().map(|f| f.step).collect();
        assert_eq!(steps, vec![FaultStep::TimBaseInit, FaultStep::TimMasterConfig]);
        assert!(report
            .handled_faults
            .iter()
            .all(|f| f.error == HalError::Busy));
    }

    #[test]
    fn test_clock_failure_continues_to_bus_config() {
        let (mut fw, mut hal) = setup();
        hal.set_rcc_osc_config_return(HalStatus::Timeout);

        fw.system_clock_config(&mut hal);
        assert!(hal.control().system_clock_config_called);
        assert_eq!(
            fw.errors.faults(),
            &[Fault::new(FaultStep::OscConfig, HalError::Timeout)]
        );
    }

    #[test]
    fn test_report_only_lists_faults_from_this_run() {
        let (mut fw, mut hal) = setup();
        hal.set_uart_init_return(HalStatus::Error);
        fw.uart4_init(&mut hal);

        hal.reset();
        let report = fw.init_only(&mut hal).unwrap();
        assert!(report.is_clean());
        assert_eq!(fw.errors.faults().len(), 1);
    }

    #[test]
    fn test_system_clock_config_profile() {
        let (mut fw, mut hal) = setup();
        fw.system_clock_config(&mut hal);

        let c = hal.control();
        assert!(c.system_clock_config_called);
        assert!(c.enabled_clocks.contains(ClockGate::PWR));
        assert_eq!(
            c.voltage_scale,
            Some(halbench_core::VoltageScale::Scale1)
        );
        assert_eq!(fw.clock().sysclk_hz(), Some(SYSTEM_CORE_CLOCK));
    }

    #[test]
    fn test_default_clock_config_is_noop() {
        let mut fw = Firmware::with_clock(ResetClock).with_error_handler(ErrorHandler::new(true));
        let mut hal = MockHal::new();
        fw.init_only(&mut hal).unwrap();
        assert!(!hal.control().rcc_osc_config_called);
        assert!(!hal.control().system_clock_config_called);
        assert!(hal.control().gpio_init_called);
    }

    #[test]
    fn test_gpio_init_configures_leds() {
        let (mut fw, mut hal) = setup();
        hal.port_mut(GPIOD).odr = 0xFFFF;
        fw.gpio_init(&mut hal);

        assert_eq!(hal.port(GPIOD).odr, 0x0FFF);
        let (port, init) = hal.control().last_gpio_init.unwrap();
        assert_eq!(port, GPIOD);
        assert_eq!(init.pins, Pins::PIN_12 | Pins::PIN_13 | Pins::PIN_14 | Pins::PIN_15);
        assert_eq!(init.mode, GpioMode::OutputPushPull);
        assert_eq!(init.pull, Pull::None);
        assert_eq!(init.speed, Speed::Low);
        assert_eq!(
            hal.control().enabled_clocks,
            ClockGate::GPIOA | ClockGate::GPIOC | ClockGate::GPIOD | ClockGate::GPIOH
        );
        // writes are not toggles
        assert_eq!(hal.gpio_toggle_count(), 0);
    }

    #[test]
    fn test_uart4_parameters() {
        let (mut fw, mut hal) = setup();
        fw.uart4_init(&mut hal);

        assert_eq!(fw.huart4.instance, Some(UART4));
        assert_eq!(fw.huart4.init.baud_rate, 115_200);
        assert_eq!(fw.huart4.init.word_length, WordLength::Bits8);
        assert_eq!(fw.huart4.init.stop_bits, StopBits::One);
        assert_eq!(fw.huart4.init.parity, Parity::None);
        assert_eq!(fw.huart4.init.mode, UartMode::TxRx);
        assert_eq!(fw.huart4.init.over_sampling, OverSampling::By16);
    }

    #[test]
    fn test_tim6_parameters() {
        let (mut fw, mut hal) = setup();
        fw.tim6_init(&mut hal);

        assert_eq!(fw.htim6.instance, Some(TIM6));
        assert_eq!(fw.htim6.init.prescaler, 0);
        assert_eq!(fw.htim6.init.period, 65_535);
        assert_eq!(fw.htim6.init.counter_mode, CounterMode::Up);
        assert_eq!(fw.htim6.init.auto_reload_preload, AutoReloadPreload::Disable);
    }

    #[test]
    fn test_single_iteration_counts() {
        let (mut fw, mut hal) = setup();
        for n in 1..=7 {
            fw.single_iteration(&mut hal);
            assert_eq!(hal.gpio_toggle_count(), n);
            assert_eq!(hal.delay_call_count(), n);
            assert_eq!(hal.last_delay_value(), 500);
            assert_eq!(hal.last_gpio_port(), Some(GPIOD));
            assert_eq!(hal.last_gpio_pin(), Pins::PIN_14);
        }
        // odd number of toggles leaves the LED on
        assert_eq!(hal.port(GPIOD).odr, Pins::PIN_14.bits() as u32);
    }

    #[test]
    fn test_error_handler_returns_in_test_mode() {
        let mut errors = ErrorHandler::new(true);
        assert!(errors.is_test_mode());
        assert_eq!(
            ErrorHandler::default().is_test_mode(),
            !cfg!(feature = "halt-on-error")
        );
        let mut hal = MockHal::new();
        errors.handle(&mut hal, Fault::new(FaultStep::UartInit, HalError::Error));
        assert!(hal.control().irq_disabled);
        assert_eq!(errors.faults().len(), 1);
        errors.clear();
        assert!(errors.faults().is_empty());
    }

    #[test]
    fn test_fault_display() {
        let fault = Fault::new(FaultStep::TimBaseInit, HalError::Timeout);
        assert_eq!(fault.to_string(), "TimBaseInit failed: HAL operation timed out");
        let err = InitError::HalInit(HalError::Error);
        assert_eq!(err.to_string(), "HAL init failed: HAL reported an error");
        assert_eq!(err.exit_code(), 1);
    }
}
