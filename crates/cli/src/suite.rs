// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Firmware test suite: exercises the blinky shim against the mock HAL.

use halbench_app::{init_exit_code, ErrorHandler, Fault, FaultStep, Firmware, HEARTBEAT_LED};
use halbench_config::{BLINK_DELAY_MS, TIM6_PERIOD, TIM6_PRESCALER, UART4_BAUD_RATE};
use halbench_core::peripherals::timer::{AutoReloadPreload, CounterMode};
use halbench_core::peripherals::uart::{Parity, StopBits, WordLength};
use halbench_core::{Hal, HalError, HalStatus, MockHal, PinState, GPIOD, TIM6, UART4};
use halbench_harness::{
    run_test, test_assert_bits_high, test_assert_bits_low, test_assert_equal,
    test_assert_equal_int, test_assert_false, test_assert_true, Fixture, Unity,
};

/// Fresh mock HAL and firmware shim for every case.
#[derive(Debug)]
pub struct FirmwareFixture {
    pub hal: MockHal,
    pub fw: Firmware,
}

impl FirmwareFixture {
    pub fn new() -> Self {
        Self {
            hal: MockHal::new(),
            fw: Self::fresh_firmware(),
        }
    }

    fn fresh_firmware() -> Firmware {
        Firmware::new().with_error_handler(ErrorHandler::new(true))
    }
}

impl Default for FirmwareFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture for FirmwareFixture {
    fn set_up(&mut self) {
        self.hal.reset();
        self.fw = Self::fresh_firmware();
    }

    fn diagnostics(&self) -> Option<serde_json::Value> {
        Some(self.hal.snapshot())
    }
}

pub const CASE_COUNT: u32 = 21;

/// Register and run every case in order.
pub fn run_all(t: &mut Unity, fx: &mut FirmwareFixture) {
    // System initialization
    run_test!(t, fx, test_hal_init_success);
    run_test!(t, fx, test_hal_init_failure);
    run_test!(t, fx, test_system_clock_config);
    run_test!(t, fx, test_main_init_sequence_success);
    run_test!(t, fx, test_main_init_hal_failure);

    // GPIO
    run_test!(t, fx, test_gpio_init);
    run_test!(t, fx, test_gpio_toggle_pin);
    run_test!(t, fx, test_gpio_write_pin_set);
    run_test!(t, fx, test_gpio_write_pin_reset);
    run_test!(t, fx, test_gpio_read_pin);

    // UART
    run_test!(t, fx, test_uart_init_success);
    run_test!(t, fx, test_uart_baud_rate_configuration);

    // Timer
    run_test!(t, fx, test_tim6_init_success);
    run_test!(t, fx, test_timer_configuration_values);

    // Main loop
    run_test!(t, fx, test_main_loop_single_iteration);
    run_test!(t, fx, test_main_loop_multiple_iterations);

    // Delay
    run_test!(t, fx, test_hal_delay_function);
    run_test!(t, fx, test_different_delay_values);

    // Error handling
    run_test!(t, fx, test_error_handler_function);

    // Integration
    run_test!(t, fx, test_system_integration);
    run_test!(t, fx, test_system_with_peripheral_failures);
}

fn test_hal_init_success(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_hal_init_return(HalStatus::Ok);

    let result = fx.hal.init();

    test_assert_equal!(t, HalStatus::Ok, result);
    test_assert_true!(t, fx.hal.control().hal_init_called);
}

fn test_hal_init_failure(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_hal_init_return(HalStatus::Error);

    let result = fx.hal.init();

    test_assert_equal!(t, HalStatus::Error, result);
    test_assert_true!(t, fx.hal.control().hal_init_called);
}

fn test_system_clock_config(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_rcc_config_return(HalStatus::Ok);

    fx.fw.system_clock_config(&mut fx.hal);

    test_assert_true!(t, fx.hal.control().system_clock_config_called);
    test_assert_true!(t, fx.fw.errors.faults().is_empty());
}

fn test_main_init_sequence_success(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_hal_init_return(HalStatus::Ok);
    fx.hal.set_rcc_config_return(HalStatus::Ok);
    fx.hal.set_uart_init_return(HalStatus::Ok);
    fx.hal.set_tim_init_return(HalStatus::Ok);

    let result = fx.fw.init_only(&mut fx.hal);

    test_assert_equal_int!(t, 0, init_exit_code(&result));
    let control = fx.hal.control();
    test_assert_true!(t, control.hal_init_called);
    test_assert_true!(t, control.system_clock_config_called);
    test_assert_true!(t, control.gpio_init_called);
    test_assert_true!(t, control.uart_init_called);
    test_assert_true!(t, control.tim_init_called);
}

fn test_main_init_hal_failure(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_hal_init_return(HalStatus::Error);

    let result = fx.fw.init_only(&mut fx.hal);

    test_assert_equal_int!(t, 1, init_exit_code(&result));
    test_assert_true!(t, fx.hal.control().hal_init_called);
    test_assert_false!(t, fx.hal.control().system_clock_config_called);
}

fn test_gpio_init(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.fw.gpio_init(&mut fx.hal);

    test_assert_true!(t, fx.hal.control().gpio_init_called);
}

fn test_gpio_toggle_pin(t: &mut Unity, fx: &mut FirmwareFixture) {
    let initial_count = fx.hal.gpio_toggle_count();

    fx.hal.gpio_toggle_pin(GPIOD, HEARTBEAT_LED);

    test_assert_equal!(t, initial_count + 1, fx.hal.gpio_toggle_count());
    test_assert_equal!(t, Some(GPIOD), fx.hal.last_gpio_port());
    test_assert_equal!(t, HEARTBEAT_LED, fx.hal.last_gpio_pin());
}

fn test_gpio_write_pin_set(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.gpio_write_pin(GPIOD, HEARTBEAT_LED, PinState::Set);

    test_assert_bits_high!(t, HEARTBEAT_LED.bits(), fx.hal.port(GPIOD).odr);
}

fn test_gpio_write_pin_reset(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.gpio_write_pin(GPIOD, HEARTBEAT_LED, PinState::Set);

    fx.hal.gpio_write_pin(GPIOD, HEARTBEAT_LED, PinState::Reset);

    test_assert_bits_low!(t, HEARTBEAT_LED.bits(), fx.hal.port(GPIOD).odr);
}

fn test_gpio_read_pin(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.port_mut(GPIOD).idr = u32::from(HEARTBEAT_LED.bits());
    test_assert_equal!(t, PinState::Set, fx.hal.gpio_read_pin(GPIOD, HEARTBEAT_LED));

    fx.hal.port_mut(GPIOD).idr = 0;
    test_assert_equal!(t, PinState::Reset, fx.hal.gpio_read_pin(GPIOD, HEARTBEAT_LED));
}

fn test_uart_init_success(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_uart_init_return(HalStatus::Ok);

    fx.fw.uart4_init(&mut fx.hal);

    test_assert_true!(t, fx.hal.control().uart_init_called);
    let huart4 = &fx.fw.huart4;
    test_assert_equal!(t, Some(UART4), huart4.instance);
    test_assert_equal!(t, UART4_BAUD_RATE, huart4.init.baud_rate);
    test_assert_equal!(t, WordLength::Bits8, huart4.init.word_length);
    test_assert_equal!(t, StopBits::One, huart4.init.stop_bits);
    test_assert_equal!(t, Parity::None, huart4.init.parity);
}

fn test_uart_baud_rate_configuration(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.fw.uart4_init(&mut fx.hal);

    test_assert_equal_int!(t, 115_200, fx.fw.huart4.init.baud_rate);
}

fn test_tim6_init_success(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_tim_init_return(HalStatus::Ok);

    fx.fw.tim6_init(&mut fx.hal);

    test_assert_true!(t, fx.hal.control().tim_init_called);
    let htim6 = &fx.fw.htim6;
    test_assert_equal!(t, Some(TIM6), htim6.instance);
    test_assert_equal!(t, TIM6_PRESCALER, htim6.init.prescaler);
    test_assert_equal!(t, TIM6_PERIOD, htim6.init.period);
    test_assert_equal!(t, CounterMode::Up, htim6.init.counter_mode);
}

fn test_timer_configuration_values(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.fw.tim6_init(&mut fx.hal);

    test_assert_equal!(
        t,
        AutoReloadPreload::Disable,
        fx.fw.htim6.init.auto_reload_preload
    );
}

fn test_main_loop_single_iteration(t: &mut Unity, fx: &mut FirmwareFixture) {
    let initial_toggles = fx.hal.gpio_toggle_count();
    let initial_delays = fx.hal.delay_call_count();

    fx.fw.single_iteration(&mut fx.hal);

    test_assert_equal!(t, initial_toggles + 1, fx.hal.gpio_toggle_count());
    test_assert_equal!(t, Some(GPIOD), fx.hal.last_gpio_port());
    test_assert_equal!(t, HEARTBEAT_LED, fx.hal.last_gpio_pin());
    test_assert_equal!(t, initial_delays + 1, fx.hal.delay_call_count());
    test_assert_equal!(t, BLINK_DELAY_MS, fx.hal.last_delay_value());
}

fn test_main_loop_multiple_iterations(t: &mut Unity, fx: &mut FirmwareFixture) {
    const ITERATIONS: u32 = 5;
    let initial_toggles = fx.hal.gpio_toggle_count();
    let initial_delays = fx.hal.delay_call_count();

    for _ in 0..ITERATIONS {
        fx.fw.single_iteration(&mut fx.hal);
    }

    test_assert_equal!(t, initial_toggles + ITERATIONS, fx.hal.gpio_toggle_count());
    test_assert_equal!(t, initial_delays + ITERATIONS, fx.hal.delay_call_count());
}

fn test_hal_delay_function(t: &mut Unity, fx: &mut FirmwareFixture) {
    let delay_value = 1000;
    let initial_count = fx.hal.delay_call_count();

    fx.hal.delay(delay_value);

    test_assert_equal!(t, initial_count + 1, fx.hal.delay_call_count());
    test_assert_equal!(t, delay_value, fx.hal.last_delay_value());
}

fn test_different_delay_values(t: &mut Unity, fx: &mut FirmwareFixture) {
    let delay_values = [1u32, 10, 100, 500, 1000, 5000];

    for &value in &delay_values {
        fx.hal.delay(value);
        test_assert_equal!(t, value, fx.hal.last_delay_value());
    }

    test_assert_equal_int!(t, delay_values.len(), fx.hal.delay_call_count());
}

fn test_error_handler_function(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.fw
        .errors
        .handle(&mut fx.hal, Fault::new(FaultStep::UartInit, HalError::Error));

    // Reaching this line means the handler returned in test mode.
    test_assert_true!(t, fx.hal.control().irq_disabled);
    test_assert_equal_int!(t, 1, fx.fw.errors.faults().len());
}

fn test_system_integration(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_hal_init_return(HalStatus::Ok);
    fx.hal.set_rcc_config_return(HalStatus::Ok);
    fx.hal.set_uart_init_return(HalStatus::Ok);
    fx.hal.set_tim_init_return(HalStatus::Ok);

    let result = fx.fw.init_only(&mut fx.hal);
    test_assert_equal_int!(t, 0, init_exit_code(&result));

    for _ in 0..3 {
        fx.fw.single_iteration(&mut fx.hal);
    }

    test_assert_equal_int!(t, 3, fx.hal.gpio_toggle_count());
    test_assert_equal_int!(t, 3, fx.hal.delay_call_count());
}

fn test_system_with_peripheral_failures(t: &mut Unity, fx: &mut FirmwareFixture) {
    fx.hal.set_uart_init_return(HalStatus::Error);
    fx.fw.uart4_init(&mut fx.hal);

    fx.hal.set_tim_init_return(HalStatus::Error);
    fx.fw.tim6_init(&mut fx.hal);

    // The LED still toggles after both peripherals failed.
    fx.hal.gpio_toggle_pin(GPIOD, HEARTBEAT_LED);
    test_assert_equal_int!(t, 1, fx.hal.gpio_toggle_count());
    test_assert_equal!(
        t,
        Some(FaultStep::UartInit),
        fx.fw.errors.faults().first().map(|f| f.step)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use halbench_harness::{CaptureBuffer, Outcome};

    fn run_suite() -> (Unity, CaptureBuffer) {
        let buf = CaptureBuffer::new();
        let mut t = Unity::with_writer(buf.clone());
        let mut fx = FirmwareFixture::new();
        t.begin("tests/test_main.rs");
        run_all(&mut t, &mut fx);
        (t, buf)
    }

    #[test]
    fn test_full_suite_passes() {
        let (mut t, buf) = run_suite();
        assert_eq!(t.end(), 0);

        let lines = buf.lines();
        let passes = lines.iter().filter(|l| l.ends_with(":PASS")).count();
        assert_eq!(passes as u32, CASE_COUNT);
        assert!(lines.contains(&format!("{} Tests 0 Failures 0 Ignored", CASE_COUNT)));
        assert_eq!(lines.last().map(String::as_str), Some("OK"));
    }

    #[test]
    fn test_cases_run_in_registration_order() {
        let (t, _buf) = run_suite();
        let report = t.report();
        let names: Vec<&str> = report.cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), CASE_COUNT as usize);
        assert_eq!(names[0], "test_hal_init_success");
        assert_eq!(names[5], "test_gpio_init");
        assert_eq!(names[20], "test_system_with_peripheral_failures");
        assert!(report.cases.iter().all(|c| c.outcome == Outcome::Pass));
    }

    #[test]
    fn test_set_up_isolates_cases() {
        let mut fx = FirmwareFixture::new();
        fx.hal.set_uart_init_return(HalStatus::Error);
        fx.fw.uart4_init(&mut fx.hal);
        assert_eq!(fx.fw.errors.faults().len(), 1);

        fx.set_up();

        assert_eq!(fx.hal.return_status(halbench_core::Initializer::UartInit), HalStatus::Ok);
        assert!(!fx.hal.control().uart_init_called);
        assert!(fx.fw.errors.faults().is_empty());
        assert_eq!(fx.fw.huart4.instance, None);
    }

    fn leaves_state_and_fails(t: &mut Unity, fx: &mut FirmwareFixture) {
        fx.hal.delay(7);
        test_assert_equal!(t, 8u32, fx.hal.last_delay_value());
    }

    #[test]
    fn test_failure_carries_mock_snapshot() {
        let buf = CaptureBuffer::new();
        let mut t = Unity::with_writer(buf.clone());
        let mut fx = FirmwareFixture::new();
        t.begin("suite.rs");
        run_test!(t, &mut fx, leaves_state_and_fails);
        assert_eq!(t.end(), 1);

        let report = t.report();
        let diagnostics = report.cases[0].diagnostics.as_ref().unwrap();
        assert_eq!(diagnostics["control"]["last_delay_value"], 7);
        assert!(buf
            .contents()
            .contains(":leaves_state_and_fails:FAIL: Expected 8 Was 7"));
    }
}
