// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::peripherals::gpio::{BSRR, IDR, MODER, ODR};
    use crate::peripherals::rcc::ClkInit;
    use crate::peripherals::timer::TimMasterConfig;
    use crate::{
        ClockGate, FlashLatency, GpioInit, GpioPort, Hal, HalError, HalStatus, Initializer,
        MockHal, OscInit, Peripheral, PinState, Pins, Port, SimulationError, TimHandle,
        UartHandle, VoltageScale, GPIOA, GPIOD,
    };

    fn all_single_pins() -> impl Iterator<Item = Pins> {
        (0..16).map(Pins::pin)
    }

    #[test]
    fn test_status_maps_to_result() {
        assert_eq!(HalStatus::Ok.check(), Ok(()));
        assert_eq!(HalStatus::Error.check(), Err(HalError::Error));
        assert_eq!(HalStatus::Busy.check(), Err(HalError::Busy));
        assert_eq!(HalStatus::Timeout.check(), Err(HalError::Timeout));
        assert!(HalStatus::Ok.is_ok());
        assert!(!HalStatus::Busy.is_ok());
        assert!(!HalStatus::from(HalError::Timeout).is_ok());
        assert_eq!(HalStatus::from(HalError::Busy), HalStatus::Busy);
        assert_eq!(HalStatus::Timeout as u8, 3);
    }

    #[test]
    fn test_write_set_then_reset_clears_bits() {
        let masks = all_single_pins().chain([
            Pins::PIN_12 | Pins::PIN_13 | Pins::PIN_14 | Pins::PIN_15,
            Pins::all(),
            Pins::empty(),
        ]);
        for pins in masks {
            for port in Port::ALL {
                let mut hal = MockHal::new();
                hal.port_mut(port).odr = 0x0000_A5A5;
                hal.gpio_write_pin(port, pins, PinState::Set);
                assert_eq!(hal.port(port).odr & pins.bits() as u32, pins.bits() as u32);
                hal.gpio_write_pin(port, pins, PinState::Reset);
                assert_eq!(hal.port(port).odr & pins.bits() as u32, 0);
                // untouched bits survive
                assert_eq!(
                    hal.port(port).odr & !(pins.bits() as u32),
                    0x0000_A5A5 & !(pins.bits() as u32)
                );
            }
        }
    }

    #[test]
    fn test_toggle_twice_restores_output() {
        let mut hal = MockHal::new();
        hal.port_mut(GPIOD).odr = 0x0000_1234;
        for pins in all_single_pins() {
            hal.gpio_toggle_pin(GPIOD, pins);
            assert_ne!(hal.port(GPIOD).odr, 0x0000_1234);
            hal.gpio_toggle_pin(GPIOD, pins);
            assert_eq!(hal.port(GPIOD).odr, 0x0000_1234);
        }
        assert_eq!(hal.gpio_toggle_count(), 32);
    }

    #[test]
    fn test_plain_writes_are_not_counted() {
        let mut hal = MockHal::new();
        hal.gpio_write_pin(GPIOD, Pins::PIN_14, PinState::Set);
        assert_eq!(hal.gpio_toggle_count(), 0);
        assert_eq!(hal.last_gpio_port(), None);
    }

    #[test]
    fn test_read_pin_requires_all_bits() {
        let mut hal = MockHal::new();
        let pins = Pins::PIN_12 | Pins::PIN_13;

        hal.port_mut(GPIOD).idr = Pins::PIN_14.bits() as u32;
        assert_eq!(hal.gpio_read_pin(GPIOD, Pins::PIN_14), PinState::Set);

        hal.port_mut(GPIOD).idr = 0;
        assert_eq!(hal.gpio_read_pin(GPIOD, Pins::PIN_14), PinState::Reset);

        // partial overlap
        hal.port_mut(GPIOD).idr = Pins::PIN_12.bits() as u32;
        assert_eq!(hal.gpio_read_pin(GPIOD, pins), PinState::Reset);

        hal.port_mut(GPIOD).idr = pins.bits() as u32 | 0x1;
        assert_eq!(hal.gpio_read_pin(GPIOD, pins), PinState::Set);

        // other ports are independent
        assert_eq!(hal.gpio_read_pin(GPIOA, pins), PinState::Reset);
    }

    #[test]
    fn test_reset_restores_canonical_state() {
        let mut hal = MockHal::new();
        for which in Initializer::ALL {
            hal.set_return(which, HalStatus::Timeout);
        }
        let _ = hal.init();
        hal.delay(7);
        hal.gpio_toggle_pin(GPIOD, Pins::PIN_1);
        hal.enable_clock(ClockGate::GPIOD);
        hal.disable_irq();
        hal.port_mut(GPIOA).idr = 0xFFFF;

        hal.reset();

        for which in Initializer::ALL {
            assert_eq!(hal.return_status(which), HalStatus::Ok, "{:?}", which);
        }
        assert_eq!(hal.control(), &crate::MockControl::default());
        assert_eq!(hal.delay_call_count(), 0);
        assert_eq!(hal.last_delay_value(), 0);
        assert_eq!(hal.gpio_toggle_count(), 0);
        assert_eq!(hal.last_gpio_port(), None);
        assert_eq!(hal.last_gpio_pin(), Pins::empty());
        for port in Port::ALL {
            assert_eq!(hal.port(port), &GpioPort::default());
        }
    }

    #[test]
    fn test_injected_status_persists_until_changed() {
        let mut hal = MockHal::new();
        hal.set_uart_init_return(HalStatus::Busy);
        let mut huart = UartHandle::default();
        assert_eq!(hal.uart_init(&mut huart), HalStatus::Busy);
        assert_eq!(hal.uart_init(&mut huart), HalStatus::Busy);
        hal.set_uart_init_return(HalStatus::Ok);
        assert_eq!(hal.uart_init(&mut huart), HalStatus::Ok);
        assert!(hal.control().uart_init_called);
    }

    #[test]
    fn test_rcc_config_return_sets_both() {
        let mut hal = MockHal::new();
        hal.set_rcc_config_return(HalStatus::Error);
        assert_eq!(hal.return_status(Initializer::RccOscConfig), HalStatus::Error);
        assert_eq!(hal.return_status(Initializer::RccClockConfig), HalStatus::Error);

        hal.set_rcc_clk_config_return(HalStatus::Ok);
        assert_eq!(hal.rcc_osc_config(&OscInit::default()), HalStatus::Error);
        assert_eq!(
            hal.rcc_clock_config(&ClkInit::default(), FlashLatency::Ws5),
            HalStatus::Ok
        );
    }

    #[test]
    fn test_osc_and_clock_config_tracked_separately() {
        let mut hal = MockHal::new();
        let _ = hal.rcc_osc_config(&OscInit::default());
        assert!(hal.control().rcc_osc_config_called);
        assert!(!hal.control().system_clock_config_called);

        let _ = hal.rcc_clock_config(&ClkInit::default(), FlashLatency::Ws0);
        assert!(hal.control().system_clock_config_called);
    }

    #[test]
    fn test_tim_master_config_uses_tim_status_without_flag() {
        let mut hal = MockHal::new();
        hal.set_tim_init_return(HalStatus::Error);
        let mut htim = TimHandle::default();
        assert_eq!(
            hal.tim_master_config_synchronization(&mut htim, &TimMasterConfig::default()),
            HalStatus::Error
        );
        assert!(!hal.control().tim_init_called);
        assert_eq!(hal.tim_base_init(&mut htim), HalStatus::Error);
        assert!(hal.control().tim_init_called);
    }

    #[test]
    fn test_delay_records_each_value() {
        let mut hal = MockHal::new();
        let values = [1, 10, 100, 500, 1000];
        for v in values {
            hal.delay(v);
            assert_eq!(hal.last_delay_value(), v);
        }
        assert_eq!(hal.delay_call_count(), 5);
    }

    #[test]
    fn test_huge_delay_returns_immediately() {
        let mut hal = MockHal::new();
        let start = std::time::Instant::now();
        hal.delay(u32::MAX);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
        assert_eq!(hal.last_delay_value(), u32::MAX);
    }

    #[test]
    fn test_gpio_init_and_power_calls_recorded() {
        let mut hal = MockHal::new();
        let init = GpioInit {
            pins: Pins::PIN_14,
            ..Default::default()
        };
        hal.gpio_init(GPIOD, &init);
        hal.enable_clock(ClockGate::GPIOA);
        hal.enable_clock(ClockGate::GPIOD | ClockGate::PWR);
        hal.set_voltage_scaling(VoltageScale::Scale1);

        let control = hal.control();
        assert!(control.gpio_init_called);
        assert_eq!(control.last_gpio_init, Some((GPIOD, init)));
        assert_eq!(
            control.enabled_clocks,
            ClockGate::GPIOA | ClockGate::GPIOD | ClockGate::PWR
        );
        assert_eq!(control.voltage_scale, Some(VoltageScale::Scale1));
    }

    #[test]
    fn test_gpio_register_bus_view() {
        let mut port = GpioPort::new();
        port.write(MODER, 0x5500_0000).unwrap();
        assert_eq!(port.read(MODER).unwrap(), 0x5500_0000);

        port.write(ODR, 0xFFFF_0001).unwrap();
        assert_eq!(port.read(ODR).unwrap(), 0x0001);

        // set PD14, reset PD0
        port.write(BSRR, (1 << 16) | (1 << 14)).unwrap();
        assert_eq!(port.odr, 1 << 14);
        assert_eq!(port.read(BSRR).unwrap(), 0);

        // set wins over reset for the same pin
        port.write(BSRR, (1 << (16 + 3)) | (1 << 3)).unwrap();
        assert_eq!(port.odr & (1 << 3), 1 << 3);

        assert_eq!(port.write(IDR, 1), Err(SimulationError::ReadOnly(IDR)));
        assert_eq!(port.read(0x28), Err(SimulationError::InvalidOffset(0x28)));
    }

    #[test]
    fn test_snapshot_lists_control_and_ports() {
        let mut hal = MockHal::new();
        hal.delay(42);
        hal.gpio_toggle_pin(GPIOD, Pins::PIN_14);

        let snap = hal.snapshot();
        assert_eq!(snap["control"]["last_delay_value"], 42);
        assert_eq!(snap["control"]["last_gpio_port"], "D");
        assert_eq!(snap["ports"]["GPIOD"]["odr"], 0x4000);
        assert_eq!(snap["ports"].as_object().unwrap().len(), 4);
        assert_eq!(snap["control"]["returns"]["hal_init"], "Ok");
    }

    #[test]
    fn test_independent_contexts_do_not_share_state() {
        let mut a = MockHal::new();
        let b = MockHal::new();
        a.delay(3);
        a.gpio_toggle_pin(GPIOD, Pins::PIN_14);
        assert_eq!(b.delay_call_count(), 0);
        assert_eq!(b.port(GPIOD).odr, 0);
    }

    #[test]
    fn test_port_bases() {
        assert_eq!(Port::A.base(), 0x4002_0000);
        assert_eq!(Port::D.base(), 0x4002_0C00);
        assert_eq!(crate::UART4.base(), 0x4000_4C00);
        assert_eq!(crate::TIM6.to_string(), "0x40001000");
    }
}
