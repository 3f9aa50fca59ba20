// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::mock::MockControl;
use crate::peripherals::gpio::{GpioPort, Port};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug)]
pub struct MockSnapshot<'a> {
    pub control: &'a MockControl,
    pub ports: BTreeMap<&'static str, &'a GpioPort>,
}

impl<'a> MockSnapshot<'a> {
    pub fn capture(control: &'a MockControl, ports: &'a [GpioPort; 4]) -> Self {
        let ports = Port::ALL
            .iter()
            .map(|p| (p.name(), &ports[p.index()]))
            .collect();
        Self { control, ports }
    }
}
