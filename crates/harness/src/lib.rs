// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Minimal Unity-style test runner: sequential cases, per-case fixture
//! hooks, non-fatal assertions and a plain-text trace whose exit status is
//! the failure count.

pub mod capture;
#[macro_use]
pub mod macros;
pub mod report;
pub mod runner;

pub use capture::CaptureBuffer;
pub use report::{CaseRecord, Outcome, SuiteReport};
pub use runner::{Fixture, TestFn, Unity};
