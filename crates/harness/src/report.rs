// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub name: String,
    pub line: u32,
    pub outcome: Outcome,
    /// Failure and ignore diagnostics, in the order they were raised.
    pub messages: Vec<String>,
    /// Fixture state captured when the case failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    pub file: String,
    pub tests: u32,
    pub failures: u32,
    pub ignored: u32,
    pub status: Outcome,
    pub cases: Vec<CaseRecord>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}
