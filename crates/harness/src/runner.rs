// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::report::{CaseRecord, Outcome, SuiteReport};
use std::fmt::{self, Debug};
use std::io::{self, Write};
use tracing::{debug, warn};

const COLOR_PASS: &str = "\x1b[32m";
const COLOR_FAIL: &str = "\x1b[31m";
const COLOR_RESET: &str = "\x1b[0m";

/// Per-suite setup and teardown hooks, run around every test case.
pub trait Fixture {
    fn set_up(&mut self) {}
    fn tear_down(&mut self) {}
    /// State worth attaching to the report of a failed case.
    fn diagnostics(&self) -> Option<serde_json::Value> {
        None
    }
}

impl Fixture for () {}

pub type TestFn<F> = fn(&mut Unity, &mut F);

#[derive(Debug)]
struct CurrentCase {
    name: String,
    line: u32,
    failed: bool,
    ignored: bool,
    messages: Vec<String>,
}

/// Sequential test runner with non-fatal assertions.
///
/// Trace lines are `file:line:name:RESULT[:message]`; [`Unity::end`] prints
/// the `<N> Tests <F> Failures <I> Ignored` summary and the final verdict.
pub struct Unity {
    out: Box<dyn Write>,
    color: bool,
    file: String,
    tests: u32,
    failures: u32,
    ignores: u32,
    current: Option<CurrentCase>,
    cases: Vec<CaseRecord>,
}

impl Default for Unity {
    fn default() -> Self {
        Self::new()
    }
}

impl Unity {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + 'static>(out: W) -> Self {
        Self {
            out: Box::new(out),
            color: false,
            file: String::new(),
            tests: 0,
            failures: 0,
            ignores: 0,
            current: None,
            cases: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn begin(&mut self, file: &str) {
        self.file = file.to_string();
        self.tests = 0;
        self.failures = 0;
        self.ignores = 0;
        self.current = None;
        self.cases.clear();
        emit(&mut *self.out, format_args!("{}:", file));
    }

    /// Prints the summary and returns the failure count.
    pub fn end(&mut self) -> u32 {
        emit(&mut *self.out, format_args!("\n-----------------------"));
        emit(
            &mut *self.out,
            format_args!(
                "{} Tests {} Failures {} Ignored",
                self.tests, self.failures, self.ignores
            ),
        );
        let verdict = if self.failures == 0 { "OK" } else { "FAIL" };
        if self.color {
            let color = if self.failures == 0 { COLOR_PASS } else { COLOR_FAIL };
            emit(&mut *self.out, format_args!("{}{}{}", color, verdict, COLOR_RESET));
        } else {
            emit(&mut *self.out, format_args!("{}", verdict));
        }
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush test output: {}", e);
        }
        self.failures
    }

    pub fn run_test<F: Fixture>(&mut self, fixture: &mut F, test: TestFn<F>, name: &str, line: u32) {
        self.tests += 1;
        self.current = Some(CurrentCase {
            name: name.to_string(),
            line,
            failed: false,
            ignored: false,
            messages: Vec::new(),
        });
        debug!("Running {} ({}:{})", name, self.file, line);

        fixture.set_up();
        test(self, fixture);
        let diagnostics = if self.current_test_failed() {
            fixture.diagnostics()
        } else {
            None
        };
        fixture.tear_down();

        let Some(case) = self.current.take() else {
            return;
        };
        let outcome = if case.failed {
            self.failures += 1;
            if let Some(state) = &diagnostics {
                debug!("{} failed with fixture state {}", case.name, state);
            }
            Outcome::Fail
        } else if case.ignored {
            Outcome::Ignore
        } else {
            emit(
                &mut *self.out,
                format_args!("{}:{}:{}:PASS", self.file, case.line, case.name),
            );
            Outcome::Pass
        };
        self.cases.push(CaseRecord {
            name: case.name,
            line: case.line,
            outcome,
            messages: case.messages,
            diagnostics,
        });
    }

    pub fn tests_run(&self) -> u32 {
        self.tests
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn ignored(&self) -> u32 {
        self.ignores
    }

    pub fn current_test_failed(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.failed)
    }

    pub fn report(&self) -> SuiteReport {
        SuiteReport {
            file: self.file.clone(),
            tests: self.tests,
            failures: self.failures,
            ignored: self.ignores,
            status: if self.failures == 0 {
                Outcome::Pass
            } else {
                Outcome::Fail
            },
            cases: self.cases.clone(),
        }
    }

    pub fn assert_equal<T: PartialEq + Debug>(
        &mut self,
        expected: T,
        actual: T,
        msg: Option<&str>,
        line: u32,
    ) {
        if expected != actual {
            self.fail_with(line, format!("Expected {:?} Was {:?}", expected, actual), msg);
        }
    }

    pub fn assert_equal_number(&mut self, expected: i64, actual: i64, msg: Option<&str>, line: u32) {
        if expected != actual {
            self.fail_with(line, format!("Expected {} Was {}", expected, actual), msg);
        }
    }

    pub fn assert_true(&mut self, condition: bool, msg: Option<&str>, line: u32) {
        if !condition {
            self.fail_with(line, "Expected TRUE Was FALSE".to_string(), msg);
        }
    }

    pub fn assert_false(&mut self, condition: bool, msg: Option<&str>, line: u32) {
        if condition {
            self.fail_with(line, "Expected FALSE Was TRUE".to_string(), msg);
        }
    }

    /// Compare only the bits selected by `mask`.
    pub fn assert_bits(&mut self, mask: u64, expected: u64, actual: u64, msg: Option<&str>, line: u32) {
        if expected & mask != actual & mask {
            self.fail_with(
                line,
                format!("Expected {:#X} Was {:#X}", expected & mask, actual & mask),
                msg,
            );
        }
    }

    pub fn assert_floats_within(
        &mut self,
        delta: f32,
        expected: f32,
        actual: f32,
        msg: Option<&str>,
        line: u32,
    ) {
        let diff = (actual - expected).abs();
        // NaN never lies within any tolerance
        if !(diff <= delta) {
            self.fail_with(line, format!("Expected {:.6} Was {:.6}", expected, actual), msg);
        }
    }

    pub fn assert_equal_string(
        &mut self,
        expected: Option<&str>,
        actual: Option<&str>,
        msg: Option<&str>,
        line: u32,
    ) {
        if expected != actual {
            self.fail_with(
                line,
                format!(
                    "Expected \"{}\" Was \"{}\"",
                    expected.unwrap_or("NULL"),
                    actual.unwrap_or("NULL")
                ),
                msg,
            );
        }
    }

    pub fn assert_int_within(
        &mut self,
        delta: i64,
        expected: i64,
        actual: i64,
        msg: Option<&str>,
        line: u32,
    ) {
        if actual.abs_diff(expected) > delta.unsigned_abs() {
            self.fail_with(
                line,
                format!("Expected {} +/- {} Was {}", expected, delta, actual),
                msg,
            );
        }
    }

    pub fn fail(&mut self, msg: Option<&str>, line: u32) {
        let detail = msg.unwrap_or_default().to_string();
        self.record_failure(line, detail);
    }

    /// Mark the current case ignored. The body keeps running.
    pub fn ignore(&mut self, msg: Option<&str>, line: u32) {
        let name = self.current_name().to_string();
        match msg {
            Some(m) => emit(&mut *self.out, format_args!("{}:{}:{}:IGNORE:{}", self.file, line, name, m)),
            None => emit(&mut *self.out, format_args!("{}:{}:{}:IGNORE", self.file, line, name)),
        }
        if let Some(case) = &mut self.current {
            if !case.ignored {
                case.ignored = true;
                self.ignores += 1;
            }
            case.messages.push(msg.unwrap_or("ignored").to_string());
        }
    }

    fn fail_with(&mut self, line: u32, mut detail: String, msg: Option<&str>) {
        if let Some(m) = msg {
            detail.push(' ');
            detail.push_str(m);
        }
        self.record_failure(line, format!(" {}", detail));
    }

    fn record_failure(&mut self, line: u32, detail: String) {
        let name = self.current_name().to_string();
        emit(&mut *self.out, format_args!("{}:{}:{}:FAIL:{}", self.file, line, name, detail));
        match &mut self.current {
            Some(case) => {
                case.failed = true;
                case.messages.push(detail.trim_start().to_string());
            }
            None => warn!("Assertion failed outside of a test case at line {}", line),
        }
    }

    fn current_name(&self) -> &str {
        self.current.as_ref().map_or("", |c| c.name.as_str())
    }

}

fn emit(out: &mut dyn Write, args: fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{}", args) {
        warn!("Failed to write test output: {}", e);
    }
}
