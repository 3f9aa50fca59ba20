// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Assertion macros that capture the call-site line and the asserted
//! expression, mirroring the `TEST_ASSERT_*` family.

/// Run `$test` against `$fixture`, naming the case after the function.
#[macro_export]
macro_rules! run_test {
    ($unity:expr, $fixture:expr, $test:path) => {
        $unity.run_test($fixture, $test, stringify!($test), line!())
    };
}

#[macro_export]
macro_rules! test_assert {
    ($unity:expr, $cond:expr) => {
        $unity.assert_true($cond, Some(stringify!($cond)), line!())
    };
}

#[macro_export]
macro_rules! test_assert_true {
    ($unity:expr, $cond:expr) => {
        $unity.assert_true($cond, Some(stringify!($cond)), line!())
    };
}

#[macro_export]
macro_rules! test_assert_false {
    ($unity:expr, $cond:expr) => {
        $unity.assert_false($cond, Some(stringify!($cond)), line!())
    };
}

#[macro_export]
macro_rules! test_assert_equal {
    ($unity:expr, $expected:expr, $actual:expr) => {
        $unity.assert_equal($expected, $actual, Some(stringify!($actual)), line!())
    };
}

#[macro_export]
macro_rules! test_assert_equal_int {
    ($unity:expr, $expected:expr, $actual:expr) => {
        $unity.assert_equal_number(
            ($expected) as i64,
            ($actual) as i64,
            Some(stringify!($actual)),
            line!(),
        )
    };
}

#[macro_export]
macro_rules! test_assert_bits {
    ($unity:expr, $mask:expr, $expected:expr, $actual:expr) => {
        $unity.assert_bits(
            ($mask) as u64,
            ($expected) as u64,
            ($actual) as u64,
            Some(stringify!($actual)),
            line!(),
        )
    };
}

#[macro_export]
macro_rules! test_assert_bits_high {
    ($unity:expr, $mask:expr, $actual:expr) => {
        $crate::test_assert_bits!($unity, $mask, u64::MAX, $actual)
    };
}

#[macro_export]
macro_rules! test_assert_bits_low {
    ($unity:expr, $mask:expr, $actual:expr) => {
        $crate::test_assert_bits!($unity, $mask, 0u64, $actual)
    };
}

#[macro_export]
macro_rules! test_assert_float_within {
    ($unity:expr, $delta:expr, $expected:expr, $actual:expr) => {
        $unity.assert_floats_within(
            ($delta) as f32,
            ($expected) as f32,
            ($actual) as f32,
            Some(stringify!($actual)),
            line!(),
        )
    };
}

/// Float equality with a relative tolerance of 1e-5 of the expected value.
#[macro_export]
macro_rules! test_assert_equal_float {
    ($unity:expr, $expected:expr, $actual:expr) => {{
        let expected = ($expected) as f32;
        let delta = (expected * 1e-5).abs().max(f32::EPSILON);
        $unity.assert_floats_within(delta, expected, ($actual) as f32, Some(stringify!($actual)), line!())
    }};
}

#[macro_export]
macro_rules! test_assert_equal_string {
    ($unity:expr, $expected:expr, $actual:expr) => {
        $unity.assert_equal_string(
            ::core::option::Option::<&str>::from($expected),
            ::core::option::Option::<&str>::from($actual),
            Some(stringify!($actual)),
            line!(),
        )
    };
}

#[macro_export]
macro_rules! test_assert_int_within {
    ($unity:expr, $delta:expr, $expected:expr, $actual:expr) => {
        $unity.assert_int_within(
            ($delta) as i64,
            ($expected) as i64,
            ($actual) as i64,
            Some(stringify!($actual)),
            line!(),
        )
    };
}

#[macro_export]
macro_rules! test_fail {
    ($unity:expr) => {
        $unity.fail(None, line!())
    };
}

#[macro_export]
macro_rules! test_fail_message {
    ($unity:expr, $msg:expr) => {
        $unity.fail(Some($msg), line!())
    };
}

#[macro_export]
macro_rules! test_ignore {
    ($unity:expr) => {
        $unity.ignore(None, line!())
    };
}

#[macro_export]
macro_rules! test_ignore_message {
    ($unity:expr, $msg:expr) => {
        $unity.ignore(Some($msg), line!())
    };
}
