//! Shared test utilities for integration tests.
//!
//! These helpers evaluate expressions and build expected values so the test
//! files can state results compactly.

#![expect(
    dead_code,
    reason = "helpers are reused across multiple tests so some may be unused"
)]

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use timecalc::{Duration, ErrorKind, EvalError, Value, evaluate};

/// Evaluate `src`, panicking with the rendered error on failure.
#[track_caller]
#[must_use]
pub fn eval(src: &str) -> Value {
    evaluate(src).unwrap_or_else(|e| panic!("{src}: {}", e.snippet(src)))
}

/// Evaluate `src` and return the error it must produce.
///
/// # Panics
/// Panics if `src` evaluates successfully.
#[track_caller]
#[must_use]
pub fn eval_err(src: &str) -> EvalError {
    match evaluate(src) {
        Ok(value) => panic!("{src}: expected an error, got {value}"),
        Err(err) => err,
    }
}

/// Assert that `src` fails with an error of `kind`.
#[track_caller]
pub fn assert_fails(src: &str, kind: ErrorKind) {
    let err = eval_err(src);
    assert_eq!(err.kind(), kind, "{src}: {err}");
}

/// Evaluate `src` to a duration.
#[track_caller]
#[must_use]
pub fn duration(src: &str) -> Duration {
    let value = eval(src);
    value
        .as_duration()
        .unwrap_or_else(|| panic!("{src}: expected a duration, got {value}"))
}

/// Evaluate `src` to a datetime.
#[track_caller]
#[must_use]
pub fn datetime(src: &str) -> NaiveDateTime {
    let value = eval(src);
    value
        .as_datetime()
        .unwrap_or_else(|| panic!("{src}: expected a datetime, got {value}"))
}

/// A duration of `n` seconds.
#[must_use]
pub fn secs(n: i64) -> Duration {
    Duration::from(TimeDelta::seconds(n))
}

/// A duration of `n` days.
#[must_use]
pub fn days(n: i64) -> Duration {
    Duration::from(TimeDelta::days(n))
}

/// Build a datetime from its components.
///
/// # Panics
/// Panics if the components do not name a real instant.
#[track_caller]
#[must_use]
pub fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .unwrap_or_else(|| panic!("bad datetime {y}-{mo}-{d} {h}:{mi}:{s}"))
}
