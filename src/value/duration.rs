//! Exact durations and their fixed-convention breakdown.
//!
//! A [`Duration`] stores an exact signed interval. Conversions to and from a
//! [`Breakdown`] use the fixed calendar conventions of [`Unit::micros`]:
//! years are 365 days, months 30 days and weeks 7 days, with no leap-year
//! or month-length adjustment.

use chrono::TimeDelta;
use num_traits::ToPrimitive;

use crate::Unit;

/// A signed elapsed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(TimeDelta);

/// Integral value of `amount`, if it has no fractional part.
fn integral(amount: f64) -> Option<i64> {
    if amount.fract() == 0.0 {
        amount.to_i64()
    } else {
        None
    }
}

/// `(quotient, remainder)` of a non-negative `value`.
fn split(value: i64, unit: i64) -> (i64, i64) {
    (value.div_euclid(unit), value.rem_euclid(unit))
}

impl Duration {
    #[must_use]
    pub fn zero() -> Self {
        Self(TimeDelta::zero())
    }

    #[must_use]
    pub fn from_micros(micros: i64) -> Self {
        Self(TimeDelta::microseconds(micros))
    }

    /// `amount` units, rounded to the nearest microsecond.
    ///
    /// Returns `None` if the result does not fit.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "fractional amounts scale exact micros")]
    pub fn of(amount: f64, unit: Unit) -> Option<Self> {
        let micros = match integral(amount) {
            Some(n) => n.checked_mul(unit.micros())?,
            None => (amount * unit.micros().to_f64()?).round().to_i64()?,
        };
        Some(Self::from_micros(micros))
    }

    /// Sum of `(amount, unit)` pairs.
    ///
    /// Returns `None` if any intermediate result does not fit.
    #[must_use]
    pub fn from_parts(parts: &[(f64, Unit)]) -> Option<Self> {
        parts.iter().try_fold(Self::zero(), |acc, &(amount, unit)| {
            acc.checked_add(Self::of(amount, unit)?)
        })
    }

    #[must_use]
    pub fn as_delta(self) -> TimeDelta {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < TimeDelta::zero()
    }

    /// Whole microseconds, if they fit in an `i64`.
    #[must_use]
    pub fn num_microseconds(self) -> Option<i64> {
        self.0.num_microseconds()
    }

    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(&other.0).map(Self)
    }

    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(&other.0).map(Self)
    }

    /// Multiply by `factor`.
    ///
    /// Integral factors scale the exact interval; fractional factors scale
    /// the microsecond count and round.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "fractional scaling")]
    pub fn scale(self, factor: f64) -> Option<Self> {
        if let Some(n) = integral(factor).and_then(|n| i32::try_from(n).ok()) {
            return self.0.checked_mul(n).map(Self);
        }
        let micros = self.num_microseconds()?.to_f64()? * factor;
        Some(Self::from_micros(micros.round().to_i64()?))
    }

    /// Divide by a non-zero `divisor`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "fractional scaling")]
    pub fn divide(self, divisor: f64) -> Option<Self> {
        let micros = self.num_microseconds()?.to_f64()? / divisor;
        Some(Self::from_micros(micros.round().to_i64()?))
    }

    /// Ratio of two durations; `None` if `other` is zero or either side is
    /// too large to express in microseconds.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "dimensionless ratio")]
    pub fn ratio(self, other: Self) -> Option<f64> {
        if other.is_zero() {
            return None;
        }
        Some(self.num_microseconds()?.to_f64()? / other.num_microseconds()?.to_f64()?)
    }

    /// Express the duration in whole units, largest first.
    ///
    /// The absolute value is divided down unit by unit and the sign of the
    /// whole duration is applied to every component. Sub-millisecond
    /// remainders are dropped.
    #[must_use]
    pub fn breakdown(self) -> Breakdown {
        let negative = self.is_negative();
        let abs = if negative { -self.0 } else { self.0 };
        let sign = if negative { -1 } else { 1 };

        let (days, secs) = split(abs.num_seconds(), 86_400);
        let (years, days) = split(days, 365);
        let (months, days) = split(days, 30);
        let (weeks, days) = split(days, 7);
        let (hours, secs) = split(secs, 3_600);
        let (minutes, seconds) = split(secs, 60);
        let (milliseconds, _) = split(i64::from(abs.subsec_nanos()), 1_000_000);

        Breakdown {
            years: sign * years,
            months: sign * months,
            weeks: sign * weeks,
            days: sign * days,
            hours: sign * hours,
            minutes: sign * minutes,
            seconds: sign * seconds,
            milliseconds: sign * milliseconds,
        }
    }
}

impl From<TimeDelta> for Duration {
    fn from(delta: TimeDelta) -> Self {
        Self(delta)
    }
}

/// Per-unit counts of a [`Duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl Breakdown {
    #[must_use]
    pub fn get(&self, unit: Unit) -> i64 {
        match unit {
            Unit::Year => self.years,
            Unit::Month => self.months,
            Unit::Week => self.weeks,
            Unit::Day => self.days,
            Unit::Hour => self.hours,
            Unit::Minute => self.minutes,
            Unit::Second => self.seconds,
            Unit::Millisecond => self.milliseconds,
        }
    }

    /// Non-zero components, largest unit first.
    pub fn nonzero(&self) -> impl Iterator<Item = (Unit, i64)> + '_ {
        Unit::ALL
            .into_iter()
            .map(|unit| (unit, self.get(unit)))
            .filter(|(_, amount)| *amount != 0)
    }

    /// Recombine the components into a [`Duration`].
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn to_duration(&self) -> Option<Duration> {
        Unit::ALL
            .into_iter()
            .try_fold(0_i64, |acc, unit| {
                acc.checked_add(self.get(unit).checked_mul(unit.micros())?)
            })
            .map(Duration::from_micros)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .breakdown()
            .nonzero()
            .map(|(unit, amount)| {
                let amount = amount.abs();
                let name = if amount == 1 {
                    unit.singular()
                } else {
                    unit.plural()
                };
                format!("{amount} {name}")
            })
            .collect();
        if parts.is_empty() {
            return f.write_str("0 seconds");
        }
        if self.is_negative() {
            f.write_str("- ")?;
        }
        f.write_str(&parts.join(", "))
    }
}
