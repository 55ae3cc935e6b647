//! Calendar components carried by date and time tokens.
//!
//! A [`Moment`] holds an optional date and an optional time. Moments from
//! adjacent tokens are merged with [`Moment::combine`], which refuses to
//! merge two dates or two times, and [`Moment::resolve`] fills whatever is
//! still missing (today's date, midnight).

use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use super::ParseError;
use super::engine::SyntaxError;
use crate::TokenKind;
use crate::language::Keyword;
use crate::tokenizer::{Span, Token};

/// A possibly partial point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Moment {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    span: Option<Span>,
}

fn invalid(reason: String, token: &Token) -> ParseError {
    ParseError::InvalidDate {
        reason,
        span: token.span(),
    }
}

fn field<T: FromStr>(token: &Token, name: &str) -> Result<Option<T>, ParseError> {
    token
        .field(name)
        .map(|text| {
            text.parse()
                .map_err(|_| invalid(format!("bad {name} '{text}'"), token))
        })
        .transpose()
}

fn required<T: FromStr>(token: &Token, name: &str) -> Result<T, ParseError> {
    field(token, name)?.ok_or_else(|| invalid(format!("missing {name}"), token))
}

fn ymd(token: &Token, year: i32, month: u32, day: u32) -> Result<NaiveDate, ParseError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid(format!("no such date {year:04}-{month:02}-{day:02}"), token))
}

fn hms(token: &Token, hour: u32, minute: u32, second: u32) -> Result<NaiveTime, ParseError> {
    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| invalid(format!("no such time {hour:02}:{minute:02}:{second:02}"), token))
}

fn iso_weekday(day: u32) -> Option<Weekday> {
    Some(match day {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => return None,
    })
}

/// The current local instant without its sub-second part.
fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

fn epoch(token: &Token) -> Result<NaiveDateTime, ParseError> {
    Ok(ymd(token, 1970, 1, 1)?.and_time(NaiveTime::MIN))
}

impl Moment {
    fn new(date: Option<NaiveDate>, time: Option<NaiveTime>, token: &Token) -> Self {
        Self {
            date,
            time,
            span: Some(token.span()),
        }
    }

    fn full(dt: NaiveDateTime, token: &Token) -> Self {
        Self::new(Some(dt.date()), Some(dt.time()), token)
    }

    /// Build the components described by a date or time token.
    pub(crate) fn from_token(token: &Token) -> Result<Self, ParseError> {
        let malformed = || {
            ParseError::Syntax(SyntaxError::MalformedRule {
                symbol: "datetime".to_string(),
            })
        };
        match token.kind() {
            TokenKind::T_DATETIME_LITERAL | TokenKind::T_DATE_LITERAL => {
                match token.field("lit").and_then(Keyword::from_text) {
                    Some(Keyword::Now) => Ok(Self::full(now(), token)),
                    Some(Keyword::Epoch) => Ok(Self::full(epoch(token)?, token)),
                    Some(Keyword::Today) => {
                        Ok(Self::new(Some(Local::now().date_naive()), None, token))
                    }
                    None => Err(malformed()),
                }
            }
            TokenKind::T_ISO8601 => {
                let date = iso_date(token)?;
                let time = field::<u32>(token, "hour")?
                    .map(|hour| {
                        let minute = required(token, "minute")?;
                        let second = field(token, "second")?.unwrap_or(0);
                        hms(token, hour, minute, second)
                    })
                    .transpose()?;
                Ok(Self::new(Some(date), time, token))
            }
            TokenKind::T_DATE => {
                let date = ymd(
                    token,
                    required(token, "year")?,
                    required(token, "month")?,
                    required(token, "day")?,
                )?;
                Ok(Self::new(Some(date), None, token))
            }
            TokenKind::T_TIME => Ok(Self::new(None, Some(clock_time(token)?), token)),
            _ => Err(malformed()),
        }
    }

    /// Merge two partial moments.
    ///
    /// Fails with [`ParseError::DuplicateUnit`] when both sides carry a date
    /// or both carry a time.
    pub(crate) fn combine(self, other: Self) -> Result<Self, ParseError> {
        let clash = |unit: &str| ParseError::DuplicateUnit {
            unit: unit.to_string(),
            span: other.span.clone().or_else(|| self.span.clone()).unwrap_or(0..0),
        };
        // The grammar never pairs two dates; this guards direct callers.
        if self.date.is_some() && other.date.is_some() {
            return Err(clash("date"));
        }
        if self.time.is_some() && other.time.is_some() {
            return Err(clash("time"));
        }
        Ok(Self {
            date: self.date.or(other.date),
            time: self.time.or(other.time),
            span: self.span.or(other.span),
        })
    }

    /// Fill in missing parts: the current date and midnight.
    pub(crate) fn resolve(self) -> NaiveDateTime {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}

fn iso_date(token: &Token) -> Result<NaiveDate, ParseError> {
    let year: i32 = required(token, "year")?;
    if let Some(month) = field(token, "month")? {
        return ymd(token, year, month, required(token, "day")?);
    }
    if let Some(yearday) = field::<u32>(token, "yearday")? {
        return NaiveDate::from_yo_opt(year, yearday)
            .ok_or_else(|| invalid(format!("no such day {yearday:03} of {year:04}"), token));
    }
    let week: u32 = required(token, "week")?;
    let weekday: u32 = required(token, "weekday")?;
    iso_weekday(weekday)
        .and_then(|wd| NaiveDate::from_isoywd_opt(year, week, wd))
        .ok_or_else(|| invalid(format!("no such week date {year:04}-W{week:02}-{weekday}"), token))
}

/// Resolve a clock time, applying any am/pm suffix.
///
/// `12am` is midnight and `12pm` noon; other `pm` hours gain twelve.
fn clock_time(token: &Token) -> Result<NaiveTime, ParseError> {
    let hour: u32 = required(token, "hour")?;
    let hour = match token.field("ampm") {
        Some("am") if hour == 12 => 0,
        Some("pm") if hour != 12 => hour + 12,
        _ => hour,
    };
    hms(
        token,
        hour,
        field(token, "minute")?.unwrap_or(0),
        field(token, "second")?.unwrap_or(0),
    )
}
