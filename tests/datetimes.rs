//! Datetime literals and datetime arithmetic.

mod test_util;

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use rstest::rstest;
use test_util::{assert_fails, datetime, dt, duration, eval, secs};
use timecalc::{Duration, ErrorKind};

#[rstest]
#[case("2015/07/09", dt(2015, 7, 9, 0, 0, 0))]
#[case("2015/07/10 00:00", dt(2015, 7, 10, 0, 0, 0))]
#[case("2015/07/11 01:45", dt(2015, 7, 11, 1, 45, 0))]
#[case("2015/07/09 14:30", dt(2015, 7, 9, 14, 30, 0))]
#[case("2015/07/09 14:30:26", dt(2015, 7, 9, 14, 30, 26))]
#[case("2015/07/09 2:15pm", dt(2015, 7, 9, 14, 15, 0))]
#[case("2015/07/09 3am", dt(2015, 7, 9, 3, 0, 0))]
#[case("2015/07/09 12am", dt(2015, 7, 9, 0, 0, 0))]
#[case("2015/07/31 12pm", dt(2015, 7, 31, 12, 0, 0))]
#[case("2015-07-31", dt(2015, 7, 31, 0, 0, 0))]
#[case("2015-07-31 01:23", dt(2015, 7, 31, 1, 23, 0))]
#[case("2015-07-31 01:23:45", dt(2015, 7, 31, 1, 23, 45))]
#[case("2015-07-31T01:23:45", dt(2015, 7, 31, 1, 23, 45))]
#[case("20150731T0123", dt(2015, 7, 31, 1, 23, 0))]
#[case("20150731T012345", dt(2015, 7, 31, 1, 23, 45))]
#[case("2015-212", dt(2015, 7, 31, 0, 0, 0))]
#[case("2015-W31-5", dt(2015, 7, 31, 0, 0, 0))]
#[case("2015-07-31 3pm", dt(2015, 7, 31, 15, 0, 0))]
#[case("2:15pm 2015/07/09", dt(2015, 7, 9, 14, 15, 0))]
#[case("9.30am 2015-07-31", dt(2015, 7, 31, 9, 30, 0))]
#[case("epoch", dt(1970, 1, 1, 0, 0, 0))]
fn literals(#[case] source: &str, #[case] expected: NaiveDateTime) {
    assert_eq!(datetime(source), expected);
}

#[test]
fn now_is_current_to_the_second() {
    let before = Local::now().naive_local().with_nanosecond(0);
    let now = datetime("now");
    let after = Local::now().naive_local();
    assert_eq!(now.nanosecond(), 0);
    assert!(before.is_some_and(|b| b <= now) && now <= after);
}

#[test]
fn today_is_midnight() {
    let today = datetime("today");
    assert_eq!(today.time(), NaiveTime::MIN);
    assert!(today.date() <= Local::now().date_naive());
}

#[test]
fn bare_time_is_today() {
    let value = datetime("14:30");
    assert_eq!(value.time(), NaiveTime::from_hms_opt(14, 30, 0).unwrap_or(NaiveTime::MIN));
    assert!(value.date() <= Local::now().date_naive());
}

#[rstest]
#[case("2015-02-29")]
#[case("2015-01-01 42:00")]
#[case("2015-01-01 00:99")]
#[case("2015/13/01")]
#[case("2015-W54-1")]
#[case("2015/07/09 13pm")]
fn impossible_dates_fail(#[case] source: &str) {
    assert_fails(source, ErrorKind::InvalidDate);
}

#[rstest]
#[case("2015/07/09 2pm 3pm", ErrorKind::ExtraData)]
#[case("2015-07-31 10:00 3pm", ErrorKind::DuplicateUnit)]
#[case("2015-07-31T10:00 14:00", ErrorKind::DuplicateUnit)]
#[case("3pm 2015/07/09 2015/07/10", ErrorKind::ExtraData)]
#[case("today 3pm 4pm", ErrorKind::ExtraData)]
fn components_combine_at_most_once(#[case] source: &str, #[case] kind: ErrorKind) {
    assert_fails(source, kind);
}

#[rstest]
#[case("2015/07/31 - 2015/07/30", secs(86_400))]
#[case("2015/07/15 - 2015/08/15", secs(-31 * 86_400))]
#[case("2015/07/15 12pm - 2015/08/15 00:00", secs(-30 * 86_400 - 12 * 3_600))]
#[case("2015/03/15 01:10 - 2015/02/15 23:20", secs(27 * 86_400 + 3_600 + 50 * 60))]
#[case("23:20 - 01:10", secs(22 * 3_600 + 10 * 60))]
#[case("01:10 - 23:20", secs(-22 * 3_600 - 10 * 60))]
#[case("1970/01/10 - epoch", secs(9 * 86_400))]
#[case("2016-03-01 - 2016-02-01", secs(29 * 86_400))]
fn differences(#[case] source: &str, #[case] expected: Duration) {
    assert_eq!(duration(source), expected);
}

#[rstest]
#[case("2015/07/31 + 1 day", dt(2015, 8, 1, 0, 0, 0))]
#[case("2015/07/31 + 2 days", dt(2015, 8, 2, 0, 0, 0))]
#[case("2015/02/28 + 1 day", dt(2015, 3, 1, 0, 0, 0))]
#[case("1 day + 2015/02/28", dt(2015, 3, 1, 0, 0, 0))]
#[case("2015/05/04 + 3 hours, 10 seconds", dt(2015, 5, 4, 3, 0, 10))]
#[case("2015/05/04 + 3 hours + 10 seconds", dt(2015, 5, 4, 3, 0, 10))]
#[case("2015/05/04 10:45 + 3 hours + 10 seconds", dt(2015, 5, 4, 13, 45, 10))]
#[case("2015/05/04 10:45 - 3 hours + 10 seconds", dt(2015, 5, 4, 7, 45, 10))]
#[case("2015/01/31 + 1 month", dt(2015, 3, 2, 0, 0, 0))]
fn shifting_by_durations(#[case] source: &str, #[case] expected: NaiveDateTime) {
    assert_eq!(datetime(source), expected);
}

#[test]
fn datetimes_render_without_zero_fraction() {
    assert_eq!(eval("2015/07/09 2:15pm").to_string(), "2015-07-09 14:15:00");
    assert_eq!(
        eval("2015/07/09 + 1500 ms").to_string(),
        "2015-07-09 00:00:01.500"
    );
}
