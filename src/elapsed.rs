use std::fmt;

use chrono::{DateTime, Utc};

const MILLISECONDS_PER_SECOND: u64 = 1000;
const MILLISECONDS_PER_MINUTE: u64 = MILLISECONDS_PER_SECOND * 60;
const MILLISECONDS_PER_HOUR: u64 = MILLISECONDS_PER_MINUTE * 60;
const MILLISECONDS_PER_DAY: u64 = MILLISECONDS_PER_HOUR * 24;

/// 経過時間を日、時、分、秒に分解したもの。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElapsedUnits {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ElapsedUnits {
    /// `HH:MM:SS`形式の文字列を返す。
    pub fn clock_string(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl fmt::Display for ElapsedUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}", self.days, self.clock_string())
    }
}

/// 2つの日時の間の経過時間を計算する。
///
/// 差は絶対値で扱うため、`start`と`end`を入れ替えても結果は変わらない。
/// 1秒未満は切り捨てる。
///
/// # Arguments
///
/// * `start` - 開始日時
/// * `end` - 終了日時
///
/// # Examples
///
/// ```ignore
/// let units = compute_elapsed(&item.start_time(), &datetime::now());
/// println!("{} days", units.days);
/// ```
pub fn compute_elapsed(start: &DateTime<Utc>, end: &DateTime<Utc>) -> ElapsedUnits {
    let delta = end
        .signed_duration_since(*start)
        .num_milliseconds()
        .unsigned_abs();

    let days = delta / MILLISECONDS_PER_DAY;
    let remainder = delta % MILLISECONDS_PER_DAY;
    let hours = remainder / MILLISECONDS_PER_HOUR;
    let remainder = remainder % MILLISECONDS_PER_HOUR;
    let minutes = remainder / MILLISECONDS_PER_MINUTE;
    let remainder = remainder % MILLISECONDS_PER_MINUTE;
    let seconds = remainder / MILLISECONDS_PER_SECOND;

    // 上位の単位で割った余りなので、時分秒はu32に収まる
    ElapsedUnits {
        days,
        hours: hours as u32,
        minutes: minutes as u32,
        seconds: seconds as u32,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::rstest;

    use super::{compute_elapsed, ElapsedUnits};

    fn units(days: u64, hours: u32, minutes: u32, seconds: u32) -> ElapsedUnits {
        ElapsedUnits {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().to_utc()
    }

    #[rstest]
    #[case::ten_seconds("2021-01-01T00:00:00Z", "2021-01-01T00:00:10Z", units(0, 0, 0, 10))]
    #[case::one_second("2021-01-01T00:00:00Z", "2021-01-01T00:00:01Z", units(0, 0, 0, 1))]
    #[case::max_seconds("2021-01-01T00:00:00Z", "2021-01-01T00:00:59Z", units(0, 0, 0, 59))]
    #[case::one_minute("2021-01-01T00:00:00Z", "2021-01-01T00:01:01Z", units(0, 0, 1, 1))]
    #[case::max_minutes("2021-01-01T00:00:00Z", "2021-01-01T00:59:59Z", units(0, 0, 59, 59))]
    #[case::one_hour("2021-01-01T00:00:00Z", "2021-01-01T01:01:01Z", units(0, 1, 1, 1))]
    #[case::max_hours("2021-01-01T00:00:00Z", "2021-01-01T23:59:59Z", units(0, 23, 59, 59))]
    #[case::one_day("2021-01-01T00:00:00Z", "2021-01-02T01:01:01Z", units(1, 1, 1, 1))]
    #[case::one_week("2021-01-01T00:00:00Z", "2021-01-07T23:59:59Z", units(6, 23, 59, 59))]
    #[case::one_year("2021-01-01T00:00:00Z", "2022-01-01T00:00:00Z", units(365, 0, 0, 0))]
    #[case::start_in_future("2022-01-01T00:00:00Z", "2021-01-01T00:00:00Z", units(365, 0, 0, 0))]
    #[case::truncate_millis("2021-01-01T00:00:00Z", "2021-01-01T00:00:01.999Z", units(0, 0, 0, 1))]
    fn test_compute_elapsed(#[case] start: &str, #[case] end: &str, #[case] expected: ElapsedUnits) {
        assert_eq!(compute_elapsed(&at(start), &at(end)), expected);
    }

    /// 開始と終了を入れ替えても同じ結果になることを確認する。
    #[rstest]
    #[case(Duration::milliseconds(1))]
    #[case(Duration::seconds(86_399))]
    #[case(Duration::days(1000) + Duration::milliseconds(123_456))]
    fn test_compute_elapsed_is_symmetric(#[case] offset: Duration) {
        let a = Utc.with_ymd_and_hms(2021, 6, 15, 12, 0, 0).unwrap();
        let b = a - offset;

        assert_eq!(compute_elapsed(&a, &b), compute_elapsed(&b, &a));
    }

    #[test]
    fn test_compute_elapsed_same_instant() {
        let t = Utc.with_ymd_and_hms(2021, 6, 15, 12, 0, 0).unwrap();

        assert_eq!(compute_elapsed(&t, &t), ElapsedUnits::default());
    }

    /// 時分秒がそれぞれの範囲内に収まることを確認する。
    #[test]
    fn test_compute_elapsed_units_in_range() {
        let start = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        for step in 0..500_i64 {
            let end = start + Duration::milliseconds(step * 7_777_777);
            let elapsed = compute_elapsed(&start, &end);

            assert!(elapsed.seconds < 60);
            assert!(elapsed.minutes < 60);
            assert!(elapsed.hours < 24);
        }
    }

    #[test]
    fn test_clock_string() {
        assert_eq!(units(3, 4, 5, 6).clock_string(), "04:05:06");
        assert_eq!(units(3, 4, 5, 6).to_string(), "3d 04:05:06");
    }
}
