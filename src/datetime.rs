use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike, Utc};

#[cfg(not(test))]
/// 現在のUTC時間を取得する。
pub fn now() -> DateTime<Utc> {
    Utc::now()
}


#[cfg(test)]
pub use mock_datetime::now;

const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// `current`の時刻部分を保ったまま、`picked`の日付部分(年月日)をLocalタイムゾーンで反映する。
///
/// 反映後の日時がLocalタイムゾーンに存在しない場合(夏時間の切り替えなど)は`None`を返す。
pub fn merge_date(current: &DateTime<Utc>, picked: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    let current = current.with_timezone(&Local);
    let picked = picked.with_timezone(&Local);
    let merged = NaiveDateTime::new(picked.date_naive(), current.time());

    from_local(&merged)
}

/// `current`の日付部分を保ったまま、`picked`の時刻部分(時分秒)をLocalタイムゾーンで反映する。
///
/// 秒未満は`current`の値を引き継ぐ。
pub fn merge_time(current: &DateTime<Utc>, picked: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    let current = current.with_timezone(&Local);
    let picked = picked.with_timezone(&Local);
    let time = picked.time().with_nanosecond(current.nanosecond())?;
    let merged = NaiveDateTime::new(current.date_naive(), time);

    from_local(&merged)
}

fn from_local(naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|datetime| datetime.to_utc())
}

/// 日時を`Friday 1st Jan 09:05`の形式に変換する。
pub fn date_to_display_format(datetime: &DateTime<Utc>) -> String {
    let local = datetime.with_timezone(&Local);
    let day = DAYS[local.weekday().num_days_from_sunday() as usize];
    let date = ordinal_date_number(local.day());
    let month = MONTHS[local.month0() as usize];

    format!(
        "{} {} {} {:02}:{:02}",
        day,
        date,
        month,
        local.hour(),
        local.minute()
    )
}

/// 日付の数値に序数の接尾辞を付ける。
///
/// 11, 12, 13は`th`になる。
pub fn ordinal_date_number(number: u32) -> String {
    let suffix = match (number % 10, number % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };

    format!("{}{}", number, suffix)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, SecondsFormat, TimeZone, Timelike, Utc};
    use rstest::rstest;

    use super::mock_datetime;
    use super::{date_to_display_format, merge_date, merge_time, ordinal_date_number};

    /// 何も設定しない場合は、現在時間が取得できることを確認する。
    ///
    ///  - 現在時刻での比較を行なっているため、ミリ秒単位まで比較するとテストが失敗する可能性があり、秒単位で比較している。
    #[test]
    fn test_now() {
        assert_eq!(
            mock_datetime::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    /// モック時間を設定した時に、その時間が取得できることを確認する。
    #[test]
    fn test_now_specific_datetime() {
        let datetime = String::from("2024-01-01T00:00:00+00:00");
        mock_datetime::set_mock_time(
            DateTime::parse_from_rfc3339(datetime.as_str())
                .unwrap()
                .to_utc(),
        );

        assert_eq!(mock_datetime::now().to_rfc3339(), datetime);
        mock_datetime::clear_mock_time();
    }

    /// モック時間をリセットした時に、現在時間が取得できることを確認する。
    #[test]
    fn test_now_after_clear_mock_time() {
        let datetime = String::from("2024-01-01T00:00:00+00:00");
        mock_datetime::set_mock_time(
            DateTime::parse_from_rfc3339(datetime.as_str())
                .unwrap()
                .to_utc(),
        );
        mock_datetime::clear_mock_time();

        assert_eq!(
            mock_datetime::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .to_utc()
    }

    /// 日付の反映では時刻部分が保たれることを確認する。
    #[test]
    fn test_merge_date_keeps_time_of_day() {
        let current = local(2021, 3, 10, 14, 25, 36);
        let picked = local(2020, 7, 4, 1, 2, 3);

        let merged = merge_date(&current, &picked).unwrap();

        assert_eq!(merged, local(2020, 7, 4, 14, 25, 36));
    }

    /// 時刻の反映では日付部分と秒未満が保たれることを確認する。
    #[test]
    fn test_merge_time_keeps_date() {
        let current = local(2021, 3, 10, 14, 25, 36)
            .with_nanosecond(500_000_000)
            .unwrap();
        let picked = local(2020, 7, 4, 1, 2, 3);

        let merged = merge_time(&current, &picked).unwrap();

        assert_eq!(
            merged,
            local(2021, 3, 10, 1, 2, 3).with_nanosecond(500_000_000).unwrap()
        );
    }

    #[test]
    fn test_date_to_display_format() {
        let datetime = local(2021, 1, 1, 9, 5, 0);

        assert_eq!(date_to_display_format(&datetime), "Friday 1st Jan 09:05");
    }

    #[rstest]
    #[case(1, "1st")]
    #[case(2, "2nd")]
    #[case(3, "3rd")]
    #[case(4, "4th")]
    #[case(11, "11th")]
    #[case(12, "12th")]
    #[case(13, "13th")]
    #[case(21, "21st")]
    #[case(22, "22nd")]
    #[case(23, "23rd")]
    #[case(30, "30th")]
    #[case(31, "31st")]
    fn test_ordinal_date_number(#[case] number: u32, #[case] expected: &str) {
        assert_eq!(ordinal_date_number(number), expected);
    }
}
