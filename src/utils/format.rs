//! 表示用フォーマット

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// 日時の表示形式（例: 2023-01-01 05:30 AM）
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// 解析できなかった日時セルの表示
pub const INVALID_DATE: &str = "Invalid Date";

/// 給与を小数点以下2桁で表示
///
/// ちょうど中間の値は0から遠い方へ丸める（1000.125 → 1000.13）。
/// `-0.0` は `0.00` と表示する。
pub fn format_salary(salary: f64) -> String {
    if salary == 0.0 {
        return "0.00".to_string();
    }
    let magnitude = salary.abs();
    // 200倍が奇数の整数になるのは x.xx5 ちょうどの場合のみ。
    // mul_add で積の丸め誤差がないことも確認する
    let doubled = magnitude * 200.0;
    let is_tie = doubled.fract() == 0.0
        && doubled % 2.0 == 1.0
        && magnitude.mul_add(200.0, -doubled) == 0.0;
    if !is_tie {
        return format!("{:.2}", salary);
    }
    let cents = (doubled as u64 + 1) / 2;
    let sign = if salary < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

/// UTC日時を指定タイムゾーンに変換して表示
pub fn format_in_zone<Tz>(ts: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(zone).format(DATETIME_FORMAT).to_string()
}

/// UTC日時をブラウザのローカル時刻で表示
pub fn format_local(ts: &DateTime<Utc>) -> String {
    format_in_zone(ts, &Local)
}

pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(format_local).unwrap_or_else(|| INVALID_DATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_salary_two_decimals() {
        assert_eq!(format_salary(1234.5), "1234.50");
        assert_eq!(format_salary(0.0), "0.00");
        assert_eq!(format_salary(99999.999), "100000.00");
    }

    #[test]
    fn test_salary_exact_halves_round_up() {
        assert_eq!(format_salary(1000.125), "1000.13");
        assert_eq!(format_salary(0.625), "0.63");
        assert_eq!(format_salary(0.125), "0.13");
        assert_eq!(format_salary(-2.375), "-2.38");
    }

    #[test]
    fn test_salary_near_half_uses_stored_value() {
        // 1.005 は 1.00499999... として保持されている
        assert_eq!(format_salary(1.005), "1.00");
        assert_eq!(format_salary(1.015), "1.01");
    }

    #[test]
    fn test_salary_negative_zero() {
        assert_eq!(format_salary(-0.0), "0.00");
    }

    #[test]
    fn test_missing_timestamp_shows_invalid_date() {
        assert_eq!(format_timestamp(None), "Invalid Date");
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(Some(&ts)), format_local(&ts));
    }

    #[test]
    fn test_format_in_colombo_offset() {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(format_in_zone(&ts, &ist), "2023-01-01 05:30 AM");
    }

    #[test]
    fn test_format_afternoon_uses_twelve_hour_clock() {
        let ts = Utc.with_ymd_and_hms(2023, 3, 9, 13, 5, 0).unwrap();
        assert_eq!(format_in_zone(&ts, &Utc), "2023-03-09 01:05 PM");
    }

    #[test]
    fn test_format_crosses_date_boundary() {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 2, 0, 0).unwrap();
        let pst = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(format_in_zone(&ts, &pst), "2022-12-31 06:00 PM");
    }
}
