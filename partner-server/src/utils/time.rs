//! 时区相关的时间工具
//!
//! 所有日期归属和范围计算都按商家配置的业务时区进行，
//! 时间戳统一使用 Unix 毫秒。

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// 某个本地日期在给定时区的零点，返回 Unix 毫秒
///
/// 夏令时导致零点不存在/有歧义时取最早的有效时刻
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match tz.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) => dt.timestamp_millis(),
        chrono::LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        // 零点被跳过 (春季 DST)，用 UTC 零点近似后换回时区
        chrono::LocalResult::None => tz
            .from_utc_datetime(&midnight)
            .timestamp_millis(),
    }
}

/// Unix 毫秒时间戳在给定时区的本地日期
pub fn local_date_of_millis(ts_millis: i64, tz: Tz) -> NaiveDate {
    match Utc.timestamp_millis_opt(ts_millis) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&tz).date_naive(),
        _ => NaiveDate::default(),
    }
}

/// 当前时刻在给定时区的本地日期
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_start_roundtrip() {
        let tz = chrono_tz::Europe::Madrid;
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let start = day_start_millis(date, tz);
        assert_eq!(local_date_of_millis(start, tz), date);
        // 前一毫秒属于前一天
        assert_eq!(
            local_date_of_millis(start - 1, tz),
            date.pred_opt().unwrap()
        );
    }

    #[test]
    fn test_local_date_respects_timezone() {
        // 2025-01-01 23:30 UTC 在马德里已经是 1 月 2 日
        let ts = Utc
            .with_ymd_and_hms(2025, 1, 1, 23, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(
            local_date_of_millis(ts, chrono_tz::Europe::Madrid),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );
        assert_eq!(
            local_date_of_millis(ts, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_dst_spring_forward() {
        // 2025-03-30 马德里进入夏令时，零点仍然有效
        let tz = chrono_tz::Europe::Madrid;
        let date = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let start = day_start_millis(date, tz);
        assert_eq!(local_date_of_millis(start, tz), date);
    }
}
