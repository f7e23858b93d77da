//! 按本地日分桶的时间序列
//!
//! 窗口内每一天都有桶，没有记录的日子保持零值，最旧的日期在前。

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::utils::time::local_date_of_millis;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayBucket {
    /// ISO 格式日期 (YYYY-MM-DD)
    pub date: NaiveDate,
    pub count: u32,
    pub sum: f64,
    /// 每个状态的子计数，零值状态也会出现
    pub by_status: BTreeMap<String, u32>,
}

/// 构建最近 `window_days` 天 (含今天) 的日序列
///
/// 窗口外的记录被丢弃；`value_of` 提供累加值，`status_of`
/// 返回 None 时该记录不计入任何状态子计数。
pub fn build_daily_series<T>(
    window_days: u32,
    today: NaiveDate,
    tz: Tz,
    status_domain: &[&str],
    records: &[T],
    ts_of: impl Fn(&T) -> i64,
    value_of: impl Fn(&T) -> f64,
    status_of: impl Fn(&T) -> Option<String>,
) -> Vec<DayBucket> {
    let window_days = window_days.max(1);
    let first_day = today - chrono::Duration::days(i64::from(window_days) - 1);

    let mut buckets: Vec<DayBucket> = (0..window_days)
        .map(|offset| DayBucket {
            date: first_day + chrono::Duration::days(i64::from(offset)),
            count: 0,
            sum: 0.0,
            by_status: status_domain
                .iter()
                .map(|s| (s.to_string(), 0))
                .collect(),
        })
        .collect();

    for record in records {
        let date = local_date_of_millis(ts_of(record), tz);
        if date < first_day || date > today {
            continue;
        }
        let idx = (date - first_day).num_days() as usize;
        let bucket = &mut buckets[idx];
        bucket.count += 1;
        bucket.sum += value_of(record);
        if let Some(status) = status_of(record) {
            *bucket.by_status.entry(status).or_insert(0) += 1;
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::day_start_millis;

    struct Rec {
        ts: i64,
        value: f64,
        status: &'static str,
    }

    fn ts_on(date: NaiveDate) -> i64 {
        // 当天中午，避开日界
        day_start_millis(date, chrono_tz::UTC) + 12 * 3600 * 1000
    }

    #[test]
    fn test_empty_input_yields_zero_buckets() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let series = build_daily_series::<Rec>(
            7,
            today,
            chrono_tz::UTC,
            &["confirmed"],
            &[],
            |r| r.ts,
            |r| r.value,
            |r| Some(r.status.to_string()),
        );
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
        assert_eq!(series[6].date, today);
        for bucket in &series {
            assert_eq!(bucket.count, 0);
            assert_eq!(bucket.sum, 0.0);
            assert_eq!(bucket.by_status["confirmed"], 0);
        }
    }

    #[test]
    fn test_records_land_in_their_day() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let d12 = NaiveDate::from_ymd_opt(2025, 6, 12).unwrap();
        let records = vec![
            Rec { ts: ts_on(d12), value: 10.0, status: "confirmed" },
            Rec { ts: ts_on(d12), value: 5.5, status: "cancelled" },
            Rec { ts: ts_on(today), value: 2.0, status: "confirmed" },
        ];
        let series = build_daily_series(
            7,
            today,
            chrono_tz::UTC,
            &["confirmed", "cancelled"],
            &records,
            |r| r.ts,
            |r| r.value,
            |r| Some(r.status.to_string()),
        );
        let bucket12 = series.iter().find(|b| b.date == d12).unwrap();
        assert_eq!(bucket12.count, 2);
        assert_eq!(bucket12.sum, 15.5);
        assert_eq!(bucket12.by_status["confirmed"], 1);
        assert_eq!(bucket12.by_status["cancelled"], 1);

        let bucket_today = series.last().unwrap();
        assert_eq!(bucket_today.count, 1);
        assert_eq!(bucket_today.by_status["confirmed"], 1);
    }

    #[test]
    fn test_records_outside_window_dropped() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let old = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let records = vec![
            Rec { ts: ts_on(old), value: 1.0, status: "confirmed" },
            Rec { ts: ts_on(future), value: 1.0, status: "confirmed" },
        ];
        let series = build_daily_series(
            7,
            today,
            chrono_tz::UTC,
            &[],
            &records,
            |r| r.ts,
            |r| r.value,
            |_| None,
        );
        assert!(series.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_oldest_first_ordering() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let series = build_daily_series::<Rec>(
            30,
            today,
            chrono_tz::UTC,
            &[],
            &[],
            |r| r.ts,
            |r| r.value,
            |_| None,
        );
        assert_eq!(series.len(), 30);
        for pair in series.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_timezone_affects_bucketing() {
        // UTC 23:30 在马德里已经是第二天
        let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let ts = chrono::TimeZone::with_ymd_and_hms(&chrono_tz::UTC, 2025, 1, 1, 23, 30, 0)
            .unwrap()
            .timestamp_millis();
        let records = vec![Rec { ts, value: 1.0, status: "x" }];
        let series = build_daily_series(
            2,
            today,
            chrono_tz::Europe::Madrid,
            &[],
            &records,
            |r| r.ts,
            |r| r.value,
            |_| None,
        );
        // 归入 1 月 2 日而不是 1 月 1 日
        assert_eq!(series[0].count, 0);
        assert_eq!(series[1].count, 1);
    }
}
