//! 时间范围标记与记录过滤
//!
//! 仪表盘所有列表和统计共用同一套范围语义:
//! "7" / "30" / "90" 表示含今天在内的最近 N 个本地日，"all" 不过滤。

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::utils::time::day_start_millis;
use shared::error::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    Last7,
    Last30,
    Last90,
    All,
}

impl RangeToken {
    /// 解析范围标记，未知值报错而不是静默回退
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim() {
            "7" => Ok(Self::Last7),
            "30" => Ok(Self::Last30),
            "90" => Ok(Self::Last90),
            "all" | "" => Ok(Self::All),
            other => Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("Unknown range token: {other}"),
            )
            .with_detail("allowed", serde_json::json!(["7", "30", "90", "all"]))),
        }
    }

    pub fn days(&self) -> Option<u32> {
        match self {
            Self::Last7 => Some(7),
            Self::Last30 => Some(30),
            Self::Last90 => Some(90),
            Self::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last7 => "7",
            Self::Last30 => "30",
            Self::Last90 => "90",
            Self::All => "all",
        }
    }
}

/// 范围的起始时刻 (含)，`All` 返回 None
///
/// N 天范围覆盖 [今天 - N + 1 的本地零点, +∞)，今天始终在范围内
pub fn range_start_millis(token: RangeToken, today: NaiveDate, tz: Tz) -> Option<i64> {
    let days = token.days()?;
    let first_day = today - chrono::Duration::days(i64::from(days) - 1);
    Some(day_start_millis(first_day, tz))
}

/// 按范围过滤记录，时间戳通过 `ts_of` 提取
pub fn filter_by_range<T>(records: Vec<T>, start: Option<i64>, ts_of: impl Fn(&T) -> i64) -> Vec<T> {
    match start {
        Some(start) => records.into_iter().filter(|r| ts_of(r) >= start).collect(),
        None => records,
    }
}

/// 不区分大小写的子串搜索，多个字段拼接后匹配
///
/// 空白查询不过滤
pub fn filter_by_query<T>(
    records: Vec<T>,
    query: &str,
    haystack_of: impl Fn(&T) -> Vec<String>,
) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| {
            haystack_of(r)
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::local_date_of_millis;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(RangeToken::parse("7").unwrap(), RangeToken::Last7);
        assert_eq!(RangeToken::parse("30").unwrap(), RangeToken::Last30);
        assert_eq!(RangeToken::parse("90").unwrap(), RangeToken::Last90);
        assert_eq!(RangeToken::parse("all").unwrap(), RangeToken::All);
        assert_eq!(RangeToken::parse("").unwrap(), RangeToken::All);
        assert!(RangeToken::parse("14").is_err());
        assert!(RangeToken::parse("week").is_err());
    }

    #[test]
    fn test_range_start_includes_today() {
        let tz = chrono_tz::UTC;
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let start = range_start_millis(RangeToken::Last7, today, tz).unwrap();
        // 7 天范围从 6 月 9 日零点开始
        assert_eq!(
            local_date_of_millis(start, tz),
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
        );
    }

    #[test]
    fn test_all_has_no_start() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(range_start_millis(RangeToken::All, today, chrono_tz::UTC), None);
    }

    #[test]
    fn test_filter_by_range_boundary() {
        // 边界时间戳本身在范围内，早一毫秒则不在
        let records = vec![999_i64, 1000, 1001, 5000];
        let kept = filter_by_range(records, Some(1000), |r| *r);
        assert_eq!(kept, vec![1000, 1001, 5000]);
    }

    #[test]
    fn test_filter_by_range_all_keeps_everything() {
        let records = vec![1_i64, 2, 3];
        assert_eq!(filter_by_range(records.clone(), None, |r| *r), records);
    }

    #[test]
    fn test_filter_by_query_case_insensitive() {
        let records = vec!["Alice Johnson", "Bob Smith", "carol ALICE"];
        let kept = filter_by_query(records, "alice", |r| vec![r.to_string()]);
        assert_eq!(kept, vec!["Alice Johnson", "carol ALICE"]);
    }

    #[test]
    fn test_filter_by_query_blank_is_noop() {
        let records = vec!["a", "b"];
        assert_eq!(
            filter_by_query(records.clone(), "   ", |r| vec![r.to_string()]),
            records
        );
    }

    #[test]
    fn test_filter_by_query_multiple_fields() {
        let records = vec![("Ana", "phone"), ("Ben", "app")];
        let kept = filter_by_query(records, "APP", |r| vec![r.0.to_string(), r.1.to_string()]);
        assert_eq!(kept, vec![("Ben", "app")]);
    }
}
