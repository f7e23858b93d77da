//! 仪表盘统计的纯计算层
//!
//! 所有函数都不接触数据库：读取在仓储层完成，
//! 这里只做过滤、分桶和汇总，便于独立测试。

pub mod distribution;
pub mod range;
pub mod sentiment;
pub mod series;

pub use distribution::{RatingDistribution, rating_distribution, status_distribution};
pub use range::{RangeToken, filter_by_query, filter_by_range, range_start_millis};
pub use sentiment::{Keyword, Sentiment, classify, score, top_keywords};
pub use series::{DayBucket, build_daily_series};
