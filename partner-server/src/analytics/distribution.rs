//! 评分分布与状态分布

use std::collections::BTreeMap;

use serde::Serialize;

/// 1-5 星评分分布
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RatingDistribution {
    /// counts[0] 是 1 星，counts[4] 是 5 星
    pub counts: [u32; 5],
    /// 有评分的评价数
    pub rated: u32,
    /// 全部评价数 (含无评分)
    pub total: u32,
    /// 平均分 (仅基于有评分的评价)，无评分时为 None
    pub average: Option<f64>,
}

/// 统计评分分布
///
/// 小数评分四舍五入，超出 1-5 的截断到边界；None 和非有限值
/// 不计入分布和平均分，但计入 total。
pub fn rating_distribution(ratings: impl IntoIterator<Item = Option<f64>>) -> RatingDistribution {
    let mut counts = [0_u32; 5];
    let mut rated = 0_u32;
    let mut total = 0_u32;
    let mut sum = 0.0_f64;

    for rating in ratings {
        total += 1;
        let Some(rating) = rating else { continue };
        if !rating.is_finite() {
            continue;
        }
        let star = (rating.round() as i64).clamp(1, 5);
        counts[(star - 1) as usize] += 1;
        rated += 1;
        sum += rating;
    }

    let average = (rated > 0).then(|| sum / f64::from(rated));
    RatingDistribution {
        counts,
        rated,
        total,
        average,
    }
}

/// 状态分布，闭集内每个状态都有条目 (零值也在)
pub fn status_distribution<'a>(
    statuses: impl IntoIterator<Item = &'a str>,
    domain: &[&str],
) -> BTreeMap<String, u32> {
    let mut dist: BTreeMap<String, u32> = domain.iter().map(|s| (s.to_string(), 0)).collect();
    for status in statuses {
        if let Some(count) = dist.get_mut(status) {
            *count += 1;
        }
    }
    dist
}
