//! 库存状态推导
//!
//! 库存状态永远由数量和阈值算出，写入路径 (仓储层的
//! 事务) 和这里保持同一套规则。

use crate::db::models::StockStatus;

/// 由数量和阈值推导库存状态
///
/// qty <= 0 缺货；qty <= threshold 低位；否则正常
pub fn derive_status(qty: i64, threshold: i64) -> StockStatus {
    if qty <= 0 {
        StockStatus::OutOfStock
    } else if qty <= threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// 一次库存调整的完整结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaOutcome {
    pub qty_before: i64,
    pub qty_after: i64,
    /// 实际生效的变化量，等于 qty_after - qty_before
    pub qty_delta: i64,
    pub status: StockStatus,
    pub is_available: bool,
}

/// 应用库存变化量，数量下限截断为 0
pub fn apply_delta(qty_before: i64, threshold: i64, delta: i64) -> DeltaOutcome {
    let qty_after = (qty_before + delta).max(0);
    let status = derive_status(qty_after, threshold);
    DeltaOutcome {
        qty_before,
        qty_after,
        qty_delta: qty_after - qty_before,
        status,
        is_available: qty_after > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_status_boundaries() {
        assert_eq!(derive_status(0, 5), StockStatus::OutOfStock);
        assert_eq!(derive_status(-3, 5), StockStatus::OutOfStock);
        assert_eq!(derive_status(1, 5), StockStatus::LowStock);
        assert_eq!(derive_status(5, 5), StockStatus::LowStock);
        assert_eq!(derive_status(6, 5), StockStatus::InStock);
    }

    #[test]
    fn test_zero_threshold() {
        // 阈值为 0 时只有缺货和正常两种状态
        assert_eq!(derive_status(0, 0), StockStatus::OutOfStock);
        assert_eq!(derive_status(1, 0), StockStatus::InStock);
    }

    #[test]
    fn test_apply_positive_delta() {
        let outcome = apply_delta(3, 5, 10);
        assert_eq!(outcome.qty_after, 13);
        assert_eq!(outcome.qty_delta, 10);
        assert_eq!(outcome.status, StockStatus::InStock);
        assert!(outcome.is_available);
    }

    #[test]
    fn test_apply_negative_delta_clamps_at_zero() {
        let outcome = apply_delta(3, 5, -10);
        assert_eq!(outcome.qty_after, 0);
        // 截断后实际只减了 3
        assert_eq!(outcome.qty_delta, -3);
        assert_eq!(outcome.status, StockStatus::OutOfStock);
        assert!(!outcome.is_available);
    }

    #[test]
    fn test_movement_invariant_holds() {
        for (before, delta) in [(10, -4), (2, -9), (0, 5), (7, 0)] {
            let outcome = apply_delta(before, 5, delta);
            assert_eq!(outcome.qty_after - outcome.qty_before, outcome.qty_delta);
        }
    }

    #[test]
    fn test_delta_into_low_stock() {
        let outcome = apply_delta(8, 5, -4);
        assert_eq!(outcome.qty_after, 4);
        assert_eq!(outcome.status, StockStatus::LowStock);
        assert!(outcome.is_available);
    }
}
