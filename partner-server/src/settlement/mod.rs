//! 结算计算
//!
//! 金额运算全部走 Decimal，出口统一四舍五入两位小数，
//! 避免浮点累加误差进入对账单。

use rust_decimal::prelude::*;
use serde::Serialize;

use crate::db::models::{Order, OrderStatus, PaymentStatus};

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// 结算汇总
///
/// partner_payable 和 to_passprive 互斥：最多一个非零
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SettlementSummary {
    /// 有效订单总营业额
    pub business_made: f64,
    /// 现金类收款 (商家已自行收到)
    pub cash_received: f64,
    /// 线上收款 (平台代收)
    pub online_collected: f64,
    /// 平台佣金
    pub commission_due: f64,
    /// 平台应付给商家
    pub partner_payable: f64,
    /// 商家应补缴平台
    pub to_passprive: f64,
    pub order_count: u32,
}

impl SettlementSummary {
    pub fn zero() -> Self {
        Self {
            business_made: 0.0,
            cash_received: 0.0,
            online_collected: 0.0,
            commission_due: 0.0,
            partner_payable: 0.0,
            to_passprive: 0.0,
            order_count: 0,
        }
    }
}

/// 订单是否计入结算
///
/// 必须已支付，且订单未取消/未退款、支付未失败未退款
pub fn is_settleable(order: &Order) -> bool {
    order.payment_status == PaymentStatus::Paid
        && !matches!(
            order.order_status,
            OrderStatus::Cancelled | OrderStatus::Refunded
        )
}

/// 汇总一批订单的结算金额
///
/// 佣金按每笔订单落单时的 commission_percent 快照计算
pub fn compute(orders: &[Order]) -> SettlementSummary {
    let mut business = Decimal::ZERO;
    let mut cash = Decimal::ZERO;
    let mut online = Decimal::ZERO;
    let mut commission = Decimal::ZERO;
    let mut count = 0_u32;

    let hundred = Decimal::from(100);

    for order in orders {
        if !is_settleable(order) {
            continue;
        }
        count += 1;
        let amount = to_decimal(order.total_amount);
        business += amount;
        if order.payment_method.is_cash_like() {
            cash += amount;
        } else {
            online += amount;
        }
        commission += amount * to_decimal(order.commission_percent) / hundred;
    }

    let net = online - commission;
    let partner_payable = net.max(Decimal::ZERO);
    let to_passprive = (-net).max(Decimal::ZERO);

    SettlementSummary {
        business_made: to_f64(business),
        cash_received: to_f64(cash),
        online_collected: to_f64(online),
        commission_due: to_f64(commission),
        partner_payable: to_f64(partner_payable),
        to_passprive: to_f64(to_passprive),
        order_count: count,
    }
}
