use chrono::Datelike;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{option_record_id, record_id};
use crate::utils::time::local_date_of_millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percent,
    Flat,
}

/// 优惠适用条件，所有条件按 AND 组合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferConditions {
    pub min_guests: Option<i32>,
    pub min_bill_amount: Option<f64>,
    #[serde(default)]
    pub new_users_only: bool,
    #[serde(default)]
    pub weekdays_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    #[serde(
        with = "option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "record_id")]
    pub store: RecordId,
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub conditions: OfferConditions,
    pub is_active: bool,
    pub created_at: i64,
}

/// 资格评估的上下文
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityContext {
    pub party_size: i32,
    pub bill_amount: f64,
    #[serde(default)]
    pub is_new_user: bool,
    /// 消费时刻 (Unix 毫秒)，工作日条件按业务时区判定
    pub at_millis: i64,
}

impl Offer {
    /// 判断给定消费场景是否满足本优惠的全部条件
    pub fn is_eligible(&self, ctx: &EligibilityContext, tz: chrono_tz::Tz) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(min_guests) = self.conditions.min_guests {
            if ctx.party_size < min_guests {
                return false;
            }
        }
        if let Some(min_bill) = self.conditions.min_bill_amount {
            if ctx.bill_amount < min_bill {
                return false;
            }
        }
        if self.conditions.new_users_only && !ctx.is_new_user {
            return false;
        }
        if self.conditions.weekdays_only {
            let weekday = local_date_of_millis(ctx.at_millis, tz).weekday();
            if matches!(weekday, chrono::Weekday::Sat | chrono::Weekday::Sun) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfferCreate {
    pub store_id: String,
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub conditions: OfferConditions,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfferUpdate {
    pub title: Option<String>,
    pub discount_value: Option<f64>,
    pub conditions: Option<OfferConditions>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offer(conditions: OfferConditions) -> Offer {
        Offer {
            id: None,
            store: RecordId::from_table_key("store", "s1"),
            title: "Test offer".into(),
            discount_type: DiscountType::Percent,
            discount_value: 10.0,
            conditions,
            is_active: true,
            created_at: 0,
        }
    }

    fn ctx_at(party_size: i32, bill: f64, ts: i64) -> EligibilityContext {
        EligibilityContext {
            party_size,
            bill_amount: bill,
            is_new_user: false,
            at_millis: ts,
        }
    }

    fn monday_noon() -> i64 {
        // 2025-06-02 是周一
        chrono_tz::UTC
            .with_ymd_and_hms(2025, 6, 2, 12, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn sunday_noon() -> i64 {
        chrono_tz::UTC
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_no_conditions_always_eligible() {
        let o = offer(OfferConditions::default());
        assert!(o.is_eligible(&ctx_at(1, 0.0, monday_noon()), chrono_tz::UTC));
    }

    #[test]
    fn test_min_guests_boundary() {
        let o = offer(OfferConditions {
            min_guests: Some(4),
            ..Default::default()
        });
        assert!(!o.is_eligible(&ctx_at(3, 100.0, monday_noon()), chrono_tz::UTC));
        assert!(o.is_eligible(&ctx_at(4, 100.0, monday_noon()), chrono_tz::UTC));
    }

    #[test]
    fn test_min_bill_boundary() {
        let o = offer(OfferConditions {
            min_bill_amount: Some(50.0),
            ..Default::default()
        });
        assert!(!o.is_eligible(&ctx_at(2, 49.99, monday_noon()), chrono_tz::UTC));
        assert!(o.is_eligible(&ctx_at(2, 50.0, monday_noon()), chrono_tz::UTC));
    }

    #[test]
    fn test_new_users_only() {
        let o = offer(OfferConditions {
            new_users_only: true,
            ..Default::default()
        });
        assert!(!o.is_eligible(&ctx_at(2, 100.0, monday_noon()), chrono_tz::UTC));
        let mut ctx = ctx_at(2, 100.0, monday_noon());
        ctx.is_new_user = true;
        assert!(o.is_eligible(&ctx, chrono_tz::UTC));
    }

    #[test]
    fn test_weekdays_only() {
        let o = offer(OfferConditions {
            weekdays_only: true,
            ..Default::default()
        });
        assert!(o.is_eligible(&ctx_at(2, 100.0, monday_noon()), chrono_tz::UTC));
        assert!(!o.is_eligible(&ctx_at(2, 100.0, sunday_noon()), chrono_tz::UTC));
    }

    #[test]
    fn test_inactive_offer_never_eligible() {
        let mut o = offer(OfferConditions::default());
        o.is_active = false;
        assert!(!o.is_eligible(&ctx_at(10, 1000.0, monday_noon()), chrono_tz::UTC));
    }

    #[test]
    fn test_conditions_combine_with_and() {
        let o = offer(OfferConditions {
            min_guests: Some(2),
            min_bill_amount: Some(30.0),
            ..Default::default()
        });
        assert!(o.is_eligible(&ctx_at(2, 30.0, monday_noon()), chrono_tz::UTC));
        assert!(!o.is_eligible(&ctx_at(2, 20.0, monday_noon()), chrono_tz::UTC));
        assert!(!o.is_eligible(&ctx_at(1, 100.0, monday_noon()), chrono_tz::UTC));
    }
}
