use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{option_record_id, record_id};

/// 预订状态机
///
/// pending -> confirmed | cancelled
/// confirmed -> completed | cancelled | no_show
/// completed / cancelled / no_show 为终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// 是否允许流转到目标状态
    pub fn can_transition(&self, to: BookingStatus) -> bool {
        match self {
            Self::Pending => matches!(to, Self::Confirmed | Self::Cancelled),
            Self::Confirmed => matches!(to, Self::Completed | Self::Cancelled | Self::NoShow),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// 状态分布统计使用的闭集，顺序固定
    pub const ALL: [BookingStatus; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
        Self::NoShow,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(
        with = "option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "record_id")]
    pub store: RecordId,
    pub customer_name: String,
    pub party_size: i32,
    pub status: BookingStatus,
    /// 预订来源渠道 (app / phone / walk_in ...)
    pub source: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingCreate {
    pub store_id: String,
    pub customer_name: String,
    pub party_size: i32,
    pub source: Option<String>,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(BookingStatus::Pending.can_transition(BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition(BookingStatus::Cancelled));
        assert!(!BookingStatus::Pending.can_transition(BookingStatus::Completed));
        assert!(!BookingStatus::Pending.can_transition(BookingStatus::NoShow));
    }

    #[test]
    fn test_confirmed_transitions() {
        assert!(BookingStatus::Confirmed.can_transition(BookingStatus::Completed));
        assert!(BookingStatus::Confirmed.can_transition(BookingStatus::NoShow));
        assert!(!BookingStatus::Confirmed.can_transition(BookingStatus::Pending));
    }

    #[test]
    fn test_terminal_states_immutable() {
        for terminal in [
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::NoShow,
        ] {
            assert!(terminal.is_terminal());
            for target in BookingStatus::ALL {
                assert!(!terminal.can_transition(target));
            }
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::NoShow).unwrap(),
            r#""no_show""#
        );
    }
}
