//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 3xxx: Store / partner errors
/// - 4xxx: Booking and order errors
/// - 5xxx: Settlement errors
/// - 6xxx: Catalog / inventory errors
/// - 7xxx: Gift card / offer errors
/// - 8xxx: Employee / import errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Store / partner errors (3xxx)
    Store,
    /// Booking and order errors (4xxx)
    Booking,
    /// Settlement errors (5xxx)
    Settlement,
    /// Catalog / inventory errors (6xxx)
    Catalog,
    /// Gift card / offer errors (7xxx)
    Rewards,
    /// Employee / import errors (8xxx)
    Employee,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..3000 => Self::General,
            3000..4000 => Self::Store,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Settlement,
            6000..7000 => Self::Catalog,
            7000..8000 => Self::Rewards,
            8000..9000 => Self::Employee,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Store => "store",
            Self::Booking => "booking",
            Self::Settlement => "settlement",
            Self::Catalog => "catalog",
            Self::Rewards => "rewards",
            Self::Employee => "employee",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::StoreNotFound.category(), ErrorCategory::Store);
        assert_eq!(ErrorCode::BookingNotFound.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::PayoutNotFound.category(), ErrorCategory::Settlement);
        assert_eq!(ErrorCode::ItemNotFound.category(), ErrorCategory::Catalog);
        assert_eq!(ErrorCode::GiftCardExpired.category(), ErrorCategory::Rewards);
        assert_eq!(ErrorCode::EmployeeEmailExists.category(), ErrorCategory::Employee);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ErrorCategory::Catalog.name(), "catalog");
        assert_eq!(ErrorCategory::System.name(), "system");
    }
}
