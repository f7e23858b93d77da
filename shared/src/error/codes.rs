//! Unified error codes for the PassPrive partner platform
//!
//! This module defines all error codes used across partner-server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Store / partner errors
//! - 4xxx: Booking and order errors
//! - 5xxx: Settlement / payout errors
//! - 6xxx: Catalog / inventory errors
//! - 7xxx: Gift card / offer errors
//! - 8xxx: Employee / import errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Store ====================
    /// Store not found
    StoreNotFound = 3001,
    /// Operation requires a different partner kind (e.g. corporate-only)
    StoreKindMismatch = 3002,

    // ==================== 4xxx: Booking / Order ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Booking status transition not allowed
    InvalidBookingStatus = 4002,
    /// Review index out of range for the store
    ReviewNotFound = 4003,
    /// Review already has a reply
    ReviewAlreadyReplied = 4004,
    /// Order not found
    OrderNotFound = 4101,

    // ==================== 5xxx: Settlement ====================
    /// Payout request not found
    PayoutNotFound = 5001,
    /// Payout request over a period with no payable amount
    PayoutAmountZero = 5002,

    // ==================== 6xxx: Catalog / Inventory ====================
    /// Catalog item not found
    ItemNotFound = 6001,
    /// Stock delta of zero is a no-op and rejected
    InvalidStockDelta = 6002,
    /// Discount percent must be within (0, 100]
    InvalidDiscountPercent = 6003,
    /// Item has no active discount to clear
    DiscountNotActive = 6004,

    // ==================== 7xxx: Gift Card / Offer ====================
    /// Gift card not found
    GiftCardNotFound = 7001,
    /// Gift card is not in active status
    GiftCardNotActive = 7002,
    /// Gift card expired
    GiftCardExpired = 7003,
    /// Could not allocate a unique code after retries
    GiftCardCodeCollision = 7004,
    /// Offer not found
    OfferNotFound = 7101,
    /// Offer discount value invalid for its type
    InvalidOfferValue = 7102,

    // ==================== 8xxx: Employee / Import ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee email already registered
    EmployeeEmailExists = 8002,
    /// Import file has no recognizable email column
    ImportEmailColumnMissing = 8003,
    /// Import file is empty or has no data rows
    ImportEmptyFile = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error (transient)
    NetworkError = 9004,
    /// Timeout error (transient)
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::StoreNotFound => "Store not found",
            Self::StoreKindMismatch => "Operation not available for this partner kind",

            Self::BookingNotFound => "Booking not found",
            Self::InvalidBookingStatus => "Booking status transition not allowed",
            Self::ReviewNotFound => "Review not found",
            Self::ReviewAlreadyReplied => "Review already has a reply",
            Self::OrderNotFound => "Order not found",

            Self::PayoutNotFound => "Payout request not found",
            Self::PayoutAmountZero => "Nothing payable for the requested period",

            Self::ItemNotFound => "Catalog item not found",
            Self::InvalidStockDelta => "Stock delta must be non-zero",
            Self::InvalidDiscountPercent => "Discount percent must be within (0, 100]",
            Self::DiscountNotActive => "Item has no active discount",

            Self::GiftCardNotFound => "Gift card not found",
            Self::GiftCardNotActive => "Gift card is not active",
            Self::GiftCardExpired => "Gift card expired",
            Self::GiftCardCodeCollision => "Could not allocate a unique code",
            Self::OfferNotFound => "Offer not found",
            Self::InvalidOfferValue => "Offer discount value invalid",

            Self::EmployeeNotFound => "Employee not found",
            Self::EmployeeEmailExists => "Email already registered",
            Self::ImportEmailColumnMissing => "Email column not found in import file",
            Self::ImportEmptyFile => "Import file has no data rows",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Operation timed out",
        }
    }

    /// Numeric value of this code
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            3001 => Self::StoreNotFound,
            3002 => Self::StoreKindMismatch,

            4001 => Self::BookingNotFound,
            4002 => Self::InvalidBookingStatus,
            4003 => Self::ReviewNotFound,
            4004 => Self::ReviewAlreadyReplied,
            4101 => Self::OrderNotFound,

            5001 => Self::PayoutNotFound,
            5002 => Self::PayoutAmountZero,

            6001 => Self::ItemNotFound,
            6002 => Self::InvalidStockDelta,
            6003 => Self::InvalidDiscountPercent,
            6004 => Self::DiscountNotActive,

            7001 => Self::GiftCardNotFound,
            7002 => Self::GiftCardNotActive,
            7003 => Self::GiftCardExpired,
            7004 => Self::GiftCardCodeCollision,
            7101 => Self::OfferNotFound,
            7102 => Self::InvalidOfferValue,

            8001 => Self::EmployeeNotFound,
            8002 => Self::EmployeeEmailExists,
            8003 => Self::ImportEmailColumnMissing,
            8004 => Self::ImportEmptyFile,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::NetworkError,
            9005 => Self::TimeoutError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
