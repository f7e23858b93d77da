//! 数据模型定义
//!
//! 模型同时用于数据库读写和 API 序列化，
//! RecordId 字段统一通过 serde_helpers 兼容字符串和原生形式。

pub mod booking;
pub mod catalog_item;
pub mod employee;
pub mod gift_card;
pub mod offer;
pub mod order;
pub mod payout_request;
pub mod review;
pub mod serde_helpers;
pub mod stock_movement;
pub mod store;

pub use booking::{Booking, BookingCreate, BookingStatus, BookingStatusUpdate};
pub use catalog_item::{
    CatalogItem, DiscountSet, ItemCreate, ItemUpdate, StockAdjust, StockStatus,
};
pub use employee::{BulkCreateReport, Employee, EmployeeCreate, EmployeeStatus, FailedRow};
pub use gift_card::{CardKind, CardStatus, GiftCard, GiftCardIssue};
pub use offer::{
    DiscountType, EligibilityContext, Offer, OfferConditions, OfferCreate, OfferUpdate,
};
pub use order::{Order, OrderCreate, OrderStatus, PaymentMethod, PaymentStatus};
pub use payout_request::{PayoutDirection, PayoutRequest, PayoutRequestCreate, PayoutStatus};
pub use review::{Review, ReviewCreate, ReviewReply, ReviewReplyCreate};
pub use stock_movement::{MovementType, StockMovement};
pub use store::{Store, StoreCreate, StoreKind};
