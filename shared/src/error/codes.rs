//! Unified error codes for the floor-plan workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and for hosts that only understand numbers (UI layers, logs).
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
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order line has no product name
    OrderNameRequired = 4101,
    /// Price is negative, not finite or above the allowed maximum
    InvalidAmount = 4102,
    /// Quantity is not positive or above the allowed maximum
    InvalidQuantity = 4103,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Display number already used by another table
    TableNumberTaken = 7005,
    /// Capacity, number or geometry out of range
    InvalidTableAttribute = 7006,
    /// Arrival time is not a valid HH:MM value
    InvalidArrivalTime = 7007,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Snapshot store failed to read or write
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Stored snapshot could not be decoded
    SnapshotCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNameRequired => "Order item name is required",
            ErrorCode::InvalidAmount => "Order item price is invalid",
            ErrorCode::InvalidQuantity => "Order item quantity is invalid",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberTaken => "Table number is already in use",
            ErrorCode::InvalidTableAttribute => "Table attribute is out of range",
            ErrorCode::InvalidArrivalTime => "Arrival time must be HH:MM",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Snapshot storage error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::SnapshotCorrupted => "Stored snapshot is corrupted",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4101 => Ok(ErrorCode::OrderNameRequired),
            4102 => Ok(ErrorCode::InvalidAmount),
            4103 => Ok(ErrorCode::InvalidQuantity),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7005 => Ok(ErrorCode::TableNumberTaken),
            7006 => Ok(ErrorCode::InvalidTableAttribute),
            7007 => Ok(ErrorCode::InvalidArrivalTime),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::ConfigError),
            9403 => Ok(ErrorCode::SnapshotCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
