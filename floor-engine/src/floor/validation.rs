//! Input validation for order drafts and table records
//!
//! Validation runs before any mutation; a rejected intent leaves the floor
//! untouched.

use chrono::NaiveTime;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderDraft, Table, TableStatus};
use shared::money::Money;
use std::collections::HashSet;
use thiserror::Error;

/// Maximum allowed price per item (1,000,000 currency units)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per item
pub const MAX_QUANTITY: u32 = 9999;
/// Product and table names
pub const MAX_NAME_LEN: usize = 200;
/// Arrival time format used by the reservation form
pub const ARRIVAL_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("order name must not be empty")]
    EmptyName,

    #[error("{field} is too long ({len} chars, max {max})")]
    NameTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("price must be a finite number, got {0}")]
    NonFinitePrice(f64),

    #[error("price must be non-negative, got {0}")]
    NegativePrice(f64),

    #[error("price exceeds maximum allowed ({max}), got {price}")]
    PriceTooHigh { price: f64, max: f64 },

    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(u32),

    #[error("quantity exceeds maximum allowed ({max}), got {quantity}")]
    QuantityTooHigh { quantity: u32, max: u32 },

    #[error("table number must be at least 1, got {0}")]
    InvalidNumber(i64),

    #[error("capacity must be at least 1, got {0}")]
    InvalidCapacity(u32),

    #[error("table size must be positive, got {width}x{height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("table position must be finite and non-negative, got ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },

    #[error("arrival time must be HH:MM, got {0:?}")]
    InvalidArrivalTime(String),

    #[error("table number {number} is already used by table id {taken_by}")]
    NumberTaken { number: i64, taken_by: i64 },

    #[error("order id {0} appears more than once on the table")]
    DuplicateOrderId(i64),
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyName => ErrorCode::OrderNameRequired,
            Self::NameTooLong { .. } => ErrorCode::ValueOutOfRange,
            Self::NonFinitePrice(_) | Self::NegativePrice(_) | Self::PriceTooHigh { .. } => {
                ErrorCode::InvalidAmount
            }
            Self::NonPositiveQuantity(_) | Self::QuantityTooHigh { .. } => {
                ErrorCode::InvalidQuantity
            }
            Self::InvalidNumber(_)
            | Self::InvalidCapacity(_)
            | Self::InvalidSize { .. }
            | Self::InvalidPosition { .. } => ErrorCode::InvalidTableAttribute,
            Self::InvalidArrivalTime(_) => ErrorCode::InvalidArrivalTime,
            Self::NumberTaken { .. } => ErrorCode::TableNumberTaken,
            Self::DuplicateOrderId(_) => ErrorCode::InvalidTableAttribute,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            ValidationError::NumberTaken { taken_by, .. } => app.with_detail("taken_by", taken_by),
            ValidationError::DuplicateOrderId(order_id) => app.with_detail("order_id", order_id),
            _ => app,
        }
    }
}

fn check_name_len(value: &str, field: &'static str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            field,
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

fn check_order_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    check_name_len(name.trim(), "order name")
}

fn check_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::NonPositiveQuantity(quantity));
    }
    if quantity > MAX_QUANTITY {
        return Err(ValidationError::QuantityTooHigh {
            quantity,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validate an order draft and return its price in cents
pub fn validate_draft(draft: &OrderDraft) -> Result<Money, ValidationError> {
    check_order_name(&draft.name)?;

    if !draft.price.is_finite() {
        return Err(ValidationError::NonFinitePrice(draft.price));
    }
    if draft.price < 0.0 {
        return Err(ValidationError::NegativePrice(draft.price));
    }
    if draft.price > MAX_PRICE {
        return Err(ValidationError::PriceTooHigh {
            price: draft.price,
            max: MAX_PRICE,
        });
    }

    check_quantity(draft.quantity)?;

    Money::from_f64(draft.price).ok_or(ValidationError::NonFinitePrice(draft.price))
}

/// Validate a stored order line with the same rules as a draft
pub fn validate_order(order: &Order) -> Result<(), ValidationError> {
    check_order_name(&order.name)?;

    if order.price.is_negative() {
        return Err(ValidationError::NegativePrice(order.price.to_f64()));
    }
    if order.price.to_f64() > MAX_PRICE {
        return Err(ValidationError::PriceTooHigh {
            price: order.price.to_f64(),
            max: MAX_PRICE,
        });
    }

    check_quantity(order.quantity)
}

/// Validate the editable attributes of a table record, orders included
pub fn validate_table(table: &Table) -> Result<(), ValidationError> {
    if table.number < 1 {
        return Err(ValidationError::InvalidNumber(table.number));
    }
    if table.capacity < 1 {
        return Err(ValidationError::InvalidCapacity(table.capacity));
    }
    check_name_len(&table.name, "table name")?;

    let size_ok = |v: f64| v.is_finite() && v > 0.0;
    if !size_ok(table.width) || !size_ok(table.height) {
        return Err(ValidationError::InvalidSize {
            width: table.width,
            height: table.height,
        });
    }
    let pos_ok = |v: f64| v.is_finite() && v >= 0.0;
    if !pos_ok(table.x) || !pos_ok(table.y) {
        return Err(ValidationError::InvalidPosition {
            x: table.x,
            y: table.y,
        });
    }

    if table.status == TableStatus::Reserved
        && let Some(time) = &table.arrival_time
    {
        NaiveTime::parse_from_str(time, ARRIVAL_TIME_FORMAT)
            .map_err(|_| ValidationError::InvalidArrivalTime(time.clone()))?;
    }

    let mut seen = HashSet::with_capacity(table.orders.len());
    for order in &table.orders {
        if !seen.insert(order.id) {
            return Err(ValidationError::DuplicateOrderId(order.id));
        }
        validate_order(order)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft_returns_cents() {
        let draft = OrderDraft::new("Café Latte", 45.5, 2);
        assert_eq!(validate_draft(&draft), Ok(Money::from_cents(4550)));
    }

    #[test]
    fn test_draft_rejections() {
        let cases = [
            (OrderDraft::new("", 10.0, 1), ErrorCode::OrderNameRequired),
            (OrderDraft::new("   ", 10.0, 1), ErrorCode::OrderNameRequired),
            (OrderDraft::new("Agua", -0.01, 1), ErrorCode::InvalidAmount),
            (OrderDraft::new("Agua", f64::NAN, 1), ErrorCode::InvalidAmount),
            (OrderDraft::new("Agua", 2_000_000.0, 1), ErrorCode::InvalidAmount),
            (OrderDraft::new("Agua", 10.0, 0), ErrorCode::InvalidQuantity),
            (OrderDraft::new("Agua", 10.0, 10_000), ErrorCode::InvalidQuantity),
        ];
        for (draft, code) in cases {
            let err = validate_draft(&draft).unwrap_err();
            assert_eq!(err.code(), code, "draft {:?}", draft);
        }
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let draft = OrderDraft::new("Agua del grifo", 0.0, 1);
        assert_eq!(validate_draft(&draft), Ok(Money::ZERO));
    }

    #[test]
    fn test_table_attribute_rejections() {
        let base = Table::new_default(1, 1);

        let mut t = base.clone();
        t.capacity = 0;
        assert_eq!(validate_table(&t), Err(ValidationError::InvalidCapacity(0)));

        let mut t = base.clone();
        t.number = 0;
        assert_eq!(validate_table(&t), Err(ValidationError::InvalidNumber(0)));

        let mut t = base.clone();
        t.width = 0.0;
        assert!(matches!(
            validate_table(&t),
            Err(ValidationError::InvalidSize { .. })
        ));

        let mut t = base;
        t.x = -1.0;
        assert!(matches!(
            validate_table(&t),
            Err(ValidationError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_arrival_time_format() {
        let mut t = Table::new_default(4, 4);
        t.status = TableStatus::Reserved;
        t.arrival_time = Some("20:30".to_string());
        assert!(validate_table(&t).is_ok());

        t.arrival_time = Some("8pm".to_string());
        assert_eq!(
            validate_table(&t),
            Err(ValidationError::InvalidArrivalTime("8pm".to_string()))
        );
    }

    fn line(id: i64, cents: i64, quantity: u32) -> Order {
        Order {
            id,
            name: format!("item-{}", id),
            price: Money::from_cents(cents),
            quantity,
        }
    }

    #[test]
    fn test_table_orders_are_validated() {
        let mut t = Table::new_default(1, 1);
        t.status = TableStatus::Occupied;
        t.orders = vec![line(1, 3500, 2), line(2, 0, 1)];
        assert!(validate_table(&t).is_ok());

        t.orders = vec![line(1, 3500, 1), line(1, 100, 1)];
        assert_eq!(validate_table(&t), Err(ValidationError::DuplicateOrderId(1)));

        t.orders = vec![line(1, -5000, 1)];
        assert_eq!(validate_table(&t), Err(ValidationError::NegativePrice(-50.0)));

        t.orders = vec![line(1, 100, 0)];
        assert_eq!(validate_table(&t), Err(ValidationError::NonPositiveQuantity(0)));

        t.orders = vec![line(1, 100, MAX_QUANTITY + 1)];
        assert!(matches!(
            validate_table(&t),
            Err(ValidationError::QuantityTooHigh { .. })
        ));

        t.orders = vec![line(1, 200_000_000, 1)];
        assert!(matches!(
            validate_table(&t),
            Err(ValidationError::PriceTooHigh { .. })
        ));

        let mut unnamed = line(1, 100, 1);
        unnamed.name = "  ".to_string();
        t.orders = vec![unnamed];
        assert_eq!(validate_table(&t), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = ValidationError::NegativePrice(-3.0).into();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.message, "price must be non-negative, got -3");
        assert!(err.details.is_none());

        let err: AppError = ValidationError::NumberTaken {
            number: 2,
            taken_by: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::TableNumberTaken);
        assert_eq!(err.details.unwrap()["taken_by"], 5);
    }
}
