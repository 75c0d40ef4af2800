//! Order ledger - per-table line items and bill totals
//!
//! Every operation takes a table snapshot and returns a new one; the input
//! is never modified.

use super::validation::{ValidationError, validate_draft};
use shared::models::{Order, OrderDraft, Table, TableStatus};
use shared::money::Money;

/// Next order id within one table: `max(existing) + 1`, starting at 1
pub fn next_order_id(orders: &[Order]) -> i64 {
    orders
        .iter()
        .map(|o| o.id)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// Append a validated order and mark the table occupied
///
/// The status becomes `occupied` even if the table was reserved; the
/// reservation's arrival time is dropped with it.
pub fn add_order(table: &Table, draft: &OrderDraft) -> Result<Table, ValidationError> {
    let price = validate_draft(draft)?;

    let mut updated = table.clone();
    updated.orders.push(Order {
        id: next_order_id(&table.orders),
        name: draft.name.trim().to_string(),
        price,
        quantity: draft.quantity,
    });
    updated.status = TableStatus::Occupied;
    updated.arrival_time = None;
    Ok(updated)
}

/// Remove the order with `order_id`
///
/// Unknown ids leave the table unchanged. Removing the last order of an
/// occupied table makes it available; any other status is kept.
pub fn delete_order(table: &Table, order_id: i64) -> Table {
    let mut updated = table.clone();
    updated.orders.retain(|o| o.id != order_id);

    if updated.orders.len() != table.orders.len()
        && updated.orders.is_empty()
        && table.status == TableStatus::Occupied
    {
        updated.status = TableStatus::Available;
    }
    updated
}

/// Bill total: sum of `price × quantity`, exact in cents
pub fn total(table: &Table) -> Money {
    table.orders.iter().map(Order::line_total).sum()
}
