//! Order line items and order-form input

use super::menu::MenuItem;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One priced, quantified line on a table's bill
///
/// `id` is unique within the owning table only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

impl Order {
    /// `price × quantity`
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// Unvalidated order-form input
///
/// `price` is kept as entered so that NaN and negative values can be
/// rejected by validation instead of being unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderDraft {
    pub fn new(name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Prefill from a menu catalog entry with a quantity of one
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_f64(),
            quantity: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let order = Order {
            id: 1,
            name: "Café Americano".to_string(),
            price: Money::from_units(35),
            quantity: 2,
        };
        assert_eq!(order.line_total(), Money::from_units(70));
    }

    #[test]
    fn test_draft_from_menu_item() {
        let item = MenuItem {
            id: "tiramisu".to_string(),
            name: "Tiramisú Clásico".to_string(),
            price: Money::from_cents(12050),
        };
        let draft = OrderDraft::from_menu_item(&item);
        assert_eq!(draft.name, "Tiramisú Clásico");
        assert_eq!(draft.price, 120.5);
        assert_eq!(draft.quantity, 1);
    }
}
