//! Menu catalog entries

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Read-only catalog entry used to prefill new orders
///
/// Catalog ids are unrelated to order or table ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: Money,
}
