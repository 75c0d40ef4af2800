//! Table registry - the floor's collection of table records
//!
//! Functions here are pure: they read a slice of tables and return the next
//! collection. The caller decides when to swap it in and persist it.

use super::validation::{ValidationError, validate_table};
use serde::{Deserialize, Serialize};
use shared::models::{Table, TableStatus};
use std::str::FromStr;

/// How display numbers are policed on manual edits
///
/// `add_table` always picks `max(number) + 1`; this only governs edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberPolicy {
    /// Duplicate numbers are accepted
    #[default]
    Permissive,
    /// An edit that reuses another table's number is rejected
    Unique,
}

impl FromStr for NumberPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "unique" => Ok(Self::Unique),
            other => Err(format!("unknown table number policy: {}", other)),
        }
    }
}

/// `max(id) + 1`, starting at 1; saturates at `i64::MAX`
pub fn next_table_id(tables: &[Table]) -> i64 {
    tables
        .iter()
        .map(|t| t.id)
        .max()
        .unwrap_or(0)
        .max(0)
        .saturating_add(1)
}

/// `max(number) + 1`, starting at 1 (independent of ids)
pub fn next_table_number(tables: &[Table]) -> i64 {
    tables
        .iter()
        .map(|t| t.number)
        .max()
        .unwrap_or(0)
        .max(0)
        .saturating_add(1)
}

pub fn find_table(tables: &[Table], id: i64) -> Option<&Table> {
    tables.iter().find(|t| t.id == id)
}

/// Append a default table; the new record is the last element
pub fn add_table(tables: &[Table]) -> Vec<Table> {
    let table = Table::new_default(next_table_id(tables), next_table_number(tables));
    let mut next = Vec::with_capacity(tables.len() + 1);
    next.extend_from_slice(tables);
    next.push(table);
    next
}

/// Remove the table with `id`; unknown ids return an identical collection
pub fn delete_table(tables: &[Table], id: i64) -> Vec<Table> {
    tables.iter().filter(|t| t.id != id).cloned().collect()
}

/// Swap in `table` for the record with the same id, without validation
///
/// Used for snapshots produced by the ledger and by drag moves.
pub fn replace_table(tables: &[Table], table: &Table) -> Vec<Table> {
    tables
        .iter()
        .map(|t| if t.id == table.id { table.clone() } else { t.clone() })
        .collect()
}

/// Normalize an edited record before it is stored
///
/// The arrival time only survives on reserved tables, and an empty one is
/// the same as none.
pub fn normalize_edit(mut record: Table) -> Table {
    if record.status != TableStatus::Reserved {
        record.arrival_time = None;
    }
    if record
        .arrival_time
        .as_deref()
        .is_some_and(|t| t.trim().is_empty())
    {
        record.arrival_time = None;
    }
    record
}

/// Replace the whole record for `record.id` with an edited one
///
/// Unknown ids are a no-op. Returns the stored (normalized) record alongside
/// the new collection so callers can report it.
pub fn update_table(
    tables: &[Table],
    record: Table,
    policy: NumberPolicy,
) -> Result<(Vec<Table>, Option<Table>), ValidationError> {
    if find_table(tables, record.id).is_none() {
        return Ok((tables.to_vec(), None));
    }

    let record = normalize_edit(record);
    validate_table(&record)?;

    if policy == NumberPolicy::Unique
        && let Some(other) = tables
            .iter()
            .find(|t| t.id != record.id && t.number == record.number)
    {
        return Err(ValidationError::NumberTaken {
            number: record.number,
            taken_by: other.id,
        });
    }

    let next = replace_table(tables, &record);
    Ok((next, Some(record)))
}

/// Tables ordered by display number for listing
///
/// Stable: equal numbers keep insertion order. The stored order is untouched.
pub fn sorted_by_number(tables: &[Table]) -> Vec<&Table> {
    let mut listing: Vec<&Table> = tables.iter().collect();
    listing.sort_by_key(|t| t.number);
    listing
}

/// Numbers used by more than one table, ascending
pub fn duplicate_numbers(tables: &[Table]) -> Vec<i64> {
    let listing = sorted_by_number(tables);
    let mut dups: Vec<i64> = listing
        .windows(2)
        .filter(|w| w[0].number == w[1].number)
        .map(|w| w[0].number)
        .collect();
    dups.dedup();
    dups
}
