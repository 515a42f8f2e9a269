//! Shared building blocks for the query functions.
//!
//! - ensure_threshold: reject negative or NaN thresholds up front
//! - average: arithmetic mean of a sequence, None when empty
//! - group_by_first_appearance: order-preserving grouping

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{QueryError, QueryResult};

/// Argument name of the turnover filter threshold.
pub const TURNOVER_THRESHOLD: &str = "turnover threshold";
/// Argument name of the large-order filter threshold.
pub const LARGE_ORDER_THRESHOLD: &str = "large order threshold";

/// Validate a monetary threshold argument.
///
/// # Errors
/// Returns `QueryError::InvalidArgument` naming `name` if `value` is negative
/// or NaN.
#[inline]
pub fn ensure_threshold(name: &str, value: f64) -> QueryResult<()> {
    if value.is_nan() {
        return Err(QueryError::InvalidArgument(format!(
            "{} must be a number",
            name
        )));
    }
    if value < 0.0 {
        return Err(QueryError::InvalidArgument(format!(
            "{} must not be negative (got {})",
            name, value
        )));
    }
    Ok(())
}

/// Arithmetic mean of the values, or None for an empty sequence.
pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

/// Group items by key, keeping groups in the order their key first appears and
/// items in their original order within each group.
pub fn group_by_first_appearance<T, K, F>(
    items: impl IntoIterator<Item = T>,
    key: F,
) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let k = key(&item);
        match positions.get(&k) {
            Some(&pos) => groups[pos].1.push(item),
            None => {
                positions.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}
