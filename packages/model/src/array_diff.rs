//! # Array Diff
//!
//! Ordered-sequence diff/patch with identity matching. Used for children,
//! class names, props and variant names.
//!
//! `compute_array_diff(a, b, identity, mode)` produces ops such that
//! `apply_array_diff(a, ops, identity) == b`:
//!
//! 1. duplicate keys on either side are dropped (first occurrence wins)
//! 2. one `removed` per key of `a` missing from `b`, in original order
//! 3. one `added` per key of `b` missing from `a`; appends carry no index
//! 4. repeatedly move the first out-of-place element to its index in `b`
//!
//! The move pass is greedy and leftmost-first rather than minimal. Persisted
//! diffs depend on these exact op shapes, so keep it that way.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

pub type ArrayDiff<T> = Vec<ArrayDiffItem<T>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArrayDiffItem<T> {
    #[serde(rename = "a")]
    Added {
        item: T,
        #[serde(rename = "toIndex", default, skip_serializing_if = "Option::is_none")]
        to_index: Option<usize>,
    },

    #[serde(rename = "r")]
    Removed {
        #[serde(rename = "indexOrKey")]
        target: IndexOrKey,
    },

    #[serde(rename = "m")]
    Moved {
        #[serde(rename = "fromIndex")]
        from_index: usize,
        #[serde(rename = "toIndex")]
        to_index: usize,
    },
}

/// Removal target: positional, or by identity key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexOrKey {
    Index(usize),
    Key(String),
}

/// How `removed` ops address their element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalMode {
    /// Index at the time the op applies
    #[default]
    Index,
    /// Identity key; survives reorders of the target array
    Key,
}

impl<T> ArrayDiffItem<T> {
    pub fn added(item: T, to_index: Option<usize>) -> Self {
        ArrayDiffItem::Added { item, to_index }
    }

    pub fn removed_at(index: usize) -> Self {
        ArrayDiffItem::Removed {
            target: IndexOrKey::Index(index),
        }
    }

    pub fn removed_key(key: impl Into<String>) -> Self {
        ArrayDiffItem::Removed {
            target: IndexOrKey::Key(key.into()),
        }
    }

    pub fn moved(from_index: usize, to_index: usize) -> Self {
        ArrayDiffItem::Moved {
            from_index,
            to_index,
        }
    }

    /// Convert the carried item of an `added` op
    pub fn map_item<U>(self, f: impl FnOnce(T) -> U) -> ArrayDiffItem<U> {
        match self {
            ArrayDiffItem::Added { item, to_index } => ArrayDiffItem::Added {
                item: f(item),
                to_index,
            },
            ArrayDiffItem::Removed { target } => ArrayDiffItem::Removed { target },
            ArrayDiffItem::Moved {
                from_index,
                to_index,
            } => ArrayDiffItem::Moved {
                from_index,
                to_index,
            },
        }
    }
}

/// Compute the ops turning `a` into `b`
pub fn compute_array_diff<T, F>(a: &[T], b: &[T], identity: F, mode: RemovalMode) -> ArrayDiff<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    if has_duplicates(a, &identity) || has_duplicates(b, &identity) {
        let a = dedupe(a, &identity);
        let b = dedupe(b, &identity);
        return compute_array_diff(&a, &b, identity, mode);
    }

    let a_keys: Vec<String> = a.iter().map(&identity).collect();
    let b_keys: Vec<String> = b.iter().map(&identity).collect();
    let a_lookup: HashSet<&str> = a_keys.iter().map(String::as_str).collect();
    let b_lookup: HashMap<&str, usize> = b_keys
        .iter()
        .enumerate()
        .map(|(index, key)| (key.as_str(), index))
        .collect();

    let mut ops = Vec::new();

    // Keys only; items are never needed to detect moves
    let mut working: Vec<String> = Vec::with_capacity(a.len().max(b.len()));

    let mut removed = 0;
    for (index, key) in a_keys.iter().enumerate() {
        if b_lookup.contains_key(key.as_str()) {
            working.push(key.clone());
            continue;
        }

        let target = match mode {
            RemovalMode::Index => IndexOrKey::Index(index - removed),
            RemovalMode::Key => IndexOrKey::Key(key.clone()),
        };
        removed += 1;
        ops.push(ArrayDiffItem::Removed { target });
    }

    for (index, (key, item)) in b_keys.iter().zip(b).enumerate() {
        if a_lookup.contains(key.as_str()) {
            continue;
        }

        if index >= working.len() {
            working.push(key.clone());
            ops.push(ArrayDiffItem::added(item.clone(), None));
        } else {
            working.insert(index, key.clone());
            ops.push(ArrayDiffItem::added(item.clone(), Some(index)));
        }
    }

    while let Some(from_index) = first_mismatch(&working, &b_keys) {
        let key = working.remove(from_index);
        let to_index = b_lookup[key.as_str()];
        working.insert(to_index, key);
        ops.push(ArrayDiffItem::moved(from_index, to_index));
    }

    ops
}

/// Replay `ops` over `a`, in order
pub fn apply_array_diff<T, F>(a: &[T], ops: &[ArrayDiffItem<T>], identity: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    apply_array_diff_with(a.to_vec(), ops, identity, |item| {
        Ok::<_, Infallible>(item.clone())
    })
    .unwrap_or_else(|never| match never {})
}

/// Replay `ops` whose added items need converting before insertion (for
/// example unresolved nodes that must be resolved first). Ops pointing at
/// indices or keys that do not exist are skipped.
pub fn apply_array_diff_with<T, U, E, F, M>(
    items: Vec<T>,
    ops: &[ArrayDiffItem<U>],
    identity: F,
    mut materialize: M,
) -> Result<Vec<T>, E>
where
    F: Fn(&T) -> String,
    M: FnMut(&U) -> Result<T, E>,
{
    let mut result = items;

    for op in ops {
        match op {
            ArrayDiffItem::Added { item, to_index } => {
                let item = materialize(item)?;
                match to_index {
                    Some(index) if *index < result.len() => result.insert(*index, item),
                    _ => result.push(item),
                }
            }
            ArrayDiffItem::Removed { target } => {
                let index = match target {
                    IndexOrKey::Index(index) => Some(*index),
                    IndexOrKey::Key(key) => result.iter().position(|item| identity(item) == *key),
                };
                if let Some(index) = index.filter(|index| *index < result.len()) {
                    result.remove(index);
                }
            }
            ArrayDiffItem::Moved {
                from_index,
                to_index,
            } => {
                if *from_index < result.len() {
                    let item = result.remove(*from_index);
                    let to_index = (*to_index).min(result.len());
                    result.insert(to_index, item);
                }
            }
        }
    }

    Ok(result)
}

fn first_mismatch(working: &[String], target: &[String]) -> Option<usize> {
    working
        .iter()
        .zip(target)
        .position(|(current, expected)| current != expected)
}

fn has_duplicates<T, F: Fn(&T) -> String>(items: &[T], identity: &F) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().any(|item| !seen.insert(identity(item)))
}

fn dedupe<T: Clone, F: Fn(&T) -> String>(items: &[T], identity: &F) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(identity(item)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn key(item: &String) -> String {
        item.clone()
    }

    fn round_trip(a: &[&str], b: &[&str], mode: RemovalMode) -> ArrayDiff<String> {
        let a = strings(a);
        let b = strings(b);
        let ops = compute_array_diff(&a, &b, key, mode);
        assert_eq!(apply_array_diff(&a, &ops, key), b, "ops: {:?}", ops);
        ops
    }

    #[test]
    fn test_append_has_no_index() {
        let ops = round_trip(&["a"], &["a", "b"], RemovalMode::Index);
        assert_eq!(ops, vec![ArrayDiffItem::added("b".to_string(), None)]);
    }

    #[test]
    fn test_swap_is_single_move() {
        let ops = round_trip(&["a", "b"], &["b", "a"], RemovalMode::Index);
        assert_eq!(ops, vec![ArrayDiffItem::moved(0, 1)]);
    }

    #[test]
    fn test_insert_in_middle_carries_index() {
        let ops = round_trip(&["a", "c"], &["a", "b", "c"], RemovalMode::Index);
        assert_eq!(ops, vec![ArrayDiffItem::added("b".to_string(), Some(1))]);
    }

    #[test]
    fn test_index_removals_track_offset() {
        let ops = round_trip(&["a", "b", "c", "d"], &["a", "d"], RemovalMode::Index);
        assert_eq!(
            ops,
            vec![ArrayDiffItem::removed_at(1), ArrayDiffItem::removed_at(1)]
        );
    }

    #[test]
    fn test_key_removals() {
        let ops = round_trip(&["a", "b", "c"], &["c", "a"], RemovalMode::Key);
        assert_eq!(ops[0], ArrayDiffItem::removed_key("b"));
        assert!(ops[1..]
            .iter()
            .all(|op| matches!(op, ArrayDiffItem::Moved { .. })));
    }

    #[test]
    fn test_key_removal_survives_reorder() {
        let ops = vec![ArrayDiffItem::removed_key("b")];
        let reordered = strings(&["c", "b", "a"]);
        assert_eq!(apply_array_diff(&reordered, &ops, key), strings(&["c", "a"]));
    }

    #[test]
    fn test_identical_arrays_produce_no_ops() {
        assert!(round_trip(&["a", "b", "c"], &["a", "b", "c"], RemovalMode::Key).is_empty());
        assert!(round_trip(&[], &[], RemovalMode::Index).is_empty());
    }

    #[test]
    fn test_mixed_changes() {
        round_trip(&["a", "b", "c", "d"], &["e", "d", "a", "f"], RemovalMode::Index);
        round_trip(&["a", "b", "c", "d"], &["d", "a", "b", "c"], RemovalMode::Key);
        round_trip(&["a", "b", "c", "d", "e"], &["e", "d", "c", "b", "a"], RemovalMode::Index);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let a = strings(&["a", "a", "b"]);
        let b = strings(&["b", "b", "c"]);
        let ops = compute_array_diff(&a, &b, key, RemovalMode::Key);
        let deduped = strings(&["a", "b"]);
        assert_eq!(apply_array_diff(&deduped, &ops, key), strings(&["b", "c"]));
    }

    #[test]
    fn test_out_of_range_ops_are_skipped() {
        let a = strings(&["a"]);
        let ops = vec![
            ArrayDiffItem::removed_at(4),
            ArrayDiffItem::moved(3, 0),
            ArrayDiffItem::removed_key("zzz"),
        ];
        assert_eq!(apply_array_diff(&a, &ops, key), a);
    }

    #[test]
    fn test_op_codes_serialize_compactly() {
        let ops: ArrayDiff<String> = vec![
            ArrayDiffItem::added("x".to_string(), Some(2)),
            ArrayDiffItem::removed_key("y"),
            ArrayDiffItem::removed_at(0),
            ArrayDiffItem::moved(0, 1),
        ];
        let json = serde_json::to_value(&ops).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "type": "a", "item": "x", "toIndex": 2 },
                { "type": "r", "indexOrKey": "y" },
                { "type": "r", "indexOrKey": 0 },
                { "type": "m", "fromIndex": 0, "toIndex": 1 }
            ])
        );
        let back: ArrayDiff<String> = serde_json::from_value(json).unwrap();
        assert_eq!(back, ops);
    }
}
