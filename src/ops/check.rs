use std::collections::HashMap;

use serde::Serialize;

use crate::group::by_date::parse_date_key;
use crate::group::time_of_day::{self, TimeOfDay};
use crate::model::activity::ActivityRegistry;
use crate::model::item::PlanItem;

/// Structured result from `itin check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
    pub warnings: Vec<CheckWarning>,
}

/// A validation error (the grouped output will be misleading).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// Two or more items share one identity
    #[serde(rename = "duplicate_identity")]
    DuplicateIdentity { identity: String, count: usize },
    /// A parent reference resolves to no item in the list
    #[serde(rename = "dangling_parent")]
    DanglingParent { item: String, parent: String },
    /// A parent chain loops back on itself
    #[serde(rename = "parent_cycle")]
    ParentCycle { members: Vec<String> },
}

/// A validation warning (non-critical issue).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CheckWarning {
    /// Activity type not present in the registry (a group will be synthesized)
    #[serde(rename = "unknown_activity_type")]
    UnknownActivityType { item: String, key: String },
    /// Scheduled date will fall back to the unscheduled bucket
    #[serde(rename = "unparseable_date")]
    UnparseableDate { item: String, value: String },
    /// Scheduled time will fall back to the unspecified slot
    #[serde(rename = "unparseable_time")]
    UnparseableTime { item: String, value: String },
    /// Item has neither identifier
    #[serde(rename = "missing_identity")]
    MissingIdentity { title: String },
}

// ---------------------------------------------------------------------------
// Main check entry point
// ---------------------------------------------------------------------------

/// Validate a flat item list and return structured results.
///
/// This is a read-only operation. Checks performed:
/// 1. No two items share an identity
/// 2. All parent references resolve to an item in the list
/// 3. No parent chain forms a cycle
/// 4. Warnings for unknown activity types, unparseable schedule fields,
///    and items with no identifier
pub fn check_items(items: &[PlanItem], registry: &ActivityRegistry) -> CheckResult {
    let mut result = CheckResult::default();

    let mut identity_counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        if let Some(ident) = item.identity() {
            *identity_counts.entry(ident).or_insert(0) += 1;
        }
    }
    for (identity, count) in &identity_counts {
        if *count > 1 {
            result.errors.push(CheckError::DuplicateIdentity {
                identity: identity.to_string(),
                count: *count,
            });
        }
    }
    // deterministic output regardless of hash order
    result
        .errors
        .sort_by(|a, b| error_sort_key(a).cmp(&error_sort_key(b)));

    let targets = collect_parent_targets(items);

    for item in items {
        if item.identity().is_none() {
            result.warnings.push(CheckWarning::MissingIdentity {
                title: item.title.clone(),
            });
        }

        if let Some(parent) = item.parent_key() {
            if !targets.contains_key(parent) {
                result.errors.push(CheckError::DanglingParent {
                    item: display_identity(item),
                    parent: parent.to_string(),
                });
            }
        }

        if let Some(key) = item.activity_key() {
            if registry.lookup(key).is_none() {
                result.warnings.push(CheckWarning::UnknownActivityType {
                    item: display_identity(item),
                    key: key.to_string(),
                });
            }
        }

        if let Some(raw) = item.scheduled_date.as_deref().map(str::trim) {
            if !raw.is_empty() && parse_date_key(raw).is_none() {
                result.warnings.push(CheckWarning::UnparseableDate {
                    item: display_identity(item),
                    value: raw.to_string(),
                });
            }
        }

        if let Some(raw) = item.scheduled_time.as_deref().map(str::trim) {
            // a present, recognized time never classifies as unspecified
            if !raw.is_empty() && time_of_day::classify(Some(raw)) == TimeOfDay::Unspecified {
                result.warnings.push(CheckWarning::UnparseableTime {
                    item: display_identity(item),
                    value: raw.to_string(),
                });
            }
        }
    }

    for members in find_parent_cycles(items) {
        result.errors.push(CheckError::ParentCycle { members });
    }

    result.valid = result.errors.is_empty();
    result
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map every usable identifier (primary and secondary) to the index of
/// the first item carrying it.
fn collect_parent_targets(items: &[PlanItem]) -> HashMap<&str, usize> {
    let mut targets = HashMap::new();
    for (pos, item) in items.iter().enumerate() {
        for key in [item.id_key(), item.alt_key()].into_iter().flatten() {
            targets.entry(key).or_insert(pos);
        }
    }
    targets
}

fn display_identity(item: &PlanItem) -> String {
    match item.identity() {
        Some(ident) => ident.to_string(),
        None => format!("\"{}\"", item.title),
    }
}

fn error_sort_key(error: &CheckError) -> String {
    match error {
        CheckError::DuplicateIdentity { identity, .. } => identity.clone(),
        CheckError::DanglingParent { item, .. } => item.clone(),
        CheckError::ParentCycle { members } => members.join(","),
    }
}

/// Find parent cycles by walking each item's parent chain once.
/// Each cycle is reported a single time, in chain order.
fn find_parent_cycles(items: &[PlanItem]) -> Vec<Vec<String>> {
    let targets = collect_parent_targets(items);
    let parent_of = |pos: usize| -> Option<usize> {
        items[pos]
            .parent_key()
            .and_then(|parent| targets.get(parent).copied())
    };

    // 0 = unvisited, 1 = on the current walk, 2 = finished
    let mut state = vec![0u8; items.len()];
    let mut cycles = Vec::new();

    for start in 0..items.len() {
        if state[start] != 0 {
            continue;
        }
        let mut path: Vec<usize> = Vec::new();
        let mut current = start;
        loop {
            match state[current] {
                1 => {
                    if let Some(at) = path.iter().position(|&node| node == current) {
                        cycles.push(
                            path[at..]
                                .iter()
                                .map(|&node| display_identity(&items[node]))
                                .collect(),
                        );
                    }
                    break;
                }
                2 => break,
                _ => {
                    state[current] = 1;
                    path.push(current);
                    match parent_of(current) {
                        Some(next) => current = next,
                        None => break,
                    }
                }
            }
        }
        for &node in &path {
            state[node] = 2;
        }
    }

    cycles
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
