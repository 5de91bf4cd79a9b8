use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::group::resolver::{ChildIndex, ItemKey};
use crate::model::activity::ActivityRegistry;
use crate::model::config::DEFAULT_CATEGORY_ORDER;
use crate::model::item::PlanItem;

/// Options for `group_by_type`
#[derive(Debug, Clone)]
pub struct TypeOptions<'a> {
    /// Collection used to resolve children (default: the grouped items)
    pub lookup_set: Option<&'a [PlanItem]>,
    /// Category ordering for the final group sort (default:
    /// essentials, experiences, services, other)
    pub category_order: Option<&'a [String]>,
    /// Emit never-reached declared children as orphans (default true)
    pub include_orphans: bool,
}

impl Default for TypeOptions<'_> {
    fn default() -> Self {
        TypeOptions {
            lookup_set: None,
            category_order: None,
            include_orphans: true,
        }
    }
}

/// An item as emitted by the type grouper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeEntry {
    #[serde(flatten)]
    pub item: PlanItem,
    /// Set when the item's ancestor chain never reached a root
    pub orphaned: bool,
    /// Whether the item's own activity type matches its root's
    pub same_type_as_root: bool,
}

/// All items whose root carries one activity type, labeled from the registry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityGroup {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub category: String,
    pub items: Vec<TypeEntry>,
}

/// Result of `group_by_type`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeGroups {
    /// Sorted by category position, then label
    pub groups: Vec<ActivityGroup>,
    /// Discovery order, never sorted
    pub ungrouped: Vec<TypeEntry>,
}

/// Group a flat item list by the activity type of each hierarchy's root.
///
/// Roots seed groups in input order; every item reachable from a root
/// lands in the root's group regardless of its own activity type. Roots
/// without a type take their whole hierarchy to `ungrouped`. Declared
/// children whose ancestor chain never reaches a root are appended to
/// `ungrouped` flagged `orphaned` (unless disabled). Each item is emitted
/// at most once per call; cyclic parent chains cannot loop the traversal.
pub fn group_by_type(
    items: &[PlanItem],
    registry: &ActivityRegistry,
    options: &TypeOptions<'_>,
) -> TypeGroups {
    if items.is_empty() {
        return TypeGroups::default();
    }

    let lookup = options.lookup_set.unwrap_or(items);
    // Positional keys are index-based and only line up when the grouped
    // items are the lookup set itself.
    let positional_keys = options.lookup_set.is_none();
    let index = ChildIndex::build(lookup);

    let mut visited: HashSet<ItemKey> = HashSet::new();
    let mut groups: IndexMap<String, ActivityGroup> = IndexMap::new();
    let mut ungrouped: Vec<TypeEntry> = Vec::new();

    for (pos, item) in items.iter().enumerate() {
        if item.is_declared_child() {
            continue;
        }
        if !mark_visited(&mut visited, item, pos, positional_keys) {
            continue;
        }

        let root_type = item.activity_key();
        let bucket = match root_type {
            None => &mut ungrouped,
            Some(key) => {
                let group = groups.entry(key.to_string()).or_insert_with(|| {
                    let info = registry.resolve(key);
                    ActivityGroup {
                        key: key.to_string(),
                        label: info.label,
                        icon: info.icon,
                        category: info.category,
                        items: Vec::new(),
                    }
                });
                &mut group.items
            }
        };

        bucket.push(entry(item, false, true));
        for (_, descendant) in index.descendants(item, &mut visited) {
            let same_type = descendant.activity_key() == root_type;
            bucket.push(entry(descendant, false, same_type));
        }
    }

    if options.include_orphans {
        for (pos, item) in items.iter().enumerate() {
            if !item.is_declared_child() {
                continue;
            }
            if !mark_visited(&mut visited, item, pos, positional_keys) {
                continue;
            }
            ungrouped.push(entry(item, true, true));
        }
    }

    let order: Vec<&str> = match options.category_order {
        Some(order) => order.iter().map(String::as_str).collect(),
        None => DEFAULT_CATEGORY_ORDER.to_vec(),
    };
    let mut groups: Vec<ActivityGroup> = groups.into_values().collect();
    sort_groups(&mut groups, &order);

    TypeGroups { groups, ungrouped }
}

/// Mark an item visited; false means it was already emitted this call.
///
/// When the grouped items are not the lookup set, identity-less items
/// cannot be tracked and are emitted unconditionally.
fn mark_visited(
    visited: &mut HashSet<ItemKey>,
    item: &PlanItem,
    pos: usize,
    positional_keys: bool,
) -> bool {
    match item.identity() {
        Some(ident) => visited.insert(ItemKey::Ident(ident.to_string())),
        None if positional_keys => visited.insert(ItemKey::Positional(pos)),
        None => true,
    }
}

fn entry(item: &PlanItem, orphaned: bool, same_type_as_root: bool) -> TypeEntry {
    TypeEntry {
        item: item.clone(),
        orphaned,
        same_type_as_root,
    }
}

/// Sort groups by category position (categories not in `order` go after
/// all listed ones), then case-insensitively by label. The sort is
/// stable, so remaining ties keep discovery order.
fn sort_groups(groups: &mut [ActivityGroup], order: &[&str]) {
    let rank = |category: &str| {
        order
            .iter()
            .position(|c| *c == category)
            .unwrap_or(order.len())
    };
    groups.sort_by(|a, b| {
        rank(&a.category)
            .cmp(&rank(&b.category))
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
