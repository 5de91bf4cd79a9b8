use std::collections::{HashMap, HashSet};

use crate::model::item::PlanItem;

/// Key under which an item is tracked within a single grouping call.
///
/// Items with neither identifier get a positional key (their index in the
/// lookup set) so the exactly-once guarantee holds for them too; they can
/// never be parent targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Ident(String),
    Positional(usize),
}

impl ItemKey {
    /// Key for an item sitting at `pos` in the collection being tracked
    pub fn for_item(item: &PlanItem, pos: usize) -> ItemKey {
        match item.identity() {
            Some(ident) => ItemKey::Ident(ident.to_string()),
            None => ItemKey::Positional(pos),
        }
    }
}

/// Child-lookup index over a flat item list.
///
/// Every item with a non-empty parent reference is bucketed under its
/// normalized parent key in one pass, so "direct children of X" queries
/// are amortized O(1). A parent may be referenced by either of an item's
/// two identifier schemes; `children_of` merges both buckets.
pub struct ChildIndex<'a> {
    buckets: HashMap<&'a str, Vec<(usize, &'a PlanItem)>>,
}

impl<'a> ChildIndex<'a> {
    /// Build the index over `lookup` (which may differ from the set being
    /// grouped). Missing or malformed parents simply go unindexed.
    pub fn build(lookup: &'a [PlanItem]) -> Self {
        let mut buckets: HashMap<&str, Vec<(usize, &PlanItem)>> = HashMap::new();
        for (pos, item) in lookup.iter().enumerate() {
            if let Some(parent) = item.parent_key() {
                buckets.entry(parent).or_default().push((pos, item));
            }
        }
        ChildIndex { buckets }
    }

    /// Direct children of `item`, deduplicated, in insertion order.
    ///
    /// Both the item's `id` and its `plan_item_id` are checked as bucket
    /// keys; a child appearing under both is emitted once, keyed by its
    /// own identity (position when it has none).
    pub fn children_of(&self, item: &PlanItem) -> Vec<(usize, &'a PlanItem)> {
        let mut seen: HashSet<ItemKey> = HashSet::new();
        let mut children = Vec::new();
        for key in [item.id_key(), item.alt_key()].into_iter().flatten() {
            if let Some(bucket) = self.buckets.get(key) {
                for &(pos, child) in bucket {
                    if seen.insert(ItemKey::for_item(child, pos)) {
                        children.push((pos, child));
                    }
                }
            }
        }
        children
    }

    /// All unvisited descendants of `root`, depth-first in child insertion
    /// order. Each node is checked against (and added to) `visited` before
    /// its own children are expanded, so cyclic parent chains terminate.
    pub fn descendants(
        &self,
        root: &PlanItem,
        visited: &mut HashSet<ItemKey>,
    ) -> Vec<(usize, &'a PlanItem)> {
        let mut collected = Vec::new();
        let mut stack = self.children_of(root);
        stack.reverse();
        while let Some((pos, item)) = stack.pop() {
            if !visited.insert(ItemKey::for_item(item, pos)) {
                continue;
            }
            collected.push((pos, item));
            let mut children = self.children_of(item);
            children.reverse();
            stack.extend(children);
        }
        collected
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
