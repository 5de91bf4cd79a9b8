use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::group::by_type::{TypeGroups, TypeOptions, group_by_type};
use crate::group::resolver::{ChildIndex, ItemKey};
use crate::group::time_of_day::{self, TimeOfDay};
use crate::model::activity::ActivityRegistry;
use crate::model::item::PlanItem;

/// Options for `group_by_date`
#[derive(Debug, Clone, Default)]
pub struct DateOptions<'a> {
    /// Category ordering threaded into the embedded by-activity views
    pub category_order: Option<&'a [String]>,
}

/// An item as emitted by the schedule grouper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotEntry {
    #[serde(flatten)]
    pub item: PlanItem,
    /// Set when the item's ancestor chain never reached a root
    pub orphaned: bool,
    /// Set on descendants stamped with their root's schedule
    pub inherited_schedule: bool,
}

/// One time-of-day slot within a date bucket.
///
/// `items` is the canonical content; `by_activity` is a derived view over
/// the same entries, not a separate partition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSlot {
    pub items: Vec<SlotEntry>,
    pub by_activity: TypeGroups,
}

/// All items scheduled on one calendar date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub morning: TimeSlot,
    pub afternoon: TimeSlot,
    pub evening: TimeSlot,
    pub unspecified: TimeSlot,
}

impl DateBucket {
    fn new(date: NaiveDate) -> Self {
        DateBucket {
            date,
            morning: TimeSlot::default(),
            afternoon: TimeSlot::default(),
            evening: TimeSlot::default(),
            unspecified: TimeSlot::default(),
        }
    }

    /// The slot for a time-of-day classification
    pub fn slot(&self, slot: TimeOfDay) -> &TimeSlot {
        match slot {
            TimeOfDay::Morning => &self.morning,
            TimeOfDay::Afternoon => &self.afternoon,
            TimeOfDay::Evening => &self.evening,
            TimeOfDay::Unspecified => &self.unspecified,
        }
    }

    fn slot_mut(&mut self, slot: TimeOfDay) -> &mut TimeSlot {
        match slot {
            TimeOfDay::Morning => &mut self.morning,
            TimeOfDay::Afternoon => &mut self.afternoon,
            TimeOfDay::Evening => &mut self.evening,
            TimeOfDay::Unspecified => &mut self.unspecified,
        }
    }

    /// Slots in display order
    pub fn slots(&self) -> [(TimeOfDay, &TimeSlot); 4] {
        [
            (TimeOfDay::Morning, &self.morning),
            (TimeOfDay::Afternoon, &self.afternoon),
            (TimeOfDay::Evening, &self.evening),
            (TimeOfDay::Unspecified, &self.unspecified),
        ]
    }

    fn slots_mut(&mut self) -> [&mut TimeSlot; 4] {
        [
            &mut self.morning,
            &mut self.afternoon,
            &mut self.evening,
            &mut self.unspecified,
        ]
    }
}

/// Result of `group_by_date`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayGroups {
    /// Date buckets, ascending by date
    pub groups: Vec<DateBucket>,
    /// Roots without a usable date, their hierarchies, and orphans
    pub unscheduled: Vec<SlotEntry>,
    /// Derived activity view over the full unscheduled list
    pub unscheduled_by_activity: TypeGroups,
}

/// Group a flat item list day by day.
///
/// Each root's hierarchy lands in the bucket for the root's scheduled
/// date (UTC date portion) and the time-of-day slot of its scheduled
/// time; descendants are stamped with the root's schedule. Roots without
/// a parseable date take their hierarchy to `unscheduled` instead, and
/// items never reached from any root are appended there flagged
/// `orphaned`. Every slot also carries a derived by-activity view.
pub fn group_by_date(
    items: &[PlanItem],
    registry: &ActivityRegistry,
    options: &DateOptions<'_>,
) -> DayGroups {
    if items.is_empty() {
        return DayGroups::default();
    }

    let index = ChildIndex::build(items);
    let mut visited: HashSet<ItemKey> = HashSet::new();
    let mut buckets: BTreeMap<NaiveDate, DateBucket> = BTreeMap::new();
    let mut unscheduled: Vec<SlotEntry> = Vec::new();

    for (pos, item) in items.iter().enumerate() {
        if item.is_declared_child() {
            continue;
        }
        if !visited.insert(ItemKey::for_item(item, pos)) {
            continue;
        }

        let date = item.scheduled_date.as_deref().and_then(parse_date_key);
        match date {
            None => {
                unscheduled.push(entry(item.clone(), false, false));
                for (_, descendant) in index.descendants(item, &mut visited) {
                    unscheduled.push(entry(descendant.clone(), false, false));
                }
            }
            Some(date) => {
                let slot_kind = time_of_day::classify(item.scheduled_time.as_deref());
                let bucket = buckets.entry(date).or_insert_with(|| DateBucket::new(date));
                let slot = bucket.slot_mut(slot_kind);
                slot.items.push(entry(item.clone(), false, false));
                for (_, descendant) in index.descendants(item, &mut visited) {
                    // descendants never keep their own schedule
                    let mut stamped = descendant.clone();
                    stamped.scheduled_date = item.scheduled_date.clone();
                    stamped.scheduled_time = item.scheduled_time.clone();
                    slot.items.push(entry(stamped, false, true));
                }
            }
        }
    }

    // Anything never reached from a root is an orphan.
    for (pos, item) in items.iter().enumerate() {
        if visited.insert(ItemKey::for_item(item, pos)) {
            unscheduled.push(entry(item.clone(), true, false));
        }
    }

    let type_options = TypeOptions {
        lookup_set: None,
        category_order: options.category_order,
        include_orphans: true,
    };

    let mut groups: Vec<DateBucket> = buckets.into_values().collect();
    for bucket in &mut groups {
        for slot in bucket.slots_mut() {
            if slot.items.is_empty() {
                continue;
            }
            let slot_items: Vec<PlanItem> = slot.items.iter().map(|e| e.item.clone()).collect();
            slot.by_activity = group_by_type(&slot_items, registry, &type_options);
        }
    }

    let unscheduled_items: Vec<PlanItem> = unscheduled.iter().map(|e| e.item.clone()).collect();
    let unscheduled_by_activity = group_by_type(&unscheduled_items, registry, &type_options);

    DayGroups {
        groups,
        unscheduled,
        unscheduled_by_activity,
    }
}

fn entry(item: PlanItem, orphaned: bool, inherited_schedule: bool) -> SlotEntry {
    SlotEntry {
        item,
        orphaned,
        inherited_schedule,
    }
}

/// Extract the calendar-date key from a scheduled-date string.
///
/// RFC 3339 timestamps are normalized to their UTC date; plain
/// `YYYY-MM-DD`, `YYYY/MM/DD`, and `MM/DD/YYYY` forms are taken as
/// calendar dates. Anything else yields `None`.
pub fn parse_date_key(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
