use crate::group::by_date::{DayGroups, SlotEntry};
use crate::group::by_type::{TypeEntry, TypeGroups};
use crate::model::item::PlanItem;
use crate::ops::check::{CheckError, CheckResult, CheckWarning};

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single item as a one-line summary
pub fn format_item_line(item: &PlanItem, markers: &[&str]) -> String {
    let id_str = item
        .identity()
        .map(|id| format!("{} ", id))
        .unwrap_or_default();
    let title = if item.title.is_empty() {
        "(untitled)"
    } else {
        &item.title
    };
    let time_str = item
        .scheduled_time
        .as_deref()
        .map(|t| format!(" @ {}", t))
        .unwrap_or_default();
    let marker_str = if markers.is_empty() {
        String::new()
    } else {
        format!(" [{}]", markers.join(", "))
    };
    format!("{}{}{}{}", id_str, title, time_str, marker_str)
}

fn type_entry_line(entry: &TypeEntry) -> String {
    let mut markers = Vec::new();
    if entry.orphaned {
        markers.push("orphan");
    }
    // only flag items that carry a different type of their own
    if !entry.same_type_as_root && entry.item.activity_key().is_some() {
        markers.push("mixed");
    }
    format!("  {}", format_item_line(&entry.item, &markers))
}

fn slot_entry_line(entry: &SlotEntry) -> String {
    let mut markers = Vec::new();
    if entry.orphaned {
        markers.push("orphan");
    }
    if entry.inherited_schedule {
        markers.push("inherited");
    }
    format!("  {}", format_item_line(&entry.item, &markers))
}

/// Format the by-activity view: one section per group, ungrouped last
pub fn format_type_groups(result: &TypeGroups) -> Vec<String> {
    let mut lines = Vec::new();

    for group in &result.groups {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!(
            "== {} {} ({}) ==",
            group.icon, group.label, group.category
        ));
        for entry in &group.items {
            lines.push(type_entry_line(entry));
        }
    }

    if !result.ungrouped.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("-- Ungrouped --".to_string());
        for entry in &result.ungrouped {
            lines.push(type_entry_line(entry));
        }
    }

    if lines.is_empty() {
        lines.push("no items".to_string());
    }
    lines
}

/// Format the day-by-day view: one section per date with its non-empty
/// slots, unscheduled items last
pub fn format_day_groups(result: &DayGroups) -> Vec<String> {
    let mut lines = Vec::new();

    for bucket in &result.groups {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("== {} ==", bucket.date));
        for (kind, slot) in bucket.slots() {
            if slot.items.is_empty() {
                continue;
            }
            lines.push(format!("-- {} --", kind));
            for entry in &slot.items {
                lines.push(slot_entry_line(entry));
            }
        }
    }

    if !result.unscheduled.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("== Unscheduled ==".to_string());
        for entry in &result.unscheduled {
            lines.push(slot_entry_line(entry));
        }
    }

    if lines.is_empty() {
        lines.push("no items".to_string());
    }
    lines
}

/// Format a validation report
pub fn format_check_result(result: &CheckResult) -> Vec<String> {
    let mut lines = Vec::new();

    if !result.errors.is_empty() {
        lines.push("Errors:".to_string());
        for error in &result.errors {
            match error {
                CheckError::DuplicateIdentity { identity, count } => {
                    lines.push(format!("  {} appears {} times", identity, count));
                }
                CheckError::DanglingParent { item, parent } => {
                    lines.push(format!("  {} has dangling parent: {}", item, parent));
                }
                CheckError::ParentCycle { members } => {
                    lines.push(format!("  parent cycle: {}", members.join(" -> ")));
                }
            }
        }
    }

    if !result.warnings.is_empty() {
        if !result.errors.is_empty() {
            lines.push(String::new());
        }
        lines.push("Warnings:".to_string());
        for warning in &result.warnings {
            match warning {
                CheckWarning::UnknownActivityType { item, key } => {
                    lines.push(format!("  {} has unknown activity type: {}", item, key));
                }
                CheckWarning::UnparseableDate { item, value } => {
                    lines.push(format!("  {} has unparseable date: {}", item, value));
                }
                CheckWarning::UnparseableTime { item, value } => {
                    lines.push(format!("  {} has unparseable time: {}", item, value));
                }
                CheckWarning::MissingIdentity { title } => {
                    lines.push(format!("  item missing identifiers: {}", title));
                }
            }
        }
    }

    if result.valid {
        lines.push("✓ items are valid".to_string());
    } else {
        lines.push("✗ item list has errors".to_string());
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::by_type::{TypeOptions, group_by_type};
    use crate::model::activity::ActivityRegistry;
    use pretty_assertions::assert_eq;

    fn typed_root(id: &str, activity: &str) -> PlanItem {
        let mut item = PlanItem::new(id, format!("Item {id}"));
        item.activity_type = Some(activity.to_string());
        item
    }

    #[test]
    fn test_item_line_with_markers() {
        let mut item = PlanItem::new("a1", "Morning run");
        item.scheduled_time = Some("07:00".to_string());
        assert_eq!(
            format_item_line(&item, &["inherited"]),
            "a1 Morning run @ 07:00 [inherited]"
        );
    }

    #[test]
    fn test_item_line_untitled() {
        let item = PlanItem::new("a1", "");
        assert_eq!(format_item_line(&item, &[]), "a1 (untitled)");
    }

    #[test]
    fn test_type_groups_sections() {
        let items = vec![typed_root("f1", "flight"), PlanItem::new("u1", "Loose end")];
        let registry = ActivityRegistry::builtin();
        let result = group_by_type(&items, &registry, &TypeOptions::default());
        let lines = format_type_groups(&result);
        assert!(lines[0].contains("Flights"));
        assert!(lines.iter().any(|l| l == "-- Ungrouped --"));
    }

    #[test]
    fn test_empty_groups_render_placeholder() {
        let lines = format_type_groups(&TypeGroups::default());
        assert_eq!(lines, vec!["no items"]);
    }
}
