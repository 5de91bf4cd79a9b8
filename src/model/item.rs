use serde::{Deserialize, Deserializer, Serialize};

/// A single plan item from the caller's flat snapshot list.
///
/// Items may reference a parent by either identifier scheme (`id` or
/// `plan_item_id`); an item with no parent reference and no child marker
/// is a root. Schedule fields are meaningful on roots; descendants inherit
/// their root's schedule when grouped day by day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanItem {
    /// Primary identifier
    #[serde(alias = "_id", deserialize_with = "de_ident")]
    pub id: Option<String>,
    /// Secondary identifier, usable as a parent target interchangeably with `id`
    #[serde(alias = "plan_item_id", deserialize_with = "de_ident")]
    pub plan_item_id: Option<String>,
    /// Display title
    pub title: String,
    /// Parent reference (the `id` or `plan_item_id` of another item)
    #[serde(deserialize_with = "de_ident")]
    pub parent: Option<String>,
    /// Pre-existing child marker; excluded from root seeding even without `parent`
    #[serde(alias = "is_child")]
    pub is_child: bool,
    /// Key into the activity-type registry
    #[serde(alias = "activity_type")]
    pub activity_type: Option<String>,
    /// Scheduled calendar date (free-form string, parsed on grouping)
    #[serde(alias = "scheduled_date")]
    pub scheduled_date: Option<String>,
    /// Scheduled time of day (free-form string, classified on grouping)
    #[serde(alias = "scheduled_time")]
    pub scheduled_time: Option<String>,
    /// Free-form notes, carried through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlanItem {
    /// Create a bare item with the given id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        PlanItem {
            id: Some(id.into()),
            title: title.into(),
            ..PlanItem::default()
        }
    }

    /// The primary identifier, trimmed; blank counts as absent
    pub fn id_key(&self) -> Option<&str> {
        non_blank(&self.id)
    }

    /// The secondary identifier, trimmed; blank counts as absent
    pub fn alt_key(&self) -> Option<&str> {
        non_blank(&self.plan_item_id)
    }

    /// Canonical identity: `id`, falling back to `plan_item_id`.
    /// `None` means the item is unidentifiable.
    pub fn identity(&self) -> Option<&str> {
        self.id_key().or_else(|| self.alt_key())
    }

    /// The parent reference, trimmed; blank counts as absent
    pub fn parent_key(&self) -> Option<&str> {
        non_blank(&self.parent)
    }

    /// Whether this item is a declared child: it carries a parent
    /// reference or the `is_child` marker. Declared children never seed
    /// groups directly.
    pub fn is_declared_child(&self) -> bool {
        self.parent_key().is_some() || self.is_child
    }

    /// The activity-type key, trimmed; blank counts as absent
    pub fn activity_key(&self) -> Option<&str> {
        non_blank(&self.activity_type)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Accept identifiers as JSON strings or numbers; records keyed
/// inconsistently across data sources carry both.
fn de_ident<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
