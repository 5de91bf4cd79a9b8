use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category assigned to activity types the registry does not know
pub const FALLBACK_CATEGORY: &str = "other";

/// Display attributes for one activity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityInfo {
    pub label: String,
    pub icon: String,
    pub category: String,
}

/// Read-only lookup table mapping an activity-type key to its display info.
///
/// Starts from the builtin table and can be extended (or overridden) with
/// entries from config. Lookups are pure; unknown keys are handled by
/// `resolve`, which synthesizes a fallback entry.
#[derive(Debug, Clone)]
pub struct ActivityRegistry {
    entries: IndexMap<String, ActivityInfo>,
}

impl ActivityRegistry {
    /// The builtin activity-type table
    pub fn builtin() -> Self {
        let mut registry = ActivityRegistry {
            entries: IndexMap::new(),
        };
        registry.insert("flight", info("Flights", "✈", "essentials"));
        registry.insert("lodging", info("Lodging", "⌂", "essentials"));
        registry.insert("transport", info("Transport", "➤", "essentials"));
        registry.insert("dining", info("Dining", "♨", "experiences"));
        registry.insert("sightseeing", info("Sightseeing", "◉", "experiences"));
        registry.insert("tour", info("Tours", "➟", "experiences"));
        registry.insert("event", info("Events", "★", "experiences"));
        registry.insert("booking", info("Bookings", "▤", "services"));
        registry.insert("rental", info("Rentals", "⚿", "services"));
        registry.insert("errand", info("Errands", "•", "other"));
        registry
    }

    /// Add or replace an entry
    pub fn insert(&mut self, key: impl Into<String>, entry: ActivityInfo) {
        self.entries.insert(key.into(), entry);
    }

    /// Look up a key; `None` when the registry has no entry for it
    pub fn lookup(&self, key: &str) -> Option<&ActivityInfo> {
        self.entries.get(key)
    }

    /// Resolve a key, synthesizing a fallback entry for unknown keys:
    /// the raw key as label, a generic icon, category `"other"`.
    pub fn resolve(&self, key: &str) -> ActivityInfo {
        self.lookup(key).cloned().unwrap_or_else(|| ActivityInfo {
            label: key.to_string(),
            icon: "•".to_string(),
            category: FALLBACK_CATEGORY.to_string(),
        })
    }

    /// All registered keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for ActivityRegistry {
    fn default() -> Self {
        ActivityRegistry::builtin()
    }
}

fn info(label: &str, icon: &str, category: &str) -> ActivityInfo {
    ActivityInfo {
        label: label.to_string(),
        icon: icon.to_string(),
        category: category.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
