use serde::{Deserialize, Serialize};

use crate::model::activity::{ActivityInfo, ActivityRegistry, FALLBACK_CATEGORY};

/// Default category ordering for grouped output
pub const DEFAULT_CATEGORY_ORDER: [&str; 4] = ["essentials", "experiences", "services", "other"];

/// Configuration from itin.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub activity_types: Vec<ActivityTypeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Category ordering for group sorting; categories not listed here
    /// sort after all listed ones.
    #[serde(default = "default_category_order")]
    pub category_order: Vec<String>,
    /// Emit unreachable children as orphans (default true)
    #[serde(default = "default_true")]
    pub include_orphans: bool,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        GroupingConfig {
            category_order: default_category_order(),
            include_orphans: true,
        }
    }
}

/// A custom activity-type entry extending the builtin registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityTypeConfig {
    pub key: String,
    pub label: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_category")]
    pub category: String,
}

impl Config {
    /// Build the activity registry: the builtin table extended (or
    /// overridden) by the configured custom entries.
    pub fn registry(&self) -> ActivityRegistry {
        let mut registry = ActivityRegistry::builtin();
        for custom in &self.activity_types {
            registry.insert(
                custom.key.clone(),
                ActivityInfo {
                    label: custom.label.clone(),
                    icon: custom.icon.clone(),
                    category: custom.category.clone(),
                },
            );
        }
        registry
    }
}

fn default_category_order() -> Vec<String> {
    DEFAULT_CATEGORY_ORDER.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_icon() -> String {
    "•".to_string()
}

fn default_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
