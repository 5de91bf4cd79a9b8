use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Slot a scheduled time falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Unspecified,
}

impl TimeOfDay {
    /// Display label for slot headers
    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Unspecified => "Unspecified",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accepts `HH:MM`, `HH:MM:SS`, `H.MM`, and `H[:MM] am/pm` forms,
/// case-insensitive, tolerant of surrounding whitespace.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})(?:[:.](\d{2}))?(?::(\d{2}))?\s*(am|pm)?\s*$").unwrap()
});

/// Classify a scheduled-time string into a time-of-day slot.
///
/// Hours before 12:00 are morning, before 17:00 afternoon, the rest
/// evening. An absent or unrecognized time is `Unspecified`.
pub fn classify(time: Option<&str>) -> TimeOfDay {
    let Some(hour) = time.and_then(parse_hour) else {
        return TimeOfDay::Unspecified;
    };
    if hour < 12 {
        TimeOfDay::Morning
    } else if hour < 17 {
        TimeOfDay::Afternoon
    } else {
        TimeOfDay::Evening
    }
}

/// Extract the 24-hour clock hour from a time string, if recognizable
fn parse_hour(raw: &str) -> Option<u32> {
    let caps = TIME_PATTERN.captures(raw)?;
    let hour: u32 = caps[1].parse().ok()?;
    if let Some(minute) = caps.get(2) {
        let minute: u32 = minute.as_str().parse().ok()?;
        if minute > 59 {
            return None;
        }
    }
    match caps.get(4).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(meridiem) => {
            // 12-hour clock: 12am is midnight, 12pm is noon
            if hour == 0 || hour > 12 {
                return None;
            }
            let base = hour % 12;
            Some(if meridiem == "pm" { base + 12 } else { base })
        }
        None => (hour < 24).then_some(hour),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
