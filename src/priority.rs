//! Delivery-method priority classification.
//!
//! A delivery-method label (free text coming from checkout, e.g. "Express
//! Delivery" or "Scheduled - Saturday") is matched against an ordered rule
//! table. The first rule with a keyword contained in the lowercased label
//! wins; labels nothing matches fall back to [`DEFAULT_PRIORITY`].

use serde::{Deserialize, Serialize};

/// Priority weight and on-site service time assigned to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    pub weight: u32,
    pub service_time_minutes: u32,
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct PriorityRule {
    pub name: &'static str,
    /// Lowercase substrings; any one of them matching selects this rule.
    pub keywords: &'static [&'static str],
    pub priority: Priority,
}

impl PriorityRule {
    /// Expects `label` already lowercased.
    pub fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|keyword| label.contains(keyword))
    }
}

/// Rule order is part of the contract: first match wins.
pub const PRIORITY_RULES: &[PriorityRule] = &[
    PriorityRule {
        name: "express",
        keywords: &["express", "urgent"],
        priority: Priority { weight: 10, service_time_minutes: 5 },
    },
    PriorityRule {
        name: "same_day",
        keywords: &["same day", "sameday"],
        priority: Priority { weight: 8, service_time_minutes: 8 },
    },
    PriorityRule {
        name: "standard",
        keywords: &["standard", "normal"],
        priority: Priority { weight: 5, service_time_minutes: 10 },
    },
    PriorityRule {
        name: "scheduled",
        keywords: &["scheduled"],
        priority: Priority { weight: 3, service_time_minutes: 8 },
    },
];

pub const DEFAULT_PRIORITY: Priority = Priority { weight: 5, service_time_minutes: 8 };

/// Returns the rule a label resolves to, or `None` when the default applies.
pub fn matching_rule(delivery_method: &str) -> Option<&'static PriorityRule> {
    let label = delivery_method.to_lowercase();
    PRIORITY_RULES.iter().find(|rule| rule.matches(&label))
}

/// Classify a delivery-method label.
pub fn classify(delivery_method: &str) -> Priority {
    matching_rule(delivery_method)
        .map(|rule| rule.priority)
        .unwrap_or(DEFAULT_PRIORITY)
}
