//! Rule table: signal type to risk metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::documents::{RulePack, scalar_text};

/// Placeholder for metadata the rule table does not supply.
pub const UNSPECIFIED: &str = "UNSPECIFIED";

/// Risk metadata attached to a signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Risk level label.
    pub risk_level: String,
    /// Escalation path label.
    pub escalation: String,
    /// Rule identifier.
    pub rule_id: String,
}

impl Default for RuleMetadata {
    fn default() -> Self {
        Self {
            risk_level: UNSPECIFIED.to_string(),
            escalation: UNSPECIFIED.to_string(),
            rule_id: UNSPECIFIED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RuleFields {
    risk_level: Option<String>,
    escalation: Option<String>,
    rule_id: Option<String>,
}

/// Lookup of rule metadata by exact signal type.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, RuleFields>,
}

impl RuleTable {
    /// Builds the table from a rule pack.
    ///
    /// Entries without a signal type are ignored; a later entry for the same
    /// signal type replaces the earlier one entirely. Non-string values are
    /// kept as their JSON text.
    #[must_use]
    pub fn from_pack(pack: &RulePack) -> Self {
        let rules = pack
            .rules
            .iter()
            .filter_map(|entry| {
                let signal_type = entry
                    .signal_type
                    .as_ref()
                    .and_then(scalar_text)
                    .filter(|s| !s.is_empty())?;
                let fields = RuleFields {
                    risk_level: entry.risk_level.as_ref().and_then(scalar_text),
                    escalation: entry.escalation.as_ref().and_then(scalar_text),
                    rule_id: entry.rule_id.as_ref().and_then(scalar_text),
                };
                Some((signal_type, fields))
            })
            .collect();
        Self { rules }
    }

    /// Returns metadata for a signal type. Each field missing from the table
    /// falls back to [`UNSPECIFIED`] on its own.
    #[must_use]
    pub fn lookup(&self, signal_type: &str) -> RuleMetadata {
        let Some(fields) = self.rules.get(signal_type) else {
            return RuleMetadata::default();
        };
        let or_unspecified = |value: Option<&str>| value.unwrap_or(UNSPECIFIED).to_string();
        RuleMetadata {
            risk_level: or_unspecified(fields.risk_level.as_deref()),
            escalation: or_unspecified(fields.escalation.as_deref()),
            rule_id: or_unspecified(fields.rule_id.as_deref()),
        }
    }

    /// Number of distinct signal types mapped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
