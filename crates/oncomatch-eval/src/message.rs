//! Explanatory messages attached to evaluations.
//!
//! Messages that share a combine key are folded into one, so that e.g. two
//! "Inactivation of {}" messages for TP53 and RB1 surface as a single
//! "Inactivation of RB1, TP53". Consolidation runs per message category.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder in an itemized template that receives the joined items.
pub const ITEMS_PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationMessage {
    /// Merge identity. Never surfaced by consolidation.
    Empty,
    Static { text: String },
    Itemized { template: String, items: BTreeSet<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKey {
    Empty,
    Static(String),
    Itemized(String),
}

impl EvaluationMessage {
    pub fn text(text: impl Into<String>) -> Self {
        EvaluationMessage::Static { text: text.into() }
    }

    pub fn itemized<I, S>(template: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EvaluationMessage::Itemized {
            template: template.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EvaluationMessage::Empty)
    }

    pub fn combine_key(&self) -> MessageKey {
        match self {
            EvaluationMessage::Empty => MessageKey::Empty,
            EvaluationMessage::Static { text } => MessageKey::Static(text.clone()),
            EvaluationMessage::Itemized { template, .. } => MessageKey::Itemized(template.clone()),
        }
    }

    /// Associative merge of two messages with the same key; `Empty` is the identity.
    ///
    /// Callers must group by [`combine_key`](Self::combine_key) first. Messages
    /// with different keys do not merge and `self` is kept.
    pub fn combine(self, other: EvaluationMessage) -> EvaluationMessage {
        match (self, other) {
            (EvaluationMessage::Empty, other) => other,
            (this, EvaluationMessage::Empty) => this,
            (
                EvaluationMessage::Itemized { template, mut items },
                EvaluationMessage::Itemized { template: other_template, items: other_items },
            ) if template == other_template => {
                items.extend(other_items);
                EvaluationMessage::Itemized { template, items }
            }
            (this, other) => {
                debug_assert_eq!(this.combine_key(), other.combine_key(), "combining messages with different keys");
                this
            }
        }
    }
}

impl From<&str> for EvaluationMessage {
    fn from(text: &str) -> Self {
        EvaluationMessage::text(text)
    }
}

impl From<String> for EvaluationMessage {
    fn from(text: String) -> Self {
        EvaluationMessage::Static { text }
    }
}

impl fmt::Display for EvaluationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationMessage::Empty => Ok(()),
            EvaluationMessage::Static { text } => f.write_str(text),
            EvaluationMessage::Itemized { template, items } => {
                let joined = items.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
                f.write_str(&template.replacen(ITEMS_PLACEHOLDER, &joined, 1))
            }
        }
    }
}

/// Fold messages sharing a combine key into one representative per key.
pub fn consolidate(messages: &BTreeSet<EvaluationMessage>) -> BTreeSet<EvaluationMessage> {
    let mut groups: BTreeMap<MessageKey, EvaluationMessage> = BTreeMap::new();
    for message in messages {
        let slot = groups.entry(message.combine_key()).or_insert(EvaluationMessage::Empty);
        let folded = std::mem::replace(slot, EvaluationMessage::Empty).combine(message.clone());
        *slot = folded;
    }
    groups.into_values().filter(|m| !m.is_empty()).collect()
}
