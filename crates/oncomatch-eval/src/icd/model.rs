//! In-memory ICD ontology.
//!
//! Built once from (code, parent) nodes; parsing the release files into
//! nodes happens upstream. Share as `Arc<IcdModel>` or by reference.

use std::collections::{HashMap, HashSet};

use oncomatch_common::{OncomatchError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Ancestor lookup over a diagnostic code hierarchy.
pub trait IcdOntology: Send + Sync {
    /// Chain from `code` up to its root, starting with `code` itself.
    /// Codes unknown to the ontology resolve to a chain of just themselves.
    fn ancestors_of(&self, code: &str) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcdNode {
    pub code: String,
    #[serde(default)]
    pub parent_code: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IcdModel {
    parents: HashMap<String, String>,
}

impl IcdModel {
    pub fn from_nodes<I>(nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = IcdNode>,
    {
        let mut model = IcdModel::default();
        for node in nodes {
            if node.parent_code.as_deref() == Some(node.code.as_str()) {
                return Err(OncomatchError::Config(format!("ICD node {} is its own parent", node.code)));
            }
            if let Some(parent) = node.parent_code {
                model.parents.insert(node.code, parent);
            }
        }
        info!("ICD model ready: {} parent links", model.parents.len());
        Ok(model)
    }
}

impl IcdOntology for IcdModel {
    fn ancestors_of(&self, code: &str) -> Vec<String> {
        let mut chain = vec![code.to_string()];
        let mut seen: HashSet<&str> = HashSet::from([code]);
        let mut current = code;
        while let Some(parent) = self.parents.get(current) {
            if !seen.insert(parent.as_str()) {
                break;
            }
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(code: &str, parent: Option<&str>) -> IcdNode {
        IcdNode { code: code.to_string(), parent_code: parent.map(str::to_string) }
    }

    #[test]
    fn test_ancestor_chain_starts_with_self() {
        let model = IcdModel::from_nodes([
            node("2C25", None),
            node("2C25.0", Some("2C25")),
            node("2C25.0Z", Some("2C25.0")),
        ])
        .unwrap();
        assert_eq!(model.ancestors_of("2C25.0Z"), vec!["2C25.0Z", "2C25.0", "2C25"]);
        assert_eq!(model.ancestors_of("unknown"), vec!["unknown"]);
    }

    #[test]
    fn test_cycles_terminate() {
        let model = IcdModel::from_nodes([node("A", Some("B")), node("B", Some("A"))]).unwrap();
        assert_eq!(model.ancestors_of("A"), vec!["A", "B"]);
    }

    #[test]
    fn test_self_parent_is_rejected() {
        assert!(IcdModel::from_nodes([node("A", Some("A"))]).is_err());
    }
}
