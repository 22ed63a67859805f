use crate::canvas::ValueMap;
use crate::error::ConversionError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Entry point of a workflow (schedule, webhook, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    /// Interval in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ValueMap>,
}

/// A step executed once all of its parents have run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    /// Action type, e.g. `"core.debug_print"`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub inputs: ValueMap,
    #[serde(default)]
    pub outputs: ValueMap,
    /// Names of upstream triggers or actions.
    #[serde(default)]
    pub parents: Vec<String>,
}

/// The serialized form of a canvas, as submitted to `/workflows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub triggers: Vec<TriggerEntry>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub teams: Vec<String>,
}

impl WorkflowDocument {
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::Json(e.to_string()))
    }

    /// The "Export as JSON" artifact.
    pub fn to_json_pretty(&self) -> Result<String, ConversionError> {
        serde_json::to_string_pretty(self).map_err(|e| ConversionError::Json(e.to_string()))
    }

    pub fn trigger(&self, name: &str) -> Option<&TriggerEntry> {
        self.triggers.iter().find(|t| t.name == name)
    }

    pub fn action(&self, name: &str) -> Option<&ActionEntry> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Names of every trigger and action, triggers first.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.triggers
            .iter()
            .map(|t| t.name.as_str())
            .chain(self.actions.iter().map(|a| a.name.as_str()))
    }

    /// Orders entry names so every action comes after all of its parents.
    ///
    /// Parent names that resolve to nothing are ignored here; see
    /// `validate_workflow` for referential checks.
    ///
    /// # Errors
    /// [`ConversionError::ParentCycle`] when parents reference each other in a
    /// loop; the error names an action on the cycle.
    pub fn execution_order(&self) -> Result<Vec<&str>, ConversionError> {
        let names: Vec<&str> = self.entry_names().collect();
        let known: AHashSet<&str> = names.iter().copied().collect();

        let mut in_degree: AHashMap<&str, usize> = names.iter().map(|n| (*n, 0)).collect();
        let mut children: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for action in &self.actions {
            for parent in &action.parents {
                if !known.contains(parent.as_str()) {
                    continue;
                }
                children
                    .entry(parent.as_str())
                    .or_default()
                    .push(action.name.as_str());
                *in_degree.entry(action.name.as_str()).or_insert(0) += 1;
            }
        }

        // Seed in declaration order so the result is deterministic.
        let mut queue: VecDeque<&str> = names
            .iter()
            .copied()
            .filter(|n| in_degree.get(n) == Some(&0))
            .collect();
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut order = Vec::with_capacity(names.len());

        while let Some(name) = queue.pop_front() {
            if !seen.insert(name) {
                continue;
            }
            order.push(name);
            for child in children.get(name).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }

        if order.len() < known.len() {
            let stuck = self
                .actions
                .iter()
                .map(|a| a.name.as_str())
                .find(|n| !seen.contains(n))
                .unwrap_or_default();
            return Err(ConversionError::ParentCycle(stuck.to_string()));
        }
        Ok(order)
    }
}
