use super::{ActionEntry, TriggerEntry, WorkflowDocument};
use crate::canvas::{Canvas, Node, ValueMap};
use ahash::AHashMap;
use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, info};

/// Maximum length of an id derived from a workflow name.
pub const MAX_SLUG_LEN: usize = 50;

/// Option keys consumed into dedicated trigger fields.
const PATH_KEY: &str = "path";
const CRON_KEY: &str = "cron";
const INTERVAL_KEY: &str = "interval";

/// Derives an identifier from a workflow name: lowercase, every run of
/// non-alphanumeric characters replaced by `_`, outer underscores trimmed,
/// at most [`MAX_SLUG_LEN`] characters.
///
/// Trailing `_` is trimmed again after truncation, so a cut that lands on a
/// separator never leaves one behind.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let slug = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .join("_");
    slug.chars()
        .take(MAX_SLUG_LEN)
        .collect::<String>()
        .trim_end_matches('_')
        .to_string()
}

/// Builds a [`WorkflowDocument`] from a canvas.
///
/// Conversion never fails: structural problems (dangling parents, missing
/// triggers) are left for `validate_workflow` to report.
#[derive(Debug, Clone)]
pub struct WorkflowConverter {
    name: String,
    id: Option<String>,
    description: Option<String>,
}

impl WorkflowConverter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            description: None,
        }
    }

    /// Uses `id` instead of the slug of the name.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn convert(&self, canvas: &Canvas) -> WorkflowDocument {
        let name = self.name.trim().to_string();
        let id = self.id.clone().unwrap_or_else(|| slugify(&name));

        let triggers: Vec<TriggerEntry> = canvas.nodes.iter().filter_map(trigger_entry).collect();

        let parents = parent_names(canvas);
        let actions: Vec<ActionEntry> = canvas
            .nodes
            .iter()
            .filter_map(|node| {
                let action_type = node.module.as_ref()?.action_type()?;
                Some(ActionEntry {
                    id: action_type.to_string(),
                    name: node.label.clone(),
                    inputs: node.inputs.clone(),
                    outputs: node.outputs.clone(),
                    parents: parents.get(node.id.as_str()).cloned().unwrap_or_default(),
                })
            })
            .collect();

        info!(
            workflow = %id,
            triggers = triggers.len(),
            actions = actions.len(),
            "converted canvas to workflow"
        );

        WorkflowDocument {
            id,
            name,
            description: self.description.clone(),
            triggers,
            actions,
            owners: Vec::new(),
            users: Vec::new(),
            teams: Vec::new(),
        }
    }
}

/// Converts with an id derived from `name`.
pub fn convert_canvas_to_workflow(canvas: &Canvas, name: &str) -> WorkflowDocument {
    WorkflowConverter::new(name).convert(canvas)
}

/// Parent labels of every node id, deduplicated, in edge order.
fn parent_names(canvas: &Canvas) -> AHashMap<&str, Vec<String>> {
    let labels: AHashMap<&str, &str> = canvas
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.label.as_str()))
        .collect();

    let mut parents: AHashMap<&str, Vec<String>> = AHashMap::new();
    for edge in &canvas.edges {
        let Some((source, target)) = edge.direction() else {
            continue;
        };
        if source == target {
            continue;
        }
        let Some(label) = labels.get(source) else {
            debug!(edge = %edge.id, node = %source, "edge source not on canvas, skipping");
            continue;
        };
        let list = parents.entry(target).or_default();
        if !list.iter().any(|p| p == label) {
            list.push(label.to_string());
        }
    }
    parents
}

fn trigger_entry(node: &Node) -> Option<TriggerEntry> {
    let trigger_type = node.module.as_ref()?.trigger_type()?.to_string();
    let kind = trigger_type.to_lowercase();

    let mut options = node.options.clone();
    let mut entry = TriggerEntry {
        name: node.label.clone(),
        credential_id: node.credential_id.clone(),
        ..TriggerEntry::default()
    };

    if kind.contains("webhook") || kind.contains("websocket") {
        entry.path = take_string(&mut options, PATH_KEY)
            .or_else(|| node.inputs.get(PATH_KEY).and_then(value_as_string));
    }
    if kind.contains("cron") || kind.contains("schedule") {
        entry.cron = take_string(&mut options, CRON_KEY)
            .or_else(|| node.inputs.get(CRON_KEY).and_then(value_as_string));
    }
    if kind.contains("interval") || kind.contains("timer") {
        entry.interval = options
            .remove(INTERVAL_KEY)
            .as_ref()
            .and_then(value_as_u64)
            .or_else(|| node.inputs.get(INTERVAL_KEY).and_then(value_as_u64));
    }

    entry.trigger_type = trigger_type;
    entry.options = (!options.is_empty()).then_some(options);
    Some(entry)
}

fn take_string(map: &mut ValueMap, key: &str) -> Option<String> {
    map.remove(key).as_ref().and_then(value_as_string)
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(whole_f64_as_u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Only whole numbers inside the `u64` range; fractions and overflow are
/// dropped rather than truncated or saturated.
fn whole_f64_as_u64(f: f64) -> Option<u64> {
    (f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then_some(f as u64)
}
