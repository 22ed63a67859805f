use super::WorkflowDocument;
use crate::error::{ConversionError, ValidationError};
use ahash::AHashSet;
use itertools::Itertools;
use serde::{Serialize, Serializer};
use tracing::warn;

/// Outcome of [`validate_workflow`]. Warnings never affect `valid`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(serialize_with = "as_strings")]
    pub errors: Vec<ValidationError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

fn as_strings<S: Serializer>(errors: &[ValidationError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(errors.iter().map(ToString::to_string))
}

impl ValidationReport {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn errors_joined(&self) -> String {
        self.errors.iter().join("; ")
    }
}

/// Checks a workflow before submission.
///
/// Errors: empty name, empty id, no trigger, and action parents that name no
/// trigger or action of the same document. Cycles among actions are not an
/// error; they and duplicate entry names are reported as warnings.
pub fn validate_workflow(doc: &WorkflowDocument) -> ValidationReport {
    let mut errors = Vec::new();

    if doc.name.trim().is_empty() {
        errors.push(ValidationError::MissingName);
    }
    if doc.id.trim().is_empty() {
        errors.push(ValidationError::MissingId);
    }
    if doc.triggers.is_empty() {
        errors.push(ValidationError::NoTrigger);
    }

    let names: AHashSet<&str> = doc.entry_names().collect();
    for action in &doc.actions {
        for parent in &action.parents {
            if !names.contains(parent.as_str()) {
                errors.push(ValidationError::UnknownParent {
                    action: action.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
    }

    let mut warnings: Vec<String> = doc
        .entry_names()
        .duplicates()
        .map(|name| format!("Name '{}' is used by more than one entry", name))
        .collect();
    if let Err(ConversionError::ParentCycle(name)) = doc.execution_order() {
        warnings.push(format!("Action '{}' is part of a parent cycle", name));
    }

    if !errors.is_empty() {
        warn!(
            workflow = %doc.id,
            errors = errors.len(),
            "workflow failed validation"
        );
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}
