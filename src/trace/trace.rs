use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::fill::field_model::{FieldOutcome, FieldReport};

/// One JSONL trace line: what happened to one field in a fill pass.
#[derive(Debug, Serialize)]
pub struct FillTraceEvent {
    pub timestamp_ms: u128,
    pub locale: String,
    pub index: usize,
    pub field: String,
    pub control_type: String,

    pub category: Option<String>,
    pub status: &'static str,
    pub value: Option<String>,
    pub detail: Option<String>,
}

impl FillTraceEvent {
    pub fn now(locale: &str, report: &FieldReport) -> Self {
        let (status, value, detail) = match &report.outcome {
            FieldOutcome::Filled { value } => ("filled", Some(value.clone()), None),
            FieldOutcome::Skipped { reason } => ("skipped", None, Some(reason.clone())),
            FieldOutcome::Failed { error } => ("failed", None, Some(error.clone())),
        };

        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            locale: locale.to_string(),
            index: report.index,
            field: report.label.clone(),
            control_type: report.control_type.clone(),
            category: report.category.clone(),
            status,
            value,
            detail,
        }
    }
}
