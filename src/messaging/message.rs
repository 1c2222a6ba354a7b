use serde::{Deserialize, Serialize};

use crate::fill::field_model::FillSummary;
use crate::settings::policy::FillPolicy;

/// Messages exchanged between the coordinator, content, and popup contexts.
///
/// Wire format: `{"type": "request-fill", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Message {
    RequestFill(FillPolicy),
    QueryFieldCount,
    CountResponse(FieldCount),
    FillComplete(FillSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCount {
    pub count: usize,
}

impl Message {
    pub fn request_fill(policy: FillPolicy) -> Self {
        Message::RequestFill(policy)
    }

    pub fn count_response(count: usize) -> Self {
        Message::CountResponse(FieldCount { count })
    }

    /// The wire `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::RequestFill(_) => "request-fill",
            Message::QueryFieldCount => "query-field-count",
            Message::CountResponse(_) => "count-response",
            Message::FillComplete(_) => "fill-complete",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
