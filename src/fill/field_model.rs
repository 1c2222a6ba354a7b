use std::fmt;

use serde::{Deserialize, Serialize};

use crate::page::page_model::ControlRef;

/// What kind of control a field is: an input with its native subtype, or a
/// select / textarea element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Input(String),
    Select,
    Textarea,
}

impl ControlKind {
    /// The raw kind string: the input's type, or the tag name otherwise.
    pub fn as_str(&self) -> &str {
        match self {
            ControlKind::Input(t) => t,
            ControlKind::Select => "select",
            ControlKind::Textarea => "textarea",
        }
    }

    pub fn native_type(&self) -> Option<NativeType> {
        match self {
            ControlKind::Input(t) => NativeType::from_input_type(t),
            _ => None,
        }
    }

    pub fn fill_target(&self) -> FillTarget {
        match self {
            ControlKind::Select => FillTarget::Select,
            ControlKind::Textarea => FillTarget::Textarea,
            ControlKind::Input(t) if t == "checkbox" => FillTarget::Checkbox,
            ControlKind::Input(t) if t == "radio" => FillTarget::Radio,
            ControlKind::Input(_) => FillTarget::Text,
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the orchestrator writes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillTarget {
    Text,
    Select,
    Checkbox,
    Radio,
    Textarea,
}

/// Native input types whose generator overrides name-based classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeType {
    Email,
    Tel,
    Url,
    Number,
    Date,
    DateTime,
    Time,
    Month,
    Week,
    Color,
    Range,
}

impl NativeType {
    pub fn from_input_type(input_type: &str) -> Option<Self> {
        let native = match input_type {
            "email" => NativeType::Email,
            "tel" => NativeType::Tel,
            "url" => NativeType::Url,
            "number" => NativeType::Number,
            "date" => NativeType::Date,
            "datetime" | "datetime-local" => NativeType::DateTime,
            "time" => NativeType::Time,
            "month" => NativeType::Month,
            "week" => NativeType::Week,
            "color" => NativeType::Color,
            "range" => NativeType::Range,
            _ => return None,
        };
        Some(native)
    }
}

/// Semantic meaning inferred from a field's name, id, and placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Email,
    FirstName,
    LastName,
    FullName,
    Phone,
    Address,
    City,
    State,
    Zip,
    Country,
    Company,
    Username,
    Password,
    Url,
    Age,
    Date,
    /// No rule matched; carries the control's raw kind (e.g. "text").
    Control(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Email => "email",
            Category::FirstName => "firstName",
            Category::LastName => "lastName",
            Category::FullName => "fullName",
            Category::Phone => "phone",
            Category::Address => "address",
            Category::City => "city",
            Category::State => "state",
            Category::Zip => "zip",
            Category::Country => "country",
            Category::Company => "company",
            Category::Username => "username",
            Category::Password => "password",
            Category::Url => "url",
            Category::Age => "age",
            Category::Date => "date",
            Category::Control(kind) => kind,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fillable control found by a detection pass.
///
/// Holds a handle into the live page plus the attributes read at detection
/// time. Never cached: a fresh list is built on every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedField {
    pub control: ControlRef,
    pub kind: ControlKind,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub required: bool,
    pub pattern: Option<String>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,
}

impl DetectedField {
    /// Bare field of the given kind, mainly for building test cases.
    pub fn new(kind: ControlKind, name: &str) -> Self {
        Self {
            control: ControlRef(0),
            kind,
            name: name.to_string(),
            id: String::new(),
            placeholder: String::new(),
            required: false,
            pattern: None,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            step: None,
        }
    }

    pub fn input(input_type: &str, name: &str) -> Self {
        Self::new(ControlKind::Input(input_type.to_string()), name)
    }

    /// Lowercased "name id placeholder", the text classification runs on.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.id, self.placeholder).to_lowercase()
    }

    /// Human-readable label for logs: name, then id, then a marker.
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.id.is_empty() {
            &self.id
        } else {
            "(no name/id)"
        }
    }
}

/// Result of trying to fill one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldOutcome {
    Filled { value: String },
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub index: usize,
    pub label: String,
    pub control_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub outcome: FieldOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillWarning {
    /// Required-only fill found no field marked required.
    NoRequiredFields,
}

impl FillWarning {
    pub fn message(&self) -> &'static str {
        match self {
            FillWarning::NoRequiredFields => {
                "No required fields found. This form has no fields marked as \"required\". \
                 Enable \"Fill optional fields\" to fill all fields."
            }
        }
    }
}

/// What one fill pass did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillSummary {
    pub locale: String,
    /// Fields found by detection, before the policy filter.
    pub detected: usize,
    /// Fields left after the policy filter.
    pub considered: usize,
    pub reports: Vec<FieldReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<FillWarning>,
}

impl FillSummary {
    pub fn filled_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, FieldOutcome::Filled { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, FieldOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, FieldOutcome::Failed { .. }))
            .count()
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.reports.iter().find_map(|r| match &r.outcome {
            FieldOutcome::Filled { value } if r.label == label => Some(value.as_str()),
            _ => None,
        })
    }
}
