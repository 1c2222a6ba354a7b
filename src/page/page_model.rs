use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to one element of the live page.
///
/// This is a reference into the host's document, not a copy of the control.
/// It is only meaningful for the page that produced it and only until that
/// page's DOM changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlRef(pub usize);

impl fmt::Display for ControlRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three standard form-control tags the core works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlTag {
    Input,
    Select,
    Textarea,
}

impl ControlTag {
    pub fn from_tag_name(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "input" => Some(ControlTag::Input),
            "select" => Some(ControlTag::Select),
            "textarea" => Some(ControlTag::Textarea),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlTag::Input => "input",
            ControlTag::Select => "select",
            ControlTag::Textarea => "textarea",
        }
    }
}

/// DOM notifications the fill orchestrator emits after writing a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEvent {
    Input,
    Change,
    Blur,
}

/// The notification sequence a real user edit produces, in order.
pub const FILL_EVENT_SEQUENCE: [DomEvent; 3] = [DomEvent::Input, DomEvent::Change, DomEvent::Blur];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub text: String,
}

impl SelectOption {
    pub fn new(value: &str, text: &str) -> Self {
        Self {
            value: value.to_string(),
            text: text.to_string(),
        }
    }
}

/// Read-only view of a control's attributes as the host reports them.
///
/// `input_type` is the raw `type` attribute (inputs only). Length limits use
/// the DOM convention where a negative value means "not set".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlAttributes {
    pub tag: Option<ControlTag>,
    pub input_type: Option<String>,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub required: bool,
    pub pattern: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,
    pub value: String,
    pub checked: bool,
}

/// One element in a page snapshot.
///
/// Snapshots are produced by a DOM extraction script and may contain
/// non-form elements; the core ignores anything that is not an input,
/// select, or textarea.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub tag: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<DomEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_ms: Option<u64>,
}

impl PageElement {
    pub fn input(input_type: &str, name: &str) -> Self {
        Self {
            tag: "input".into(),
            input_type: Some(input_type.to_string()),
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn select(name: &str, options: &[(&str, &str)]) -> Self {
        Self {
            tag: "select".into(),
            name: name.to_string(),
            options: options
                .iter()
                .map(|(value, text)| SelectOption::new(value, text))
                .collect(),
            ..Self::default()
        }
    }

    pub fn textarea(name: &str) -> Self {
        Self {
            tag: "textarea".into(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_bounds(mut self, min: &str, max: &str) -> Self {
        self.min = Some(min.to_string());
        self.max = Some(max.to_string());
        self
    }

    pub fn with_step(mut self, step: &str) -> Self {
        self.step = Some(step.to_string());
        self
    }

    pub fn with_lengths(mut self, min_length: Option<i64>, max_length: Option<i64>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    pub fn control_tag(&self) -> Option<ControlTag> {
        ControlTag::from_tag_name(&self.tag)
    }

    pub fn attributes(&self) -> ControlAttributes {
        ControlAttributes {
            tag: self.control_tag(),
            input_type: self.input_type.clone(),
            name: self.name.clone(),
            id: self.id.clone(),
            placeholder: self.placeholder.clone(),
            required: self.required,
            pattern: self.pattern.clone(),
            min_length: self.min_length,
            max_length: self.max_length,
            min: self.min.clone(),
            max: self.max.clone(),
            step: self.step.clone(),
            value: self.value.clone(),
            checked: self.checked,
        }
    }

    pub fn is_radio(&self) -> bool {
        self.control_tag() == Some(ControlTag::Input)
            && self
                .input_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("radio"))
    }
}

/// A whole page as extracted from the browser: `{ url, title, dom: [...] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "dom", default)]
    pub elements: Vec<PageElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<String>,
}
