use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fill::locale::DEFAULT_LOCALE;

/// How long a filled control stays highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Instant,
    #[default]
    Fast,
    Slow,
}

impl AnimationSpeed {
    pub fn highlight_duration(&self) -> Option<Duration> {
        match self {
            AnimationSpeed::Instant => None,
            AnimationSpeed::Fast => Some(Duration::from_millis(1000)),
            AnimationSpeed::Slow => Some(Duration::from_millis(2500)),
        }
    }
}

/// User options governing one fill pass.
///
/// Stored and sent over the wire as camelCase JSON; missing keys take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FillPolicy {
    #[serde(rename = "fillOptionalFields")]
    pub include_optional_fields: bool,
    pub respect_validation: bool,
    pub locale: String,
    pub animation_speed: AnimationSpeed,
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self {
            include_optional_fields: true,
            respect_validation: true,
            locale: DEFAULT_LOCALE.to_string(),
            animation_speed: AnimationSpeed::Fast,
        }
    }
}

impl FillPolicy {
    pub fn required_only() -> Self {
        Self {
            include_optional_fields: false,
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }
}

/// A named set of field-name to value mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl Profile {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            data: BTreeMap::new(),
        }
    }

    pub fn with_entry(mut self, field: &str, value: &str) -> Self {
        self.data.insert(field.to_string(), value.to_string());
        self
    }
}
