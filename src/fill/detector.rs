use tracing::{debug, info};

use crate::fill::field_model::{ControlKind, DetectedField};
use crate::page::host::PageHost;
use crate::page::page_model::{ControlAttributes, ControlRef, ControlTag};

/// Input types that are never filled.
pub const SKIPPED_INPUT_TYPES: [&str; 6] = ["hidden", "submit", "button", "reset", "file", "image"];

/// Scan the page for fillable controls, in document order.
///
/// Builds a fresh list on every call. Controls the host can no longer
/// describe are dropped from the pass.
pub fn detect_fields<H: PageHost + ?Sized>(host: &H) -> Vec<DetectedField> {
    let controls = host.form_controls();
    let mut fields = Vec::with_capacity(controls.len());
    let mut skipped = 0usize;

    for control in controls {
        let attrs = match host.describe(control) {
            Ok(attrs) => attrs,
            Err(e) => {
                debug!(%control, error = %e, "control vanished during detection");
                continue;
            }
        };

        match to_field(control, &attrs) {
            Some(field) => {
                debug!(
                    field = field.label(),
                    kind = %field.kind,
                    required = field.required,
                    "detected field"
                );
                fields.push(field);
            }
            None => {
                skipped += 1;
                debug!(
                    input_type = attrs.input_type.as_deref().unwrap_or(""),
                    name = attrs.name.as_str(),
                    "skipped non-fillable input"
                );
            }
        }
    }

    let required = fields.iter().filter(|f| f.required).count();
    info!(
        detected = fields.len(),
        skipped,
        required,
        optional = fields.len() - required,
        "form field scan complete"
    );

    fields
}

/// Number of fillable fields currently on the page.
pub fn count_fields<H: PageHost + ?Sized>(host: &H) -> usize {
    detect_fields(host).len()
}

fn to_field(control: ControlRef, attrs: &ControlAttributes) -> Option<DetectedField> {
    let kind = match attrs.tag? {
        ControlTag::Input => {
            let input_type = normalize_input_type(attrs.input_type.as_deref());
            if SKIPPED_INPUT_TYPES.contains(&input_type.as_str()) {
                return None;
            }
            ControlKind::Input(input_type)
        }
        ControlTag::Select => ControlKind::Select,
        ControlTag::Textarea => ControlKind::Textarea,
    };

    let is_input = matches!(kind, ControlKind::Input(_));
    let has_placeholder = is_input || kind == ControlKind::Textarea;

    Some(DetectedField {
        control,
        name: attrs.name.clone(),
        id: attrs.id.clone(),
        placeholder: if has_placeholder {
            attrs.placeholder.clone()
        } else {
            String::new()
        },
        required: attrs.required,
        pattern: input_only(is_input, &attrs.pattern),
        min_length: if is_input { length(attrs.min_length) } else { None },
        max_length: if is_input { length(attrs.max_length) } else { None },
        min: input_only(is_input, &attrs.min),
        max: input_only(is_input, &attrs.max),
        step: input_only(is_input, &attrs.step),
        kind,
    })
}

/// Missing or empty `type` means a text input, as in the DOM.
pub fn normalize_input_type(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_ascii_lowercase(),
        _ => "text".to_string(),
    }
}

fn input_only(is_input: bool, value: &Option<String>) -> Option<String> {
    if !is_input {
        return None;
    }
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

// The DOM reports an unset length limit as -1.
fn length(raw: Option<i64>) -> Option<u32> {
    raw.and_then(|n| u32::try_from(n).ok())
}
