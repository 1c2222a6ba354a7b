use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::error::HostError;
use crate::fill::classifier::classify;
use crate::fill::detector::detect_fields;
use crate::fill::field_model::{
    DetectedField, FieldOutcome, FieldReport, FillSummary, FillTarget, FillWarning,
};
use crate::fill::generator::{GenerateOptions, generate};
use crate::fill::locale::{LocaleProvider, resolve};
use crate::page::host::PageHost;
use crate::page::page_model::{ControlRef, FILL_EVENT_SEQUENCE};
use crate::settings::policy::FillPolicy;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::FillTraceEvent;

/// Fill every eligible field on the page with random data.
pub fn fill_page<H: PageHost + ?Sized>(host: &mut H, policy: &FillPolicy) -> FillSummary {
    fill_page_with(host, policy, &mut rand::thread_rng(), &TraceLogger::disabled())
}

/// Fill the page using the given random source, tracing each field.
///
/// Fields are handled in document order. A failure on one control is
/// recorded in its report and the pass moves on.
pub fn fill_page_with<H: PageHost + ?Sized, R: Rng + ?Sized>(
    host: &mut H,
    policy: &FillPolicy,
    rng: &mut R,
    tracer: &TraceLogger,
) -> FillSummary {
    let provider = resolve(&policy.locale);
    let mut fields = detect_fields(&*host);
    let detected = fields.len();

    info!(
        locale = provider.code,
        include_optional = policy.include_optional_fields,
        respect_validation = policy.respect_validation,
        detected,
        "form auto-fill started"
    );

    if !policy.include_optional_fields {
        fields.retain(|f| f.required);
        info!(
            required = fields.len(),
            optional = detected - fields.len(),
            "filtering to required fields only"
        );

        if fields.is_empty() {
            let warning = FillWarning::NoRequiredFields;
            warn!("no required fields found, nothing filled");
            host.alert(warning.message());
            return FillSummary {
                locale: provider.code.to_string(),
                detected,
                considered: 0,
                reports: vec![],
                warning: Some(warning),
            };
        }
    }

    let mut pass = FillPass {
        provider,
        options: GenerateOptions {
            respect_validation: policy.respect_validation,
        },
        highlight: policy.animation_speed.highlight_duration(),
        seen_radio_groups: HashSet::new(),
    };

    let mut reports = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        let (category, outcome) = match pass.fill_field(host, field, rng) {
            Ok(filled) => filled,
            Err(e) => {
                warn!(index, field = field.label(), error = %e, "error filling field");
                (None, FieldOutcome::Failed { error: e.to_string() })
            }
        };

        let report = FieldReport {
            index,
            label: field.label().to_string(),
            control_type: field.kind.as_str().to_string(),
            category,
            outcome,
        };
        tracer.log(&FillTraceEvent::now(provider.code, &report));
        reports.push(report);
    }

    let summary = FillSummary {
        locale: provider.code.to_string(),
        detected,
        considered: fields.len(),
        reports,
        warning: None,
    };
    info!(
        filled = summary.filled_count(),
        skipped = summary.skipped_count(),
        failed = summary.failed_count(),
        "form auto-fill complete"
    );
    summary
}

/// State scoped to a single fill pass.
struct FillPass {
    provider: LocaleProvider,
    options: GenerateOptions,
    highlight: Option<std::time::Duration>,
    seen_radio_groups: HashSet<String>,
}

impl FillPass {
    fn fill_field<H: PageHost + ?Sized, R: Rng + ?Sized>(
        &mut self,
        host: &mut H,
        field: &DetectedField,
        rng: &mut R,
    ) -> Result<(Option<String>, FieldOutcome), HostError> {
        let (written, category, value) = match field.kind.fill_target() {
            FillTarget::Select => {
                let options = host.options(field.control)?;
                let choices: Vec<_> = options.iter().filter(|o| !o.value.is_empty()).collect();
                let Some(choice) = choices.choose(rng) else {
                    debug!(field = field.label(), "select has no non-empty options");
                    return Ok((None, skipped("select has no non-empty options")));
                };
                host.set_value(field.control, &choice.value)?;
                debug!(field = field.label(), option = choice.text.as_str(), "select filled");
                (field.control, None, choice.value.clone())
            }

            FillTarget::Checkbox => {
                let checked = rng.gen_bool(0.5);
                host.set_checked(field.control, checked)?;
                debug!(field = field.label(), checked, "checkbox filled");
                (field.control, None, checked.to_string())
            }

            FillTarget::Radio => match self.fill_radio_group(host, field, rng)? {
                Some((chosen, value)) => (chosen, None, value),
                None => return Ok((None, skipped("radio group already filled"))),
            },

            FillTarget::Text | FillTarget::Textarea => {
                let category = classify(field);
                let value = generate(field, &category, &self.provider, self.options, rng);
                host.set_value(field.control, &value)?;
                debug!(
                    field = field.label(),
                    kind = %field.kind,
                    category = %category,
                    value = value.as_str(),
                    "field filled"
                );
                (field.control, Some(category.to_string()), value)
            }
        };

        self.notify(host, written)?;
        Ok((category, FieldOutcome::Filled { value }))
    }

    /// Check exactly one member of the field's group and uncheck the rest.
    ///
    /// Returns `None` when the group was already handled earlier in the pass.
    fn fill_radio_group<H: PageHost + ?Sized, R: Rng + ?Sized>(
        &mut self,
        host: &mut H,
        field: &DetectedField,
        rng: &mut R,
    ) -> Result<Option<(ControlRef, String)>, HostError> {
        let members = if field.name.is_empty() {
            vec![field.control]
        } else {
            if !self.seen_radio_groups.insert(field.name.clone()) {
                return Ok(None);
            }
            let members = host.radio_group(&field.name);
            if members.is_empty() { vec![field.control] } else { members }
        };

        // Check a random member first; if the host rejects it, fall through to
        // the next one so the group never ends with nothing checked.
        let mut order = members.clone();
        order.shuffle(rng);
        let mut chosen = None;
        let mut last_error = None;
        for candidate in order {
            match host.set_checked(candidate, true) {
                Ok(()) => {
                    chosen = Some(candidate);
                    break;
                }
                Err(e) => {
                    debug!(group = field.name.as_str(), %candidate, error = %e, "radio rejected check");
                    last_error = Some(e);
                }
            }
        }
        let Some(chosen) = chosen else {
            return Err(last_error.unwrap_or(HostError::StaleControl(field.control)));
        };

        for member in members.iter().filter(|m| **m != chosen) {
            if let Err(e) = host.set_checked(*member, false) {
                warn!(group = field.name.as_str(), %member, error = %e, "could not uncheck radio");
            }
        }

        let value = host.describe(chosen)?.value;
        debug!(group = field.name.as_str(), value = value.as_str(), size = members.len(), "radio group filled");
        Ok(Some((chosen, value)))
    }

    /// Emit the input, change, blur sequence, then request a highlight.
    fn notify<H: PageHost + ?Sized>(&self, host: &mut H, control: ControlRef) -> Result<(), HostError> {
        for event in FILL_EVENT_SEQUENCE {
            host.dispatch(control, event)?;
        }
        if let Some(duration) = self.highlight {
            host.highlight(control, duration);
        }
        Ok(())
    }
}

fn skipped(reason: &str) -> FieldOutcome {
    FieldOutcome::Skipped {
        reason: reason.to_string(),
    }
}
