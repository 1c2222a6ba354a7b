use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::config::{AppConfig, FillOverrides, OptionsAction, build_fill_policy};
use crate::fill::classifier::classify;
use crate::fill::detector::{count_fields, detect_fields, normalize_input_type};
use crate::fill::field_model::{ControlKind, DetectedField, FieldOutcome, FillSummary};
use crate::fill::locale::{DEFAULT_LOCALE, supported_locales};
use crate::fill::orchestrator::fill_page_with;
use crate::page::memory_page::MemoryPage;
use crate::settings::policy::AnimationSpeed;
use crate::settings::store::{JsonFileStore, Settings};
use crate::trace::logger::TraceLogger;

// ============================================================================
// fill subcommand
// ============================================================================

pub struct FillArgs {
    pub page: String,
    pub overrides: FillOverrides,
    pub seed: Option<u64>,
    pub output: Option<String>,
    pub trace: Option<String>,
    pub format: String,
}

pub fn cmd_fill(
    args: &FillArgs,
    config: &AppConfig,
    settings_path: &str,
) -> Result<FillSummary, Box<dyn std::error::Error>> {
    let settings = Settings::new(JsonFileStore::new(settings_path));
    let policy = build_fill_policy(settings.policy(), &config.fill, &args.overrides);

    let mut page = MemoryPage::load(&args.page)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let tracer = TraceLogger::from_path(args.trace.as_deref().or(config.fill.trace.as_deref()));

    let summary = fill_page_with(&mut page, &policy, &mut rng, &tracer);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print!("{}", format_summary(&summary)),
    }

    if let Some(warning) = summary.warning {
        eprintln!("Warning: {}", warning.message());
    }

    if let Some(output) = &args.output {
        let json = serde_json::to_string_pretty(page.snapshot())?;
        std::fs::write(output, json)?;
        eprintln!("Filled page written to {}", output);
    }

    Ok(summary)
}

/// Human-readable summary of a fill pass.
pub fn format_summary(summary: &FillSummary) -> String {
    let mut out = format!(
        "Locale {}: {} detected, {} considered, {} filled, {} skipped, {} failed\n",
        summary.locale,
        summary.detected,
        summary.considered,
        summary.filled_count(),
        summary.skipped_count(),
        summary.failed_count(),
    );

    for report in &summary.reports {
        let category = report
            .category
            .as_deref()
            .map(|c| format!(" as {}", c))
            .unwrap_or_default();
        let line = match &report.outcome {
            FieldOutcome::Filled { value } => {
                format!("  [{}] {} ({}{}) -> {}", report.index, report.label, report.control_type, category, value)
            }
            FieldOutcome::Skipped { reason } => {
                format!("  [{}] {} ({}) skipped: {}", report.index, report.label, report.control_type, reason)
            }
            FieldOutcome::Failed { error } => {
                format!("  [{}] {} ({}) FAILED: {}", report.index, report.label, report.control_type, error)
            }
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

// ============================================================================
// count / classify / locales subcommands
// ============================================================================

pub fn cmd_count(page_path: &str, verbose: u8) -> Result<usize, Box<dyn std::error::Error>> {
    let page = MemoryPage::load(page_path)?;
    let count = count_fields(&page);

    if verbose > 0 {
        for field in detect_fields(&page) {
            let marker = if field.required { "required" } else { "optional" };
            eprintln!("  {} [{}] {}", field.label(), field.kind, marker);
        }
    }

    println!("{}", count);
    Ok(count)
}

/// Category a field with these attributes would be classified as.
pub fn cmd_classify(name: &str, id: &str, placeholder: &str, input_type: &str) -> String {
    let kind = match input_type.to_ascii_lowercase().as_str() {
        "select" => ControlKind::Select,
        "textarea" => ControlKind::Textarea,
        other => ControlKind::Input(normalize_input_type(Some(other))),
    };
    let mut field = DetectedField::new(kind, name);
    field.id = id.to_string();
    field.placeholder = placeholder.to_string();

    let category = classify(&field).to_string();
    println!("{}", category);
    category
}

pub fn cmd_locales() {
    for provider in supported_locales() {
        let marker = if provider.code == DEFAULT_LOCALE { " (default)" } else { "" };
        println!("{:<6} {}{}", provider.code, provider.display_name, marker);
    }
}

// ============================================================================
// options subcommand
// ============================================================================

pub fn cmd_options(action: &OptionsAction, settings_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::new(JsonFileStore::new(settings_path));

    let policy = match action {
        OptionsAction::Show => settings.policy(),
        OptionsAction::Set {
            locale,
            fill_optional,
            respect_validation,
            speed,
        } => settings.update_policy(|p| {
            if let Some(locale) = locale {
                p.locale = locale.clone();
            }
            if let Some(fill_optional) = fill_optional {
                p.include_optional_fields = *fill_optional;
            }
            if let Some(respect) = respect_validation {
                p.respect_validation = *respect;
            }
            if let Some(speed) = speed {
                p.animation_speed = AnimationSpeed::from(*speed);
            }
        })?,
    };

    println!("{}", serde_json::to_string_pretty(&policy)?);
    Ok(())
}
