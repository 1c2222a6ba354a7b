use chrono::{Datelike, Days, Local, NaiveDate, TimeDelta};
use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, CountryName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::raw::CompanyName;
use fake::faker::internet::raw::{DomainSuffix, Username};
use fake::faker::lorem::raw::{Paragraphs, Word};
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{AR_SA, Data, EN, FR_FR, JA_JP, PT_BR, ZH_CN, ZH_TW};
use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::GenerateError;
use crate::fill::field_model::{Category, DetectedField, NativeType};
use crate::fill::locale::{LocaleBackend, LocaleProvider};

/// Domains reserved for documentation (RFC 2606); generated addresses never
/// point anywhere deliverable.
pub const RESERVED_EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.net", "example.org"];

pub const DEFAULT_MIN: i64 = 0;
pub const DEFAULT_MAX: i64 = 100;

const PASSWORD_LENGTH: usize = 12;
const SHORT_TEXT_LIMIT: u32 = 20;
const PLACEHOLDER_PREFIX: &str = "Test Data ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Honour step, minlength and maxlength, and check declared patterns.
    pub respect_validation: bool,
}

// Run `$body` with `$locale` bound to the `fake` dataset for `$backend`.
macro_rules! with_locale {
    ($backend:expr, |$locale:ident| $body:expr) => {
        match $backend {
            LocaleBackend::En => {
                let $locale = EN;
                $body
            }
            LocaleBackend::FrFr => {
                let $locale = FR_FR;
                $body
            }
            LocaleBackend::PtBr => {
                let $locale = PT_BR;
                $body
            }
            LocaleBackend::ZhCn => {
                let $locale = ZH_CN;
                $body
            }
            LocaleBackend::ZhTw => {
                let $locale = ZH_TW;
                $body
            }
            LocaleBackend::JaJp => {
                let $locale = JA_JP;
                $body
            }
            LocaleBackend::ArSa => {
                let $locale = AR_SA;
                $body
            }
        }
    };
}

/// Produce one synthetic value for a field.
///
/// A native input type from the fixed set decides the generator on its own;
/// the classified category is only consulted for other controls. Never
/// fails: any internal error degrades to a random placeholder.
pub fn generate<R: Rng + ?Sized>(
    field: &DetectedField,
    category: &Category,
    provider: &LocaleProvider,
    options: GenerateOptions,
    rng: &mut R,
) -> String {
    let result = match field.kind.native_type() {
        Some(native) => with_locale!(provider.backend, |locale| native_value(
            locale, native, field, options, rng
        )),
        None => with_locale!(provider.backend, |locale| category_value(
            locale, category, field, rng
        ))
        .map(|value| apply_text_constraints(value, field, options, rng)),
    };

    match result {
        Ok(value) => {
            debug!(
                field = field.label(),
                kind = %field.kind,
                category = %category,
                "generated value"
            );
            value
        }
        Err(e) => {
            warn!(field = field.label(), error = %e, "value generation failed, using placeholder");
            placeholder(rng)
        }
    }
}

/// Generic fallback value: `"Test Data "` plus a short random base36 token.
pub fn placeholder<R: Rng + ?Sized>(rng: &mut R) -> String {
    const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let token: String = (0..6)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{PLACEHOLDER_PREFIX}{token}")
}

// ============================================================================
// Native input types
// ============================================================================

fn native_value<L: Data + Copy, R: Rng + ?Sized>(
    locale: L,
    native: NativeType,
    field: &DetectedField,
    options: GenerateOptions,
    rng: &mut R,
) -> Result<String, GenerateError> {
    match native {
        NativeType::Email => Ok(safe_email(locale, rng)),
        NativeType::Tel => Ok(PhoneNumber(locale).fake_with_rng(rng)),
        NativeType::Url => Ok(url(locale, rng)),
        NativeType::Number | NativeType::Range => bounded_integer(field, options, rng),
        NativeType::Date => birth_date(rng),
        NativeType::DateTime => {
            recent_datetime(rng).map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        }
        NativeType::Time => recent_datetime(rng).map(|dt| dt.format("%H:%M").to_string()),
        NativeType::Month => recent_datetime(rng).map(|dt| dt.format("%Y-%m").to_string()),
        NativeType::Week => recent_datetime(rng).map(|dt| {
            let week = dt.date().iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }),
        NativeType::Color => Ok(format!("#{:06x}", rng.gen_range(0..=0xff_ffffu32))),
    }
}

// ============================================================================
// Classified categories
// ============================================================================

fn category_value<L: Data + Copy, R: Rng + ?Sized>(
    locale: L,
    category: &Category,
    field: &DetectedField,
    rng: &mut R,
) -> Result<String, GenerateError> {
    let value = match category {
        Category::Email => safe_email(locale, rng),
        Category::FirstName => FirstName(locale).fake_with_rng(rng),
        Category::LastName => LastName(locale).fake_with_rng(rng),
        Category::FullName => Name(locale).fake_with_rng(rng),
        Category::Phone => PhoneNumber(locale).fake_with_rng(rng),
        Category::Address => {
            let number: String = BuildingNumber(locale).fake_with_rng(rng);
            let street: String = StreetName(locale).fake_with_rng(rng);
            format!("{number} {street}")
        }
        Category::City => CityName(locale).fake_with_rng(rng),
        Category::State => StateAbbr(locale).fake_with_rng(rng),
        Category::Zip => ZipCode(locale).fake_with_rng(rng),
        Category::Country => CountryName(locale).fake_with_rng(rng),
        Category::Company => CompanyName(locale).fake_with_rng(rng),
        Category::Username => username(locale, rng),
        Category::Password => password(rng),
        Category::Url => url(locale, rng),
        Category::Age => rng.gen_range(18..=80).to_string(),
        Category::Date => birth_date(rng)?,
        // An unrecognised name still leaves the raw type as the category.
        Category::Control(kind) if kind == "password" => password(rng),
        Category::Control(kind) if kind == "textarea" => {
            let paragraphs: Vec<String> = Paragraphs(locale, 2..3).fake_with_rng(rng);
            paragraphs.join("\n")
        }
        Category::Control(_) => fallback_text(locale, field, rng),
    };
    Ok(value)
}

/// A word for short fields, otherwise a first and last name.
fn fallback_text<L: Data + Copy, R: Rng + ?Sized>(
    locale: L,
    field: &DetectedField,
    rng: &mut R,
) -> String {
    match field.max_length {
        Some(max) if max > 0 && max < SHORT_TEXT_LIMIT => Word(locale).fake_with_rng(rng),
        _ => {
            let first: String = FirstName(locale).fake_with_rng(rng);
            let last: String = LastName(locale).fake_with_rng(rng);
            format!("{first} {last}")
        }
    }
}

// ============================================================================
// Shared value builders
// ============================================================================

fn safe_email<L: Data + Copy, R: Rng + ?Sized>(locale: L, rng: &mut R) -> String {
    let local_part = username(locale, rng);
    let domain = RESERVED_EMAIL_DOMAINS
        .choose(rng)
        .copied()
        .unwrap_or(RESERVED_EMAIL_DOMAINS[0]);
    format!("{local_part}@{domain}")
}

// Lowercased and limited to characters valid in an email local part.
fn username<L: Data + Copy, R: Rng + ?Sized>(locale: L, rng: &mut R) -> String {
    let raw: String = Username(locale).fake_with_rng(rng);
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if cleaned.is_empty() {
        let first: String = Word(EN).fake_with_rng(rng);
        format!("{}{}", first.to_lowercase(), rng.gen_range(10..1000))
    } else {
        cleaned
    }
}

fn password<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PASSWORD_LENGTH)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect()
}

fn url<L: Data + Copy, R: Rng + ?Sized>(locale: L, rng: &mut R) -> String {
    let word: String = Word(EN).fake_with_rng(rng);
    let suffix: String = DomainSuffix(locale).fake_with_rng(rng);
    format!("https://{}.{}", word.to_lowercase(), suffix)
}

fn birth_date<R: Rng + ?Sized>(rng: &mut R) -> Result<String, GenerateError> {
    let from = NaiveDate::from_ymd_opt(1950, 1, 1).ok_or(GenerateError::Calendar("date range"))?;
    let to = NaiveDate::from_ymd_opt(2010, 1, 1).ok_or(GenerateError::Calendar("date range"))?;
    let span = (to - from).num_days() as u64;
    let date = from
        .checked_add_days(Days::new(rng.gen_range(0..span)))
        .ok_or(GenerateError::Calendar("date"))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

// A moment within the last day.
fn recent_datetime<R: Rng + ?Sized>(rng: &mut R) -> Result<chrono::NaiveDateTime, GenerateError> {
    Local::now()
        .naive_local()
        .checked_sub_signed(TimeDelta::seconds(rng.gen_range(0..86_400)))
        .ok_or(GenerateError::Calendar("recent date"))
}

// ============================================================================
// Constraints
// ============================================================================

/// Integer in the field's `[min, max]`, defaulting to `[0, 100]`.
fn bounded_integer<R: Rng + ?Sized>(
    field: &DetectedField,
    options: GenerateOptions,
    rng: &mut R,
) -> Result<String, GenerateError> {
    let min = parse_bound("min", field.min.as_deref(), DEFAULT_MIN, f64::ceil)?;
    let max = parse_bound("max", field.max.as_deref(), DEFAULT_MAX, f64::floor)?;
    if min > max {
        return Err(GenerateError::EmptyRange { min, max });
    }

    let step = if options.respect_validation {
        integer_step(field.step.as_deref())
    } else {
        None
    };

    let value = match step {
        Some(step) => {
            let steps = (max - min) / step;
            min + rng.gen_range(0..=steps) * step
        }
        None => rng.gen_range(min..=max),
    };
    Ok(value.to_string())
}

fn parse_bound(
    attribute: &'static str,
    raw: Option<&str>,
    default: i64,
    round: fn(f64) -> f64,
) -> Result<i64, GenerateError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(default);
    };
    let malformed = || GenerateError::MalformedBound {
        attribute,
        value: raw.to_string(),
    };
    let parsed: f64 = raw.parse().map_err(|_| malformed())?;
    let rounded = round(parsed);
    if !rounded.is_finite() || rounded.abs() > i64::MAX as f64 / 2.0 {
        return Err(malformed());
    }
    Ok(rounded as i64)
}

// Only whole, positive steps constrain integer output; "any" and fractional
// steps leave it unconstrained.
fn integer_step(raw: Option<&str>) -> Option<i64> {
    let step: f64 = raw?.trim().parse().ok()?;
    (step >= 1.0 && step.fract() == 0.0 && step.is_finite()).then_some(step as i64)
}

fn apply_text_constraints<R: Rng + ?Sized>(
    value: String,
    field: &DetectedField,
    options: GenerateOptions,
    rng: &mut R,
) -> String {
    if !options.respect_validation {
        return value;
    }

    let mut value = value;
    if let Some(min) = field.min_length {
        let missing = (min as usize).saturating_sub(value.chars().count());
        value.extend((0..missing).map(|_| rng.gen_range(b'a'..=b'z') as char));
    }
    if let Some(max) = field.max_length {
        if value.chars().count() > max as usize {
            value = value.chars().take(max as usize).collect();
        }
    }

    if let Some(pattern) = &field.pattern {
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(re) if !re.is_match(&value) => {
                debug!(field = field.label(), pattern = pattern.as_str(), "value does not match declared pattern");
            }
            Ok(_) => {}
            Err(e) => debug!(field = field.label(), error = %e, "declared pattern is not a valid regex"),
        }
    }

    value
}
