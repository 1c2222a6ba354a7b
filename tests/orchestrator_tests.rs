use form_autofill::fill::field_model::{FieldOutcome, FillWarning};
use form_autofill::fill::orchestrator::{fill_page, fill_page_with};
use form_autofill::page::memory_page::MemoryPage;
use form_autofill::page::page_model::{ControlRef, PageElement};
use form_autofill::settings::policy::{AnimationSpeed, FillPolicy};
use form_autofill::trace::logger::TraceLogger;

use crate::common::fixtures::{
    FILL_EVENTS, contact_page, fixture_page, is_reserved_email, radio, rng,
};

mod common;

fn fill(page: &mut MemoryPage, policy: &FillPolicy, seed: u64) -> form_autofill::fill::field_model::FillSummary {
    fill_page_with(page, policy, &mut rng(seed), &TraceLogger::disabled())
}

fn checked_count(page: &MemoryPage, group: &str) -> usize {
    page.snapshot()
        .elements
        .iter()
        .filter(|el| el.is_radio() && el.name == group && el.checked)
        .count()
}

// ============================================================================
// Contact form scenario
// ============================================================================

#[test]
fn contact_form_is_filled_for_any_seed() {
    for seed in 0..50 {
        let mut page = contact_page();
        let summary = fill(&mut page, &FillPolicy::default(), seed);

        assert_eq!(summary.detected, 3);
        assert_eq!(summary.filled_count(), 3, "seed {}", seed);

        let email = page.by_name("email").unwrap();
        assert!(is_reserved_email(&email.value), "seed {} -> {}", seed, email.value);

        let country = page.by_name("country").unwrap();
        assert!(country.value == "US" || country.value == "CA", "seed {} -> {:?}", seed, country.value);

        let subscribe = summary.value_of("subscribe").unwrap();
        assert!(subscribe == "true" || subscribe == "false");
        assert_eq!(page.by_name("subscribe").unwrap().checked.to_string(), subscribe);

        for el in &page.snapshot().elements {
            assert_eq!(el.events, FILL_EVENTS, "events for {}", el.name);
        }
    }
}

#[test]
fn checkbox_state_is_random() {
    let mut seen = [false, false];
    for seed in 0..64 {
        let mut page = contact_page();
        fill(&mut page, &FillPolicy::default(), seed);
        seen[page.by_name("subscribe").unwrap().checked as usize] = true;
    }
    assert_eq!(seen, [true, true]);
}

#[test]
fn select_never_picks_the_empty_option() {
    let mut values = std::collections::HashSet::new();
    for seed in 0..64 {
        let mut page = contact_page();
        fill(&mut page, &FillPolicy::default(), seed);
        values.insert(page.by_name("country").unwrap().value.clone());
    }
    assert!(!values.contains(""));
    assert!(values.contains("US") && values.contains("CA"));
}

#[test]
fn select_without_choices_is_skipped() {
    let mut page = MemoryPage::new(vec![PageElement::select("empty", &[("", "Nothing here")])]);
    let summary = fill(&mut page, &FillPolicy::default(), 1);

    assert_eq!(summary.skipped_count(), 1);
    let el = page.by_name("empty").unwrap();
    assert!(el.value.is_empty());
    assert!(el.events.is_empty());
}

// ============================================================================
// Radio groups
// ============================================================================

#[test]
fn radio_group_ends_with_exactly_one_checked() {
    for size in 1..=5 {
        for seed in 0..20 {
            let mut elements: Vec<PageElement> = (0..size)
                .map(|i| radio("choice", &format!("opt{}", i)))
                .collect();
            elements[size - 1].checked = true;
            let mut page = MemoryPage::new(elements);

            let summary = fill(&mut page, &FillPolicy::default(), seed);

            assert_eq!(checked_count(&page, "choice"), 1, "size {} seed {}", size, seed);
            assert_eq!(summary.filled_count(), 1);
            assert_eq!(summary.skipped_count(), size - 1);

            let chosen = page.snapshot().elements.iter().find(|el| el.checked).unwrap();
            assert_eq!(summary.value_of("choice"), Some(chosen.value.as_str()));
            assert_eq!(chosen.events, FILL_EVENTS);
        }
    }
}

#[test]
fn radio_group_survives_a_read_only_member() {
    for seed in 0..20 {
        let mut page = MemoryPage::new(vec![radio("g", "a"), radio("g", "b").readonly()]);
        let summary = fill(&mut page, &FillPolicy::default(), seed);

        assert_eq!(checked_count(&page, "g"), 1, "seed {}", seed);
        assert!(page.by_name("g").unwrap().checked);
        assert_eq!(summary.failed_count(), 0, "seed {}", seed);
        assert_eq!(summary.value_of("g"), Some("a"));
    }
}

#[test]
fn radio_group_with_only_read_only_members_fails() {
    let mut page = MemoryPage::new(vec![radio("g", "a").readonly(), radio("g", "b").readonly()]);
    let summary = fill(&mut page, &FillPolicy::default(), 3);

    assert_eq!(summary.failed_count(), 1);
    assert_eq!(checked_count(&page, "g"), 0);
    assert!(page.snapshot().elements.iter().all(|el| el.events.is_empty()));
}

#[test]
fn separate_radio_groups_are_filled_independently() {
    let mut page = MemoryPage::new(vec![
        radio("size", "s"),
        radio("color", "red"),
        radio("size", "m"),
        radio("color", "blue"),
        radio("size", "l"),
    ]);
    fill(&mut page, &FillPolicy::default(), 4);

    assert_eq!(checked_count(&page, "size"), 1);
    assert_eq!(checked_count(&page, "color"), 1);
}

#[test]
fn unnamed_radio_is_its_own_group() {
    let mut page = MemoryPage::new(vec![radio("", "a"), radio("", "b")]);
    let summary = fill(&mut page, &FillPolicy::default(), 2);

    assert_eq!(summary.filled_count(), 2);
    assert!(page.snapshot().elements.iter().all(|el| el.checked));
}

#[test]
fn passes_do_not_share_radio_state() {
    let mut page = MemoryPage::new(vec![radio("plan", "a"), radio("plan", "b")]);
    let first = fill(&mut page, &FillPolicy::default(), 10);
    let second = fill(&mut page, &FillPolicy::default(), 11);

    assert_eq!(first.filled_count(), 1);
    assert_eq!(second.filled_count(), 1);
    assert_eq!(checked_count(&page, "plan"), 1);
}

// ============================================================================
// Policy
// ============================================================================

#[test]
fn required_only_without_required_fields_changes_nothing() {
    let mut page = fixture_page("optional_only.json");
    let before = page.snapshot().elements.clone();

    let summary = fill(&mut page, &FillPolicy::required_only(), 3);

    assert_eq!(summary.warning, Some(FillWarning::NoRequiredFields));
    assert_eq!(summary.detected, 3);
    assert_eq!(summary.considered, 0);
    assert!(summary.reports.is_empty());
    assert_eq!(page.snapshot().elements, before);
    assert_eq!(page.alerts(), [FillWarning::NoRequiredFields.message()]);
}

#[test]
fn required_only_fills_just_required_fields() {
    let mut page = fixture_page("signup.json");
    let summary = fill(&mut page, &FillPolicy::required_only(), 8);

    assert_eq!(summary.detected, 12);
    assert_eq!(summary.considered, 4);
    assert_eq!(summary.filled_count(), 4);
    assert!(summary.warning.is_none());

    for name in ["first_name", "last_name", "email", "password"] {
        assert!(!page.by_name(name).unwrap().value.is_empty(), "{}", name);
    }
    for name in ["phone", "age", "country", "bio"] {
        let el = page.by_name(name).unwrap();
        assert!(el.value.is_empty(), "{} was filled", name);
        assert!(el.events.is_empty());
    }
    assert!(!page.by_name("subscribe").unwrap().checked);
}

#[test]
fn full_signup_fill() {
    let mut page = fixture_page("signup.json");
    let summary = fill(&mut page, &FillPolicy::default(), 21);

    assert_eq!(summary.detected, 12);
    assert_eq!(summary.reports.len(), 12);
    assert_eq!(summary.filled_count(), 10);
    assert_eq!(summary.skipped_count(), 2);
    assert_eq!(summary.failed_count(), 0);

    let age: i64 = page.by_name("age").unwrap().value.parse().unwrap();
    assert!((18..=99).contains(&age));
    assert!(is_reserved_email(&page.by_name("email").unwrap().value));
    assert_eq!(checked_count(&page, "plan"), 1);
    assert!(!page.by_name("bio").unwrap().value.is_empty());

    let first = summary.reports.iter().find(|r| r.label == "first_name").unwrap();
    assert_eq!(first.category.as_deref(), Some("firstName"));
}

#[test]
fn hidden_and_button_controls_are_untouched() {
    let mut page = fixture_page("signup.json");
    fill(&mut page, &FillPolicy::default(), 5);

    let csrf = page.by_name("csrf_token").unwrap();
    assert_eq!(csrf.value, "abc123");
    assert!(csrf.events.is_empty());

    let submit = page.snapshot().elements.last().unwrap();
    assert_eq!(submit.value, "Create account");
    assert!(submit.events.is_empty());
    assert!(page.snapshot().elements[0].events.is_empty());
}

#[test]
fn unknown_locale_still_fills() {
    let mut page = contact_page();
    let summary = fill(&mut page, &FillPolicy::default().with_locale("xx_YY"), 6);
    assert_eq!(summary.locale, "en_US");
    assert_eq!(summary.filled_count(), 3);
}

#[test]
fn highlight_follows_animation_speed() {
    let mut policy = FillPolicy::default();
    let mut page = contact_page();
    fill(&mut page, &policy, 1);
    assert!(page.snapshot().elements.iter().all(|el| el.highlight_ms == Some(1000)));

    policy.animation_speed = AnimationSpeed::Slow;
    let mut page = contact_page();
    fill(&mut page, &policy, 1);
    assert!(page.snapshot().elements.iter().all(|el| el.highlight_ms == Some(2500)));

    policy.animation_speed = AnimationSpeed::Instant;
    let mut page = contact_page();
    fill(&mut page, &policy, 1);
    assert!(page.snapshot().elements.iter().all(|el| el.highlight_ms.is_none()));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn failing_control_does_not_stop_the_pass() {
    let mut page = MemoryPage::new(vec![
        PageElement::input("text", "first_name"),
        PageElement::input("text", "locked").readonly().with_value("fixed"),
        PageElement::input("email", "email"),
    ]);
    let summary = fill(&mut page, &FillPolicy::default(), 9);

    assert_eq!(summary.filled_count(), 2);
    assert_eq!(summary.failed_count(), 1);
    assert!(matches!(summary.reports[1].outcome, FieldOutcome::Failed { .. }));

    let locked = page.by_name("locked").unwrap();
    assert_eq!(locked.value, "fixed");
    assert!(locked.events.is_empty());
    assert!(!page.by_name("email").unwrap().value.is_empty());
}

#[test]
fn fill_page_uses_thread_rng() {
    let mut page = contact_page();
    let summary = fill_page(&mut page, &FillPolicy::default());
    assert_eq!(summary.filled_count(), 3);
    assert!(page.element(ControlRef(0)).is_some_and(|el| !el.value.is_empty()));
}

// ============================================================================
// Trace output
// ============================================================================

#[test]
fn trace_file_gets_one_line_per_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fill.jsonl");
    let tracer = TraceLogger::new(path.to_str().unwrap());
    assert!(tracer.is_enabled());

    let mut page = fixture_page("signup.json");
    let summary = fill_page_with(&mut page, &FillPolicy::default(), &mut rng(2), &tracer);
    drop(tracer);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), summary.reports.len());
    assert_eq!(lines[0]["field"], "first_name");
    assert_eq!(lines[0]["status"], "filled");
    assert_eq!(lines[0]["locale"], "en_US");
    assert!(lines.iter().any(|l| l["status"] == "skipped"));
}
