use std::path::PathBuf;

use form_autofill::page::memory_page::MemoryPage;
use form_autofill::page::page_model::{DomEvent, PageElement};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_page(name: &str) -> MemoryPage {
    MemoryPage::load(fixture_path(name)).expect("fixture page should load")
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The example form: email input, country select, subscribe checkbox.
pub fn contact_page() -> MemoryPage {
    MemoryPage::new(vec![
        PageElement::input("email", "email"),
        PageElement::select("country", &[("", "Select..."), ("US", "United States"), ("CA", "Canada")]),
        PageElement::input("checkbox", "subscribe"),
    ])
}

pub fn radio(name: &str, value: &str) -> PageElement {
    PageElement::input("radio", name).with_value(value)
}

pub const FILL_EVENTS: [DomEvent; 3] = [DomEvent::Input, DomEvent::Change, DomEvent::Blur];

pub fn is_reserved_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && ["example.com", "example.net", "example.org"].contains(&domain)
        }
        None => false,
    }
}
