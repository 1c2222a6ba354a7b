use std::sync::LazyLock;

use regex::Regex;

use crate::fill::field_model::{Category, DetectedField};

/// Ordered classification rules. The first matching pattern wins, so the
/// specific patterns sit above the generic `name` rule at the bottom.
///
/// Short tokens are guarded by `[^a-z]` rather than `\b` so that snake_case
/// names like `contact_name` or `user_age` still match.
static FIELD_PATTERNS: &[(Category, &str)] = &[
    (Category::FirstName, r"first.?name|(?:^|[^a-z])fname(?:[^a-z]|$)|given.?name|forename"),
    (Category::LastName, r"last.?name|(?:^|[^a-z])lname(?:[^a-z]|$)|surname|family.?name"),
    (Category::Email, r"e.?mail"),
    (Category::Username, r"user.?name|user.?id|(?:^|[^a-z])login(?:[^a-z]|$)|nick.?name|screen.?name"),
    (Category::Password, r"pass.?word|passwd|(?:^|[^a-z])(?:pass|pwd)(?:[^a-z]|$)"),
    (Category::Company, r"company|organi[sz]ation|employer|business"),
    (Category::Phone, r"phone|mobile|(?:^|[^a-z])(?:tel|cell)(?:[^a-z]|$)"),
    (Category::Zip, r"(?:^|[^a-z])zip|postal|post.?code"),
    (Category::Address, r"address|street|(?:^|[^a-z])addr|(?:^|[^a-z])line[12](?:[^a-z]|$)"),
    (Category::City, r"(?:^|[^a-z])(?:city|town)(?:[^a-z]|$)|locality|suburb"),
    (Category::State, r"(?:^|[^a-z])state(?:[^a-z]|$)|province|region|county"),
    // Also matches `nationality`.
    (Category::Country, r"country|nation"),
    (Category::Url, r"(?:^|[^a-z])(?:url|web|site)(?:[^a-z]|$)|website|homepage"),
    (Category::Age, r"(?:^|[^a-z])age(?:[^a-z]|$)"),
    (Category::Date, r"(?:^|[^a-z])date(?:[^a-z]|$)|(?:^|[^a-z])dob(?:[^a-z]|$)|birth"),
    (Category::FullName, r"full.?name|your.?name|display.?name|(?:^|[^a-z])name(?:[^a-z]|$)"),
];

static RULES: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    FIELD_PATTERNS
        .iter()
        .filter_map(|(category, pattern)| {
            Regex::new(pattern)
                .ok()
                .map(|regex| (category.clone(), regex))
        })
        .collect()
});

/// Classify a field from its name, id, and placeholder.
///
/// Falls back to the control's raw kind when no rule matches, so a plain
/// `<input type="text">` becomes `Control("text")`.
pub fn classify(field: &DetectedField) -> Category {
    let text = field.search_text();
    RULES
        .iter()
        .find(|(_, regex)| regex.is_match(&text))
        .map(|(category, _)| category.clone())
        .unwrap_or_else(|| Category::Control(field.kind.as_str().to_string()))
}
