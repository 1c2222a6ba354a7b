use form_autofill::fill::classifier::classify;
use form_autofill::fill::field_model::{Category, ControlKind, DetectedField};

fn text_field(name: &str) -> DetectedField {
    DetectedField::input("text", name)
}

fn field_with(name: &str, id: &str, placeholder: &str) -> DetectedField {
    let mut field = text_field(name);
    field.id = id.to_string();
    field.placeholder = placeholder.to_string();
    field
}

// ============================================================================
// Rule matches
// ============================================================================

#[test]
fn classifies_common_field_names() {
    let cases = [
        ("first_name", Category::FirstName),
        ("fname", Category::FirstName),
        ("lastName", Category::LastName),
        ("surname", Category::LastName),
        ("email", Category::Email),
        ("e-mail", Category::Email),
        ("phone_number", Category::Phone),
        ("mobile", Category::Phone),
        ("street_address", Category::Address),
        ("city", Category::City),
        ("state", Category::State),
        ("province", Category::State),
        ("zip", Category::Zip),
        ("postal_code", Category::Zip),
        ("country", Category::Country),
        ("company", Category::Company),
        ("organization", Category::Company),
        ("password", Category::Password),
        ("pwd", Category::Password),
        ("website", Category::Url),
        ("age", Category::Age),
        ("user_age", Category::Age),
        ("birth_date", Category::Date),
        ("dob", Category::Date),
        ("date_of_birth", Category::Date),
        ("full_name", Category::FullName),
        ("name", Category::FullName),
        ("contact_name", Category::FullName),
    ];

    for (name, expected) in cases {
        assert_eq!(classify(&text_field(name)), expected, "name {:?}", name);
    }
}

#[test]
fn specific_rules_win_over_generic_name() {
    assert_eq!(classify(&text_field("username")), Category::Username);
    assert_eq!(classify(&text_field("user_name")), Category::Username);
    assert_eq!(classify(&text_field("company_name")), Category::Company);
    assert_eq!(classify(&text_field("first_name")), Category::FirstName);
    assert_eq!(classify(&text_field("email_address")), Category::Email);
}

#[test]
fn matches_on_id_and_placeholder() {
    assert_eq!(classify(&field_with("", "billing-city", "")), Category::City);
    assert_eq!(
        classify(&field_with("field_7", "", "Enter your email")),
        Category::Email
    );
    assert_eq!(classify(&field_with("f1", "f1", "ZIP")), Category::Zip);
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(classify(&text_field("FirstName")), Category::FirstName);
    assert_eq!(classify(&field_with("", "", "PHONE")), Category::Phone);
}

#[test]
fn short_tokens_do_not_match_inside_words() {
    // "page" contains "age" and "passport" contains "pass", but not as tokens
    assert_eq!(
        classify(&text_field("page")),
        Category::Control("text".into())
    );
    assert_eq!(
        classify(&text_field("passport")),
        Category::Control("text".into())
    );
}

// ============================================================================
// Fallback to the raw control kind
// ============================================================================

#[test]
fn unrecognized_fields_fall_back_to_control_kind() {
    assert_eq!(classify(&text_field("")), Category::Control("text".into()));
    assert_eq!(
        classify(&DetectedField::input("search", "q")),
        Category::Control("search".into())
    );
    assert_eq!(
        classify(&DetectedField::new(ControlKind::Textarea, "comments")),
        Category::Control("textarea".into())
    );
    assert_eq!(
        classify(&DetectedField::new(ControlKind::Select, "")),
        Category::Control("select".into())
    );
}

#[test]
fn category_displays_as_wire_string() {
    assert_eq!(Category::FirstName.to_string(), "firstName");
    assert_eq!(Category::Zip.to_string(), "zip");
    assert_eq!(Category::Control("textarea".into()).to_string(), "textarea");
}

#[test]
fn classification_is_pure() {
    let field = field_with("shipping", "ship-zip", "Postcode");
    let first = classify(&field);
    for _ in 0..10 {
        assert_eq!(classify(&field), first);
    }
}

#[test]
fn date_needs_a_standalone_token() {
    assert_eq!(classify(&text_field("candidate_name")), Category::FullName);
    assert_eq!(
        classify(&text_field("validate_code")),
        Category::Control("text".into())
    );
    assert_eq!(
        classify(&text_field("updated_at")),
        Category::Control("text".into())
    );
    assert_eq!(classify(&text_field("start-date")), Category::Date);
}
