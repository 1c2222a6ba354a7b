use form_autofill::settings::policy::{AnimationSpeed, FillPolicy, Profile};
use form_autofill::settings::store::{
    JsonFileStore, KeyValueStore, MemoryStore, OPTIONS_KEY, PROFILES_KEY, Settings,
};
use serde_json::json;

// ============================================================================
// FillPolicy serialization
// ============================================================================

#[test]
fn policy_defaults() {
    let policy = FillPolicy::default();
    assert!(policy.include_optional_fields);
    assert!(policy.respect_validation);
    assert_eq!(policy.locale, "en_US");
    assert_eq!(policy.animation_speed, AnimationSpeed::Fast);

    assert!(!FillPolicy::required_only().include_optional_fields);
}

#[test]
fn policy_uses_camel_case_keys() {
    let policy = FillPolicy {
        include_optional_fields: false,
        respect_validation: true,
        locale: "fr".into(),
        animation_speed: AnimationSpeed::Slow,
    };
    let value = serde_json::to_value(&policy).unwrap();
    assert_eq!(
        value,
        json!({
            "fillOptionalFields": false,
            "respectValidation": true,
            "locale": "fr",
            "animationSpeed": "slow"
        })
    );
}

#[test]
fn partial_policy_json_takes_defaults() {
    let policy: FillPolicy = serde_json::from_value(json!({ "locale": "ja" })).unwrap();
    assert_eq!(policy, FillPolicy::default().with_locale("ja"));
}

#[test]
fn highlight_durations() {
    assert_eq!(AnimationSpeed::Instant.highlight_duration(), None);
    assert_eq!(AnimationSpeed::Fast.highlight_duration().unwrap().as_millis(), 1000);
    assert_eq!(AnimationSpeed::Slow.highlight_duration().unwrap().as_millis(), 2500);
}

// ============================================================================
// Settings over MemoryStore
// ============================================================================

#[test]
fn empty_store_reads_defaults() {
    let settings = Settings::new(MemoryStore::new());
    assert_eq!(settings.policy(), FillPolicy::default());
    assert!(settings.profiles().is_empty());
}

#[test]
fn policy_round_trips_through_store() {
    let mut settings = Settings::new(MemoryStore::new());
    let policy = FillPolicy::required_only().with_locale("pt_BR");
    settings.set_policy(&policy).unwrap();
    assert_eq!(settings.policy(), policy);

    let store = settings.into_inner();
    assert_eq!(store.get(OPTIONS_KEY).unwrap()["fillOptionalFields"], false);
}

#[test]
fn update_policy_persists_the_change() {
    let mut settings = Settings::new(MemoryStore::new());
    let updated = settings
        .update_policy(|p| p.animation_speed = AnimationSpeed::Instant)
        .unwrap();
    assert_eq!(updated.animation_speed, AnimationSpeed::Instant);
    assert_eq!(settings.policy(), updated);
}

#[test]
fn malformed_values_fall_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.set(OPTIONS_KEY, json!("not an object")).unwrap();
    store.set(PROFILES_KEY, json!({ "id": 3 })).unwrap();

    let settings = Settings::new(store);
    assert_eq!(settings.policy(), FillPolicy::default());
    assert!(settings.profiles().is_empty());
}

#[test]
fn profiles_upsert_and_remove() {
    let mut settings = Settings::new(MemoryStore::new());
    settings
        .upsert_profile(Profile::new("p1", "Work").with_entry("email", "me@example.com"))
        .unwrap();
    settings.upsert_profile(Profile::new("p2", "Home")).unwrap();
    settings
        .upsert_profile(Profile::new("p1", "Office").with_entry("company", "Acme"))
        .unwrap();

    let profiles = settings.profiles();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].name, "Office");
    assert_eq!(profiles[0].data.get("company").map(String::as_str), Some("Acme"));
    assert!(!profiles[0].data.contains_key("email"));

    assert!(settings.remove_profile("p2").unwrap());
    assert!(!settings.remove_profile("p2").unwrap());
    assert_eq!(settings.profiles().len(), 1);
}

// ============================================================================
// JsonFileStore
// ============================================================================

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = Settings::new(JsonFileStore::new(&path));
    settings.set_policy(&FillPolicy::default().with_locale("de")).unwrap();
    settings.upsert_profile(Profile::new("a", "A")).unwrap();

    let reopened = Settings::new(JsonFileStore::new(&path));
    assert_eq!(reopened.policy().locale, "de");
    assert_eq!(reopened.profiles(), vec![Profile::new("a", "A")]);

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.get("options").is_some());
    assert!(raw.get("profiles").is_some());
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new(JsonFileStore::new(dir.path().join("absent.json")));
    assert_eq!(settings.policy(), FillPolicy::default());
}

#[test]
fn malformed_file_reads_as_empty_and_is_replaced_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut settings = Settings::new(JsonFileStore::new(&path));
    assert_eq!(settings.policy(), FillPolicy::default());

    settings.set_policy(&FillPolicy::required_only()).unwrap();
    assert_eq!(settings.policy(), FillPolicy::required_only());
}

#[test]
fn write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::new(JsonFileStore::new(dir.path().join("nope").join("s.json")));
    assert!(settings.set_policy(&FillPolicy::default()).is_err());
}
