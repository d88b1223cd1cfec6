use machex_domain::locale::Locale;
use machex_domain::roles::RoleSet;

#[test]
fn locale_accepts_two_lowercase_letters() {
    let locale: Locale = "uk".parse().expect("valid code");
    assert_eq!(locale.as_str(), "uk");
    assert_eq!(locale.to_string(), "uk");
}

#[test]
fn locale_rejects_malformed_codes() {
    for raw in ["", "e", "eng", "EN", "e1", "é!"] {
        assert!(raw.parse::<Locale>().is_err(), "{raw:?} should be rejected");
    }
}

#[test]
fn locale_roundtrips_through_serde() {
    let locale: Locale = serde_json::from_str("\"de\"").expect("deserialize");
    assert_eq!(locale, "de".parse().expect("parse"));
    assert_eq!(serde_json::to_string(&locale).expect("serialize"), "\"de\"");
}

#[test]
fn role_names_collect_into_sets() {
    let roles = RoleSet::from_names(["editor", "viewer"]);
    assert!(roles.contains(RoleSet::EDITOR));
    assert!(roles.contains(RoleSet::VIEWER));
    assert!(!roles.contains(RoleSet::ADMIN));
    assert!(roles.can_edit());

    assert!(!RoleSet::VIEWER.can_edit());
    assert_eq!(RoleSet::from_names(["unknown"]), RoleSet::empty());
}
