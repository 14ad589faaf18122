use super::*;

#[test]
fn parse_accepts_known_names_only() {
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse(" light "), Some(Theme::Light));
    assert_eq!(Theme::parse("auto"), None);
}

#[test]
fn toggled_flips_between_light_and_dark() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
}

#[test]
fn stored_choice_beats_os_preference() {
    assert_eq!(resolve(Some("light"), true), Theme::Light);
    assert_eq!(resolve(Some("dark"), false), Theme::Dark);
}

#[test]
fn os_preference_is_fallback_for_missing_or_invalid_choice() {
    assert_eq!(resolve(None, true), Theme::Dark);
    assert_eq!(resolve(None, false), Theme::Light);
    assert_eq!(resolve(Some("sepia"), true), Theme::Dark);
}

#[cfg(not(feature = "csr"))]
#[test]
fn read_preference_is_light_outside_browser() {
    assert_eq!(read_preference(), Theme::Light);
}

#[test]
fn toggle_returns_next_theme() {
    assert_eq!(toggle(Theme::Light), Theme::Dark);
    assert_eq!(toggle(Theme::Dark), Theme::Light);
}
