use super::*;

#[test]
fn ui_state_default_theme_is_light() {
    let state = UiState::default();
    assert_eq!(state.theme, Theme::Light);
}

#[test]
fn ui_state_default_mobile_menu_closed() {
    assert!(!UiState::default().mobile_menu_open);
}

#[test]
fn with_theme_keeps_menu_closed() {
    let state = UiState::with_theme(Theme::Dark);
    assert_eq!(state.theme, Theme::Dark);
    assert!(!state.mobile_menu_open);
}
