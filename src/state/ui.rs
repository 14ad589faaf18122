#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::util::theme::Theme;

/// UI chrome state: color theme and the collapsible mobile menu.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub theme: Theme,
    pub mobile_menu_open: bool,
}

impl UiState {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme, ..Self::default() }
    }
}
