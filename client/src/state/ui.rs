//! Local UI chrome state for the navigation bar.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the session so the navigation
//! bar can evolve without touching authentication state.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state shared by the navigation bar and the layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub user_menu_open: bool,
}

impl UiState {
    pub fn toggle_user_menu(&mut self) {
        self.user_menu_open = !self.user_menu_open;
    }

    pub fn close_user_menu(&mut self) {
        self.user_menu_open = false;
    }
}

/// Keys that dismiss an open menu.
pub fn closes_menu(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}
