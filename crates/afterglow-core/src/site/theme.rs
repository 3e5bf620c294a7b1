/// `localStorage` key holding the saved preference.
pub const STORAGE_KEY: &str = "theme";
/// Class toggled on the root element while dark mode is active.
pub const DARK_CLASS: &str = "dark";
pub const TOGGLE_SELECTOR: &str = ".theme-toggle";
pub const ICON_SELECTOR: &str = ".material-symbols-outlined";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// A saved preference wins. Without one, or with an empty one, the system
    /// scheme decides.
    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        match stored {
            Some("dark") => Theme::Dark,
            Some("") | None if system_prefers_dark => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Material symbol shown on the toggle: the theme it switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "dark_mode",
            Theme::Dark => "light_mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_preference_overrides_system() {
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
    }

    #[test]
    fn unknown_saved_value_means_light() {
        assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Light);
    }

    #[test]
    fn falls_back_to_system_scheme() {
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn empty_saved_value_follows_system_scheme() {
        assert_eq!(Theme::resolve(Some(""), true), Theme::Dark);
        assert_eq!(Theme::resolve(Some(""), false), Theme::Light);
    }

    #[test]
    fn toggle_round_trips_and_icons_follow() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle_icon(), "light_mode");
        assert_eq!(Theme::Light.toggle_icon(), "dark_mode");
        assert_eq!(Theme::resolve(Some(Theme::Dark.as_str()), false), Theme::Dark);
    }
}
