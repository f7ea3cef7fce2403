//! Application-level configuration
//!
//! The theme used to live as ambient global state on the document root;
//! here it is explicit configuration owned by the application session and
//! passed down to whatever needs it.

use serde::{Deserialize, Serialize};

/// Presentation theme flag, consumed read-only by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Session-scoped application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub theme: Theme,
    /// Show advisory hint text for invalid actions
    pub show_hints: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            show_hints: true,
        }
    }
}

impl AppConfig {
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_round_trip() {
        assert_eq!(Theme::from_str("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_str("Light"), Some(Theme::Light));
        assert_eq!(Theme::from_str("sepia"), None);
        assert_eq!(Theme::Dark.as_str(), "dark");
    }

    #[test]
    fn test_toggle() {
        let mut config = AppConfig::default();
        assert!(!config.theme.is_dark());
        config.toggle_theme();
        assert!(config.theme.is_dark());
    }
}
