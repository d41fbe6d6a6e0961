//! Light/dark theme preference.

use crate::store::{KeyValueStore, StoreError, THEME_KEY};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Only the exact stored value `"dark"` selects dark mode.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        Self::from_stored(store.get(THEME_KEY).as_deref())
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn save(self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.set(THEME_KEY, self.as_str())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Toggle button icon: shows the mode you would switch to.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }

    /// Body class applied by the presentation layer.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark-mode"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn absent_or_unknown_values_are_light() {
        assert_eq!(Theme::from_stored(None), Theme::Light);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("DARK")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("")), Theme::Light);
    }

    #[test]
    fn dark_value_is_dark() {
        let store = MemoryStore::new().with_entry(THEME_KEY, "dark");
        assert_eq!(Theme::load(&store), Theme::Dark);
    }

    #[test]
    fn toggle_and_save_round_trips() {
        let mut store = MemoryStore::new();
        let theme = Theme::load(&store).toggled();
        theme.save(&mut store).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(Theme::load(&store), Theme::Dark);

        theme.toggled().save(&mut store).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn icon_and_class_follow_mode() {
        assert_eq!(Theme::Light.icon(), "🌙");
        assert_eq!(Theme::Dark.icon(), "☀️");
        assert_eq!(Theme::Light.body_class(), None);
        assert_eq!(Theme::Dark.body_class(), Some("dark-mode"));
    }
}
