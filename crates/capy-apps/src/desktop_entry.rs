//! Desktop entry parsing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Group holding application keys in a .desktop file.
pub const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// Key/value pairs of one group of a .desktop file.
#[derive(Clone, Debug, Default)]
pub struct DesktopProperties {
    entries: HashMap<String, String>,
}

impl DesktopProperties {
    /// Read the given group from a .desktop file.
    pub fn load(path: &Path, group: &str) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content, group))
    }

    /// Parse the given group out of .desktop file content.
    /// Keys outside the group are ignored; later duplicates win.
    pub fn parse(content: &str, group: &str) -> Self {
        let mut entries = HashMap::new();
        let mut in_group = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                in_group = &line[1..line.len() - 1] == group;
                continue;
            }

            if in_group {
                if let Some((key, value)) = line.split_once('=') {
                    entries.insert(key.trim().to_string(), value.trim().to_string());
                }
            }
        }

        Self { entries }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Boolean value of a key. Absent, empty, "0" and "false" are false.
    pub fn value_bool(&self, key: &str) -> bool {
        match self.value(key) {
            Some(value) => !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false")),
            None => false,
        }
    }

    /// Localized value: `key[lang_COUNTRY]`, then `key[lang]`, then `key`.
    pub fn localized(&self, key: &str, locale: Option<&str>) -> Option<&str> {
        if let Some(locale) = locale {
            if let Some(value) = self.non_empty(&format!("{}[{}]", key, locale)) {
                return Some(value);
            }

            if let Some((lang, _)) = locale.split_once('_') {
                if let Some(value) = self.non_empty(&format!("{}[{}]", key, lang)) {
                    return Some(value);
                }
            }
        }

        self.value(key)
    }

    /// Values of a `;` separated list key, empty parts dropped.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.value(key)
            .map(|s| {
                s.split(';')
                    .filter(|part| !part.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.value(key).filter(|v| !v.is_empty())
    }
}
