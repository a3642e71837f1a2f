//! Launcher entries and the rules deciding which descriptors become one.

use crate::desktop_entry::{DESKTOP_ENTRY_GROUP, DesktopProperties};
use crate::environment::{detect_desktop_environment, detect_locale};
use crate::paths::path_to_id;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Field codes such as `%f` or `%U`.
static FIELD_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("%.").expect("field code pattern is valid"));

/// One application shown by the launcher.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LauncherItem {
    /// Path of the .desktop file. Unique within a list.
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub comment: String,
    pub icon_name: String,
    /// Program followed by its arguments.
    pub args: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub pinned_index: i32,
}

impl LauncherItem {
    /// Text matched by the UI filter box.
    pub fn filter_info(&self) -> String {
        format!("{} {} {}", self.name, self.generic_name, self.comment)
    }

    /// Build an item from a .desktop file, or None if it should not be shown.
    pub fn from_desktop_file(path: &Path, context: &AdmissionContext) -> Option<Self> {
        let props = match DesktopProperties::load(path, DESKTOP_ENTRY_GROUP) {
            Ok(props) => props,
            Err(e) => {
                debug!("Skipping unreadable {}: {}", path.display(), e);
                return None;
            }
        };

        Self::from_properties(path_to_id(path), &props, context)
    }

    /// Apply the admission rules to parsed properties.
    pub fn from_properties(
        id: String,
        props: &DesktopProperties,
        context: &AdmissionContext,
    ) -> Option<Self> {
        if props.value_bool("Terminal") {
            debug!("Skipping terminal app {}", id);
            return None;
        }

        if props.contains("OnlyShowIn") && !context.is_shown_in(&props.list("OnlyShowIn")) {
            debug!("Skipping {}: not shown in {}", id, context.desktop_environment);
            return None;
        }

        if props.value_bool("NoDisplay") || props.value_bool("Hidden") {
            debug!("Skipping hidden app {}", id);
            return None;
        }

        let locale = context.locale.as_deref();
        let text = |key: &str| props.localized(key, locale).unwrap_or_default().to_string();

        Some(Self {
            name: text("Name"),
            generic_name: text("GenericName"),
            comment: text("Comment"),
            icon_name: props.value("Icon").unwrap_or_default().to_string(),
            args: exec_to_args(props.value("Exec").unwrap_or_default()),
            categories: props.list("Categories"),
            pinned: false,
            pinned_index: 0,
            id,
        })
    }
}

/// Session facts the admission rules depend on.
#[derive(Clone, Debug)]
pub struct AdmissionContext {
    /// Uppercased desktop environment tag, e.g. "KDE".
    pub desktop_environment: String,
    /// Message locale, e.g. "de_DE".
    pub locale: Option<String>,
}

impl AdmissionContext {
    pub fn from_env() -> Self {
        Self {
            desktop_environment: detect_desktop_environment(),
            locale: detect_locale(),
        }
    }

    fn is_shown_in(&self, environments: &[String]) -> bool {
        environments
            .iter()
            .any(|env| *env == self.desktop_environment)
    }
}

/// Turn an Exec value into program and arguments.
/// Field codes and quotes are dropped and whitespace collapsed.
pub fn exec_to_args(exec: &str) -> Vec<String> {
    let stripped = FIELD_CODE.replace_all(exec, "").replace('"', "");

    stripped.split_whitespace().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(desktop: &str) -> AdmissionContext {
        AdmissionContext {
            desktop_environment: desktop.to_string(),
            locale: None,
        }
    }

    fn admit(content: &str, desktop: &str) -> Option<LauncherItem> {
        let props = DesktopProperties::parse(content, DESKTOP_ENTRY_GROUP);
        LauncherItem::from_properties("/apps/test.desktop".into(), &props, &context(desktop))
    }

    #[test]
    fn test_exec_to_args_strips_field_codes_and_quotes() {
        assert_eq!(exec_to_args("foo %U \"bar\""), vec!["foo", "bar"]);
        assert_eq!(exec_to_args("  \"/opt/My App/run\"   --flag %f"), vec!["/opt/My", "App/run", "--flag"]);
        assert_eq!(exec_to_args("gimp-2.10 %%"), vec!["gimp-2.10"]);
        assert!(exec_to_args("").is_empty());
    }

    #[test]
    fn test_admits_plain_app() {
        let item = admit(
            "[Desktop Entry]\nName=Files\nGenericName=File Manager\nComment=Browse files\nIcon=folder\nExec=files %U\nCategories=System;Utility;\n",
            "KDE",
        )
        .unwrap();

        assert_eq!(item.id, "/apps/test.desktop");
        assert_eq!(item.name, "Files");
        assert_eq!(item.generic_name, "File Manager");
        assert_eq!(item.comment, "Browse files");
        assert_eq!(item.icon_name, "folder");
        assert_eq!(item.args, vec!["files"]);
        assert_eq!(item.categories, vec!["System", "Utility"]);
        assert_eq!(item.filter_info(), "Files File Manager Browse files");
        assert!(!item.pinned);
    }

    #[test]
    fn test_rejects_terminal_apps() {
        assert!(admit("[Desktop Entry]\nName=htop\nExec=htop\nTerminal=true\n", "KDE").is_none());
        assert!(admit("[Desktop Entry]\nName=htop\nExec=htop\nTerminal=false\n", "KDE").is_some());
    }

    #[test]
    fn test_rejects_hidden_and_no_display() {
        assert!(admit("[Desktop Entry]\nName=A\nExec=a\nHidden=true\n", "KDE").is_none());
        assert!(admit("[Desktop Entry]\nName=A\nExec=a\nNoDisplay=true\n", "KDE").is_none());
        assert!(admit("[Desktop Entry]\nName=A\nExec=a\nNoDisplay=false\n", "KDE").is_some());
    }

    #[test]
    fn test_only_show_in() {
        let content = "[Desktop Entry]\nName=Settings\nExec=settings\nOnlyShowIn=GNOME;CUTEFISH;\n";
        assert!(admit(content, "CUTEFISH").is_some());
        assert!(admit(content, "KDE").is_none());
        assert!(admit(content, "UNKNOWN").is_none());

        // The tag is uppercased, entries are compared as written
        let mixed = "[Desktop Entry]\nName=Settings\nExec=settings\nOnlyShowIn=Cutefish;\n";
        assert!(admit(mixed, "CUTEFISH").is_none());
    }

    #[test]
    fn test_localized_name_falls_back() {
        let props = DesktopProperties::parse(
            "[Desktop Entry]\nName=Calculator\nName[de_DE]=Rechner\nExec=calc\n",
            DESKTOP_ENTRY_GROUP,
        );
        let german = AdmissionContext {
            desktop_environment: "KDE".into(),
            locale: Some("de_DE".into()),
        };
        let french = AdmissionContext {
            desktop_environment: "KDE".into(),
            locale: Some("fr_FR".into()),
        };

        let item = LauncherItem::from_properties("calc".into(), &props, &german).unwrap();
        assert_eq!(item.name, "Rechner");
        let item = LauncherItem::from_properties("calc".into(), &props, &french).unwrap();
        assert_eq!(item.name, "Calculator");
    }
}
