//! Desktop session detection from environment variables.

/// Tag used when no desktop environment is advertised.
pub const UNKNOWN_DESKTOP: &str = "UNKNOWN";

/// Detect the current desktop environment tag.
/// This is the uppercased `XDG_CURRENT_DESKTOP`, or `UNKNOWN` if unset.
pub fn detect_desktop_environment() -> String {
    match std::env::var("XDG_CURRENT_DESKTOP") {
        Ok(desktop) if !desktop.is_empty() => desktop.to_uppercase(),
        _ => UNKNOWN_DESKTOP.to_string(),
    }
}

/// Detect the message locale, e.g. "de_DE" for `LANG=de_DE.UTF-8`.
/// Returns None for the C/POSIX locale.
pub fn detect_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| normalize_locale(&value))
}

/// Strip encoding and modifier from a locale string.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let name = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    match name {
        "" | "C" | "POSIX" => None,
        _ => Some(name.to_string()),
    }
}
