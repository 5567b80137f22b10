//! Entry visibility rules shared by every scan.

use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Listed only when hidden entries are shown.
    Disabled,
    /// Never listed.
    Hidden,
}

impl Visibility {
    pub fn of(name: &str) -> Self {
        if name.starts_with('.') || name == LayoutConfig::MAP_FILE_NAME {
            Visibility::Hidden
        } else if name.ends_with(LayoutConfig::DISABLED_SUFFIX) {
            Visibility::Disabled
        } else {
            Visibility::Visible
        }
    }

    pub fn is_listed(&self, show_hidden: bool) -> bool {
        match self {
            Visibility::Visible => true,
            Visibility::Disabled => show_hidden,
            Visibility::Hidden => false,
        }
    }
}

/// Drop a trailing `.disabled`.
pub fn strip_disabled(name: &str) -> &str {
    name.strip_suffix(LayoutConfig::DISABLED_SUFFIX).unwrap_or(name)
}

/// Drop a short file extension (1-4 characters after the dot).
///
/// `"Battletoads (World).md"` -> `"Battletoads (World)"`, while
/// `"Super Mario Bros. 3"` keeps its dot.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => {
            let ext = &name[idx + 1..];
            let len = ext.chars().count();
            if (1..=4).contains(&len) && !ext.contains(' ') {
                &name[..idx]
            } else {
                name
            }
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility() {
        assert_eq!(Visibility::of(".media"), Visibility::Hidden);
        assert_eq!(Visibility::of("map.txt"), Visibility::Hidden);
        assert_eq!(Visibility::of("Sonic.md.disabled"), Visibility::Disabled);
        assert_eq!(Visibility::of("Sonic.md"), Visibility::Visible);
        assert!(Visibility::Disabled.is_listed(true));
        assert!(!Visibility::Disabled.is_listed(false));
        assert!(!Visibility::Hidden.is_listed(true));
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("Battletoads (World).md"), "Battletoads (World)");
        assert_eq!(strip_extension("Game.zip"), "Game");
        assert_eq!(strip_extension("Super Mario Bros. 3"), "Super Mario Bros. 3");
        assert_eq!(strip_extension("Archive.longext"), "Archive.longext");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("NoExt"), "NoExt");
    }

    #[test]
    fn test_strip_disabled() {
        assert_eq!(strip_disabled("Sonic.md.disabled"), "Sonic.md");
        assert_eq!(strip_disabled("Sonic.md"), "Sonic.md");
    }
}
