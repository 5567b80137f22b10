//! Shortcut folder-name codec.
//!
//! A shortcut's identity on disk is its directory name:
//!
//! ```text
//! Bottom:       "\u{2060}Battletoads (World) (MD)"
//! Top:          "0) Battletoads (World) (MD)"
//! Alphabetical: "Battletoads (World) (MD)"
//! ```
//!
//! Everything else in the crate goes through [`ShortcutName`]; nothing outside
//! this module inspects folder-name prefixes.

use crate::config::{CodecConfig, WriterConfig};
use crate::error::{Result, ShortcutError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Leading "{digits}) " that the launcher strips before display.
static SORT_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\) ").unwrap());

/// Where a shortcut sorts in the launcher's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Before every letter.
    Top,
    /// Among the categories, by first letter.
    Alphabetical,
    /// After Z.
    #[default]
    Bottom,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Bottom, Position::Top, Position::Alphabetical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Top => "top",
            Position::Alphabetical => "alphabetical",
            Position::Bottom => "bottom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" => Some(Position::Top),
            "alpha" | "alphabetical" => Some(Position::Alphabetical),
            "bottom" => Some(Position::Bottom),
            _ => None,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which codec generation produced a Bottom prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerGeneration {
    Current,
    /// Invisible marker that showed up as a box on some font/panel pairs.
    Deprecated,
    /// Visible star prefix from the first release.
    LegacyGlyph,
}

struct PrefixMatcher {
    prefix: &'static str,
    generation: MarkerGeneration,
}

/// Bottom prefixes, tried in order. The spaced glyph must precede the bare one.
const BOTTOM_MATCHERS: &[PrefixMatcher] = &[
    PrefixMatcher {
        prefix: CodecConfig::BOTTOM_MARKER,
        generation: MarkerGeneration::Current,
    },
    PrefixMatcher {
        prefix: CodecConfig::DEPRECATED_BOTTOM_MARKER,
        generation: MarkerGeneration::Deprecated,
    },
    PrefixMatcher {
        prefix: CodecConfig::LEGACY_GLYPH,
        generation: MarkerGeneration::LegacyGlyph,
    },
    PrefixMatcher {
        prefix: CodecConfig::LEGACY_GLYPH_BARE,
        generation: MarkerGeneration::LegacyGlyph,
    },
];

/// Strip a recognized Bottom prefix.
pub fn strip_bottom_marker(name: &str) -> (&str, Option<MarkerGeneration>) {
    for matcher in BOTTOM_MATCHERS {
        if let Some(rest) = name.strip_prefix(matcher.prefix) {
            return (rest, Some(matcher.generation));
        }
    }
    (name, None)
}

/// Extract the tag between the last "(" and the last ")".
///
/// `"Game Boy Advance (GBA)"` -> `Some("GBA")`
pub fn extract_tag(name: &str) -> Option<&str> {
    let open = name.rfind('(')?;
    let close = name.rfind(')')?;
    if close <= open {
        return None;
    }
    let tag = name[open + 1..close].trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

/// Text before the last "(", trimmed. Names without a tag come back unchanged.
pub fn extract_display_name(name: &str) -> &str {
    match name.rfind('(') {
        Some(idx) => name[..idx].trim(),
        None => name,
    }
}

/// Case-insensitive sort key used by every listing.
pub fn sort_key(display: &str) -> String {
    display.to_lowercase()
}

/// Typed identity of a shortcut: what the folder name encodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortcutName {
    display: String,
    tag: String,
    position: Position,
}

impl ShortcutName {
    /// Validate and build a name that will round-trip through the codec.
    pub fn new(
        display: impl Into<String>,
        tag: impl Into<String>,
        position: Position,
    ) -> Result<Self> {
        let display = display.into();
        let tag = tag.into();
        validate_display(&display)?;
        validate_tag(&tag)?;
        Ok(Self {
            display,
            tag,
            position,
        })
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Same display and tag at another position.
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Whether this names a utility shortcut.
    pub fn is_utility(&self) -> bool {
        self.tag == WriterConfig::UTILITY_TAG
    }

    /// The on-disk folder name.
    pub fn encode(&self) -> String {
        let base = format!("{} ({})", self.display, self.tag);
        match self.position {
            Position::Top => format!("{}{}", CodecConfig::TOP_PREFIX, base),
            Position::Alphabetical => base,
            Position::Bottom => format!("{}{}", CodecConfig::BOTTOM_MARKER, base),
        }
    }

    /// Decode a folder name. Returns `None` when no tag can be found.
    pub fn decode(folder_name: &str) -> Option<Self> {
        Self::decode_with_generation(folder_name).map(|(name, _)| name)
    }

    /// Decode a folder name and report which marker generation matched.
    pub fn decode_with_generation(folder_name: &str) -> Option<(Self, Option<MarkerGeneration>)> {
        let (rest, generation, position) = match strip_bottom_marker(folder_name) {
            (rest, Some(generation)) => (rest, Some(generation), Position::Bottom),
            (rest, None) => match SORT_PREFIX.find(rest) {
                Some(m) => (&rest[m.end()..], None, Position::Top),
                None => (rest, None, Position::Alphabetical),
            },
        };

        let tag = extract_tag(rest)?;
        let display = extract_display_name(rest);
        if display.is_empty() {
            return None;
        }

        Some((
            Self {
                display: display.to_string(),
                tag: tag.to_string(),
                position,
            },
            generation,
        ))
    }

    /// Encoded folder names for this display/tag at every position.
    pub fn all_positions(&self) -> impl Iterator<Item = ShortcutName> + '_ {
        Position::ALL.into_iter().map(|p| self.with_position(p))
    }
}

impl std::fmt::Display for ShortcutName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) [{}]", self.display, self.tag, self.position)
    }
}

fn validate_display(display: &str) -> Result<()> {
    if display.trim().is_empty() {
        return Err(ShortcutError::validation("display", "must not be empty"));
    }
    if display.trim() != display {
        return Err(ShortcutError::validation(
            "display",
            "must not have leading or trailing whitespace",
        ));
    }
    if display.contains(['/', '\\', '\0', '\n', '\r']) {
        return Err(ShortcutError::validation(
            "display",
            "must not contain path separators or control characters",
        ));
    }
    if strip_bottom_marker(display).1.is_some() || SORT_PREFIX.is_match(display) {
        return Err(ShortcutError::validation(
            "display",
            "must not start with a sort prefix",
        ));
    }
    Ok(())
}

fn validate_tag(tag: &str) -> Result<()> {
    if tag.trim().is_empty() {
        return Err(ShortcutError::validation("tag", "must not be empty"));
    }
    if tag.trim() != tag {
        return Err(ShortcutError::validation(
            "tag",
            "must not have leading or trailing whitespace",
        ));
    }
    if tag.contains(['(', ')', '/', '\\', '\0', '\n', '\r']) {
        return Err(ShortcutError::validation(
            "tag",
            "must not contain parentheses, path separators or control characters",
        ));
    }
    Ok(())
}

/// Whether a folder name carries a Bottom prefix from any generation.
pub fn has_shortcut_prefix(folder_name: &str) -> bool {
    strip_bottom_marker(folder_name).1.is_some()
}

/// Whether a directory is a shortcut: prefixed name, or a marker file inside.
///
/// Top and Alphabetical shortcuts are only recognizable by the marker file.
pub fn is_shortcut_dir(path: &Path) -> bool {
    let prefixed = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(has_shortcut_prefix)
        .unwrap_or(false);
    prefixed || path.join(WriterConfig::MARKER_FILE).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn name(display: &str, tag: &str, position: Position) -> ShortcutName {
        ShortcutName::new(display, tag, position).unwrap()
    }

    #[test]
    fn test_encode_positions() {
        assert_eq!(
            name("Battletoads", "MD", Position::Bottom).encode(),
            "\u{2060}Battletoads (MD)"
        );
        assert_eq!(name("Battletoads", "MD", Position::Top).encode(), "0) Battletoads (MD)");
        assert_eq!(
            name("Battletoads", "MD", Position::Alphabetical).encode(),
            "Battletoads (MD)"
        );
    }

    #[test]
    fn test_round_trip_every_position() {
        let displays = [
            "Battletoads",
            "Battletoads (World)",
            "Pokemon - Emerald Version (USA, Europe)",
            "Final Fantasy VII (Disc 1",
            "SDLReader",
            "a",
        ];
        for display in displays {
            for tag in ["MD", "GBA", "PS", "SHORTCUT"] {
                for position in Position::ALL {
                    let original = name(display, tag, position);
                    let decoded = ShortcutName::decode(&original.encode()).unwrap();
                    assert_eq!(decoded, original, "round trip of {:?}", original.encode());
                }
            }
        }
    }

    #[test]
    fn test_decode_legacy_generations() {
        let cases = [
            ("\u{2060}Battletoads (World) (MD)", Some(MarkerGeneration::Current)),
            ("\u{200B}Battletoads (World) (MD)", Some(MarkerGeneration::Deprecated)),
            ("\u{2605} Battletoads (World) (MD)", Some(MarkerGeneration::LegacyGlyph)),
            ("\u{2605}Battletoads (World) (MD)", Some(MarkerGeneration::LegacyGlyph)),
        ];
        for (folder, generation) in cases {
            let (decoded, found) = ShortcutName::decode_with_generation(folder).unwrap();
            assert_eq!(decoded.display(), "Battletoads (World)");
            assert_eq!(decoded.tag(), "MD");
            assert_eq!(decoded.position(), Position::Bottom);
            assert_eq!(found, generation);
        }
    }

    #[test]
    fn test_decode_any_digit_prefix_as_top() {
        let decoded = ShortcutName::decode("12) Tetris (GB)").unwrap();
        assert_eq!(decoded.display(), "Tetris");
        assert_eq!(decoded.position(), Position::Top);
    }

    #[test]
    fn test_decode_without_tag() {
        assert!(ShortcutName::decode("Tetris").is_none());
        assert!(ShortcutName::decode("\u{2060}Tetris").is_none());
        assert!(ShortcutName::decode("Tetris )GB(").is_none());
        assert!(ShortcutName::decode("Tetris ()").is_none());
        assert!(ShortcutName::decode("(GB)").is_none());
    }

    #[test]
    fn test_extract_tag_and_display() {
        assert_eq!(extract_tag("Game Boy Advance (GBA)"), Some("GBA"));
        assert_eq!(extract_tag("Sega Genesis (MD).disabled"), Some("MD"));
        assert_eq!(extract_tag("Tools"), None);
        assert_eq!(extract_display_name("Game Boy Advance (GBA)"), "Game Boy Advance");
        assert_eq!(extract_display_name("Tools"), "Tools");
    }

    #[test]
    fn test_validation_rejects_ambiguous_names() {
        assert!(ShortcutName::new("", "MD", Position::Bottom).is_err());
        assert!(ShortcutName::new(" Sonic", "MD", Position::Bottom).is_err());
        assert!(ShortcutName::new("Sonic", "", Position::Bottom).is_err());
        assert!(ShortcutName::new("Sonic", "M(D", Position::Bottom).is_err());
        assert!(ShortcutName::new("a/b", "MD", Position::Bottom).is_err());
        assert!(ShortcutName::new("0) Sonic", "MD", Position::Alphabetical).is_err());
        assert!(ShortcutName::new("\u{2605} Sonic", "MD", Position::Alphabetical).is_err());
        assert!(ShortcutName::new("\u{2060}Sonic", "MD", Position::Alphabetical).is_err());
        // A digit that is not a sort prefix is fine
        assert!(ShortcutName::new("1942", "ARCADE", Position::Alphabetical).is_ok());
    }

    #[test]
    fn test_is_shortcut_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let category = root.join("Sega Genesis (MD)");
        std::fs::create_dir_all(&category).unwrap();
        assert!(!is_shortcut_dir(&category));

        let package = root.join("SDLReader (SHORTCUT).pak");
        std::fs::create_dir_all(&package).unwrap();
        assert!(!is_shortcut_dir(&package));

        for position in Position::ALL {
            let dir = root.join(name("Sonic", "MD", position).encode());
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join(WriterConfig::MARKER_FILE), "Sonic").unwrap();
            assert!(is_shortcut_dir(&dir));
        }

        for legacy in ["\u{200B}Tetris (GB)", "\u{2605} Tetris (GB)"] {
            let dir = root.join(legacy);
            std::fs::create_dir_all(&dir).unwrap();
            assert!(is_shortcut_dir(&dir));
        }
    }

    #[test]
    fn test_all_positions_distinct() {
        let base = name("Sonic", "MD", Position::Bottom);
        let encoded: Vec<String> = base.all_positions().map(|n| n.encode()).collect();
        assert_eq!(encoded.len(), 3);
        assert_ne!(encoded[0], encoded[1]);
        assert_ne!(encoded[1], encoded[2]);
        assert_ne!(encoded[0], encoded[2]);
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!(Position::from_str("TOP"), Some(Position::Top));
        assert_eq!(Position::from_str("alpha"), Some(Position::Alphabetical));
        assert_eq!(Position::from_str("bottom"), Some(Position::Bottom));
        assert_eq!(Position::from_str("middle"), None);
    }
}
