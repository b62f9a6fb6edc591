//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for terminal output formatting. It abstracts terminal capabilities
//! and provides a consistent interface for styled text output.

/// ANSI escape codes for text styling and colors.
///
/// All constants use raw ANSI escape sequences for maximum compatibility.
pub mod colors {
    // Reset
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    // Tag colors (bold reverse video for high visibility badges)
    /// Bold reverse green for STRT tags.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse yellow for FLOR tags (step on a new floor).
    pub const TAG_FLOOR: &str = "\x1b[1;7;33m";
    /// Bold reverse cyan for WALK tags.
    pub const TAG_WALK: &str = "\x1b[1;7;36m";
    /// Bold reverse magenta for GOAL tags.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";

    // Text colors
    /// Bright bold white for emphasis (waypoint names).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (codes, separators).
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for distance labels.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for floor change labels.
    pub const GREEN: &str = "\x1b[32m";
    /// Orange (256-color) for the banner.
    pub const ORANGE: &str = "\x1b[38;5;208m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_floor: &'static str,
    pub tag_walk: &'static str,
    pub tag_goal: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_floor: colors::TAG_FLOOR,
            tag_walk: colors::TAG_WALK,
            tag_goal: colors::TAG_GOAL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_floor: "",
            tag_walk: "",
            tag_goal: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Whether ANSI colors should be emitted.
///
/// Honours `NO_COLOR` (<https://no-color.org/>) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    !std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb"))
}

/// Whether box-drawing characters can be printed.
///
/// Looks for a UTF locale in `LANG` or `LC_ALL`. Windows consoles are
/// assumed capable unless `TERM=dumb`.
#[must_use]
pub fn supports_unicode() -> bool {
    let utf_locale = ["LANG", "LC_ALL"].iter().any(|key| {
        std::env::var(key).is_ok_and(|value| value.to_uppercase().contains("UTF"))
    });
    if utf_locale {
        return true;
    }

    if cfg!(windows) {
        !std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb"))
    } else {
        false
    }
}
