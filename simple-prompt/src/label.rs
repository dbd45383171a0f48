//! Label rendering: question text, optional color, optional retry tag.

use simple_prompt_types::RetryTag;

/// Named colors understood by [`render_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Orange,
    Blue,
    Purple,
    Cyan,
    LightGray,
    DarkGray,
    LightRed,
    LightGreen,
    LightOrange,
    LightBlue,
    LightPurple,
    LightCyan,
}

/// Palette name and SGR parameters for every [`Color`].
static PALETTE: [(Color, &str, &str); 14] = [
    (Color::Red, "red", "0;31"),
    (Color::Green, "green", "0;32"),
    (Color::Orange, "orange", "0;33"),
    (Color::Blue, "blue", "0;34"),
    (Color::Purple, "purple", "0;35"),
    (Color::Cyan, "cyan", "0;36"),
    (Color::LightGray, "lightGray", "0;37"),
    (Color::DarkGray, "darkGray", "1;30"),
    (Color::LightRed, "lightRed", "1;31"),
    (Color::LightGreen, "lightGreen", "1;32"),
    (Color::LightOrange, "lightOrange", "1;33"),
    (Color::LightBlue, "lightBlue", "1;34"),
    (Color::LightPurple, "lightPurple", "1;35"),
    (Color::LightCyan, "lightCyan", "1;36"),
];

const RESET: &str = "\x1b[0m";

impl Color {
    /// Look up a color by its palette name (case-sensitive, e.g. `"lightBlue"`).
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(color, _, _)| *color)
    }

    fn entry(self) -> &'static (Color, &'static str, &'static str) {
        // PALETTE is declared in variant order.
        &PALETTE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// The SGR parameters, e.g. `"1;34"` for `LightBlue`.
    pub fn code(self) -> &'static str {
        self.entry().2
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.name().to_string()
    }
}

/// Resolve a color setting to its style code; unknown names pass through verbatim.
pub fn style_code(color: &str) -> &str {
    Color::from_name(color).map_or(color, |c| c.code())
}

/// Render the text shown before `": "` for one attempt.
pub fn render_label(
    text: &str,
    color: Option<&str>,
    tag: Option<RetryTag>,
    colored: bool,
) -> String {
    let mut label = match color {
        Some(color) if colored => format!("\x1b[{}m{text}{RESET}", style_code(color)),
        _ => text.to_string(),
    };

    if let Some(tag) = tag {
        label.push_str(&format!(" ({tag})"));
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_order_matches_variants() {
        for (color, name, code) in PALETTE {
            assert_eq!(color.name(), name);
            assert_eq!(color.code(), code);
            assert_eq!(Color::from_name(name), Some(color));
        }
    }

    #[test]
    fn plain_label() {
        assert_eq!(render_label("Name", None, None, true), "Name");
    }

    #[test]
    fn named_color() {
        assert_eq!(
            render_label("Name", Some("lightBlue"), None, true),
            "\x1b[1;34mName\x1b[0m"
        );
    }

    #[test]
    fn unknown_color_is_raw_code() {
        assert_eq!(
            render_label("Name", Some("4;33"), None, true),
            "\x1b[4;33mName\x1b[0m"
        );
        assert_eq!(style_code("Red"), "Red");
    }

    #[test]
    fn color_dropped_when_disabled() {
        assert_eq!(render_label("Name", Some("red"), None, false), "Name");
    }

    #[test]
    fn retry_tag_follows_color_reset() {
        assert_eq!(
            render_label("Age", Some("red"), Some(RetryTag::Invalid), true),
            "\x1b[0;31mAge\x1b[0m (invalid)"
        );
        assert_eq!(
            render_label("Name", None, Some(RetryTag::Required), false),
            "Name (required)"
        );
    }
}
