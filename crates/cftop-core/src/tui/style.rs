//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::attention::Attention;

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;

    pub const WARM: Color = Color::Yellow;
    pub const HOT: Color = Color::Red;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Header cell of the active sort column.
    pub fn sorted_header() -> Style {
        Self::table_header().add_modifier(Modifier::UNDERLINED)
    }

    /// Approaching a quota (yellow).
    pub fn warm() -> Style {
        Style::default().fg(Theme::WARM)
    }

    /// At or over a quota (red).
    pub fn hot() -> Style {
        Style::default()
            .fg(Theme::HOT)
            .add_modifier(Modifier::BOLD)
    }

    /// Maps a UI-agnostic [`Attention`] to a ratatui [`Style`].
    pub fn from_attention(attention: Attention) -> Style {
        match attention {
            Attention::Normal => Self::default(),
            Attention::Warm => Self::warm(),
            Attention::Hot => Self::hot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attention() {
        assert_eq!(Styles::from_attention(Attention::Normal), Styles::default());
        assert_eq!(Styles::from_attention(Attention::Warm).fg, Some(Color::Yellow));

        let hot = Styles::from_attention(Attention::Hot);
        assert_eq!(hot.fg, Some(Color::Red));
        assert!(hot.add_modifier.contains(Modifier::BOLD));
    }
}
