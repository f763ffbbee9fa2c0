use crossterm::style::Color;

/// How the status bar is drawn. No colours at all means reverse video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub(crate) status_fg: Option<Color>,
    pub(crate) status_bg: Option<Color>,
}

impl Theme {
    pub(crate) fn default_theme() -> Self {
        Self::reverse()
    }

    pub(crate) fn reverse() -> Self {
        Self {
            status_fg: None,
            status_bg: None,
        }
    }

    pub(crate) fn light() -> Self {
        Self {
            status_fg: Some(Color::Black),
            status_bg: Some(Color::White),
        }
    }

    pub(crate) fn dark() -> Self {
        Self {
            status_fg: Some(Color::White),
            status_bg: Some(Color::Rgb {
                r: 32,
                g: 32,
                b: 32,
            }),
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "reverse" | "default" => Some(Self::reverse()),
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Explicit colours, or `None` when the bar should fall back to reverse video.
    pub(crate) fn status_colors(&self) -> Option<(Color, Color)> {
        match (self.status_fg, self.status_bg) {
            (Some(fg), Some(bg)) => Some((fg, bg)),
            (Some(fg), None) => Some((fg, Color::Reset)),
            (None, Some(bg)) => Some((Color::Reset, bg)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Theme::from_name("Dark"), Some(Theme::dark()));
        assert_eq!(Theme::from_name("REVERSE"), Some(Theme::reverse()));
        assert_eq!(Theme::from_name("neon"), None);
    }

    #[test]
    fn reverse_theme_has_no_explicit_colors() {
        assert_eq!(Theme::default_theme().status_colors(), None);
        assert_eq!(
            Theme::light().status_colors(),
            Some((Color::Black, Color::White))
        );
    }
}
