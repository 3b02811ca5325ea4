use std::io::IsTerminal;

use inksac::prelude::*;

/// Colours user-facing reports. Plain when stdout is not a colour terminal,
/// so a front-end reading our stdout only ever sees text lines.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    plain: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self::detect()
    }
}

impl Palette {
    pub fn detect() -> Self {
        let plain = !std::io::stdout().is_terminal()
            || matches!(
                check_color_support().unwrap_or(ColorSupport::NoColor),
                ColorSupport::NoColor
            );
        Self { plain }
    }

    pub fn plain() -> Self {
        Self { plain: true }
    }

    fn is_plain(&self) -> bool {
        self.plain
    }

    pub fn error(&self, error: &str) -> String {
        if self.is_plain() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn notice(&self, hint: &str) -> String {
        if self.is_plain() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_passes_text_through() {
        let palette = Palette::plain();
        assert_eq!(palette.error("boom"), "boom");
        assert_eq!(palette.notice("hint"), "hint");
    }
}
