//! Styled status markers for CLI output.

use console::{style, StyledObject};

/// Green check.
pub fn success() -> StyledObject<&'static str> {
    style("✓").green()
}

/// Cyan arrow for progress lines.
pub fn info() -> StyledObject<&'static str> {
    style("→").cyan()
}

pub fn warn() -> StyledObject<&'static str> {
    style("!").yellow()
}

pub fn error() -> StyledObject<&'static str> {
    style("✗").red()
}

/// Dim arrow for secondary detail.
pub fn dim_arrow() -> StyledObject<&'static str> {
    style("→").dim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_render_their_glyph() {
        console::set_colors_enabled(false);
        assert_eq!(success().to_string(), "✓");
        assert_eq!(info().to_string(), "→");
        assert_eq!(warn().to_string(), "!");
        assert_eq!(error().to_string(), "✗");
        assert_eq!(dim_arrow().to_string(), "→");
    }
}
