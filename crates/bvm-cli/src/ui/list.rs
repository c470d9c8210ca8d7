//! Release line and installed entry formatting.

use bvm_schema::{LTS_SUFFIX, ReleaseLine};
use crossterm::style::Stylize;

use super::theme::Theme;

/// `X.Y` followed by ` LTS` for long-term support lines.
///
/// Released lines are orange, or light green when LTS; unreleased lines are
/// dark grey.
pub fn format_release_line(line: &ReleaseLine, theme: &Theme) -> String {
    let colors = &theme.colors;
    let (version_color, suffix_color) = match (line.released, line.is_lts) {
        (true, true) => (colors.lts, colors.lts),
        (true, false) => (colors.released, colors.lts),
        (false, _) => (colors.unreleased, colors.unreleased),
    };
    let suffix = if line.is_lts { LTS_SUFFIX } else { "" };

    format!(
        "{}{}",
        line.version_number.as_str().with(version_color),
        suffix.with(suffix_color)
    )
}

/// A bulleted list item.
pub fn format_item(item: &str, theme: &Theme) -> String {
    format!("{}{item}", theme.icons.bullet.with(theme.colors.bullet))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(version: &str, is_lts: bool, released: bool) -> ReleaseLine {
        ReleaseLine {
            version_number: version.to_string(),
            is_lts,
            released,
            link: None,
        }
    }

    #[test]
    fn test_lts_lines_carry_suffix() {
        let theme = Theme::default();
        let text = format_release_line(&line("4.2", true, true), &theme);
        assert!(text.contains("4.2"));
        assert!(text.contains(" LTS"));
    }

    #[test]
    fn test_plain_lines_have_no_suffix() {
        let theme = Theme::default();
        let text = format_release_line(&line("4.3", false, false), &theme);
        assert!(text.contains("4.3"));
        assert!(!text.contains("LTS"));
    }

    #[test]
    fn test_item_has_bullet() {
        let theme = Theme::default();
        let text = format_item("blender-4.2.2-linux-x64", &theme);
        assert!(text.contains(" - "));
        assert!(text.ends_with("blender-4.2.2-linux-x64"));
    }
}
