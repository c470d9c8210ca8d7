//! UI Theme - colors and glyphs used across bvm's output

use crossterm::style::Color;

/// Default theme for bvm output
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for different UI elements
    pub colors: ColorScheme,
    /// Glyphs
    pub icons: Icons,
}

/// Color scheme for UI elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// A stage has started
    pub stage: Color,
    /// Success states
    pub success: Color,
    /// Warning states
    pub warning: Color,
    /// Error states
    pub error: Color,
    /// List bullets
    pub bullet: Color,
    /// LTS release lines
    pub lts: Color,
    /// Released, non-LTS release lines
    pub released: Color,
    /// Release lines whose due date has not passed
    pub unreleased: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            stage: Color::Yellow,
            success: Color::DarkGreen,
            warning: Color::DarkYellow,
            error: Color::DarkRed,
            bullet: Color::DarkCyan,
            lts: Color::Green,
            released: Color::DarkYellow,
            unreleased: Color::DarkGrey,
        }
    }
}

/// Glyphs
#[derive(Debug, Clone)]
pub struct Icons {
    /// List item prefix (` - `)
    pub bullet: &'static str,
}

impl Default for Icons {
    fn default() -> Self {
        Self { bullet: " - " }
    }
}
