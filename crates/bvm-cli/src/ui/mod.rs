//! UI Module - terminal output
//!
//! - [`theme`] - Colors and glyphs
//! - [`progress`] - Download percentage formatting
//! - [`list`] - Release line and bulleted item formatting
//! - [`output`] - The [`Reporter`](bvm_core::Reporter) the CLI renders through

pub mod list;
pub mod output;
pub mod progress;
pub mod theme;

pub use output::Output;
pub use theme::Theme;
