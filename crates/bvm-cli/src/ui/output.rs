//! Terminal rendering of pipeline events.
//!
//! [`Output`] is the CLI's [`Reporter`]: stage and status lines go to
//! stdout in the theme's colors, the download percentage is rewritten in
//! place on a single line, and errors go to stderr.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use bvm_core::Reporter;
use bvm_schema::ReleaseLine;
use crossterm::style::{Color, Stylize};

use super::list::{format_item, format_release_line};
use super::progress::format_progress;
use super::theme::Theme;

/// Colorized console output.
#[derive(Debug, Default)]
pub struct Output {
    theme: Theme,
    quiet: bool,
    /// Last progress text drawn, while a progress line is open.
    progress: Mutex<Option<String>>,
}

impl Output {
    /// Create an output handle. With `quiet`, only errors are printed.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            ..Self::default()
        }
    }

    /// Prints a title followed by a bulleted list. This is command output and
    /// is printed even when quiet.
    pub fn print_list(&self, title: &str, items: &[String]) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{title}");
        for item in items {
            let _ = writeln!(out, "{}", format_item(item, &self.theme));
        }
    }

    /// Prints the installable release lines.
    pub fn print_release_lines(&self, title: &str, lines: &[ReleaseLine]) {
        let items: Vec<String> = lines
            .iter()
            .map(|line| format_release_line(line, &self.theme))
            .collect();
        self.print_list(title, &items);
    }

    fn line(&self, msg: &str, color: Color) {
        if self.quiet {
            return;
        }
        self.close_progress();
        println!("{}", msg.with(color));
    }

    /// Terminates an open progress line so the next message starts fresh.
    fn close_progress(&self) {
        let mut progress = self.progress.lock().unwrap_or_else(PoisonError::into_inner);
        if progress.take().is_some() {
            println!();
        }
    }
}

impl Reporter for Output {
    fn stage(&self, msg: &str) {
        self.line(msg, self.theme.colors.stage);
    }

    fn downloading(&self, current: u64, total: Option<u64>) {
        if self.quiet {
            return;
        }
        let text = format_progress(current, total);
        let mut progress = self.progress.lock().unwrap_or_else(PoisonError::into_inner);
        if progress.as_deref() == Some(text.as_str()) {
            return;
        }

        let mut out = io::stdout().lock();
        let _ = write!(out, "\r{text}");
        let _ = out.flush();
        *progress = Some(text);
    }

    fn download_finished(&self) {
        if !self.quiet {
            self.close_progress();
        }
    }

    fn info(&self, msg: &str) {
        if self.quiet {
            return;
        }
        self.close_progress();
        println!("{msg}");
    }

    fn success(&self, msg: &str) {
        self.line(msg, self.theme.colors.success);
    }

    fn warning(&self, msg: &str) {
        self.line(msg, self.theme.colors.warning);
    }

    fn error(&self, msg: &str) {
        self.close_progress();
        eprintln!("{}", msg.with(self.theme.colors.error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_is_closed_once() {
        let output = Output::new(false);
        output.downloading(0, Some(10));
        output.downloading(5, Some(10));
        assert_eq!(
            output.progress.lock().unwrap().as_deref(),
            Some("Downloading: 50.00%")
        );

        output.download_finished();
        assert!(output.progress.lock().unwrap().is_none());
    }

    #[test]
    fn test_quiet_output_draws_no_progress() {
        let output = Output::new(true);
        output.downloading(5, Some(10));
        assert!(output.progress.lock().unwrap().is_none());
    }
}
