//! Console progress output.
//!
//! Progress lines go to stdout so they interleave with the report text;
//! the spinner lives on stderr and is hidden when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct Progress {
    quiet: bool,
    bar: ProgressBar,
}

impl Progress {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::with_template("{spinner:.green} [{pos}/{len}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar
        };

        Self { quiet, bar }
    }

    /// Progress that prints nothing at all.
    pub fn silent() -> Self {
        Self::new(true)
    }

    /// Print one progress line to stdout.
    pub fn line(&self, message: impl Display) {
        if !self.quiet {
            self.bar.suspend(|| println!("{}", message));
        }
    }

    pub fn blank(&self) {
        self.line("");
    }

    /// Start counting `len` steps.
    pub fn start(&self, len: usize) {
        self.bar.reset();
        self.bar.set_length(len as u64);
    }

    pub fn step(&self, message: &'static str) {
        self.bar.set_message(message);
    }

    pub fn advance(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_progress_is_hidden() {
        let progress = Progress::silent();
        assert!(progress.quiet);
        assert!(progress.bar.is_hidden());
    }

    #[test]
    fn test_steps_are_counted() {
        let progress = Progress::silent();
        progress.start(3);
        progress.step("first");
        progress.advance();
        progress.advance();

        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.length(), Some(3));
        progress.finish();
    }
}
