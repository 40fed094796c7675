//! Progress spinner using indicatif.
//!
//! Draws on stderr, so the report on stdout stays clean when redirected.

use indicatif::{ProgressBar, ProgressStyle};

/// A progress reporter that wraps an indicatif spinner.
pub struct BenchProgress {
    bar: ProgressBar,
}

impl BenchProgress {
    /// Create a new progress spinner.
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { bar }
    }

    /// A spinner that never draws, for tests and non-interactive runs.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Run `f` with the spinner cleared so stdout lines are not interleaved with it.
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        self.bar.suspend(f)
    }

    /// Finish and clear the progress spinner.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Return a callback closure for use with run_test.
    pub fn callback(&self) -> impl Fn(&str) + '_ {
        move |msg: &str| {
            log::debug!("{}", msg);
            self.bar.set_message(msg.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner_runs_suspended_closure() {
        let progress = BenchProgress::hidden();
        let cb = progress.callback();
        cb("SingleScalar u32 @ 5K: measuring (100 runs)");
        assert_eq!(progress.suspend(|| 7), 7);
        progress.finish();
    }
}
