// Terminal feedback while a request is in flight. indicatif draws to
// stderr and hides itself when stderr is not a terminal, so piping the
// tool's output stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run `f` behind a spinner showing `message`. The spinner is cleared
/// whatever `f` returns.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}
