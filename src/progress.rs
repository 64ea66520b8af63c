//src/progress.rs

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A steadily ticking spinner on stderr. `color` is an indicatif style name
/// such as `"green"`. Hidden automatically when stderr is not a terminal.
pub fn spinner(color: &str, msg: impl Into<String>) -> ProgressBar {
    let template = format!("{{spinner:.{color}}} {{msg}}");
    let style = ProgressStyle::default_spinner()
        .tick_strings(TICKS)
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(msg.into());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
