use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a spinner shown while a search is in flight.
///
/// # Arguments
/// * `query` - The search text, shown next to the spinner.
///
/// # Returns
/// A ticking `ProgressBar` instance.
pub fn search_spinner(query: &str) -> ProgressBar {
    let pb = spinner(query);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Creates a spinner with an unknown length.
fn spinner(query: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} Searching {msg}")
            .expect("Error setting progress style")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠏ "),
    );
    pb.set_message(format!("'{}'", query));

    pb
}
