use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}, {eta})";

/// Progress bar for a run of sequential item fetches.
///
/// Keeps the default style if the template is rejected.
pub fn item_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
