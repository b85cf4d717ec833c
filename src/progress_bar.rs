use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "{percent:3}% [{bar:.cyan/blue}] {msg} {bytes_per_sec:.green} {bytes:.yellow}/{total_bytes:.magenta} ({eta:.cyan})";

pub fn create_progress_bar(total_size: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress_bar = ProgressBar::new(total_size);

    match ProgressStyle::default_bar().template(TEMPLATE) {
        Ok(style) => progress_bar.set_style(style),
        Err(e) => log::warn!("falling back to the default progress style: {}", e),
    }

    progress_bar
}
