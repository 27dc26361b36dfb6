use indicatif::{ProgressBar, ProgressStyle};

/// Returns a styled progress bar, or `None` when there is no terminal to draw on
pub fn progress_bar(len: u64, msg: String) -> Option<ProgressBar> {
    let bar = ProgressBar::new(len);
    if bar.is_hidden() {
        return None;
    }

    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .ok()?
        .progress_chars("##-");

    bar.set_style(style);
    bar.set_message(msg);

    Some(bar)
}
