use std::{future::Future, time::Duration};

use indicatif::ProgressBar;

/// Shows a spinner with `message` while `future` runs.
pub async fn with_spinner<F, T>(message: String, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let output = future.await;

    spinner.finish_and_clear();
    output
}
