use fcalgeo::engine::progress::{Progress, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<30} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("valid progress bar template")
        .progress_chars("▓▒░")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}").expect("valid spinner template")
}

/// A reporter that renders construction progress on stderr: a spinner per
/// phase, upgraded to a bar once the module total is known.
pub fn terminal_reporter() -> ProgressReporter {
    let state: Mutex<Option<ProgressBar>> = Mutex::new(None);
    ProgressReporter::new(move |event| {
        let mut bar = state.lock().expect("progress state lock");
        match event {
            Progress::PhaseStart { name } => {
                let pb = ProgressBar::new_spinner().with_style(spinner_style());
                pb.set_message(name);
                pb.enable_steady_tick(Duration::from_millis(100));
                if let Some(old) = bar.replace(pb) {
                    old.finish_and_clear();
                }
            }
            Progress::ModulesStart { total } => {
                let pb = ProgressBar::new(total as u64).with_style(bar_style());
                pb.set_message("placing modules");
                if let Some(old) = bar.replace(pb) {
                    old.finish_and_clear();
                }
            }
            Progress::ModulePlaced => {
                if let Some(pb) = bar.as_ref() {
                    pb.inc(1);
                }
            }
            Progress::Message(text) => {
                if let Some(pb) = bar.as_ref() {
                    pb.set_message(text);
                }
            }
            Progress::PhaseFinish => {
                if let Some(pb) = bar.take() {
                    pb.finish_and_clear();
                }
            }
        }
    })
}
